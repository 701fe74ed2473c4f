//! Protocol module - JSON message types for the remote control adapter
//!
//! Implements a line-delimited JSON protocol for AI and tooling clients.
//! All messages have: type, seq (sequence number), ts (timestamp in ms)

use serde::{Deserialize, Serialize};

use crate::core::{CascadeReport, Mission, MissionGoal, SwapError};
use crate::types::{Kind, Special, GRID_SIZE};

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelloType {
    #[serde(rename = "hello")]
    Hello,
}

impl Default for HelloType {
    fn default() -> Self {
        Self::Hello
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    #[serde(rename = "command")]
    Command,
}

impl Default for CommandType {
    fn default() -> Self {
        Self::Command
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    #[serde(rename = "control")]
    Control,
}

impl Default for ControlType {
    fn default() -> Self {
        Self::Control
    }
}

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    pub formats: FormatsList,
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatsList {
    pub json: bool,
}

impl<'de> Deserialize<'de> for FormatsList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = FormatsList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of format strings")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut json = false;
                while let Some(v) = seq.next_element::<&str>()? {
                    if v.eq_ignore_ascii_case("json") {
                        json = true;
                    }
                }
                Ok(FormatsList { json })
            }
        }

        deserializer.deserialize_seq(V)
    }
}

impl Serialize for FormatsList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(if self.json { 1 } else { 0 }))?;
        if self.json {
            seq.serialize_element("json")?;
        }
        seq.end()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    pub stream_observations: bool,
    /// Optional role request for deterministic controller/observer negotiation.
    /// The adapter treats this as a hint; the first client still wins control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RequestedRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedRole {
    Auto,
    Controller,
    Observer,
}

impl<'de> Deserialize<'de> for RequestedRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if s.eq_ignore_ascii_case("controller") {
            Ok(Self::Controller)
        } else if s.eq_ignore_ascii_case("observer") {
            Ok(Self::Observer)
        } else {
            Err(serde::de::Error::custom("invalid requested role"))
        }
    }
}

impl Serialize for RequestedRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RequestedRole::Auto => serializer.serialize_str("auto"),
            RequestedRole::Controller => serializer.serialize_str("controller"),
            RequestedRole::Observer => serializer.serialize_str("observer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignedRole {
    #[serde(rename = "controller")]
    Controller,
    #[serde(rename = "observer")]
    Observer,
}

/// Command message (controller only)
///
/// The `op` field selects the operation; payload fields are optional and
/// validated per op when the command is mapped for the game loop.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub ts: u64,
    pub op: OpName,
    /// Swap origin as [row, col]
    #[serde(default)]
    pub from: Option<[u8; 2]>,
    /// Swap destination as [row, col]
    #[serde(default)]
    pub to: Option<[u8; 2]>,
    /// Chill mode flag
    #[serde(default)]
    pub on: Option<bool>,
    /// Seed override; null or absent reverts to entropy seeding
    #[serde(default)]
    pub value: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpName {
    Swap,
    Reset,
    Daily,
    Chill,
    Seed,
    Hint,
}

impl<'de> Deserialize<'de> for OpName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("swap") {
            Ok(Self::Swap)
        } else if s.eq_ignore_ascii_case("reset") {
            Ok(Self::Reset)
        } else if s.eq_ignore_ascii_case("daily") {
            Ok(Self::Daily)
        } else if s.eq_ignore_ascii_case("chill") {
            Ok(Self::Chill)
        } else if s.eq_ignore_ascii_case("seed") {
            Ok(Self::Seed)
        } else if s.eq_ignore_ascii_case("hint") {
            Ok(Self::Hint)
        } else {
            Err(serde::de::Error::custom("unknown op"))
        }
    }
}

/// Control message (claim/release controller status)
#[derive(Debug, Clone, Deserialize)]
pub struct ControlMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ControlType,
    pub seq: u64,
    pub ts: u64,
    pub action: ControlAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Claim,
    Release,
}

impl<'de> Deserialize<'de> for ControlAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("claim") {
            Ok(Self::Claim)
        } else if s.eq_ignore_ascii_case("release") {
            Ok(Self::Release)
        } else {
            Err(serde::de::Error::custom("invalid control action"))
        }
    }
}

impl Serialize for ControlAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ControlAction::Claim => serializer.serialize_str("claim"),
            ControlAction::Release => serializer.serialize_str("release"),
        }
    }
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "not_controller")]
    NotController,
    #[serde(rename = "controller_active")]
    ControllerActive,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "backpressure")]
    Backpressure,
    #[serde(rename = "out_of_bounds")]
    OutOfBounds,
    #[serde(rename = "not_adjacent")]
    NotAdjacent,
    #[serde(rename = "same_cell")]
    SameCell,
    #[serde(rename = "no_match")]
    NoMatch,
    #[serde(rename = "game_over")]
    GameOver,
}

impl From<SwapError> for ErrorCode {
    fn from(value: SwapError) -> Self {
        match value {
            SwapError::OutOfBounds => Self::OutOfBounds,
            SwapError::NotAdjacent => Self::NotAdjacent,
            SwapError::SameCell => Self::SameCell,
            SwapError::NoMatch => Self::NoMatch,
            SwapError::GameOver => Self::GameOver,
        }
    }
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AssignedRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<u64>,
    pub game_id: String,
    pub capabilities: ServerCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub formats: [CapabilityFormat; 1],
    pub features: Vec<CapabilityFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityFormat {
    #[serde(rename = "json")]
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityFeature {
    #[serde(rename = "specials")]
    Specials,
    #[serde(rename = "missions")]
    Missions,
    #[serde(rename = "meter")]
    Meter,
    #[serde(rename = "fever")]
    Fever,
    #[serde(rename = "streak")]
    Streak,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "hint")]
    Hint,
    #[serde(rename = "last_match")]
    LastMatch,
    #[serde(rename = "state_hash")]
    StateHash,
    #[serde(rename = "best")]
    Best,
}

/// Acknowledgment for command receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Game state observation (sent to all streaming clients)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    #[serde(rename = "game_over")]
    pub game_over: bool,
    pub seed: u32,
    pub daily: bool,
    pub board: BoardSnapshot,
    pub score: u32,
    pub best: u32,
    #[serde(rename = "moves_left")]
    pub moves_left: i32,
    #[serde(rename = "unlimited_moves")]
    pub unlimited_moves: bool,
    pub level: u32,
    pub goal: u32,
    pub meter: u8,
    pub fever: bool,
    #[serde(rename = "fever_remaining_ms")]
    pub fever_remaining_ms: u32,
    pub streak: u32,
    pub missions: [MissionSnapshot; 3],
    /// Suggested swap as [[row, col], [row, col]], present after a hint request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<[[u8; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "last_match")]
    pub last_match: Option<LastMatch>,
    #[serde(rename = "state_hash")]
    pub state_hash: StateHash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// -1 = empty, 0..7 = candy kind
    pub kinds: [[i8; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub specials: [[SpecialLower; GRID_SIZE as usize]; GRID_SIZE as usize],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialLower {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "line_h")]
    LineH,
    #[serde(rename = "line_v")]
    LineV,
    #[serde(rename = "bomb")]
    Bomb,
}

impl From<Special> for SpecialLower {
    fn from(value: Special) -> Self {
        match value {
            Special::None => Self::None,
            Special::LineH => Self::LineH,
            Special::LineV => Self::LineV,
            Special::Bomb => Self::Bomb,
        }
    }
}

impl From<SpecialLower> for Special {
    fn from(value: SpecialLower) -> Self {
        match value {
            SpecialLower::None => Special::None,
            SpecialLower::LineH => Special::LineH,
            SpecialLower::LineV => Special::LineV,
            SpecialLower::Bomb => Special::Bomb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub goal: MissionGoalLower,
    /// Candy kind for clear-kind missions, absent otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    pub progress: u32,
    pub target: u32,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionGoalLower {
    #[serde(rename = "clear_kind")]
    ClearKind,
    #[serde(rename = "four_match")]
    FourMatch,
    #[serde(rename = "combo_two")]
    ComboTwo,
}

impl From<Mission> for MissionSnapshot {
    fn from(value: Mission) -> Self {
        let (goal, kind) = match value.goal {
            MissionGoal::ClearKind(k) => (MissionGoalLower::ClearKind, Some(k)),
            MissionGoal::FourMatch => (MissionGoalLower::FourMatch, None),
            MissionGoal::ComboTwo => (MissionGoalLower::ComboTwo, None),
        };
        Self {
            goal,
            kind,
            progress: value.progress,
            target: value.target,
            done: value.done,
        }
    }
}

/// Summary of the cascade resolved by the most recent accepted swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMatch {
    pub steps: u32,
    pub cleared: u32,
    #[serde(rename = "score_gained")]
    pub score_gained: u32,
    #[serde(rename = "leveled_up")]
    pub leveled_up: bool,
    pub reshuffled: bool,
}

impl From<CascadeReport> for LastMatch {
    fn from(value: CascadeReport) -> Self {
        Self {
            steps: value.steps,
            cleared: value.cleared,
            score_gained: value.score_gained,
            leveled_up: value.leveled_up,
            reshuffled: value.reshuffled,
        }
    }
}

/// Deterministic state hash serialized as lowercase hex (without heap allocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [0u8; 16];
        let mut v = self.0;
        for i in 0..16 {
            let nib = (v & 0x0f) as usize;
            buf[15 - i] = HEX[nib];
            v >>= 4;
        }
        let s = std::str::from_utf8(&buf).expect("hex is valid utf8");
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        let s = s.trim();
        let mut v: u64 = 0;
        for b in s.as_bytes() {
            let d = match b {
                b'0'..=b'9' => (b - b'0') as u64,
                b'a'..=b'f' => (b - b'a' + 10) as u64,
                b'A'..=b'F' => (b - b'A' + 10) as u64,
                _ => return Err(serde::de::Error::custom("invalid hex")),
            };
            v = (v << 4) | d;
        }
        Ok(StateHash(v))
    }
}

// ============== Message Parsing ==============

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "control")]
        Control(ControlMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Control(m)) => Ok(ParsedMessage::Control(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or("unknown");
            if msg_type != "hello" && msg_type != "command" && msg_type != "control" {
                #[derive(Debug, Deserialize)]
                struct SeqOnly {
                    seq: Option<u64>,
                }
                let seq = serde_json::from_str::<SeqOnly>(json)?.seq.unwrap_or(0);
                return Ok(ParsedMessage::Unknown(UnknownMessage { seq }));
            }
            Err(e)
        }
    }
}

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Control(ControlMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        formats: FormatsList { json: true },
        requested: RequestedCapabilities {
            stream_observations: true,
            role: Some(RequestedRole::Auto),
        },
    }
}

/// Create a welcome message
pub fn create_welcome(
    seq: u64,
    protocol_version: &str,
    client_id: u64,
    role: AssignedRole,
    controller_id: Option<u64>,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        client_id: Some(client_id),
        role: Some(role),
        controller_id,
        game_id: "tui-candymon".to_string(),
        capabilities: ServerCapabilities {
            formats: [CapabilityFormat::Json],
            features: vec![
                CapabilityFeature::Specials,
                CapabilityFeature::Missions,
                CapabilityFeature::Meter,
                CapabilityFeature::Fever,
                CapabilityFeature::Streak,
                CapabilityFeature::Daily,
                CapabilityFeature::Hint,
                CapabilityFeature::LastMatch,
                CapabilityFeature::StateHash,
                CapabilityFeature::Best,
            ],
        },
    }
}

/// Create an acknowledgment
pub fn create_ack(seq: u64, _command_seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
