//! TCP server for the remote control adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::core::SessionSnapshot;
use crate::protocol::*;
use crate::runtime::{
    AdapterStatus, ClientCommand, InboundCommand, InboundPayload, OutboundMessage, SharedStatus,
};
use crate::types::{CellPos, GRID_SIZE};

/// Stable 64-bit FNV-1a hasher for deterministic `state_hash`.
///
/// We avoid `DefaultHasher` here since its output is not guaranteed stable across
/// Rust versions/platforms.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let mut end = 0usize;
    for b in rest.as_bytes() {
        if b.is_ascii_digit() {
            end += 1;
        } else {
            break;
        }
    }
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl std::hash::Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            protocol_version: "1.0.0".to_string(),
            max_pending_commands: 10,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("CANDYMON_AI_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("CANDYMON_AI_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7878);

        let max_pending_commands = env::var("CANDYMON_AI_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Self {
            host,
            port,
            protocol_version: "1.0.0".to_string(),
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

/// Shared server state
pub struct ServerState {
    config: ServerConfig,
    clients: Arc<RwLock<Vec<ClientHandle>>>,
    controller: Arc<RwLock<Option<usize>>>, // Client id, not index
    status: Option<SharedStatus>,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            clients: Arc::new(RwLock::new(Vec::new())),
            controller: Arc::new(RwLock::new(None)),
            status: None,
        }
    }

    /// Check if remote control is disabled via environment
    pub fn is_disabled() -> bool {
        std::env::var("CANDYMON_AI_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }
}

async fn is_handshaken(state: &Arc<ServerState>, client_id: usize) -> bool {
    let clients = state.clients.read().await;
    clients
        .iter()
        .find(|c| c.id == client_id)
        .map(|c| c.handshaken)
        .unwrap_or(false)
}

async fn check_and_update_seq(state: &Arc<ServerState>, client_id: usize, seq: u64) -> bool {
    let mut clients = state.clients.write().await;
    let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
        return true;
    };

    match client.last_seq {
        None => {
            client.last_seq = Some(seq);
            true
        }
        Some(prev) => {
            if seq <= prev {
                false
            } else {
                client.last_seq = Some(seq);
                true
            }
        }
    }
}

/// Mirror connection counts into the shared status handle for the HUD.
async fn refresh_status(state: &Arc<ServerState>) {
    let Some(status) = state.status.as_ref() else {
        return;
    };
    let controller = *state.controller.read().await;
    let clients = state.clients.read().await;
    let snapshot = AdapterStatus {
        client_count: clients.len() as u16,
        streaming_count: clients.iter().filter(|c| c.stream_observations).count() as u16,
        controller_id: controller,
    };
    drop(clients);
    if let Ok(mut s) = status.lock() {
        *s = snapshot;
    }
}

/// Handle to a connected client
pub struct ClientHandle {
    pub id: usize,
    pub addr: SocketAddr,
    pub is_controller: bool,
    pub stream_observations: bool,
    pub handshaken: bool,
    pub last_seq: Option<u64>,
    pub tx: mpsc::UnboundedSender<ClientOutbound>, // Channel to send messages to client
}

#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Line(String),
    Ack(AckMessage),
    Error(ErrorMessage),
    Welcome(WelcomeMessage),
    Observation(ObservationMessage),
}

/// Start the TCP server
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
    status: Option<SharedStatus>,
) -> anyhow::Result<()> {
    if ServerState::is_disabled() {
        println!("[Adapter] Remote control disabled via CANDYMON_AI_DISABLED");
        // Just drain the command channel to prevent blocking
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
        }
    }

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await?;
    let bound = listener.local_addr()?;
    println!("[Adapter] TCP server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut state = ServerState::new(config);
    state.status = status;
    let state = Arc::new(state);
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClient { client_id, line } => {
                        let clients = state.clients.read().await;
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(ClientOutbound::Line(line));
                        }
                    }
                    OutboundMessage::Broadcast { line } => {
                        let clients = state.clients.read().await;
                        for c in clients.iter() {
                            if c.stream_observations {
                                let _ = c.tx.send(ClientOutbound::Line(line.clone()));
                            }
                        }
                    }
                    OutboundMessage::ToClientObservation { client_id, obs } => {
                        let clients = state.clients.read().await;
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(ClientOutbound::Observation(obs));
                        }
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        let clients = state.clients.read().await;
                        for c in clients.iter() {
                            if c.stream_observations {
                                let _ = c.tx.send(ClientOutbound::Observation(obs.clone()));
                            }
                        }
                    }
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        let clients = state.clients.read().await;
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(ClientOutbound::Ack(ack));
                        }
                    }
                    OutboundMessage::ToClientError { client_id, err } => {
                        let clients = state.clients.read().await;
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(ClientOutbound::Error(err));
                        }
                    }
                }
            }
        });
    }

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        println!("[Adapter] Client {} connected from {}", client_id, addr);

        let state_clone = Arc::clone(&state);
        let command_tx = command_tx.clone();

        // Spawn task to handle this client
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, addr, client_id, state_clone, command_tx).await {
                eprintln!("[Adapter] Client {} error: {}", client_id, e);
            }
            println!("[Adapter] Client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    // Add client to list
    let client_handle = ClientHandle {
        id: client_id,
        addr,
        is_controller: false,
        stream_observations: false,
        handshaken: false,
        last_seq: None,
        tx: tx.clone(),
    };

    {
        let mut clients = state.clients.write().await;
        clients.push(client_handle);
    }
    refresh_status(&state).await;

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            match msg {
                ClientOutbound::Line(line) => {
                    if writer.write_all(line.as_bytes()).await.is_err() {
                        break;
                    }
                }
                ClientOutbound::Ack(ack) => {
                    buf.clear();
                    if serde_json::to_writer(&mut buf, &ack).is_err() {
                        continue;
                    }
                    if writer.write_all(&buf).await.is_err() {
                        break;
                    }
                }
                ClientOutbound::Error(err) => {
                    buf.clear();
                    if serde_json::to_writer(&mut buf, &err).is_err() {
                        continue;
                    }
                    if writer.write_all(&buf).await.is_err() {
                        break;
                    }
                }
                ClientOutbound::Welcome(welcome) => {
                    buf.clear();
                    if serde_json::to_writer(&mut buf, &welcome).is_err() {
                        continue;
                    }
                    if writer.write_all(&buf).await.is_err() {
                        break;
                    }
                }
                ClientOutbound::Observation(obs) => {
                    buf.clear();
                    if serde_json::to_writer(&mut buf, &obs).is_err() {
                        continue;
                    }
                    if writer.write_all(&buf).await.is_err() {
                        break;
                    }
                }
            }

            if writer.write_all(b"\n").await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            // Client disconnected
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Parse the message
        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                // Sequencing: enforce monotonic seq per sender.
                if is_handshaken(&state, client_id).await
                    && !check_and_update_seq(&state, client_id, hello.seq).await
                {
                    let error = create_error(
                        hello.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }

                // Validate protocol version
                if !hello.protocol_version.starts_with("1.") {
                    let error = create_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    break;
                }

                // Mark client as handshaken.
                {
                    let mut clients = state.clients.write().await;
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_observations = hello.requested.stream_observations;
                    }
                }

                // First client to hello becomes controller
                let (role, controller_id) = {
                    let mut controller = state.controller.write().await;
                    if controller.is_none() {
                        *controller = Some(client_id);
                        let mut clients = state.clients.write().await;
                        if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                            client.is_controller = true;
                        }
                        println!("[Adapter] Client {} is now controller", client_id);
                        (AssignedRole::Controller, Some(client_id as u64))
                    } else {
                        (AssignedRole::Observer, controller.map(|id| id as u64))
                    }
                };
                refresh_status(&state).await;

                // Send welcome
                let welcome = create_welcome(
                    hello.seq,
                    &state.config.protocol_version,
                    client_id as u64,
                    role,
                    controller_id,
                );
                let _ = tx.send(ClientOutbound::Welcome(welcome));

                // Request an immediate snapshot for this client if desired.
                if hello.requested.stream_observations {
                    let _ = command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    });
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                // Handshake required.
                let handshaken = is_handshaken(&state, client_id).await;
                if !handshaken {
                    let error = create_error(
                        cmd.seq,
                        ErrorCode::HandshakeRequired,
                        "Send hello before command",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }

                // Sequencing: enforce monotonic seq per sender.
                if !check_and_update_seq(&state, client_id, cmd.seq).await {
                    let error = create_error(
                        cmd.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }

                // Check if client is controller
                let is_controller = {
                    let clients = state.clients.read().await;
                    clients
                        .iter()
                        .find(|c| c.id == client_id)
                        .map(|c| c.is_controller)
                        .unwrap_or(false)
                };

                if !is_controller {
                    let error = create_error(
                        cmd.seq,
                        ErrorCode::NotController,
                        "Only controller may send commands",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }

                // Map command into an inbound command for the game loop.
                let mapped = match map_command(&cmd) {
                    Ok(c) => c,
                    Err((code, message)) => {
                        let error = create_error(cmd.seq, code, &message);
                        let _ = tx.send(ClientOutbound::Error(error));
                        continue;
                    }
                };

                // Backpressure: bounded queue.
                match command_tx.try_send(InboundCommand {
                    client_id,
                    seq: cmd.seq,
                    payload: InboundPayload::Command(mapped),
                }) {
                    Ok(()) => {
                        // Ack will be sent by the game loop after the command is applied.
                    }
                    Err(_) => {
                        let error =
                            create_error(cmd.seq, ErrorCode::Backpressure, "Command queue is full");
                        let _ = tx.send(ClientOutbound::Error(error));
                    }
                }
            }

            Ok(ParsedMessage::Control(ctrl)) => {
                // Handshake required.
                let handshaken = is_handshaken(&state, client_id).await;
                if !handshaken {
                    let error = create_error(
                        ctrl.seq,
                        ErrorCode::HandshakeRequired,
                        "Send hello before control",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }

                // Sequencing: enforce monotonic seq per sender.
                if !check_and_update_seq(&state, client_id, ctrl.seq).await {
                    let error = create_error(
                        ctrl.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }

                match ctrl.action {
                    ControlAction::Claim => {
                        let mut controller = state.controller.write().await;
                        if controller.is_none() {
                            *controller = Some(client_id);
                            let mut clients = state.clients.write().await;
                            if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                                client.is_controller = true;
                            }
                            drop(clients);
                            drop(controller);
                            refresh_status(&state).await;
                            let ack = create_ack(ctrl.seq, ctrl.seq);
                            let _ = tx.send(ClientOutbound::Ack(ack));
                        } else {
                            let error = create_error(
                                ctrl.seq,
                                ErrorCode::ControllerActive,
                                "Controller already assigned",
                            );
                            let _ = tx.send(ClientOutbound::Error(error));
                        }
                    }
                    ControlAction::Release => {
                        let mut controller = state.controller.write().await;
                        if *controller == Some(client_id) {
                            *controller = None;
                            let mut clients = state.clients.write().await;
                            if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                                client.is_controller = false;
                            }
                            drop(clients);
                            drop(controller);
                            refresh_status(&state).await;
                            let ack = create_ack(ctrl.seq, ctrl.seq);
                            let _ = tx.send(ClientOutbound::Ack(ack));
                        } else {
                            let error = create_error(
                                ctrl.seq,
                                ErrorCode::NotController,
                                "Only controller may release",
                            );
                            let _ = tx.send(ClientOutbound::Error(error));
                        }
                    }
                }
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                let error = create_error(
                    seq,
                    ErrorCode::InvalidCommand,
                    &format!("JSON parse error: {}", e),
                );
                let _ = tx.send(ClientOutbound::Error(error));
            }

            Ok(ParsedMessage::Unknown(msg)) => {
                if is_handshaken(&state, client_id).await
                    && !check_and_update_seq(&state, client_id, msg.seq).await
                {
                    let error = create_error(
                        msg.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    );
                    let _ = tx.send(ClientOutbound::Error(error));
                    continue;
                }
                let error = create_error(msg.seq, ErrorCode::InvalidCommand, "Unknown message type");
                let _ = tx.send(ClientOutbound::Error(error));
            }
        }
    }

    // Clean up: remove client and release/promote controller if needed.
    {
        let mut controller = state.controller.write().await;
        let mut clients = state.clients.write().await;

        let was_controller = *controller == Some(client_id);
        clients.retain(|c| c.id != client_id);

        if was_controller {
            // Promote the next available client (lowest id) to controller.
            let next_id = clients.iter().map(|c| c.id).min();
            *controller = next_id;
            if let Some(new_id) = next_id {
                if let Some(c) = clients.iter_mut().find(|c| c.id == new_id) {
                    c.is_controller = true;
                }
                println!("[Adapter] Controller {} promoted", new_id);
            } else {
                println!("[Adapter] Controller {} released", client_id);
            }
        }
    }
    refresh_status(&state).await;

    // Cancel write task
    drop(tx);
    let _ = write_task.await;

    Ok(())
}

/// Map a protocol command into a game loop command.
fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, (ErrorCode, String)> {
    match cmd.op {
        OpName::Swap => {
            let (Some(from), Some(to)) = (cmd.from, cmd.to) else {
                return Err((
                    ErrorCode::InvalidCommand,
                    "Swap needs from and to".to_string(),
                ));
            };
            Ok(ClientCommand::Swap {
                from: CellPos::new(from[0], from[1]),
                to: CellPos::new(to[0], to[1]),
            })
        }
        OpName::Reset => Ok(ClientCommand::Reset),
        OpName::Daily => Ok(ClientCommand::Daily),
        OpName::Chill => {
            let Some(on) = cmd.on else {
                return Err((ErrorCode::InvalidCommand, "Chill needs on".to_string()));
            };
            Ok(ClientCommand::Chill { on })
        }
        OpName::Seed => Ok(ClientCommand::Seed { value: cmd.value }),
        OpName::Hint => Ok(ClientCommand::Hint),
    }
}

/// Build an observation message from a session snapshot
pub fn build_observation(
    seq: u64,
    snap: &SessionSnapshot,
    hint: Option<[[u8; 2]; 2]>,
    last_match: Option<LastMatch>,
) -> ObservationMessage {
    use std::hash::Hasher;

    let specials: [[SpecialLower; GRID_SIZE as usize]; GRID_SIZE as usize] =
        std::array::from_fn(|r| std::array::from_fn(|c| SpecialLower::from(snap.specials[r][c])));

    let missions: [MissionSnapshot; 3] =
        std::array::from_fn(|i| MissionSnapshot::from(snap.missions[i]));

    // Hash covers the board and the cleared/spent counters, so two
    // observations of the same position always agree. Bytes are fed in a
    // fixed order so the hash is stable across hosts.
    let mut hasher = Fnv1aHasher::new();
    for row in &snap.kinds {
        for &kind in row {
            hasher.write_u8(kind as u8);
        }
    }
    hasher.write(&snap.score.to_le_bytes());
    hasher.write(&snap.moves_left.to_le_bytes());
    let state_hash = StateHash(hasher.finish());

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        playable: snap.playable(),
        game_over: snap.game_over,
        seed: snap.seed,
        daily: snap.daily,
        board: BoardSnapshot {
            width: GRID_SIZE,
            height: GRID_SIZE,
            kinds: snap.kinds,
            specials,
        },
        score: snap.score,
        best: snap.best,
        moves_left: snap.moves_left,
        unlimited_moves: snap.unlimited_moves,
        level: snap.level,
        goal: snap.goal,
        meter: snap.meter,
        fever: snap.fever,
        fever_remaining_ms: snap.fever_remaining_ms,
        streak: snap.streak,
        missions,
        hint,
        last_match,
        state_hash,
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
