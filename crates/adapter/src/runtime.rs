//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server.

use std::sync::{Arc, Mutex};

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::protocol::{AckMessage, ErrorMessage, ObservationMessage};
use crate::server::{run_server, ServerConfig, ServerState};
use crate::types::CellPos;

/// Command delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

/// Inbound payload.
#[derive(Debug, Clone)]
pub enum InboundPayload {
    Command(ClientCommand),
    /// A freshly handshaken streaming client wants the current state.
    SnapshotRequest,
}

/// Command payload mapped from the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Swap { from: CellPos, to: CellPos },
    Reset,
    Daily,
    Chill { on: bool },
    Seed { value: Option<u32> },
    Hint,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClient { client_id: usize, line: String },
    Broadcast { line: String },
    ToClientAck { client_id: usize, ack: AckMessage },
    ToClientError { client_id: usize, err: ErrorMessage },
    ToClientObservation { client_id: usize, obs: ObservationMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Connection counts mirrored for the HUD status block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdapterStatus {
    pub client_count: u16,
    pub streaming_count: u16,
    pub controller_id: Option<usize>,
}

pub type SharedStatus = Arc<Mutex<AdapterStatus>>;

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    status: SharedStatus,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns None if `CANDYMON_AI_DISABLED` is set.
    pub fn start_from_env() -> Option<Self> {
        if ServerState::is_disabled() {
            return None;
        }

        let config = ServerConfig::from_env();
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let status: SharedStatus = Arc::new(Mutex::new(AdapterStatus::default()));
        let server_status = Arc::clone(&status);

        let rt = Runtime::new().expect("Failed to create tokio runtime");
        rt.spawn(async move {
            let _ = run_server(config, cmd_tx, out_rx, None, Some(server_status)).await;
        });

        Some(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            status,
        })
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    /// Snapshot of connection counts for rendering.
    pub fn status(&self) -> AdapterStatus {
        self.status.lock().map(|s| *s).unwrap_or_default()
    }
}
