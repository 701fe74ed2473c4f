//! Adapter module - remote control via TCP socket with JSON protocol
//!
//! This module lets external agents and tools drive the puzzle session
//! through a TCP socket connection. Bots can play full games, harvest
//! deterministic observations for training, or just watch.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Controller Assignment**: First client to hello becomes the controller
//! 4. **Observation Streaming**: Server sends a board observation after every
//!    state change to all streaming clients
//! 5. **Commanding**: Controller sends commands to play the game
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: Initial handshake with client info and requested capabilities
//! - **command**: One operation per message, selected by `op`:
//!   `swap` (with `from`/`to` as `[row, col]`), `reset`, `daily`,
//!   `chill` (with `on`), `seed` (with `value`, null reverts to entropy), `hint`
//! - **control**: Claim or release controller status
//!
//! ## Server → Client
//!
//! - **welcome**: Response to hello with server capabilities
//! - **observation**: Full session snapshot (board kinds and special tags as
//!   8x8 arrays, score, moves, level, meter, missions, state hash, etc.)
//! - **ack**: Command acknowledgment, sent once the game loop applies it
//! - **error**: Error response with code and message; rejected swaps carry
//!   the rejection reason as the code (`no_match`, `not_adjacent`, ...)
//!
//! # Environment Variables
//!
//! Configure the adapter using environment variables:
//!
//! - `CANDYMON_AI_HOST`: Bind address (default: "127.0.0.1")
//! - `CANDYMON_AI_PORT`: Port number (default: 7878)
//! - `CANDYMON_AI_MAX_PENDING`: Command queue depth before backpressure (default: 10)
//! - `CANDYMON_AI_DISABLED`: Set to "1" or "true" to disable adapter entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":1234567890,"client":{"name":"my-bot","version":"1.0.0"},...}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1234567890,"protocol_version":"1.0.0",...}
//! Server -> Client: {"type":"observation","seq":2,"ts":1234567891,"board":{...},"score":0,...}
//! Client -> Server: {"type":"command","seq":2,"ts":1234567892,"op":"swap","from":[3,4],"to":[3,5]}
//! Server -> Client: {"type":"ack","seq":3,"ts":1234567892,"status":"ok"}
//! ```
//!
//! # Implementation
//!
//! - Uses **tokio** for async networking
//! - Multiple clients can connect (only one controller at a time)
//! - Controller can release control for another client to take over
//! - See [`protocol`] for message structure definitions
//! - See [`server`] for TCP server implementation
//!
//! # Testing
//!
//! Connect to the adapter using netcat for manual testing:
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"ts":1234567890,"client":{"name":"test","version":"1.0.0"},"protocol_version":"1.0.0","formats":["json"],"requested":{"stream_observations":true}}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tui_candymon_core as core;
pub use tui_candymon_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::{
    Adapter, AdapterStatus, ClientCommand, InboundCommand, InboundPayload, OutboundMessage,
    SharedStatus,
};
pub use server::*;
