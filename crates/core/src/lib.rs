//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the match-3 rules, session state, and cascade
//! simulation. It has **zero dependencies** on UI, networking, or terminal
//! I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills (for
//!   daily challenges and AI control)
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for match scanning
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 board of piece kinds and special tags, with gravity
//! - [`detect`]: match scanning, including line-piece and bomb formation
//! - [`resolve`]: the clear step of a cascade cycle: arm, fire, clear
//! - [`analysis`]: move availability, hints, and reshuffle recovery
//! - [`session`]: complete session state: swaps, cascades, fever, missions
//! - [`scoring`]: score, meter, goal, and kind-count formulas
//! - [`missions`]: per-session goals and the one-time move bonus
//! - [`rng`]: small deterministic generator behind every board draw
//! - [`store`]: key-value persistence port plus file and memory stores
//! - [`save`]: serialized board-and-progress snapshot
//! - [`snapshot`]: full state view for renderers and the AI adapter
//! - [`events`]: state-change events drained by the host
//!
//! # Game Rules
//!
//! - **Matches**: 3 or more equal kinds in a row or column clear
//! - **Specials**: runs of 4+ arm line pieces; T and L shapes arm a bomb
//! - **Cascades**: cleared cells collapse and refill; chained clears raise
//!   the combo multiplier by one per cycle
//! - **Fever**: a full meter doubles scoring for 8 seconds
//! - **Moves**: 30 per session; level-ups and mission progress grant more
//! - **Daily**: a date-seeded board shared by everyone on the same day
//!
//! # Example
//!
//! ```
//! use tui_candymon_core::{MemoryStore, Session};
//!
//! // Create a session over an in-memory store and deal a board
//! let mut session = Session::new(Box::new(MemoryStore::new()), 12345);
//! session.set_rng_seed(Some(7));
//! session.reset(0);
//!
//! // Play the first hinted move
//! let (a, b) = session.find_hint().expect("fresh boards always have a move");
//! session.apply_swap(a, b).unwrap();
//! assert!(session.score() > 0);
//! ```
//!
//! # Timing
//!
//! The session is synchronous: a swap resolves its whole cascade before
//! returning. Wall-clock behavior lives in [`Session::tick`]:
//!
//! - **Tick Rate**: 16ms (approximately 60 FPS) from the terminal loop
//! - **Meter Decay**: -3 every 350ms while idle
//! - **Fever**: 8000ms, then the meter resets to 35
//!
//! Call [`Session::tick`] every frame with elapsed time.

pub mod analysis;
pub mod detect;
pub mod events;
pub mod grid;
pub mod missions;
pub mod resolve;
pub mod rng;
pub mod save;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod store;

pub use tui_candymon_types as types;

// Re-export commonly used types for convenience
pub use analysis::{ensure_playable, find_move, has_any_move, ReshuffleOutcome};
pub use detect::{find_matches, MatchScan};
pub use events::GameEvent;
pub use grid::{Cell, Grid};
pub use missions::{Mission, MissionGoal, Missions};
pub use rng::BoardRng;
pub use save::SaveState;
pub use scoring::{active_kind_count, cycle_score, meter_gain, next_goal};
pub use session::{CascadeReport, Session, SwapError};
pub use snapshot::SessionSnapshot;
pub use store::{keys, JsonFileStore, MemoryStore, StateStore};
