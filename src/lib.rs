//! TUI Candy Mon (workspace facade crate).
//!
//! This package keeps the `tui_candymon::{core,adapter,term,input,types}` public
//! API stable while the implementation lives in dedicated crates under `crates/`.

pub use tui_candymon_adapter as adapter;
pub use tui_candymon_core as core;
pub use tui_candymon_input as input;
pub use tui_candymon_term as term;
pub use tui_candymon_types as types;
