//! Blockfall (workspace facade crate).
//!
//! Re-exports the gameplay core, its shared types and the terminal key map
//! under one `blockfall::{core,input,types}` path. The implementation lives
//! in the crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;
