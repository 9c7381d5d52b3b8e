//! Library surface of the Stakelens server.
//!
//! The binary in `main.rs` is a thin wrapper; everything it wires is
//! exposed here so integration tests can build the same router.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;

pub use config::Config;
pub use main_lib::{build_state, init_tracing, AppState};
