//! Corso on the Adafruit 128x64 OLED bonnet (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this
//! package re-exports them as `corsoab::{core, engine, input, term, types}`
//! and adds the binary's configuration, CLI and wiring.

pub mod app;
pub mod cli;
pub mod config;

pub use corso_core as core;
pub use corso_engine as engine;
pub use corso_input as input;
pub use corso_term as term;
pub use corso_types as types;
