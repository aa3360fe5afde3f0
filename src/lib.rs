// Library surface for headless/integration tests and reuse.
// The terminal loop and CLI live in main.rs.
pub mod app;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod key;
pub mod logging;
pub mod operation;
pub mod reducer;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
