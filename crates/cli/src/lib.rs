//! Command-line front end for the vector-store form.

pub mod args;
pub mod commands;
pub mod logging;
pub mod notify;
pub mod shell;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
