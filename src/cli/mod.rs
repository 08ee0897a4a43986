//! CLI module
//!
//! Command-line interface for browsing the campaign table.
//!
//! # Commands
//!
//! - `show` - Fetch once and print a single page
//! - `browse` - Interactive previous/next navigation on the terminal
//! - `serve` - Start HTTP server mode with per-visitor sessions

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve, AppState, SessionLimits};
