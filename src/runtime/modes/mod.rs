//! Mode routing
//!
//! - Server mode (HTTP server, the default)
//! - CLI mode (one-shot link commands)

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::{configure_gateway, run_server};

#[cfg(feature = "cli")]
pub use cli::run_cli;
