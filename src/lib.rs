//! Linkgate - A small URL shortening redirect service
//!
//! Clients register a destination URL under a short token and later
//! resolve the token with a permanent redirect.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line link management (default)
//!
//! # Architecture
//! - `api`: Transport-neutral request router and the actix-web front end
//! - `services`: Link creation and resolution
//! - `storage`: Key-value link stores (memory, JSON file, Redis)
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
