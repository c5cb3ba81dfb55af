//! botlogd - HTTP data service for bot log files and usage statistics
//!
//! This library provides the core functionality for the botlogd service:
//! date-windowed log file resolution, the storage layer over log directories
//! and the bot database, and the HTTP API on top of both.

pub mod api;
pub mod config;
pub mod error;
pub mod resolver;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
