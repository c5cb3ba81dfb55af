//! HTTP API module.
//!
//! Exposes the bot and service log directories, the user-list snapshot, and
//! the database-backed statistics over a small axum router.

mod handlers;
mod server;
pub mod stats;

pub use server::{create_router, run_server, AppState};
