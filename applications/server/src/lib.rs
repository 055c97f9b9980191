//! Muse Server Library
//!
//! Browser-facing music streaming server: YouTube search, audio stream
//! resolution, and per-session playlist persistence.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

// Re-export commonly used types for convenience
pub use app::create_router;
pub use config::{ProviderKind, ServerConfig};
pub use error::{Result, ServerError};
pub use state::AppState;
