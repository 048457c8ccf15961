//! Users Server Library
//!
//! REST API for the users resource: routing, validation-to-status mapping,
//! configuration and the JSON envelope every response uses.
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
pub use config::{Environment, ServerConfig};
pub use error::{Result, ServerError};
pub use state::AppState;
