//! Moon Server Library
//!
//! Media catalog backend: songs, users with bearer-token auth, playlists
//! owned by their creators, and media uploads.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{AuthError, Result, ServerError};
pub use services::{AccessControl, AuthService, FileStorage, PlaylistService};
pub use state::AppState;
