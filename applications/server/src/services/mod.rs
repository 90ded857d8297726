/// Server services
pub mod access;
pub mod auth;
pub mod file_storage;
pub mod playlists;

pub use access::{AccessControl, NewAccount};
pub use auth::{AuthService, Clock, SystemClock};
pub use file_storage::{FileStorage, StoredFile};
pub use playlists::PlaylistService;
