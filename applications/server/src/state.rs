/// Shared application state
use crate::services::{AccessControl, AuthService, FileStorage, PlaylistService};
use moon_core::Storage;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Storage>,
    pub auth_service: Arc<AuthService>,
    pub access: Arc<AccessControl>,
    pub playlists: Arc<PlaylistService>,
    pub file_storage: Arc<FileStorage>,
    /// Base for upload URLs; `None` derives it from the request
    pub public_url: Option<String>,
}

impl AppState {
    pub fn new(
        db: Arc<dyn Storage>,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
    ) -> Self {
        let access = Arc::new(AccessControl::new(
            Arc::clone(&db),
            Arc::clone(&auth_service),
        ));
        let playlists = Arc::new(PlaylistService::new(Arc::clone(&db)));

        Self {
            db,
            auth_service,
            access,
            playlists,
            file_storage,
            public_url: None,
        }
    }

    pub fn with_public_url(mut self, public_url: Option<String>) -> Self {
        self.public_url = public_url;
        self
    }
}
