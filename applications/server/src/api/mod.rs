/// API route modules
pub mod auth;
pub mod extract;
pub mod files;
pub mod health;
pub mod playlists;
pub mod songs;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full HTTP surface.
///
/// Collection paths answer both with and without a trailing slash.
pub fn router(app_state: AppState, max_upload_bytes: usize) -> Router {
    let media_dir = app_state.file_storage.base_path().to_path_buf();

    let auth_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/token", post(auth::login))
        .route(
            "/auth/profile",
            get(auth::get_profile).patch(auth::update_profile),
        )
        .route("/auth/playlists", get(auth::get_user_playlists));

    let song_routes = Router::new()
        .route("/songs", get(songs::list_songs).post(songs::create_song))
        .route("/songs/", get(songs::list_songs).post(songs::create_song))
        .route("/songs/search", get(songs::search_songs))
        .route(
            "/songs/:id",
            get(songs::get_song)
                .patch(songs::update_song)
                .delete(songs::delete_song),
        );

    let playlist_routes = Router::new()
        .route("/playlists", post(playlists::create_playlist))
        .route("/playlists/", post(playlists::create_playlist))
        .route(
            "/playlists/:id",
            get(playlists::get_playlist)
                .post(playlists::add_song_to_playlist)
                .delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs/:song_id",
            delete(playlists::remove_song_from_playlist),
        );

    let file_routes = Router::new()
        .route("/files", post(files::upload_file))
        .route("/files/", post(files::upload_file));

    Router::new()
        .route("/health", get(health::health))
        .merge(auth_routes)
        .merge(song_routes)
        .merge(playlist_routes)
        .merge(file_routes)
        .nest_service("/static", ServeDir::new(media_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
