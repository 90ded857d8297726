mod playlist;
mod song;
mod user;

pub use playlist::{CreatePlaylist, Playlist, PlaylistId, DEFAULT_PLAYLISTS};
pub use song::{CreateSong, Song, SongId, UpdateSong};
pub use user::{CreateUser, UpdateProfile, User, UserId, DEFAULT_AVATAR};
