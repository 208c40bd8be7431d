use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Tracks are referenced by id everywhere (queues, likes, playlists) and
/// resolved lazily against the catalog.
pub type TrackId = String;

/// A playlist carries at most this many genre tags.
pub const MAX_PLAYLIST_GENRES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    /// Media locator handed to the transport.
    pub audio_path: PathBuf,
    /// Artwork locator; purely presentational.
    pub cover: Option<String>,
    /// Upload time, unix milliseconds.
    pub uploaded_at: u64,
    pub likes: u64,
    pub reposts: u64,
    /// Stored duration in seconds. Authoritative for progress-bar scaling;
    /// the actual media may disagree and the transport tolerates that.
    pub duration_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    /// Username of the creating user.
    pub creator: String,
    /// Ordered, duplicates prevented on insert.
    pub tracks: Vec<TrackId>,
    /// Up to [`MAX_PLAYLIST_GENRES`] tags.
    pub genres: Vec<String>,
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Stored and compared in plaintext; hardening is out of scope here.
    pub password: String,
    pub bio: String,
    pub profile_pic: Option<String>,
    /// Liked track ids, insertion order.
    pub likes: Vec<TrackId>,
    /// Reposted track ids, most recent first.
    pub reposts: Vec<TrackId>,
    /// Ids of playlists this user follows.
    pub saved_playlists: Vec<String>,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            bio: String::new(),
            profile_pic: None,
            likes: Vec::new(),
            reposts: Vec::new(),
            saved_playlists: Vec::new(),
        }
    }
}
