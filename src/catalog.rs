//! The track/playlist/user store.
//!
//! One [`Catalog`] owns every entity and the home-feed ordering. The queue
//! engine only ever reads it (id lookup plus the feed order); all mutation
//! goes through the methods here, which keep the per-track like/repost
//! counters consistent with the per-user sets.
//!
//! Social operations require a signed-in session and quietly do nothing
//! without one; the caller decides whether that means showing a login view.

mod import;
mod model;

pub use import::{ScannedTrack, scan};
pub use model::{MAX_PLAYLIST_GENRES, Playlist, Track, TrackId, User};

use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    tracks: HashMap<TrackId, Track>,
    /// Track ids in home-feed order, newest upload first.
    feed_order: Vec<TrackId>,
    playlists: Vec<Playlist>,
    users: Vec<User>,
    /// Username of the signed-in user, if any.
    session: Option<String>,
    /// Monotonic id source; tracks can be removed, so counts are not unique.
    next_seq: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a track id. Absent means the track was removed by another
    /// flow; callers degrade rather than error.
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// The default browsing context: every feed id in order.
    pub fn feed_order(&self) -> &[TrackId] {
        &self.feed_order
    }

    /// The feed with stale ids filtered out, resolved for rendering.
    pub fn feed_tracks(&self) -> Vec<&Track> {
        self.feed_order
            .iter()
            .filter_map(|id| self.tracks.get(id))
            .collect()
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Case-insensitive title/artist search over all tracks, feed order.
    pub fn search(&self, query: &str) -> Vec<&Track> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.feed_order
            .iter()
            .filter_map(|id| self.tracks.get(id))
            .filter(|t| {
                t.title.to_lowercase().contains(&query) || t.artist.to_lowercase().contains(&query)
            })
            .collect()
    }

    // ---- session ----

    pub fn current_user(&self) -> Option<&User> {
        let name = self.session.as_deref()?;
        self.users.iter().find(|u| u.username == name)
    }

    /// Sign in, registering on first use. An existing username with a wrong
    /// password leaves the session untouched and returns false.
    pub fn sign_in(&mut self, username: &str, password: &str) -> bool {
        if username.is_empty() || password.is_empty() {
            return false;
        }
        match self.users.iter().find(|u| u.username == username) {
            Some(existing) => {
                if existing.password != password {
                    return false;
                }
            }
            None => self.users.push(User::new(username, password)),
        }
        self.session = Some(username.to_string());
        true
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// Update the signed-in user's profile fields.
    pub fn update_profile(&mut self, bio: Option<&str>, profile_pic: Option<&str>) -> bool {
        let Some(name) = self.session.clone() else {
            return false;
        };
        let Some(user) = self.users.iter_mut().find(|u| u.username == name) else {
            return false;
        };
        if let Some(bio) = bio {
            user.bio = bio.to_string();
        }
        if let Some(pic) = profile_pic {
            user.profile_pic = Some(pic.to_string());
        }
        true
    }

    // ---- tracks ----

    /// Publish a track as the signed-in user; it lands at the top of the
    /// feed. Returns the new id, or `None` when signed out.
    pub fn upload_track(
        &mut self,
        title: &str,
        audio_path: &Path,
        cover: Option<&str>,
        duration_secs: u64,
    ) -> Option<TrackId> {
        let artist = self.session.clone()?;
        let id = self.next_id("t");
        let track = Track {
            id: id.clone(),
            title: title.to_string(),
            artist,
            audio_path: audio_path.to_path_buf(),
            cover: cover.map(str::to_string),
            uploaded_at: now_millis(),
            likes: 0,
            reposts: 0,
            duration_secs,
        };
        self.insert_front(track);
        Some(id)
    }

    /// Insert a ready-made track at the top of the feed.
    pub fn insert_front(&mut self, track: Track) {
        self.feed_order.insert(0, track.id.clone());
        self.tracks.insert(track.id.clone(), track);
    }

    /// Append a ready-made track at the bottom of the feed.
    pub fn insert_back(&mut self, track: Track) {
        self.feed_order.push(track.id.clone());
        self.tracks.insert(track.id.clone(), track);
    }

    /// Remove a track from the catalog and the feed. Queues and playlists
    /// may still carry the id; resolution treats it as stale from now on.
    pub fn remove_track(&mut self, id: &str) -> Option<Track> {
        self.feed_order.retain(|t| t != id);
        self.tracks.remove(id)
    }

    /// Scan `dir` for local audio files and append them to the feed.
    /// Returns how many tracks were added.
    pub fn import_dir(&mut self, dir: &Path) -> usize {
        let found = scan(dir);
        let count = found.len();
        for scanned in found {
            let id = self.next_id("t");
            self.insert_back(scanned.into_track(id));
        }
        debug!(count, dir = %dir.display(), "imported local tracks");
        count
    }

    // ---- likes / reposts ----

    /// Toggle the signed-in user's like on a track, adjusting its counter.
    pub fn toggle_like(&mut self, track_id: &str) -> bool {
        let Some(name) = self.session.clone() else {
            return false;
        };
        if !self.tracks.contains_key(track_id) {
            return false;
        }
        let Some(user) = self.users.iter_mut().find(|u| u.username == name) else {
            return false;
        };

        let liked = user.likes.iter().any(|id| id == track_id);
        if liked {
            user.likes.retain(|id| id != track_id);
        } else {
            user.likes.push(track_id.to_string());
        }
        if let Some(track) = self.tracks.get_mut(track_id) {
            track.likes = if liked {
                track.likes.saturating_sub(1)
            } else {
                track.likes + 1
            };
        }
        true
    }

    /// Toggle a repost; fresh reposts go to the front of the user's timeline.
    pub fn toggle_repost(&mut self, track_id: &str) -> bool {
        let Some(name) = self.session.clone() else {
            return false;
        };
        if !self.tracks.contains_key(track_id) {
            return false;
        }
        let Some(user) = self.users.iter_mut().find(|u| u.username == name) else {
            return false;
        };

        let reposted = user.reposts.iter().any(|id| id == track_id);
        if reposted {
            user.reposts.retain(|id| id != track_id);
        } else {
            user.reposts.insert(0, track_id.to_string());
        }
        if let Some(track) = self.tracks.get_mut(track_id) {
            track.reposts = if reposted {
                track.reposts.saturating_sub(1)
            } else {
                track.reposts + 1
            };
        }
        true
    }

    // ---- playlists ----

    /// Create a playlist owned by the signed-in user. Genre tags beyond
    /// [`MAX_PLAYLIST_GENRES`] are dropped. Returns the new id.
    pub fn create_playlist(
        &mut self,
        name: &str,
        genres: &[String],
        first_track: Option<&str>,
    ) -> Option<String> {
        let creator = self.session.clone()?;
        if name.is_empty() {
            return None;
        }
        let id = self.next_id("p");
        let mut genres: Vec<String> = genres.to_vec();
        genres.truncate(MAX_PLAYLIST_GENRES);
        self.playlists.insert(
            0,
            Playlist {
                id: id.clone(),
                name: name.to_string(),
                creator,
                tracks: first_track.map(|t| vec![t.to_string()]).unwrap_or_default(),
                genres,
                cover: None,
            },
        );
        Some(id)
    }

    /// Append a track to a playlist unless it is already there.
    pub fn add_to_playlist(&mut self, playlist_id: &str, track_id: &str) -> bool {
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == playlist_id) else {
            return false;
        };
        if playlist.tracks.iter().any(|id| id == track_id) {
            return false;
        }
        playlist.tracks.push(track_id.to_string());
        true
    }

    /// Toggle the signed-in user's bookmark on a playlist.
    pub fn toggle_saved_playlist(&mut self, playlist_id: &str) -> bool {
        let Some(name) = self.session.clone() else {
            return false;
        };
        if !self.playlists.iter().any(|p| p.id == playlist_id) {
            return false;
        }
        let Some(user) = self.users.iter_mut().find(|u| u.username == name) else {
            return false;
        };
        if user.saved_playlists.iter().any(|id| id == playlist_id) {
            user.saved_playlists.retain(|id| id != playlist_id);
        } else {
            user.saved_playlists.push(playlist_id.to_string());
        }
        true
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_seq += 1;
        format!("{prefix}_{}", self.next_seq)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
