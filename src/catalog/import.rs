//! Local-file import: walk a directory and turn audio files into feed
//! tracks, reading title/artist and the authoritative duration from tags.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use walkdir::WalkDir;

use super::model::{Track, TrackId};

/// A file found on disk, not yet assigned a catalog id.
pub struct ScannedTrack {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub duration_secs: u64,
}

impl ScannedTrack {
    pub(super) fn into_track(self, id: TrackId) -> Track {
        Track {
            id,
            title: self.title,
            // Imported files have no uploader; credit the tag artist.
            artist: self.artist.unwrap_or_else(|| "unknown".to_string()),
            audio_path: self.path,
            cover: None,
            uploaded_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            likes: 0,
            reposts: 0,
            duration_secs: self.duration_secs,
        }
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "flac" | "wav" | "ogg"
            )
        })
        .unwrap_or(false)
}

/// Walk `dir` and collect audio files, sorted by title case-insensitively.
pub fn scan(dir: &Path) -> Vec<ScannedTrack> {
    let mut found: Vec<ScannedTrack> = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path) {
            continue;
        }

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist: Option<String> = None;
        let mut duration_secs: u64 = 0;

        if let Ok(tagged) = lofty::read_from_path(path) {
            duration_secs = tagged.properties().duration().as_secs();

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.to_string();
                    }
                }
                if let Some(v) = tag.artist() {
                    let v = v.trim();
                    if !v.is_empty() {
                        artist = Some(v.to_string());
                    }
                }
            }
        }

        found.push(ScannedTrack {
            path: path.to_path_buf(),
            title,
            artist,
            duration_secs,
        });
    }

    found.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    found
}
