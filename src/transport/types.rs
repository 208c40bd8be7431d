//! Transport-facing small types and shared handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::{Catalog, TrackId};
use crate::player::PlaybackState;

/// Commands accepted by the transport worker. Each maps onto one queue
/// engine operation; the worker applies the resulting cue to its sink.
#[derive(Debug)]
pub enum TransportCmd {
    /// Start playback of a track within a context; re-sending the active
    /// track toggles play/pause. `queue: None` means the feed order.
    Play {
        track: TrackId,
        queue: Option<Vec<TrackId>>,
    },
    /// Skip forward.
    Next,
    /// Skip backward (restart-in-place past the 3-second window).
    Prev,
    /// Flip shuffle for future skips.
    ToggleShuffle,
    /// Rotate the loop mode.
    CycleLoopMode,
    /// Jump to a progress-bar fraction of the current track, clamped to
    /// `[0, 1]`.
    Seek(f64),
    /// Stop playback and shut the worker down.
    Quit,
}

/// Runtime playback readback shared with the caller.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Currently loaded track, if any.
    pub track: Option<TrackId>,
    /// Elapsed time within the current track.
    pub elapsed: Duration,
    /// Whether audio is actually running (a stalled load reads as false
    /// even while the engine state says playing).
    pub playing: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            track: None,
            elapsed: Duration::ZERO,
            playing: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
pub type StateHandle = Arc<Mutex<PlaybackState>>;
pub type CatalogHandle = Arc<Mutex<Catalog>>;

/// Progress-bar fraction for `elapsed` against the stored track duration.
/// Clamped to `[0, 1]`; a zero or missing duration reads as zero progress.
pub fn progress_fraction(elapsed: Duration, duration_secs: u64) -> f64 {
    if duration_secs == 0 {
        return 0.0;
    }
    (elapsed.as_secs_f64() / duration_secs as f64).clamp(0.0, 1.0)
}
