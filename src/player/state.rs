use serde::{Deserialize, Serialize};

use crate::catalog::TrackId;

/// Loop behavior at end-of-track and end-of-queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    /// Do not wrap at the end of the queue.
    NoLoop,
    /// Wrap around to the start of the queue.
    LoopAll,
    /// Repeat the current track when it ends.
    LoopOne,
}

impl Default for LoopMode {
    fn default() -> Self {
        Self::NoLoop
    }
}

/// The whole transport-visible playback state.
///
/// `queue` holds track ids, not tracks: entries are resolved against the
/// catalog at the moment they are needed, so catalog edits show up
/// immediately and a removed track degrades to stopped playback instead of
/// a dangling reference.
///
/// Invariants kept by every engine transition:
/// - `queue_index` is `None` (no context yet) or a valid index into `queue`.
/// - `playing` is true only while `current` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// The active track id, if any. After a skip that lands on an
    /// unresolvable id this is `None` while `queue_index` still records the
    /// committed position.
    pub current: Option<TrackId>,
    pub playing: bool,
    /// The ordered context governing skip order.
    pub queue: Vec<TrackId>,
    pub queue_index: Option<usize>,
    pub shuffle: bool,
    pub loop_mode: LoopMode,
}

impl PlaybackState {
    /// True when there is an active track.
    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }
}
