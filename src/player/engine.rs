//! Pure queue transitions.
//!
//! Every function here maps a [`PlaybackState`] (plus the read-only catalog)
//! to the next state without side effects. None of them can panic: index
//! arithmetic is bounds-checked before use and an id that no longer resolves
//! in the catalog degrades to stopped playback, because the catalog is
//! mutable from other flows and playback must survive a dangling reference.

use std::time::Duration;

use crate::catalog::{Catalog, TrackId};

use super::state::{LoopMode, PlaybackState};

/// Pressing "previous" later than this into a track restarts it in place
/// instead of moving back through the queue.
pub const RESTART_WINDOW: Duration = Duration::from_secs(3);

/// What the transport must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Nothing positional; the sink derives pause/resume from `playing`.
    None,
    /// (Re)load the current track and put the position at zero.
    Rewind,
    /// Jump to an absolute position within the current track.
    Seek(Duration),
}

/// A committed transition: the next state and the transport cue that goes
/// with it.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: PlaybackState,
    pub cue: Cue,
}

/// Start playback of `track_id` within a context.
///
/// Invoking with the already-active track is a play/pause toggle; the queue
/// and index stay put. Otherwise the queue becomes `queue` when supplied,
/// else the catalog's feed order, and the index lands on `track_id`'s
/// position (first entry as a defensive fallback when it is absent).
pub fn start_context(
    state: &PlaybackState,
    catalog: &Catalog,
    track_id: &TrackId,
    queue: Option<Vec<TrackId>>,
) -> Transition {
    if state.current.as_ref() == Some(track_id) {
        let mut next = state.clone();
        next.playing = !next.playing;
        return Transition {
            state: next,
            cue: Cue::None,
        };
    }

    let queue = queue.unwrap_or_else(|| catalog.feed_order().to_vec());
    let queue_index = if queue.is_empty() {
        None
    } else {
        Some(queue.iter().position(|id| id == track_id).unwrap_or(0))
    };

    Transition {
        state: PlaybackState {
            current: Some(track_id.clone()),
            playing: true,
            queue,
            queue_index,
            shuffle: state.shuffle,
            loop_mode: state.loop_mode,
        },
        cue: Cue::Rewind,
    }
}

/// Skip forward, used both for the transport button and natural end-of-track.
///
/// `pick` supplies the shuffle index for a queue of the given length; repeats
/// of the current index are allowed. Running off the end stops playback
/// unless `LoopAll` wraps it to the front; the last played index and track
/// are kept so the UI still shows what just finished.
pub fn advance(
    state: &PlaybackState,
    catalog: &Catalog,
    pick: &mut (dyn FnMut(usize) -> usize + Send),
) -> Transition {
    if state.queue.is_empty() {
        let mut next = state.clone();
        next.playing = false;
        return Transition {
            state: next,
            cue: Cue::Rewind,
        };
    }

    if state.loop_mode == LoopMode::LoopOne && state.current.is_some() {
        let mut next = state.clone();
        next.playing = true;
        return Transition {
            state: next,
            cue: Cue::Rewind,
        };
    }

    let len = state.queue.len();
    let next_index = if state.shuffle {
        // Uniform over the whole queue; clamped in case the injected picker
        // misbehaves.
        pick(len).min(len - 1)
    } else {
        state.queue_index.map_or(0, |i| i + 1)
    };

    if next_index >= len {
        if state.loop_mode == LoopMode::LoopAll {
            return commit_index(state, catalog, 0);
        }
        let mut next = state.clone();
        next.playing = false;
        return Transition {
            state: next,
            cue: Cue::Rewind,
        };
    }

    commit_index(state, catalog, next_index)
}

/// Skip backward.
///
/// More than [`RESTART_WINDOW`] into the track this only rewinds the current
/// track. At the front of the queue, `LoopAll` wraps to the back while the
/// other modes clamp to index 0 and keep playing; the forward direction
/// stops instead, and that asymmetry is intentional. Retreat always moves
/// linearly by index, even while shuffle is enabled.
pub fn retreat(state: &PlaybackState, catalog: &Catalog, elapsed: Duration) -> Transition {
    if elapsed > RESTART_WINDOW && state.current.is_some() {
        return Transition {
            state: state.clone(),
            cue: Cue::Rewind,
        };
    }

    if state.queue.is_empty() {
        return Transition {
            state: state.clone(),
            cue: Cue::None,
        };
    }

    let prev_index = match state.queue_index {
        Some(i) if i > 0 => i - 1,
        _ if state.loop_mode == LoopMode::LoopAll => state.queue.len() - 1,
        _ => 0,
    };

    commit_index(state, catalog, prev_index)
}

/// Flip shuffle without reordering anything.
pub fn toggle_shuffle(state: &PlaybackState) -> PlaybackState {
    let mut next = state.clone();
    next.shuffle = !next.shuffle;
    next
}

/// Rotate `NoLoop -> LoopAll -> LoopOne -> NoLoop`.
pub fn cycle_loop_mode(state: &PlaybackState) -> PlaybackState {
    let mut next = state.clone();
    next.loop_mode = match next.loop_mode {
        LoopMode::NoLoop => LoopMode::LoopAll,
        LoopMode::LoopAll => LoopMode::LoopOne,
        LoopMode::LoopOne => LoopMode::NoLoop,
    };
    next
}

/// Turn a progress-bar fraction into an absolute position in the current
/// track, using the catalog's stored duration as the scale. The fraction is
/// clamped to `[0, 1]`; `None` when there is no resolvable current track.
pub fn seek_to(state: &PlaybackState, catalog: &Catalog, fraction: f64) -> Option<Duration> {
    let id = state.current.as_ref()?;
    let track = catalog.track(id)?;
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    Some(Duration::from_secs_f64(fraction * track.duration_secs as f64))
}

/// Commit a move to `index`: resolve the id there, stop if it is stale.
fn commit_index(state: &PlaybackState, catalog: &Catalog, index: usize) -> Transition {
    let id = &state.queue[index];
    let resolved = catalog.track(id).is_some();

    let mut next = state.clone();
    next.queue_index = Some(index);
    next.current = resolved.then(|| id.clone());
    next.playing = resolved;

    Transition {
        state: next,
        cue: Cue::Rewind,
    }
}
