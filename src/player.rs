//! Playback queue engine.
//!
//! The queue logic lives in `player::engine` as pure functions from one
//! [`PlaybackState`] to the next; [`Player`] is the thin mutable holder that
//! commits transitions and carries the injected shuffle picker. The engine
//! never touches the audio device: each transition yields a [`Cue`] the
//! transport applies to its sink.

mod engine;
mod state;

pub use engine::{Cue, RESTART_WINDOW, Transition};
pub use state::{LoopMode, PlaybackState};

use std::time::Duration;

use rand::Rng;

use crate::catalog::{Catalog, TrackId};

/// Mutable wrapper around the pure transition functions.
///
/// Holds the current [`PlaybackState`] and the shuffle index picker. The
/// picker is injected so tests can pin exact skip sequences; the default
/// draws uniformly from `rand`.
pub struct Player {
    state: PlaybackState,
    pick: Box<dyn FnMut(usize) -> usize + Send>,
}

impl Player {
    /// Create a player with the default uniform random shuffle picker.
    pub fn new() -> Self {
        Self::with_pick(Box::new(|len| rand::rng().random_range(0..len)))
    }

    /// Create a player with a custom shuffle picker.
    ///
    /// The picker receives the queue length (always nonzero) and must return
    /// an index in `[0, len)`; out-of-range picks are clamped by the engine.
    pub fn with_pick(pick: Box<dyn FnMut(usize) -> usize + Send>) -> Self {
        Self {
            state: PlaybackState::default(),
            pick,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Seed the starting shuffle and loop flags from configuration.
    pub fn apply_settings(&mut self, settings: &crate::config::PlaybackSettings) {
        self.state.shuffle = settings.shuffle;
        self.state.loop_mode = settings.loop_mode.into();
    }

    /// Start playback of `track_id` within a context.
    ///
    /// Re-invoking with the currently active track toggles play/pause and
    /// leaves the queue alone. Otherwise the queue becomes `queue` when
    /// given, else the catalog's feed order.
    pub fn start_context(
        &mut self,
        catalog: &Catalog,
        track_id: &TrackId,
        queue: Option<Vec<TrackId>>,
    ) -> Cue {
        self.commit(engine::start_context(&self.state, catalog, track_id, queue))
    }

    /// Skip forward, or handle a natural end-of-track.
    pub fn advance(&mut self, catalog: &Catalog) -> Cue {
        let t = engine::advance(&self.state, catalog, &mut *self.pick);
        self.commit(t)
    }

    /// Skip backward. `elapsed` is the transport's current position; more
    /// than [`RESTART_WINDOW`] into the track this restarts in place.
    pub fn retreat(&mut self, catalog: &Catalog, elapsed: Duration) -> Cue {
        self.commit(engine::retreat(&self.state, catalog, elapsed))
    }

    /// Flip shuffle. Queue order is untouched; only future [`Player::advance`]
    /// calls pick randomly.
    pub fn toggle_shuffle(&mut self) {
        self.state = engine::toggle_shuffle(&self.state);
    }

    /// Rotate the loop mode `NoLoop -> LoopAll -> LoopOne`.
    pub fn cycle_loop_mode(&mut self) {
        self.state = engine::cycle_loop_mode(&self.state);
    }

    /// Resolve a progress-bar fraction into an absolute seek target for the
    /// current track, clamping the fraction to `[0, 1]`. `None` when nothing
    /// is active.
    pub fn seek_to(&self, catalog: &Catalog, fraction: f64) -> Option<Duration> {
        engine::seek_to(&self.state, catalog, fraction)
    }

    fn commit(&mut self, t: Transition) -> Cue {
        self.state = t.state;
        t.cue
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
