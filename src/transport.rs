//! Transport adapter: binds the queue engine to one `rodio` sink.
//!
//! [`Transport`] spawns a worker thread that owns the audio output, the
//! single sink and the [`Player`]; callers drive it with [`TransportCmd`]
//! messages and read back through the shared [`PlaybackHandle`] (elapsed
//! time, audibility) and [`StateHandle`] (the engine state snapshot).
//!
//! Rapid skip-skip is safe by construction: the worker serializes commands,
//! so an older load that never reached playback is simply dropped when the
//! newer command replaces the sink. There is no error to report for that.

mod sink;
mod thread;
mod types;

pub use sink::SinkError;
pub use types::{
    CatalogHandle, PlaybackHandle, PlaybackInfo, StateHandle, TransportCmd, progress_fraction,
};

use std::sync::mpsc::{self, SendError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::TransportSettings;
use crate::player::{PlaybackState, Player};

use thread::spawn_transport_thread;

pub struct Transport {
    tx: Sender<TransportCmd>,
    playback: PlaybackHandle,
    state: StateHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Transport {
    /// Spawn the worker with a default player (uniform random shuffle).
    pub fn new(catalog: CatalogHandle, settings: TransportSettings) -> Self {
        Self::with_player(catalog, Player::new(), settings)
    }

    /// Spawn the worker around a prepared player, e.g. one with a custom
    /// shuffle picker or preset loop/shuffle flags.
    pub fn with_player(
        catalog: CatalogHandle,
        player: Player,
        settings: TransportSettings,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<TransportCmd>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let state: StateHandle = Arc::new(Mutex::new(PlaybackState::default()));

        let join = spawn_transport_thread(
            catalog,
            player,
            rx,
            playback.clone(),
            state.clone(),
            settings,
        );

        Self {
            tx,
            playback,
            state,
            join: Mutex::new(Some(join)),
        }
    }

    /// Handle for elapsed-time/audibility readback.
    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// Handle for the engine state snapshot the view renders from.
    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    pub fn send(&self, cmd: TransportCmd) -> Result<(), SendError<TransportCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback and join the worker.
    pub fn quit(&self) {
        let _ = self.send(TransportCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests;
