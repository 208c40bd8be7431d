use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::warn;

use crate::catalog::{Catalog, TrackId};
use crate::config::TransportSettings;
use crate::player::{Cue, Player};

use super::sink::create_sink_at;
use super::types::{CatalogHandle, PlaybackHandle, StateHandle, TransportCmd};

pub(super) fn spawn_transport_thread(
    catalog: CatalogHandle,
    player: Player,
    rx: Receiver<TransportCmd>,
    playback_info: PlaybackHandle,
    state_handle: StateHandle,
    settings: TransportSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "no audio output device; transport worker exiting");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped; keep shutdown quiet.
        stream.log_on_drop(false);

        let mut worker = Worker {
            catalog,
            player,
            playback_info,
            state_handle,
            stream,
            sink: None,
            loaded: None,
            started_at: None,
            accumulated: Duration::ZERO,
        };
        worker.publish();

        let tick = Duration::from_millis(settings.tick_ms.max(10));
        loop {
            match rx.recv_timeout(tick) {
                Ok(TransportCmd::Quit) => {
                    worker.stop_sink();
                    worker.publish();
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => worker.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Owns the single sink and keeps it consistent with the engine state.
struct Worker {
    catalog: CatalogHandle,
    player: Player,
    playback_info: PlaybackHandle,
    state_handle: StateHandle,
    stream: OutputStream,
    sink: Option<Sink>,
    /// Track id the sink was built from.
    loaded: Option<TrackId>,
    /// Set while audio is running; drives elapsed accounting.
    started_at: Option<Instant>,
    /// Elapsed time banked across pauses and seeks.
    accumulated: Duration,
}

impl Worker {
    fn handle(&mut self, cmd: TransportCmd) {
        match cmd {
            TransportCmd::Play { track, queue } => {
                let cue = self.engine(|p, cat| p.start_context(cat, &track, queue));
                self.apply(cue);
            }
            TransportCmd::Next => {
                let cue = self.engine(|p, cat| p.advance(cat));
                self.apply(cue);
            }
            TransportCmd::Prev => {
                let elapsed = self.elapsed();
                let cue = self.engine(|p, cat| p.retreat(cat, elapsed));
                self.apply(cue);
            }
            TransportCmd::ToggleShuffle => {
                self.player.toggle_shuffle();
                self.publish();
            }
            TransportCmd::CycleLoopMode => {
                self.player.cycle_loop_mode();
                self.publish();
            }
            TransportCmd::Seek(fraction) => {
                let target = match self.catalog.lock() {
                    Ok(cat) => self.player.seek_to(&cat, fraction),
                    Err(_) => None,
                };
                if let Some(target) = target {
                    self.apply(Cue::Seek(target));
                }
            }
            TransportCmd::Quit => {}
        }
    }

    /// Periodic work between commands: elapsed readback, and natural
    /// end-of-media. The finished sink is dropped by whatever the advance
    /// cue does, so a completion fires advance exactly once.
    fn tick(&mut self) {
        let ended = matches!(&self.sink, Some(s) if self.started_at.is_some() && s.empty());
        if ended {
            let cue = self.engine(|p, cat| p.advance(cat));
            self.apply(cue);
        } else {
            self.publish();
        }
    }

    /// Run one engine operation under the catalog lock.
    fn engine<F>(&mut self, op: F) -> Cue
    where
        F: FnOnce(&mut Player, &Catalog) -> Cue,
    {
        match self.catalog.lock() {
            Ok(cat) => op(&mut self.player, &cat),
            Err(_) => Cue::None,
        }
    }

    fn apply(&mut self, cue: Cue) {
        match cue {
            Cue::Rewind => {
                // Newest command wins: whatever was loaded is dropped, even
                // if its playback never got started.
                self.stop_sink();
                if self.player.state().playing {
                    self.load_current(Duration::ZERO, true);
                }
            }
            Cue::None => {
                let playing = self.player.state().playing;
                match self.sink.as_ref() {
                    Some(s) if playing && self.started_at.is_none() => {
                        s.play();
                        self.started_at = Some(Instant::now());
                    }
                    Some(s) if !playing && self.started_at.is_some() => {
                        s.pause();
                        if let Some(at) = self.started_at.take() {
                            self.accumulated += at.elapsed();
                        }
                    }
                    // Resuming after a stop that dropped the sink.
                    None if playing => self.load_current(Duration::ZERO, true),
                    _ => {}
                }
            }
            Cue::Seek(target) => {
                let resume = self.player.state().playing;
                self.load_current(target, resume);
            }
        }
        self.publish();
    }

    /// Rebuild the sink for the engine's current track at `start_at`.
    /// A stale id or an unreadable file degrades to no sink; playback is
    /// re-triggered manually, never retried here.
    fn load_current(&mut self, start_at: Duration, play: bool) {
        self.stop_sink();

        let Some(id) = self.player.state().current.clone() else {
            return;
        };
        let path = match self.catalog.lock() {
            Ok(cat) => cat.track(&id).map(|t| t.audio_path.clone()),
            Err(_) => None,
        };
        let Some(path) = path else {
            return;
        };

        match create_sink_at(&self.stream, &path, start_at) {
            Ok(sink) => {
                self.accumulated = start_at;
                if play {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
                self.loaded = Some(id);
            }
            Err(e) => {
                warn!(track = %id, error = %e, "media failed to load; staying idle");
            }
        }
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.loaded = None;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |at| at.elapsed())
    }

    fn publish(&self) {
        if let Ok(mut info) = self.playback_info.lock() {
            info.track = self.loaded.clone();
            info.elapsed = self.elapsed();
            info.playing = self.started_at.is_some();
        }
        if let Ok(mut state) = self.state_handle.lock() {
            *state = self.player.state().clone();
        }
    }
}
