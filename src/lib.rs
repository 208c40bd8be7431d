//! Soundfree: a local-first social audio feed with a persistent playback queue.
//!
//! The crate is organized around one hard piece, the playback queue engine in
//! [`player`], and the collaborators it needs:
//!
//! - [`player`] — pure state transitions over [`player::PlaybackState`]
//!   (start/advance/retreat/shuffle/loop/seek) wrapped by a thin mutable
//!   [`player::Player`] holder.
//! - [`transport`] — a worker thread that keeps exactly one `rodio` sink
//!   consistent with the engine state and reports elapsed time back.
//! - [`catalog`] — the track/playlist/user store the engine resolves ids
//!   against, plus the home-feed ordering.
//! - [`store`] — JSON persistence of the catalog.
//! - [`config`] — settings loaded from file and environment.
//!
//! The view layer is not part of this crate; consumers drive the transport
//! with commands and re-render from the shared state handles it publishes.

pub mod catalog;
pub mod config;
pub mod player;
pub mod store;
pub mod transport;

pub use catalog::{Catalog, Playlist, Track, TrackId, User};
pub use player::{Cue, LoopMode, PlaybackState, Player};
pub use transport::{Transport, TransportCmd};
