//! Sink construction for the transport worker.
//!
//! Opening or decoding can fail when a queue entry points at a file that
//! was removed or replaced since upload; the worker turns that into stopped
//! playback rather than an error surfaced to the user.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open media file: {0}")]
    Open(#[from] std::io::Error),
    #[error("failed to decode media file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Create a paused `Sink` for the media at `path`, positioned at `start_at`.
/// `skip_duration` is the seeking primitive; `Duration::ZERO` is fine.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, SinkError> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
