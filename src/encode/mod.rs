//! Encoding sinks.
//!
//! Sinks consume an animation's frames in order; see `AnimationSequencer::encode_into`.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
