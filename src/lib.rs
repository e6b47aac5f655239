//! chromerge generates benchmark samples for subtractive color mixing.
//!
//! Each task shows two colored disks that move toward their shared midpoint and merge. Where the
//! disks overlap, pixels take the color `255 - normalize(c1 + c2)`. A task produces:
//!
//! - a first frame (disks at their sampled starts) and a final frame (one merged disk),
//! - an optional ground-truth MP4 of the motion, encoded by the system `ffmpeg`,
//! - an instruction prompt and an evaluation rubric.
//!
//! # Pipeline
//!
//! 1. **Sample**: `rng -> TaskRecord` (colors, centers, mixed color)
//! 2. **Compose**: `TaskRecord -> FrameRGBA` via [`FrameCompositor`]
//! 3. **Sequence**: hold → transition → hold via [`AnimationSequencer`]
//! 4. **Encode** (optional): stream frames into a [`FrameSink`]
//!
//! All randomness flows through an explicit RNG handle, so a seed fixes every pixel.
#![forbid(unsafe_code)]

mod foundation;

/// Frame scheduling for the ground-truth animation.
pub mod animation;
/// Prompt and rubric pools.
pub mod catalog;
/// Frame sinks.
pub mod encode;
/// Configuration, bundles and dataset output.
pub mod generator;
/// Frame rendering.
pub mod render;
/// Task sampling and color mixing.
pub mod task;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgb8, Vec2};
pub use crate::foundation::error::{ChromergeError, ChromergeResult};

pub use crate::animation::sequencer::{
    AnimationSequencer, SequenceOpts, SequencePhase, transition_centers, transition_progress,
};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::generator::config::GeneratorConfig;
pub use crate::generator::dataset::{
    DatasetOpts, DatasetSummary, generate_dataset, task_seed, write_task_pair,
};
pub use crate::generator::task_gen::{TaskGenerator, TaskPair};
pub use crate::render::compositor::{CompositorOpts, Coverage, Disk, FrameCompositor, RenderPath};
pub use crate::render::frame::FrameRGBA;
pub use crate::task::color::mix_subtractive;
pub use crate::task::record::TaskRecord;
pub use crate::task::sampler::{PositionSampler, SampledPositions};
