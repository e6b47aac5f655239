use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Point};
use crate::foundation::error::ChromergeResult;
use crate::render::compositor::{Disk, FrameCompositor};
use crate::render::frame::FrameRGBA;
use crate::task::record::TaskRecord;

/// Frame counts for the hold → transition → hold schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceOpts {
    /// Times the initial and the final frame are each repeated.
    pub hold_frames: u32,
    /// Frames spent moving the disks from their starts to the midpoint.
    pub transition_frames: u32,
}

impl Default for SequenceOpts {
    fn default() -> Self {
        Self {
            hold_frames: 5,
            transition_frames: 25,
        }
    }
}

impl SequenceOpts {
    /// Total number of frames the schedule produces.
    pub fn total_frames(self) -> u64 {
        2 * u64::from(self.hold_frames) + u64::from(self.transition_frames)
    }
}

/// Current stage of an [`AnimationSequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencePhase {
    HoldInitial,
    Transition,
    HoldFinal,
    Done,
}

/// Interpolation parameter for transition frame `i` of `count`.
///
/// Runs from `0.0` to `1.0` inclusive; a single-frame transition jumps straight to `1.0`.
pub fn transition_progress(i: u32, count: u32) -> f64 {
    if count > 1 {
        f64::from(i) / f64::from(count - 1)
    } else {
        1.0
    }
}

/// Disk centers at `progress`, both moving toward the shared midpoint.
///
/// The midpoint is equidistant from both starts, so equal progress means equal speed.
pub fn transition_centers(task: &TaskRecord, progress: f64) -> (Point, Point) {
    let target = task.final_pos;
    let lerp = |start: Point| start + (target - start) * progress;
    (lerp(task.ball1_pos), lerp(task.ball2_pos))
}

/// Ordered, single-pass frame sequence for one task.
///
/// Hold frames are rendered once and yielded as clones of the same `Arc`. Transition frames
/// are rendered on demand. After the last hold frame the sequencer stays in
/// [`SequencePhase::Done`] and only yields `None`.
pub struct AnimationSequencer<'a> {
    compositor: &'a FrameCompositor,
    task: &'a TaskRecord,
    opts: SequenceOpts,
    phase: SequencePhase,
    step: u32,
    held: Option<Arc<FrameRGBA>>,
    emitted: u64,
}

impl<'a> AnimationSequencer<'a> {
    pub fn new(compositor: &'a FrameCompositor, task: &'a TaskRecord, opts: SequenceOpts) -> Self {
        Self {
            compositor,
            task,
            opts,
            phase: SequencePhase::HoldInitial,
            step: 0,
            held: None,
            emitted: 0,
        }
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    /// Drain the remaining frames into a vector.
    pub fn collect_frames(self) -> Vec<Arc<FrameRGBA>> {
        self.collect()
    }

    /// Stream the remaining frames into `sink`, returning how many were pushed.
    #[tracing::instrument(skip_all, fields(frames = self.opts.total_frames()))]
    pub fn encode_into(self, sink: &mut dyn FrameSink, fps: Fps) -> ChromergeResult<u64> {
        let canvas = self.compositor.opts().canvas;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps,
        })?;

        let mut pushed = 0u64;
        for frame in self {
            sink.push_frame(FrameIndex(pushed), &frame)?;
            pushed += 1;
        }
        sink.end()?;
        Ok(pushed)
    }

    fn advance(&mut self, next: SequencePhase) {
        self.phase = next;
        self.step = 0;
        self.held = None;
    }

    fn render_transition(&self, i: u32) -> FrameRGBA {
        let progress = transition_progress(i, self.opts.transition_frames);
        let (c1, c2) = transition_centers(self.task, progress);
        self.compositor.render_pair(
            Disk::new(c1, self.task.color1),
            Disk::new(c2, self.task.color2),
        )
    }
}

impl Iterator for AnimationSequencer<'_> {
    type Item = Arc<FrameRGBA>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                SequencePhase::HoldInitial => {
                    if self.step >= self.opts.hold_frames {
                        self.advance(SequencePhase::Transition);
                        continue;
                    }
                    let (compositor, task) = (self.compositor, self.task);
                    let frame = self
                        .held
                        .get_or_insert_with(|| Arc::new(compositor.render_initial(task)))
                        .clone();
                    self.step += 1;
                    self.emitted += 1;
                    return Some(frame);
                }
                SequencePhase::Transition => {
                    if self.step >= self.opts.transition_frames {
                        self.advance(SequencePhase::HoldFinal);
                        continue;
                    }
                    let frame = Arc::new(self.render_transition(self.step));
                    self.step += 1;
                    self.emitted += 1;
                    return Some(frame);
                }
                SequencePhase::HoldFinal => {
                    if self.step >= self.opts.hold_frames {
                        self.advance(SequencePhase::Done);
                        continue;
                    }
                    let (compositor, task) = (self.compositor, self.task);
                    let frame = self
                        .held
                        .get_or_insert_with(|| Arc::new(compositor.render_final(task)))
                        .clone();
                    self.step += 1;
                    self.emitted += 1;
                    return Some(frame);
                }
                SequencePhase::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.opts.total_frames().saturating_sub(self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AnimationSequencer<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;
