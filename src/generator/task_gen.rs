use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;

use crate::animation::sequencer::AnimationSequencer;
use crate::catalog;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
use crate::encode::sink::FrameSink;
use crate::foundation::error::ChromergeResult;
use crate::generator::config::GeneratorConfig;
use crate::render::compositor::FrameCompositor;
use crate::render::frame::FrameRGBA;
use crate::task::record::TaskRecord;
use crate::task::sampler::PositionSampler;

/// Output bundle for one task.
#[derive(Clone, Debug)]
pub struct TaskPair {
    pub task_id: String,
    pub domain: String,
    pub prompt: String,
    pub rubric: String,
    pub first_image: FrameRGBA,
    pub final_image: FrameRGBA,
    /// Encoded ground-truth animation, when video generation is enabled and succeeded.
    pub ground_truth_video: Option<PathBuf>,
    pub task: TaskRecord,
}

/// Turns task requests into [`TaskPair`] bundles.
///
/// Holds no per-task state; one generator can serve many tasks, including concurrently, as long
/// as each caller brings its own RNG.
#[derive(Clone, Debug)]
pub struct TaskGenerator {
    cfg: GeneratorConfig,
    compositor: FrameCompositor,
    sampler: PositionSampler,
    videos: bool,
}

impl TaskGenerator {
    /// Validate `cfg` and prepare the renderer.
    ///
    /// Video generation is switched off (with a warning) when `ffmpeg` is not on `PATH`.
    pub fn new(cfg: GeneratorConfig) -> ChromergeResult<Self> {
        cfg.validate()?;
        let compositor = FrameCompositor::new(cfg.compositor_opts())?;
        let sampler = cfg.sampler();

        let videos = cfg.generate_videos && is_ffmpeg_on_path();
        if cfg.generate_videos && !videos {
            tracing::warn!("ffmpeg not found on PATH, ground-truth videos disabled");
        }

        Ok(Self {
            cfg,
            compositor,
            sampler,
            videos,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.cfg
    }

    pub fn compositor(&self) -> &FrameCompositor {
        &self.compositor
    }

    /// `true` when [`TaskGenerator::generate_task_pair`] will try to encode a video.
    pub fn videos_enabled(&self) -> bool {
        self.videos
    }

    /// Sample a fresh task record.
    pub fn sample_task<R: Rng + ?Sized>(&self, rng: &mut R) -> TaskRecord {
        TaskRecord::sample(rng, &self.sampler, self.cfg.ball_radius)
    }

    /// Generate one complete bundle.
    ///
    /// Draws from `rng` in a fixed order: task record, prompt, rubric.
    #[tracing::instrument(skip(self, rng))]
    pub fn generate_task_pair<R: Rng + ?Sized>(
        &self,
        task_id: &str,
        rng: &mut R,
    ) -> ChromergeResult<TaskPair> {
        let task = self.sample_task(rng);
        if task.used_fallback {
            tracing::debug!(task_id, "task uses fallback layout");
        }

        let first_image = self.compositor.render_initial(&task);
        let final_image = self.compositor.render_final(&task);

        let ground_truth_video = if self.videos {
            let out = self
                .cfg
                .resolved_video_dir()
                .join(format!("{task_id}_ground_truth.mp4"));
            let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
            self.encode_video_with(&task, &mut sink, out)
        } else {
            None
        };

        let prompt = catalog::prompt(&task.task_type, rng).to_string();
        let rubric = catalog::rubric(&task.task_type, rng).to_string();

        Ok(TaskPair {
            task_id: task_id.to_string(),
            domain: self.cfg.domain.clone(),
            prompt,
            rubric,
            first_image,
            final_image,
            ground_truth_video,
            task,
        })
    }

    /// Full animation for `task`, held frames shared.
    pub fn animation_frames(&self, task: &TaskRecord) -> Vec<Arc<FrameRGBA>> {
        AnimationSequencer::new(&self.compositor, task, self.cfg.sequence_opts()).collect_frames()
    }

    /// Stream the animation into `sink`; `Some(out)` on success, `None` if the sink failed.
    ///
    /// Sink failures never fail the task: the still images are still usable. A failed encode
    /// removes whatever the sink left at `out`.
    pub fn encode_video_with(
        &self,
        task: &TaskRecord,
        sink: &mut dyn FrameSink,
        out: PathBuf,
    ) -> Option<PathBuf> {
        let mut guard = PartialOutputGuard(Some(out.clone()));
        let result = self.cfg.fps().and_then(|fps| {
            AnimationSequencer::new(&self.compositor, task, self.cfg.sequence_opts())
                .encode_into(sink, fps)
        });
        match result {
            Ok(frames) => {
                guard.disarm();
                tracing::debug!(frames, out = %out.display(), "video written");
                Some(out)
            }
            Err(err) => {
                tracing::warn!(error = %err, "video encoding failed, continuing without video");
                None
            }
        }
    }
}

struct PartialOutputGuard(Option<PathBuf>);

impl PartialOutputGuard {
    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for PartialOutputGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/task_gen.rs"]
mod tests;
