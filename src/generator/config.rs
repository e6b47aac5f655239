use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::animation::sequencer::SequenceOpts;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ChromergeError, ChromergeResult};
use crate::render::compositor::CompositorOpts;
use crate::task::sampler::PositionSampler;

/// Generator settings.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Dataset domain name, used in bundle directory names and task ids.
    pub domain: String,
    /// Output image size.
    pub canvas: Canvas,
    /// Radius shared by both disks, in pixels.
    pub ball_radius: u32,
    /// Minimum distance between the two start centers.
    pub min_distance: f64,
    /// Distance kept between start centers and the canvas edges.
    pub edge_margin: u32,
    /// Disk outline width in pixels.
    pub outline_width: f64,
    /// Render and encode the ground-truth animation.
    pub generate_videos: bool,
    /// Animation frame rate.
    pub video_fps: u32,
    /// Repeats of the initial and final frames.
    pub hold_frames: u32,
    /// Frames spent moving the disks together.
    pub transition_frames: u32,
    /// Where videos are encoded before being copied into bundles.
    ///
    /// Defaults to `<system temp>/<domain>_videos`.
    pub video_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            domain: "color_subtraction_mixing".to_string(),
            canvas: Canvas {
                width: 512,
                height: 512,
            },
            ball_radius: 40,
            min_distance: 150.0,
            edge_margin: 60,
            outline_width: 2.0,
            generate_videos: true,
            video_fps: 10,
            hold_frames: SequenceOpts::default().hold_frames,
            transition_frames: SequenceOpts::default().transition_frames,
            video_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> ChromergeResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ChromergeError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON config string.
    pub fn from_json_str(s: &str) -> ChromergeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ChromergeError::serde(format!("parse config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject structurally impossible values.
    ///
    /// Whether `min_distance` is reachable on the canvas is not checked; the sampler's attempt
    /// budget and fallback layout cover that.
    pub fn validate(&self) -> ChromergeResult<()> {
        if self.domain.trim().is_empty() {
            return Err(ChromergeError::validation("domain must not be empty"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ChromergeError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.ball_radius == 0 {
            return Err(ChromergeError::validation("ball_radius must be > 0"));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(ChromergeError::validation(
                "min_distance must be finite and >= 0",
            ));
        }
        if !(self.outline_width.is_finite() && self.outline_width >= 0.0) {
            return Err(ChromergeError::validation(
                "outline_width must be finite and >= 0",
            ));
        }
        if self.generate_videos && self.video_fps == 0 {
            return Err(ChromergeError::validation(
                "video_fps must be > 0 when generate_videos is set",
            ));
        }
        Ok(())
    }

    pub fn compositor_opts(&self) -> CompositorOpts {
        CompositorOpts {
            outline_width: self.outline_width,
            ..CompositorOpts::new(self.canvas, f64::from(self.ball_radius))
        }
    }

    pub fn sampler(&self) -> PositionSampler {
        PositionSampler::new(self.canvas, self.edge_margin, self.min_distance)
    }

    pub fn sequence_opts(&self) -> SequenceOpts {
        SequenceOpts {
            hold_frames: self.hold_frames,
            transition_frames: self.transition_frames,
        }
    }

    pub fn fps(&self) -> ChromergeResult<Fps> {
        Fps::new(self.video_fps, 1)
    }

    /// Directory videos are encoded into.
    pub fn resolved_video_dir(&self) -> PathBuf {
        self.video_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(format!("{}_videos", self.domain)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/config.rs"]
mod tests;
