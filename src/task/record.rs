use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rgb8};
use crate::task::color::mix_subtractive;
use crate::task::sampler::PositionSampler;

/// Inclusive lower bound for sampled color channels.
pub const MIN_CHANNEL: u8 = 50;

/// Task type used for prompt and rubric lookup.
pub const DEFAULT_TASK_TYPE: &str = "default";

/// Everything needed to render one color-mixing task.
///
/// Built once per task and only read afterwards. `mixed_color` is derived from the two colors
/// when the record is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub color1: Rgb8,
    pub color2: Rgb8,
    pub mixed_color: Rgb8,
    pub ball1_pos: Point,
    pub ball2_pos: Point,
    /// Midpoint of the two start positions, where the disks merge.
    pub final_pos: Point,
    pub radius: u32,
    pub task_type: String,
    /// Set when the position sampler fell back to the fixed layout.
    #[serde(default)]
    pub used_fallback: bool,
}

impl TaskRecord {
    /// Sample colors, then positions, from `rng`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, sampler: &PositionSampler, radius: u32) -> Self {
        let color1 = sample_color(rng);
        let color2 = sample_color(rng);
        let positions = sampler.sample(rng);

        Self {
            color1,
            color2,
            mixed_color: mix_subtractive(color1, color2),
            ball1_pos: positions.ball1,
            ball2_pos: positions.ball2,
            final_pos: positions.meet,
            radius,
            task_type: DEFAULT_TASK_TYPE.to_string(),
            used_fallback: positions.used_fallback,
        }
    }

    /// Distance between the two start centers.
    pub fn start_distance(&self) -> f64 {
        self.ball1_pos.distance(self.ball2_pos)
    }
}

/// Uniform color with every channel in `[MIN_CHANNEL, 255]`, drawn in `r, g, b` order.
pub fn sample_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb8 {
    let r = rng.random_range(MIN_CHANNEL..=255);
    let g = rng.random_range(MIN_CHANNEL..=255);
    let b = rng.random_range(MIN_CHANNEL..=255);
    Rgb8::new(r, g, b)
}

#[cfg(test)]
#[path = "../../tests/unit/task/record.rs"]
mod tests;
