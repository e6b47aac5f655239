use rand::Rng;

use crate::foundation::core::{Canvas, Point};

/// Rejection-sampling budget before falling back to the fixed layout.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 100;

/// Sampler for two disk centers that are at least `min_distance` apart.
#[derive(Clone, Copy, Debug)]
pub struct PositionSampler {
    /// Canvas the centers must land in.
    pub canvas: Canvas,
    /// Distance kept between any center and the canvas edges.
    pub margin: u32,
    /// Minimum Euclidean distance between the two centers.
    pub min_distance: f64,
    /// Number of candidate pairs drawn before the fallback layout is used.
    pub max_attempts: u32,
}

/// Two disk centers and the point where they meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledPositions {
    /// Start center of disk 1.
    pub ball1: Point,
    /// Start center of disk 2.
    pub ball2: Point,
    /// Exact midpoint of `ball1` and `ball2`.
    pub meet: Point,
    /// `true` when rejection sampling ran out of attempts.
    pub used_fallback: bool,
}

impl PositionSampler {
    /// Sampler with the default attempt budget.
    pub fn new(canvas: Canvas, margin: u32, min_distance: f64) -> Self {
        Self {
            canvas,
            margin,
            min_distance,
            max_attempts: MAX_SAMPLE_ATTEMPTS,
        }
    }

    /// Draw a pair of centers, falling back to [`PositionSampler::fallback`] when exhausted.
    ///
    /// Each attempt draws `x1, y1, x2, y2` in that order, uniformly over
    /// `[margin, dim - margin]` (inclusive).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampledPositions {
        let (x_lo, x_hi) = axis_bounds(self.canvas.width, self.margin);
        let (y_lo, y_hi) = axis_bounds(self.canvas.height, self.margin);

        for _ in 0..self.max_attempts {
            let x1 = rng.random_range(x_lo..=x_hi);
            let y1 = rng.random_range(y_lo..=y_hi);
            let x2 = rng.random_range(x_lo..=x_hi);
            let y2 = rng.random_range(y_lo..=y_hi);

            let ball1 = Point::new(f64::from(x1), f64::from(y1));
            let ball2 = Point::new(f64::from(x2), f64::from(y2));
            if ball1.distance(ball2) >= self.min_distance {
                return SampledPositions {
                    ball1,
                    ball2,
                    meet: ball1.midpoint(ball2),
                    used_fallback: false,
                };
            }
        }

        tracing::debug!(
            attempts = self.max_attempts,
            min_distance = self.min_distance,
            "position sampling exhausted, using fallback layout"
        );
        self.fallback()
    }

    /// Fixed layout: centers at one quarter and three quarters of the width, half height.
    pub fn fallback(&self) -> SampledPositions {
        let w = self.canvas.width;
        let h = self.canvas.height;
        let ball1 = Point::new(f64::from(w / 4), f64::from(h / 2));
        let ball2 = Point::new((3 * u64::from(w) / 4) as f64, f64::from(h / 2));
        SampledPositions {
            ball1,
            ball2,
            meet: ball1.midpoint(ball2),
            used_fallback: true,
        }
    }
}

/// Inclusive sampling range along one axis; collapses to `margin` when the margin leaves no room.
fn axis_bounds(dim: u32, margin: u32) -> (u32, u32) {
    let hi = dim.saturating_sub(margin);
    (margin, hi.max(margin))
}

#[cfg(test)]
#[path = "../../tests/unit/task/sampler.rs"]
mod tests;
