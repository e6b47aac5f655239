//! Task data: sampled colors and positions, plus the subtractive mixing rule.

/// Subtractive color mixing.
pub mod color;
/// The per-task record consumed by rendering.
pub mod record;
/// Bounded rejection sampling of disk centers.
pub mod sampler;
