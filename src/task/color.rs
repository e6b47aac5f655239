use crate::foundation::core::Rgb8;

/// Mix two colors with the subtractive rule `255 - normalize(c1 + c2)`.
///
/// Channels are summed in `u16` (max 510). When the largest sum exceeds 255, all three sums are
/// multiplied by the `f64` factor `255 / max` and truncated, keeping their ratios; otherwise they are used as-is. Each
/// normalized channel is then inverted against 255.
///
/// The result depends only on the two input colors, so every pixel of a disk intersection
/// shares it. Callers compute it once per frame.
pub fn mix_subtractive(c1: Rgb8, c2: Rgb8) -> Rgb8 {
    let a = c1.channels();
    let b = c2.channels();
    let sums = [
        u16::from(a[0]) + u16::from(b[0]),
        u16::from(a[1]) + u16::from(b[1]),
        u16::from(a[2]) + u16::from(b[2]),
    ];
    let normalized = normalize_sums(sums);
    Rgb8::new(
        255 - normalized[0],
        255 - normalized[1],
        255 - normalized[2],
    )
}

/// Scale additive channel sums into `0..=255`, preserving their proportions.
fn normalize_sums(sums: [u16; 3]) -> [u8; 3] {
    let max = sums.iter().copied().max().unwrap_or(0);
    if max <= 255 {
        return sums.map(|s| s as u8);
    }
    // Truncating `s * (255 / max)` in f64; products land just below an integer for some sums, and
    // that truncation is part of the color contract. `s <= max` keeps the result within 255.
    let scale = 255.0 / f64::from(max);
    sums.map(|s| (f64::from(s) * scale) as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/task/color.rs"]
mod tests;
