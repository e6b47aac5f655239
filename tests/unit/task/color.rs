use super::*;

use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_color(rng: &mut StdRng) -> Rgb8 {
    Rgb8::new(
        rng.random_range(50..=255),
        rng.random_range(50..=255),
        rng.random_range(50..=255),
    )
}

#[test]
fn white_plus_white_saturates_to_black() {
    // Sums of 510 scale by 0.5 back to 255, so every channel inverts to 0.
    let w = Rgb8::WHITE;
    assert_eq!(normalize_sums([510, 510, 510]), [255, 255, 255]);
    assert_eq!(mix_subtractive(w, w), Rgb8::new(0, 0, 0));
}

#[test]
fn low_sums_are_left_unscaled() {
    let c = Rgb8::new(50, 50, 50);
    assert_eq!(normalize_sums([100, 100, 100]), [100, 100, 100]);
    assert_eq!(mix_subtractive(c, c), Rgb8::new(155, 155, 155));
}

#[test]
fn scaling_keeps_channel_ratios() {
    // sums (510, 255, 100): max 510 -> (255, 127, 50)
    let c1 = Rgb8::new(255, 200, 50);
    let c2 = Rgb8::new(255, 55, 50);
    assert_eq!(normalize_sums([510, 255, 100]), [255, 127, 50]);
    assert_eq!(mix_subtractive(c1, c2), Rgb8::new(0, 128, 205));
}

#[test]
fn max_exactly_255_is_not_scaled() {
    assert_eq!(normalize_sums([255, 10, 0]), [255, 10, 0]);
    let c1 = Rgb8::new(200, 5, 0);
    let c2 = Rgb8::new(55, 5, 0);
    assert_eq!(mix_subtractive(c1, c2), Rgb8::new(0, 245, 255));
}

#[test]
fn mix_is_commutative_and_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
        let a = random_color(&mut rng);
        let b = random_color(&mut rng);
        let ab = mix_subtractive(a, b);
        assert_eq!(ab, mix_subtractive(b, a));

        // Sums are >= 100 and the scale factor is >= 0.5, so no normalized channel drops
        // below 50.
        for ch in ab.channels() {
            assert!(ch <= 205, "{a:?} + {b:?} -> {ab:?}");
        }
    }
}

#[test]
fn normalization_truncates_the_float_scaled_sum() {
    // 319 * (255 / 319) lands a hair below 255 in f64 and truncates to 254.
    assert_eq!(normalize_sums([319, 100, 100]), [254, 79, 79]);
    let c1 = Rgb8::new(160, 50, 50);
    let c2 = Rgb8::new(159, 50, 50);
    assert_eq!(mix_subtractive(c1, c2), Rgb8::new(1, 176, 176));
}
