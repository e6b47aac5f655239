use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.as_f64(), 10.0);
    assert!((fps.frames_to_secs(35) - 3.5).abs() < 1e-12);
}

#[test]
fn canvas_rgba_len_counts_four_bytes_per_pixel() {
    let c = Canvas {
        width: 6,
        height: 4,
    };
    assert_eq!(c.rgba_len(), 96);
}

#[test]
fn rgb8_serializes_as_array() {
    let c = Rgb8::new(1, 2, 3);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[1,2,3]");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    assert_eq!(c.to_rgba(), [1, 2, 3, 255]);
}
