use super::*;

#[test]
fn from_rgba8_checks_length() {
    assert!(FrameRGBA::from_rgba8(2, 2, vec![0; 15]).is_err());
    let f = FrameRGBA::from_rgba8(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    assert_eq!(f.pixel(1, 0), Some(Rgb8::new(4, 5, 6)));
    assert_eq!(f.pixel(2, 0), None);
}

#[test]
fn raster_put_writes_opaque_pixel() {
    let mut r = Raster::filled(
        Canvas {
            width: 3,
            height: 2,
        },
        Rgb8::WHITE,
    );
    r.put(2, 1, Rgb8::new(9, 8, 7));
    let f = r.finish();
    assert_eq!(f.pixel(0, 0), Some(Rgb8::WHITE));
    assert_eq!(f.pixel(2, 1), Some(Rgb8::new(9, 8, 7)));
    assert_eq!(&f.data()[20..24], &[9, 8, 7, 255]);
}

#[test]
fn save_png_roundtrips_through_image() {
    let dir = std::path::PathBuf::from("target").join("unit_frame_png");
    let path = dir.join("f.png");
    let _ = std::fs::remove_file(&path);

    let mut r = Raster::filled(
        Canvas {
            width: 4,
            height: 4,
        },
        Rgb8::WHITE,
    );
    r.put(1, 2, Rgb8::new(10, 20, 30));
    r.finish().save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.get_pixel(1, 2).0, [10, 20, 30, 255]);
}

#[test]
fn save_png_failure_is_a_render_error() {
    // The target path is an existing directory, so the PNG write itself fails.
    let dir = std::path::PathBuf::from("target").join("unit_frame_png_dir");
    std::fs::create_dir_all(dir.join("taken.png")).unwrap();

    let frame = Raster::filled(
        Canvas {
            width: 2,
            height: 2,
        },
        Rgb8::WHITE,
    )
    .finish();
    let err = frame.save_png(&dir.join("taken.png")).unwrap_err();
    assert!(matches!(err, ChromergeError::Render(_)), "{err:?}");
}
