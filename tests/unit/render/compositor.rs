use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 200,
        height: 120,
    }
}

fn compositor(outline_width: f64) -> FrameCompositor {
    let mut opts = CompositorOpts::new(canvas(), 20.0);
    opts.outline_width = outline_width;
    FrameCompositor::new(opts).unwrap()
}

const RED: Rgb8 = Rgb8::new(230, 60, 60);
const BLUE: Rgb8 = Rgb8::new(60, 60, 230);

#[test]
fn new_rejects_degenerate_opts() {
    assert!(FrameCompositor::new(CompositorOpts::new(canvas(), 0.0)).is_err());
    assert!(
        FrameCompositor::new(CompositorOpts::new(
            Canvas {
                width: 0,
                height: 10
            },
            5.0
        ))
        .is_err()
    );
    let mut opts = CompositorOpts::new(canvas(), 5.0);
    opts.outline_width = -1.0;
    assert!(FrameCompositor::new(opts).is_err());
}

#[test]
fn select_path_follows_center_distance() {
    let c = compositor(2.0);
    let a = Point::new(50.0, 60.0);
    assert_eq!(c.select_path(a, Point::new(90.0, 60.0)), RenderPath::Separated);
    assert_eq!(c.select_path(a, Point::new(150.0, 60.0)), RenderPath::Separated);
    assert_eq!(
        c.select_path(a, Point::new(89.5, 60.0)),
        RenderPath::Overlapping
    );
    assert_eq!(c.select_path(a, a), RenderPath::Merged);
}

#[test]
fn boundary_pixel_counts_as_inside() {
    let c = compositor(0.0);
    let center = Point::new(50.0, 60.0);
    let far = Point::new(180.0, 60.0);
    assert_eq!(c.coverage(center, far, 70, 60), Coverage::First);
    assert_eq!(c.coverage(center, far, 71, 60), Coverage::Neither);
    // 12^2 + 16^2 == 20^2
    assert_eq!(c.coverage(center, far, 62, 76), Coverage::First);

    let frame = c.render_pair(Disk::new(center, RED), Disk::new(far, BLUE));
    assert_eq!(frame.pixel(70, 60), Some(RED));
    assert_eq!(frame.pixel(62, 76), Some(RED));
    assert_eq!(frame.pixel(71, 60), Some(Rgb8::WHITE));
}

#[test]
fn overlap_region_is_uniformly_mixed() {
    let c = compositor(0.0);
    let a = Point::new(80.0, 60.0);
    let b = Point::new(105.5, 63.0);
    let frame = c.render_pair(Disk::new(a, RED), Disk::new(b, BLUE));
    let mixed = mix_subtractive(RED, BLUE);

    let mut counts = [0usize; 4];
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let px = frame.pixel(x, y).unwrap();
            let expected = match c.coverage(a, b, x, y) {
                Coverage::Neither => {
                    counts[0] += 1;
                    Rgb8::WHITE
                }
                Coverage::First => {
                    counts[1] += 1;
                    RED
                }
                Coverage::Second => {
                    counts[2] += 1;
                    BLUE
                }
                Coverage::Both => {
                    counts[3] += 1;
                    mixed
                }
            };
            assert_eq!(px, expected, "pixel ({x}, {y})");
        }
    }
    assert!(counts.iter().all(|&n| n > 0), "{counts:?}");
}

#[test]
fn overlap_outlines_are_drawn_over_fill() {
    let c = compositor(2.0);
    let a = Point::new(80.0, 60.0);
    let b = Point::new(100.0, 60.0);
    let frame = c.render_pair(Disk::new(a, RED), Disk::new(b, BLUE));

    // Right edge of disk 1 lies inside disk 2: the stroke must still show there.
    assert_eq!(frame.pixel(100, 60), Some(Rgb8::BLACK));
    // Left edge of disk 2 lies inside disk 1.
    assert_eq!(frame.pixel(80, 60), Some(Rgb8::BLACK));
    // Just inside the strokes the intersection is mixed.
    assert_eq!(frame.pixel(90, 60), Some(mix_subtractive(RED, BLUE)));
    // Outer edges.
    assert_eq!(frame.pixel(60, 60), Some(Rgb8::BLACK));
    assert_eq!(frame.pixel(62, 60), Some(RED));
    assert_eq!(frame.pixel(118, 60), Some(BLUE));
}

#[test]
fn coincident_centers_match_merged_frame() {
    let c = compositor(2.0);
    let p = Point::new(100.0, 60.0);
    let pair = c.render_pair(Disk::new(p, RED), Disk::new(p, BLUE));
    let merged = c.render_merged(p, mix_subtractive(RED, BLUE));
    assert_eq!(pair, merged);

    // The overlapping path at zero distance would produce the same pixels.
    let overlapping = c.render_overlapping(Disk::new(p, RED), Disk::new(p, BLUE));
    assert_eq!(overlapping, merged);
}

#[test]
fn separated_disks_keep_their_colors() {
    let c = compositor(2.0);
    let frame = c.render_pair(
        Disk::new(Point::new(40.0, 60.0), RED),
        Disk::new(Point::new(150.0, 60.0), BLUE),
    );
    assert_eq!(frame.pixel(40, 60), Some(RED));
    assert_eq!(frame.pixel(150, 60), Some(BLUE));
    assert_eq!(frame.pixel(95, 60), Some(Rgb8::WHITE));
    assert_eq!(frame.pixel(20, 60), Some(Rgb8::BLACK));
    assert_eq!(frame.pixel(19, 60), Some(Rgb8::WHITE));
}

#[test]
fn disks_past_the_edge_are_clipped() {
    let c = compositor(0.0);
    let frame = c.render_pair(
        Disk::new(Point::new(-5.0, -5.0), RED),
        Disk::new(Point::new(500.0, 500.0), BLUE),
    );
    assert_eq!(frame.pixel(0, 0), Some(RED));
    assert_eq!(frame.pixel(199, 119), Some(Rgb8::WHITE));
}
