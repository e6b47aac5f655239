use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{ChromergeError, ChromergeResult};
use crate::render::frame::{FrameRGBA, Raster};
use crate::task::color::mix_subtractive;
use crate::task::record::TaskRecord;

/// Options shared by every frame a compositor renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorOpts {
    /// Output size.
    pub canvas: Canvas,
    /// Radius shared by both disks.
    pub radius: f64,
    /// Color of pixels outside both disks.
    pub background: Rgb8,
    /// Outline stroke color.
    pub outline: Rgb8,
    /// Outline stroke width in pixels, measured inward from the disk edge. `0` disables it.
    pub outline_width: f64,
}

impl CompositorOpts {
    /// White background, 2px black outline.
    pub fn new(canvas: Canvas, radius: f64) -> Self {
        Self {
            canvas,
            radius,
            background: Rgb8::WHITE,
            outline: Rgb8::BLACK,
            outline_width: 2.0,
        }
    }
}

/// One disk to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub center: Point,
    pub color: Rgb8,
}

impl Disk {
    pub fn new(center: Point, color: Rgb8) -> Self {
        Self { center, color }
    }
}

/// Which disks cover a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    Neither,
    First,
    Second,
    Both,
}

/// Rendering strategy picked from the center distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPath {
    /// `d >= 2r`: the disks are drawn one after the other.
    Separated,
    /// `0 < d < 2r`: pixels are classified into first-only, second-only and intersection.
    Overlapping,
    /// `d == 0`: a single disk of the mixed color.
    Merged,
}

/// CPU rasterizer for two-disk frames.
///
/// A pixel `(x, y)` is inside a disk when the distance from the integer coordinate to the center
/// is `<= radius`. Intersection pixels get `mix_subtractive(first, second)`. Outlines are drawn
/// last so both stay visible through the overlap.
#[derive(Clone, Debug)]
pub struct FrameCompositor {
    opts: CompositorOpts,
}

impl FrameCompositor {
    /// Build a compositor, rejecting an empty canvas or a non-positive radius.
    pub fn new(opts: CompositorOpts) -> ChromergeResult<Self> {
        if opts.canvas.width == 0 || opts.canvas.height == 0 {
            return Err(ChromergeError::validation(
                "compositor canvas width/height must be non-zero",
            ));
        }
        if !(opts.radius.is_finite() && opts.radius > 0.0) {
            return Err(ChromergeError::validation(
                "compositor radius must be finite and > 0",
            ));
        }
        if !(opts.outline_width.is_finite() && opts.outline_width >= 0.0) {
            return Err(ChromergeError::validation(
                "compositor outline width must be finite and >= 0",
            ));
        }
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Pick the strategy for two centers.
    pub fn select_path(&self, a: Point, b: Point) -> RenderPath {
        let d = a.distance(b);
        if d == 0.0 {
            RenderPath::Merged
        } else if d < 2.0 * self.opts.radius {
            RenderPath::Overlapping
        } else {
            RenderPath::Separated
        }
    }

    /// Classify pixel `(x, y)` against two centers.
    pub fn coverage(&self, first: Point, second: Point, x: u32, y: u32) -> Coverage {
        let p = Point::new(f64::from(x), f64::from(y));
        match (
            self.inside(p.distance_squared(first)),
            self.inside(p.distance_squared(second)),
        ) {
            (true, true) => Coverage::Both,
            (true, false) => Coverage::First,
            (false, true) => Coverage::Second,
            (false, false) => Coverage::Neither,
        }
    }

    /// Start-of-animation frame: both disks at their sampled positions.
    pub fn render_initial(&self, task: &TaskRecord) -> FrameRGBA {
        self.render_pair(
            Disk::new(task.ball1_pos, task.color1),
            Disk::new(task.ball2_pos, task.color2),
        )
    }

    /// End-of-animation frame: one disk of the mixed color at the midpoint.
    pub fn render_final(&self, task: &TaskRecord) -> FrameRGBA {
        self.render_merged(task.final_pos, task.mixed_color)
    }

    /// Render two disks, choosing the strategy from their distance.
    pub fn render_pair(&self, first: Disk, second: Disk) -> FrameRGBA {
        let path = self.select_path(first.center, second.center);
        tracing::trace!(?path, "compose frame");
        match path {
            RenderPath::Separated => self.render_separated(first, second),
            RenderPath::Overlapping => self.render_overlapping(first, second),
            RenderPath::Merged => {
                self.render_merged(first.center, mix_subtractive(first.color, second.color))
            }
        }
    }

    /// A single filled disk with one outline.
    pub fn render_merged(&self, center: Point, color: Rgb8) -> FrameRGBA {
        let mut raster = Raster::filled(self.opts.canvas, self.opts.background);
        self.fill_disk(&mut raster, center, color);
        self.stroke_disk(&mut raster, center);
        raster.finish()
    }

    fn render_separated(&self, first: Disk, second: Disk) -> FrameRGBA {
        let mut raster = Raster::filled(self.opts.canvas, self.opts.background);
        for disk in [first, second] {
            self.fill_disk(&mut raster, disk.center, disk.color);
            self.stroke_disk(&mut raster, disk.center);
        }
        raster.finish()
    }

    fn render_overlapping(&self, first: Disk, second: Disk) -> FrameRGBA {
        let mixed = mix_subtractive(first.color, second.color);
        let mut raster = Raster::filled(self.opts.canvas, self.opts.background);

        let bounds = match (
            self.pixel_bounds(first.center),
            self.pixel_bounds(second.center),
        ) {
            (Some(a), Some(b)) => a.union(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => return raster.finish(),
        };

        for y in bounds.y0..=bounds.y1 {
            for x in bounds.x0..=bounds.x1 {
                let color = match self.coverage(first.center, second.center, x, y) {
                    Coverage::Neither => continue,
                    Coverage::First => first.color,
                    Coverage::Second => second.color,
                    Coverage::Both => mixed,
                };
                raster.put(x, y, color);
            }
        }

        self.stroke_disk(&mut raster, first.center);
        self.stroke_disk(&mut raster, second.center);
        raster.finish()
    }

    fn fill_disk(&self, raster: &mut Raster, center: Point, color: Rgb8) {
        let Some(b) = self.pixel_bounds(center) else {
            return;
        };
        for y in b.y0..=b.y1 {
            for x in b.x0..=b.x1 {
                let d2 = Point::new(f64::from(x), f64::from(y)).distance_squared(center);
                if self.inside(d2) {
                    raster.put(x, y, color);
                }
            }
        }
    }

    fn stroke_disk(&self, raster: &mut Raster, center: Point) {
        if self.opts.outline_width == 0.0 {
            return;
        }
        let Some(b) = self.pixel_bounds(center) else {
            return;
        };
        let r = self.opts.radius;
        let inner = (r - self.opts.outline_width).max(0.0);
        for y in b.y0..=b.y1 {
            for x in b.x0..=b.x1 {
                let d2 = Point::new(f64::from(x), f64::from(y)).distance_squared(center);
                if d2 <= r * r && (inner == 0.0 || d2 > inner * inner) {
                    raster.put(x, y, self.opts.outline);
                }
            }
        }
    }

    fn inside(&self, d2: f64) -> bool {
        d2 <= self.opts.radius * self.opts.radius
    }

    /// Disk bounding box clipped to the canvas, or `None` when it falls entirely outside.
    fn pixel_bounds(&self, center: Point) -> Option<PixelBounds> {
        let r = self.opts.radius;
        let max_x = f64::from(self.opts.canvas.width - 1);
        let max_y = f64::from(self.opts.canvas.height - 1);

        let x0 = (center.x - r).floor().max(0.0);
        let y0 = (center.y - r).floor().max(0.0);
        let x1 = (center.x + r).ceil().min(max_x);
        let y1 = (center.y + r).ceil().min(max_y);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some(PixelBounds {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }
}

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug)]
struct PixelBounds {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelBounds {
    fn union(self, other: Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
