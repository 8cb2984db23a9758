//! Primitive shapes and an anti-aliased rasterizer for them
//!
//! Coordinates are canvas pixels as `f32`, with pixel `(x, y)` covering the
//! square `[x, x + 1) × [y, y + 1)`. Callers compute geometry as fractions of
//! the canvas size so the same composition holds at every resolution

use crate::compositor::over;
use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Sub-samples per axis used for coverage
const SUPERSAMPLE: u32 = 4;

/// Axis-aligned bounding box, `x0 <= x1`, `y0 <= y1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Rectangle of the given extent centered on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    fn inset(&self, by: f32) -> Self {
        Self {
            x0: self.x0 + by,
            y0: self.y0 + by,
            x1: self.x1 - by,
            y1: self.y1 - by,
        }
    }
}

/// A fillable primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Rectangle whose corners are rounded with `radius` (clamped to half the short side)
    RoundedRect { bounds: Rect, radius: f32 },
    /// Ellipse inscribed in `bounds`
    Ellipse { bounds: Rect },
    /// Outline of the ellipse inscribed in `bounds`, `width` pixels thick, drawn inward
    EllipseRing { bounds: Rect, width: f32 },
    /// Band of the ellipse inscribed in `bounds`, `width` thick and drawn inward,
    /// between two angles in degrees measured clockwise from 3 o'clock
    Arc {
        bounds: Rect,
        start: f32,
        end: f32,
        width: f32,
    },
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::RoundedRect { bounds, .. }
            | Shape::Ellipse { bounds }
            | Shape::EllipseRing { bounds, .. }
            | Shape::Arc { bounds, .. } => bounds,
        }
    }

    /// Whether the point `(px, py)` lies inside the shape
    pub fn contains(&self, px: f32, py: f32) -> bool {
        match *self {
            Shape::RoundedRect { bounds, radius } => in_rounded_rect(&bounds, radius, px, py),
            Shape::Ellipse { bounds } => in_ellipse(&bounds, px, py),
            Shape::EllipseRing { bounds, width } => in_ring(&bounds, width, px, py),
            Shape::Arc {
                bounds,
                start,
                end,
                width,
            } => in_ring(&bounds, width, px, py) && in_sweep(&bounds, start, end, px, py),
        }
    }
}

fn in_rounded_rect(bounds: &Rect, radius: f32, px: f32, py: f32) -> bool {
    if px < bounds.x0 || px > bounds.x1 || py < bounds.y0 || py > bounds.y1 {
        return false;
    }
    let r = radius
        .min(bounds.width() / 2.0)
        .min(bounds.height() / 2.0)
        .max(0.0);
    // clamp panics when lo > hi, which rounding can produce.
    let (left, top) = (bounds.x0 + r, bounds.y0 + r);
    let qx = px.clamp(left, (bounds.x1 - r).max(left));
    let qy = py.clamp(top, (bounds.y1 - r).max(top));
    let (dx, dy) = (px - qx, py - qy);
    dx * dx + dy * dy <= r * r
}

fn in_ellipse(bounds: &Rect, px: f32, py: f32) -> bool {
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let (cx, cy) = bounds.center();
    let nx = (px - cx) / rx;
    let ny = (py - cy) / ry;
    nx * nx + ny * ny <= 1.0
}

fn in_ring(bounds: &Rect, width: f32, px: f32, py: f32) -> bool {
    if !in_ellipse(bounds, px, py) {
        return false;
    }
    let inner = bounds.inset(width);
    if inner.x1 <= inner.x0 || inner.y1 <= inner.y0 {
        return true;
    }
    !in_ellipse(&inner, px, py)
}

fn in_sweep(bounds: &Rect, start: f32, end: f32, px: f32, py: f32) -> bool {
    let (cx, cy) = bounds.center();
    // Y grows downward, so atan2 already runs clockwise on screen.
    let angle = (py - cy).atan2(px - cx).to_degrees().rem_euclid(360.0);
    let start = start.rem_euclid(360.0);
    let end = end.rem_euclid(360.0);
    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Fraction of pixel `(x, y)` covered by `shape`, in sixteenths
fn coverage(shape: &Shape, x: u32, y: u32) -> u32 {
    let step = 1.0 / SUPERSAMPLE as f32;
    let mut hits = 0;
    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let px = x as f32 + (sx as f32 + 0.5) * step;
            let py = y as f32 + (sy as f32 + 0.5) * step;
            if shape.contains(px, py) {
                hits += 1;
            }
        }
    }
    hits
}

/// Pixel range covering `[lo, hi]`, clipped to `0..limit`
fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
    let start = lo.floor().max(0.0).min(limit as f32) as u32;
    let end = hi.ceil().max(0.0).min(limit as f32) as u32;
    start..end.max(start)
}

/// Visit every pixel the shape touches with its coverage in `1..=SUPERSAMPLE²`
fn for_each_covered<F>(width: u32, height: u32, shape: &Shape, mut visit: F)
where
    F: FnMut(u32, u32, u32),
{
    let bounds = shape.bounds();
    for y in span(bounds.y0, bounds.y1, height) {
        for x in span(bounds.x0, bounds.x1, width) {
            let hits = coverage(shape, x, y);
            if hits > 0 {
                visit(x, y, hits);
            }
        }
    }
}

/// Fresh fully transparent layer
pub fn blank_layer(size: u32) -> RgbaImage {
    RgbaImage::new(size, size)
}

/// Paint `shape` into `layer` with `color`, blending source-over
///
/// Partially covered edge pixels get a proportionally reduced alpha
pub fn fill(layer: &mut RgbaImage, shape: &Shape, color: Rgba<u8>) {
    let full = SUPERSAMPLE * SUPERSAMPLE;
    let (width, height) = layer.dimensions();
    for_each_covered(width, height, shape, |x, y, hits| {
        let alpha = (u32::from(color[3]) * hits + full / 2) / full;
        let src = Rgba([color[0], color[1], color[2], alpha as u8]);
        let pixel = layer.get_pixel_mut(x, y);
        *pixel = over(*pixel, src);
    });
}

/// Paint `shape` into a single-channel mask, keeping the brighter value
pub fn fill_mask(mask: &mut GrayImage, shape: &Shape, value: u8) {
    let full = SUPERSAMPLE * SUPERSAMPLE;
    let (width, height) = mask.dimensions();
    for_each_covered(width, height, shape, |x, y, hits| {
        let level = ((u32::from(value) * hits + full / 2) / full) as u8;
        let pixel = mask.get_pixel_mut(x, y);
        if level > pixel[0] {
            *pixel = Luma([level]);
        }
    });
}
