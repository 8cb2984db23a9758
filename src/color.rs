//! Color interpolation and the vertical background gradient

use image::{Rgb, Rgba, RgbaImage};

/// Interpolate a single channel, rounding half to even
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Linear per-channel interpolation between `a` and `b`
///
/// `t` is clamped to `[0, 1]`, so `t = 0` yields `a` and `t = 1` yields `b`
/// exactly
pub fn lerp(a: Rgb<u8>, b: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Rgb([
        lerp_channel(a[0], b[0], t),
        lerp_channel(a[1], b[1], t),
        lerp_channel(a[2], b[2], t),
    ])
}

/// Opaque square canvas filled with a full-height gradient from `top` to `bottom`
///
/// Every row gets its own sample (`t = row / (height - 1)`)
pub fn vertical_gradient(size: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbaImage {
    let span = f64::from(size.saturating_sub(1).max(1));
    let mut canvas = RgbaImage::new(size, size);
    for (y, row) in canvas.enumerate_rows_mut() {
        let Rgb([r, g, b]) = lerp(top, bottom, f64::from(y) / span);
        for (_, _, pixel) in row {
            *pixel = Rgba([r, g, b, 255]);
        }
    }
    canvas
}
