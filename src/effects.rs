//! Blur, grain and vignette effects

use crate::shapes::{fill_mask, Rect, Shape};
use image::{imageops, GrayImage, ImageBuffer, Pixel, Rgba, RgbaImage};
use rand::Rng;

/// Mean and standard deviation of the grain before scaling
const NOISE_MEAN: f64 = 128.0;
const NOISE_SIGMA: f64 = 100.0;

/// Vignette ellipse overshoot on every side, as a fraction of the canvas
const VIGNETTE_OVERSHOOT: f32 = 0.1;
/// Vignette softness, as a fraction of the canvas
const VIGNETTE_BLUR: f32 = 0.12;

/// Gaussian blur with standard deviation `sigma` pixels
///
/// Callers derive `sigma` from the canvas size so softness scales with
/// resolution. A non-positive or non-finite `sigma` leaves the image as is
pub fn gaussian_blur<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    sigma: f32,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    if !sigma.is_finite() || sigma <= 0.0 {
        return image.clone();
    }
    imageops::blur(image, sigma)
}

/// Draw one sample from a normal distribution (Box-Muller)
fn gaussian_sample<R: Rng>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    // 1 - u keeps the logarithm away from zero.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + sigma * z
}

/// Monochrome grain as an RGBA layer whose color and alpha are the same value
///
/// Samples are centered on mid-gray, clamped to the channel range and scaled
/// by `intensity` (truncating), so low intensities give a faint light speckle
pub fn noise_layer<R: Rng>(size: u32, intensity: f32, rng: &mut R) -> RgbaImage {
    let intensity = f64::from(intensity.clamp(0.0, 1.0));
    let mut layer = RgbaImage::new(size, size);
    for pixel in layer.pixels_mut() {
        let sample = gaussian_sample(rng, NOISE_MEAN, NOISE_SIGMA).clamp(0.0, 255.0);
        let value = (sample.round() * intensity) as u8;
        *pixel = Rgba([value, value, value, value]);
    }
    layer
}

/// Soft elliptical mask: 255 in the middle, falling off toward the corners
pub fn vignette_mask(size: u32) -> GrayImage {
    let s = size as f32;
    let overshoot = s * VIGNETTE_OVERSHOOT;
    let mut mask = GrayImage::new(size, size);
    let ellipse = Shape::Ellipse {
        bounds: Rect::new(-overshoot, -overshoot, s + overshoot, s + overshoot),
    };
    fill_mask(&mut mask, &ellipse, 255);
    gaussian_blur(&mask, s * VIGNETTE_BLUR)
}
