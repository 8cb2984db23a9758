//! One full icon render for a pixel size and variant

use crate::color::vertical_gradient;
use crate::compositor::{composite, LayerOp};
use crate::effects::{gaussian_blur, noise_layer, vignette_mask};
use crate::glyphs::{glow_layer, orbit_layer, planet_layer, signal_layer, sparkle_layer};
use anyhow::bail;
use image::{Rgb, RgbaImage};
use rand::{rngs::StdRng, SeedableRng};
use std::{fmt, str::FromStr};
use tracing::debug;

/// Seed re-applied before every sparkle field
pub const SPARKLE_SEED: u64 = 42;
/// Seed re-applied before every grain field
pub const NOISE_SEED: u64 = 0x6772_6169_6e;

const GRADIENT_TOP: Rgb<u8> = Rgb([134, 102, 255]);
const GRADIENT_BOTTOM: Rgb<u8> = Rgb([35, 43, 96]);
const NOISE_INTENSITY: f32 = 0.06;

/// Blur radii as fractions of the canvas side
const GLOW_BLUR: f32 = 0.09;
const SPARKLE_BLUR: f32 = 0.01;

/// Render mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Variant {
    /// Full icon on an opaque background, written into the asset catalog
    Normal,
    /// Subject only on a transparent background
    Transparent,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Normal => "normal",
            Variant::Transparent => "transparent",
        }
    }

    /// Output filename for a pixel size
    pub fn filename(&self, pixel_size: u32) -> String {
        match self {
            Variant::Normal => format!("appicon-{pixel_size}.png"),
            Variant::Transparent => format!("appicon-transparent-{pixel_size}.png"),
        }
    }

    fn glow_alpha(&self) -> u8 {
        match self {
            Variant::Normal => 90,
            Variant::Transparent => 140,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Variant::Normal),
            "transparent" => Ok(Variant::Transparent),
            other => bail!("Unsupported variant: {other}. Available variants: normal, transparent"),
        }
    }
}

/// A finished render, tagged with what produced it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    pub pixel_size: u32,
    pub variant: Variant,
    pub image: RgbaImage,
}

impl RenderedIcon {
    pub fn filename(&self) -> String {
        self.variant.filename(self.pixel_size)
    }
}

/// Starting canvas: the gradient for Normal, full transparency otherwise
fn base_canvas(size: u32, variant: Variant) -> RgbaImage {
    match variant {
        Variant::Normal => vertical_gradient(size, GRADIENT_TOP, GRADIENT_BOTTOM),
        Variant::Transparent => RgbaImage::new(size, size),
    }
}

/// The ordered layer stack for a render, bottom first
///
/// Each layer is built independently; the order here is the composition
pub fn layer_stack(size: u32, variant: Variant) -> Vec<LayerOp> {
    let s = size as f32;
    let mut ops = Vec::with_capacity(7);

    debug!(size, %variant, "building glow layer");
    let glow = glow_layer(size, variant.glow_alpha());
    ops.push(LayerOp::Over(gaussian_blur(&glow, s * GLOW_BLUR)));

    if variant == Variant::Normal {
        debug!(size, "building planet layer");
        ops.push(LayerOp::Over(planet_layer(size)));
    }

    debug!(size, "building orbit and signal layers");
    ops.push(LayerOp::Over(orbit_layer(size)));
    ops.push(LayerOp::Over(signal_layer(size)));

    debug!(size, "building sparkle layer");
    let mut sparkle_rng = StdRng::seed_from_u64(SPARKLE_SEED);
    let sparkles = sparkle_layer(size, &mut sparkle_rng);
    ops.push(LayerOp::Over(gaussian_blur(&sparkles, s * SPARKLE_BLUR)));

    if variant == Variant::Normal {
        debug!(size, "building grain and vignette");
        let mut noise_rng = StdRng::seed_from_u64(NOISE_SEED);
        ops.push(LayerOp::Over(noise_layer(size, NOISE_INTENSITY, &mut noise_rng)));
        ops.push(LayerOp::MaskToBlack(vignette_mask(size)));
    }

    ops
}

/// Render the icon at `pixel_size` for `variant`
///
/// Deterministic: the same arguments always give the same pixels
pub fn render_icon(pixel_size: u32, variant: Variant) -> RenderedIcon {
    let size = pixel_size.max(1);
    let image = composite(base_canvas(size, variant), layer_stack(size, variant));
    RenderedIcon {
        pixel_size: size,
        variant,
        image,
    }
}
