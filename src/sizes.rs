//! Turning asset-catalog size descriptors into concrete pixel sizes

use crate::render::Variant;
use std::collections::HashSet;
use tracing::warn;

/// Size token assumed when an entry has none
pub const DEFAULT_SIZE_TOKEN: &str = "0x0";
/// Scale token assumed when an entry has none
pub const DEFAULT_SCALE_TOKEN: &str = "1x";
/// Largest icon side the generator will render
pub const MAX_PIXEL_SIZE: u32 = 16_384;

/// A requested resolution: point size times scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDescriptor {
    pub point_size: f64,
    pub scale_factor: i64,
}

impl SizeDescriptor {
    pub fn new(point_size: f64, scale_factor: i64) -> Self {
        Self {
            point_size,
            scale_factor,
        }
    }

    /// Parse the manifest's `"<w>x<h>"` and `"<N>x"` tokens
    ///
    /// Never fails: an unreadable point size becomes `0.0` and an unreadable
    /// scale becomes `1`, which resolves to a 1×1 icon
    pub fn parse(size: Option<&str>, scale: Option<&str>) -> Self {
        let size = size.unwrap_or(DEFAULT_SIZE_TOKEN);
        let scale = scale.unwrap_or(DEFAULT_SCALE_TOKEN);

        let width = size.split('x').next().unwrap_or_default();
        let point_size = match width.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                warn!(token = size, "unreadable size token, using point size 0");
                0.0
            }
        };

        let scale_factor = match scale.replace('x', "").trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                warn!(token = scale, "unreadable scale token, using scale 1");
                1
            }
        };

        Self::new(point_size, scale_factor)
    }

    /// `max(1, round(point_size * scale_factor))`, rounding half to even
    pub fn pixel_size(&self) -> u32 {
        let pixels = (self.point_size * self.scale_factor as f64).round_ties_even();
        if pixels.is_nan() || pixels < 1.0 {
            1
        } else {
            // Float to int casts saturate.
            pixels as u32
        }
    }
}

/// One file to write: which descriptor asked for it and at what size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Position of the descriptor in the input
    pub index: usize,
    pub pixel_size: u32,
    pub filename: String,
}

/// Plan the renders for a list of descriptors
///
/// Normal keeps one job per descriptor, since every manifest entry is
/// annotated. Transparent keeps only the first descriptor for each pixel size
pub fn plan(descriptors: &[SizeDescriptor], variant: Variant) -> Vec<RenderJob> {
    let mut seen = HashSet::new();
    descriptors
        .iter()
        .enumerate()
        .filter_map(|(index, descriptor)| {
            let pixel_size = descriptor.pixel_size();
            let first = seen.insert(pixel_size);
            if variant == Variant::Transparent && !first {
                return None;
            }
            Some(RenderJob {
                index,
                pixel_size,
                filename: variant.filename(pixel_size),
            })
        })
        .collect()
}
