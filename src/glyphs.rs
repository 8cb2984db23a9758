//! The icon's iconography, one transparent layer per element
//!
//! Every coordinate is a fraction of the canvas side, so a 16px and a 1024px
//! render show the same composition at different fidelity

use crate::shapes::{blank_layer, fill, Rect, Shape};
use image::{Rgba, RgbaImage};
use rand::Rng;

/// Signal bar height multipliers, left to right
pub const BAR_HEIGHTS: [f32; 5] = [0.5, 0.75, 1.0, 0.75, 0.5];

/// Orbit ring colors from the innermost ring outward
pub const ORBIT_COLORS: [Rgba<u8>; 3] = [
    Rgba([170, 192, 255, 190]),
    Rgba([126, 148, 255, 170]),
    Rgba([86, 106, 242, 150]),
];

/// Sweeps drawn for every orbit ring, in degrees clockwise from 3 o'clock
const ORBIT_SWEEPS: [(f32, f32); 2] = [(210.0, 330.0), (30.0, 150.0)];

const MIC_HEAD: Rgba<u8> = Rgba([246, 248, 255, 255]);
const MIC_STEM: Rgba<u8> = Rgba([224, 228, 255, 255]);
const MIC_BASE: Rgba<u8> = Rgba([86, 102, 238, 245]);
const MIC_SHINE: Rgba<u8> = Rgba([255, 255, 255, 96]);
const BAR_COLOR: Rgba<u8> = Rgba([255, 255, 255, 200]);
const GLOW_COLOR: [u8; 3] = [178, 186, 255];
const PLANET_FILL: Rgba<u8> = Rgba([60, 74, 170, 210]);
const PLANET_RING: Rgba<u8> = Rgba([220, 230, 255, 150]);

/// Stroke width that never drops below one pixel
fn stroke(size: f32, fraction: f32) -> f32 {
    (size * fraction).floor().max(1.0)
}

/// Soft disc behind the glyph, centered a little above the middle
///
/// Returned unblurred; the renderer softens it
pub fn glow_layer(size: u32, alpha: u8) -> RgbaImage {
    let s = size as f32;
    let mut layer = blank_layer(size);
    let diameter = s * 0.82;
    let bounds = Rect::centered(s / 2.0, s * 0.38, diameter, diameter);
    let [r, g, b] = GLOW_COLOR;
    fill(&mut layer, &Shape::Ellipse { bounds }, Rgba([r, g, b, alpha]));
    layer
}

/// Decorative planet: a filled disc with a thin highlight ring
pub fn planet_layer(size: u32) -> RgbaImage {
    let s = size as f32;
    let margin = s * 0.15;
    let mut layer = blank_layer(size);

    let disc = Rect::new(margin, margin * 0.92, s - margin, s - margin * 0.7);
    fill(&mut layer, &Shape::Ellipse { bounds: disc }, PLANET_FILL);

    let ring = Rect::new(margin * 1.1, margin, s - margin * 1.1, s - margin * 0.76);
    let width = stroke(s, 0.018);
    fill(
        &mut layer,
        &Shape::EllipseRing {
            bounds: ring,
            width,
        },
        PLANET_RING,
    );
    layer
}

/// Three concentric rings, each two opposing arcs, darker toward the outside
pub fn orbit_layer(size: u32) -> RgbaImage {
    let s = size as f32;
    let width = stroke(s, 0.015);
    let mut layer = blank_layer(size);
    for (index, color) in ORBIT_COLORS.iter().enumerate() {
        let padding = s * (0.2 + index as f32 * 0.08);
        let bounds = Rect::new(padding, padding, s - padding, s - padding);
        for (start, end) in ORBIT_SWEEPS {
            let arc = Shape::Arc {
                bounds,
                start,
                end,
                width,
            };
            fill(&mut layer, &arc, *color);
        }
    }
    layer
}

/// Paint the five equalizer bars, mirrored about a horizontal baseline
pub fn draw_signal_bars(layer: &mut RgbaImage) {
    let s = layer.width() as f32;
    let center_x = s / 2.0;
    let base_y = s * 0.38;
    let bar_width = s * 0.045;
    let spacing = bar_width * 0.7;
    let middle = (BAR_HEIGHTS.len() - 1) as f32 / 2.0;

    for (index, factor) in BAR_HEIGHTS.iter().enumerate() {
        let offset = index as f32 - middle;
        let x0 = center_x + offset * (bar_width + spacing) - bar_width / 2.0;
        let half_height = s * 0.18 * factor;
        let bar = Shape::RoundedRect {
            bounds: Rect::new(x0, base_y - half_height, x0 + bar_width, base_y + half_height),
            radius: bar_width / 2.0,
        };
        fill(layer, &bar, BAR_COLOR);
    }
}

/// Paint the microphone: head, stem, base and a glossy highlight strip
pub fn draw_microphone(layer: &mut RgbaImage) {
    let s = layer.width() as f32;
    let center_x = s / 2.0;
    let center_y = s * 0.5;
    let mic_width = s * 0.26;
    let mic_height = s * 0.36;

    let head = Shape::RoundedRect {
        bounds: Rect::centered(center_x, center_y, mic_width, mic_height),
        radius: s * 0.08,
    };
    fill(layer, &head, MIC_HEAD);

    let head_bottom = center_y + mic_height / 2.0;
    let stem_width = s * 0.1;
    let stem_height = s * 0.16;
    let stem = Shape::RoundedRect {
        bounds: Rect::new(
            center_x - stem_width / 2.0,
            head_bottom,
            center_x + stem_width / 2.0,
            head_bottom + stem_height,
        ),
        radius: stem_width / 2.0,
    };
    fill(layer, &stem, MIC_STEM);

    let stem_bottom = head_bottom + stem_height;
    let base_radius = s * 0.17;
    let base = Shape::Ellipse {
        bounds: Rect::new(
            center_x - base_radius,
            stem_bottom - s * 0.02,
            center_x + base_radius,
            stem_bottom + s * 0.1,
        ),
    };
    fill(layer, &base, MIC_BASE);

    let shine_height = mic_height * 0.5;
    let shine = Shape::RoundedRect {
        bounds: Rect::new(
            center_x - mic_width * 0.24,
            center_y - shine_height / 2.0,
            center_x - mic_width * 0.05,
            center_y + shine_height / 2.0,
        ),
        radius: s * 0.04,
    };
    fill(layer, &shine, MIC_SHINE);
}

/// Bars and microphone share one layer, bars underneath
pub fn signal_layer(size: u32) -> RgbaImage {
    let mut layer = blank_layer(size);
    draw_signal_bars(&mut layer);
    draw_microphone(&mut layer);
    layer
}

/// Number of sparkles for a canvas side
pub fn sparkle_count(size: u32) -> usize {
    ((size as f32 * 0.04) as usize).max(6)
}

/// Scatter small translucent white dots over the upper 60% of the canvas
///
/// Placement comes entirely from `rng`; pass a freshly seeded generator to get
/// the same field for the same size every time
pub fn sparkle_layer<R: Rng>(size: u32, rng: &mut R) -> RgbaImage {
    let s = size as f32;
    let mut layer = blank_layer(size);
    for _ in 0..sparkle_count(size) {
        let radius = rng.gen_range(s * 0.004..s * 0.012);
        let x = rng.gen_range(radius..s - radius);
        let y = rng.gen_range(radius..s * 0.6);
        let opacity: u8 = rng.gen_range(60..=140);
        let dot = Shape::Ellipse {
            bounds: Rect::centered(x, y, radius * 2.0, radius * 2.0),
        };
        fill(&mut layer, &dot, Rgba([255, 255, 255, opacity]));
    }
    layer
}
