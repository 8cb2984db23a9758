//! Ordered layer compositing
//!
//! A render is a fold of [`LayerOp`]s over a base canvas. Pixels are straight
//! (non-premultiplied) RGBA; blending math is done in integers so repeated
//! renders agree bit for bit and an opaque destination stays exactly opaque

use image::{GrayImage, Rgba, RgbaImage};

/// One step of the layer stack
#[derive(Debug, Clone)]
pub enum LayerOp {
    /// Source-over a full-canvas RGBA layer
    Over(RgbaImage),
    /// Keep the image where the mask is 255 and fade to opaque black where it is 0
    MaskToBlack(GrayImage),
}

/// Source-over of a single straight-alpha pixel
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;

    // Alpha scaled by 255 so the color division below keeps full precision.
    let alpha_255 = sa * 255 + da * inv;
    if alpha_255 == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = u32::from(src[c]) * sa * 255 + u32::from(dst[c]) * da * inv;
        out[c] = ((num + alpha_255 / 2) / alpha_255).min(255) as u8;
    }
    out[3] = ((alpha_255 + 127) / 255).min(255) as u8;
    Rgba(out)
}

/// Source-over `layer` onto `base` in place. Both must share dimensions
pub fn over_in_place(base: &mut RgbaImage, layer: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), layer.dimensions());
    for (dst, src) in base.pixels_mut().zip(layer.pixels()) {
        *dst = over(*dst, *src);
    }
}

/// Mix every channel toward opaque black by the inverse of `mask`
pub fn mask_to_black_in_place(base: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(base.dimensions(), mask.dimensions());
    for (pixel, m) in base.pixels_mut().zip(mask.pixels()) {
        let m = u32::from(m[0]);
        let black = [0u32, 0, 0, 255];
        for (c, channel) in pixel.0.iter_mut().enumerate() {
            let value = u32::from(*channel) * m + black[c] * (255 - m);
            *channel = ((value + 127) / 255) as u8;
        }
    }
}

/// Fold `ops` over `base` strictly in order
pub fn composite<I>(base: RgbaImage, ops: I) -> RgbaImage
where
    I: IntoIterator<Item = LayerOp>,
{
    ops.into_iter().fold(base, |mut canvas, op| {
        match &op {
            LayerOp::Over(layer) => over_in_place(&mut canvas, layer),
            LayerOp::MaskToBlack(mask) => mask_to_black_in_place(&mut canvas, mask),
        }
        canvas
    })
}
