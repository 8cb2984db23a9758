//! Procedural app icon renderer
//!
//! Each icon is drawn from scratch at its target pixel size by compositing a
//! fixed stack of layers, so small sizes stay crisp instead of being
//! downsampled from one master bitmap

pub mod color;
pub mod compositor;
pub mod contents_json;
pub mod effects;
pub mod glyphs;
pub mod icon_gen;
pub mod render;
pub mod shapes;
pub mod sizes;

pub use icon_gen::{generate_icons, Config, Summary};
pub use render::{render_icon, RenderedIcon, Variant};
pub use sizes::SizeDescriptor;
