//! Rendering abstraction layer.
//!
//! *The core never touches a pixel buffer directly.*
//! Wall strips and the minimap are expressed with four primitives –
//! filled rectangle, filled circle, stroked line and stretched image blit –
//! on any type that implements [`RenderTarget`].
//!
//! * [`software::Software`] is the CPU back-end used by the `view_sw` binary.
//! * Tests plug in a recording target to check geometry without pixels.

pub mod minimap;
pub mod software;
pub mod walls;

use glam::DVec2;

use crate::world::{Color, Texture};

pub use minimap::Minimap;
pub use software::Software;
pub use walls::{Strip, render_walls, strip_geometry, texture_u};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Axis-aligned rectangle in (sub-)pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawing surface the core renders into.
///
/// Coordinates are pixels with the origin at the top-left corner; shapes
/// that fall partly or wholly outside the surface are clipped by the
/// implementation.
pub trait RenderTarget {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Color);

    /// Stretch the `src` rectangle of `tex` (texel units) over `dst`.
    fn draw_image(&mut self, tex: &Texture, src: Rect, dst: Rect);

    /// Paint the whole surface.
    fn clear(&mut self, color: Color) {
        let full = Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64);
        self.fill_rect(full, color);
    }
}
