//! ---------------------------------------------------------------------------
//! Software (CPU) render target
//!
//! * Fills a `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Every primitive clips to the buffer before touching memory, so callers
//!   may hand it strips far taller than the screen.
//! ---------------------------------------------------------------------------

use glam::DVec2;

use crate::{
    renderer::{Rect, RenderTarget, Rgba},
    world::{Color, Texture},
};

/// CPU frame-buffer.
#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    pub fn new(w: usize, h: usize) -> Self {
        let mut sw = Self::default();
        sw.begin_frame(w, h);
        sw
    }

    /// (Re)allocate for the requested resolution.  Contents are left as-is;
    /// the session clears the target itself.
    pub fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.clear();
            self.scratch.resize(w * h, 0);
        }
    }

    /// Finish the frame and **loan** the finished buffer to `submit`.
    pub fn end_frame<F, R>(&self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    /// Write one pixel, blending by the source alpha.
    #[inline]
    fn plot(&mut self, x: usize, y: usize, color: Color) {
        let idx = y * self.width + x;
        if color.a >= 1.0 {
            self.scratch[idx] = color.to_rgba();
        } else if color.a > 0.0 {
            self.scratch[idx] = blend(self.scratch[idx], color);
        }
    }

    /// Pixel range `[lo, hi)` covered by `start .. start+len`, clipped to
    /// `0 .. limit`.
    #[inline]
    fn span(start: f64, len: f64, limit: usize) -> (usize, usize) {
        let lo = start.round().clamp(0.0, limit as f64) as usize;
        let hi = (start + len).round().clamp(0.0, limit as f64) as usize;
        (lo, hi.max(lo))
    }
}

/// Source-over blend of `src` onto an opaque `dst` pixel.
fn blend(dst: Rgba, src: Color) -> Rgba {
    let a = src.a.clamp(0.0, 1.0);
    let mix = |shift: u32, s: f32| {
        let d = ((dst >> shift) & 0xFF) as f32 / 255.0;
        let v = s.clamp(0.0, 1.0) * a + d * (1.0 - a);
        ((v * 255.0).round() as u32) << shift
    };
    0xFF00_0000 | mix(16, src.r) | mix(8, src.g) | mix(0, src.b)
}

/*──────────────────────── RenderTarget impl ────────────────────────*/
impl RenderTarget for Software {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, x1) = Self::span(rect.x, rect.w, self.width);
        let (y0, y1) = Self::span(rect.y, rect.h, self.height);
        if color.a >= 1.0 {
            let px = color.to_rgba();
            for y in y0..y1 {
                let row = y * self.width;
                self.scratch[row + x0..row + x1].fill(px);
            }
            return;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        let (x0, x1) = Self::span(center.x - radius, 2.0 * radius, self.width);
        let (y0, y1) = Self::span(center.y - radius, 2.0 * radius, self.height);
        let r2 = radius * radius;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if p.distance_squared(center) <= r2 {
                    self.plot(x, y, color);
                }
            }
        }
    }

    /// Integer Bresenham between the pixels containing `from` and `to`.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Color) {
        let (mut x0, mut y0) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if (0..self.width as i64).contains(&x0) && (0..self.height as i64).contains(&y0) {
                self.plot(x0 as usize, y0 as usize, color);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Nearest-neighbour stretch; fully transparent texels are skipped.
    fn draw_image(&mut self, tex: &Texture, src: Rect, dst: Rect) {
        if tex.w == 0 || tex.h == 0 || dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(dst.x, dst.w, self.width);
        let (y0, y1) = Self::span(dst.y, dst.h, self.height);
        let max_u = tex.w as f64 - 1.0;
        let max_v = tex.h as f64 - 1.0;

        for y in y0..y1 {
            let fy = (y as f64 + 0.5 - dst.y) / dst.h;
            let v = (src.y + fy * src.h).floor().clamp(0.0, max_v) as usize;
            for x in x0..x1 {
                let fx = (x as f64 + 0.5 - dst.x) / dst.w;
                let u = (src.x + fx * src.w).floor().clamp(0.0, max_u) as usize;
                let texel = tex.pixel(u, v);
                if texel >> 24 != 0 {
                    self.scratch[y * self.width + x] = texel;
                }
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

    fn count(sw: &Software, px: Rgba) -> usize {
        sw.pixels().iter().filter(|&&p| p == px).count()
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut sw = Software::new(8, 8);
        sw.fill_rect(Rect::new(6.0, -100.0, 10.0, 1000.0), RED);
        assert_eq!(count(&sw, 0xFF_FF0000), 2 * 8);
        assert_eq!(sw.pixel(6, 0), 0xFF_FF0000);
        assert_eq!(sw.pixel(5, 0), 0);
    }

    #[test]
    fn translucent_rect_blends() {
        let mut sw = Software::new(2, 1);
        sw.clear(Color::BLACK);
        sw.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(sw.pixel(0, 0), 0xFF_80_80_80);
        assert_eq!(sw.pixel(1, 0), 0xFF_00_00_00);
    }

    #[test]
    fn circle_stays_inside_its_box() {
        let mut sw = Software::new(16, 16);
        sw.fill_circle(dvec2(8.0, 8.0), 3.0, RED);
        let n = count(&sw, 0xFF_FF0000);
        // area of r=3 disc is ~28
        assert!((24..=32).contains(&n), "{n} pixels");
        assert_eq!(sw.pixel(8, 8), 0xFF_FF0000);
        assert_eq!(sw.pixel(4, 4), 0);
    }

    #[test]
    fn line_reaches_both_ends() {
        let mut sw = Software::new(8, 8);
        sw.stroke_line(dvec2(0.5, 0.5), dvec2(7.5, 3.5), RED);
        assert_eq!(sw.pixel(0, 0), 0xFF_FF0000);
        assert_eq!(sw.pixel(7, 3), 0xFF_FF0000);
        assert_eq!(count(&sw, 0xFF_FF0000), 8);
    }

    #[test]
    fn line_off_screen_is_harmless() {
        let mut sw = Software::new(4, 4);
        sw.stroke_line(dvec2(-10.0, -10.0), dvec2(-2.0, 20.0), RED);
        assert_eq!(count(&sw, 0xFF_FF0000), 0);
    }

    #[test]
    fn image_column_is_stretched() {
        let tex = Texture::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => 0xFF_0000FF,
            (0, 1) => 0xFF_00FF00,
            _ => 0xFF_FFFFFF,
        });
        let mut sw = Software::new(4, 8);
        // one-texel-wide slice of column 0, stretched to 1×8
        sw.draw_image(&tex, Rect::new(0.0, 0.0, 1.0, 2.0), Rect::new(1.0, 0.0, 1.0, 8.0));
        for y in 0..4 {
            assert_eq!(sw.pixel(1, y), 0xFF_0000FF);
        }
        for y in 4..8 {
            assert_eq!(sw.pixel(1, y), 0xFF_00FF00);
        }
        assert_eq!(count(&sw, 0xFF_FFFFFF), 0);
    }

    #[test]
    fn end_frame_lends_buffer() {
        let mut sw = Software::new(3, 2);
        sw.clear(RED);
        let (len, w, h) = sw.end_frame(|fb, w, h| (fb.len(), w, h));
        assert_eq!((len, w, h), (6, 3, 2));
    }
}
