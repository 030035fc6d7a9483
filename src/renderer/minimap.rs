//! Top-down inset: grid, player marker and field-of-view wedge.
//!
//! Pure scale + translate of world coordinates; nothing here casts rays.

use glam::{DVec2, IVec2};

use crate::{
    renderer::{Rect, RenderTarget},
    world::{Cell, Color, Player, Scene, TextureBank},
};

const BACKDROP: Color = Color::hex(0x181818);
const GRID_LINE: Color = Color::hex(0x303030);
const MARKER: Color = Color::MAGENTA;
/// Player marker radius, in cells.
const MARKER_RADIUS: f64 = 0.2;
/// Inset offset and cell size as a fraction of the target width.
const INSET_FRACTION: f64 = 0.03;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
    /// Screen position of the grid's (0, 0) corner.
    pub origin: DVec2,
    /// Pixels per cell.
    pub cell_px: f64,
}

impl Minimap {
    /// Inset placed and scaled relative to a target `width` pixels wide.
    pub fn for_width(width: usize) -> Self {
        let s = width as f64 * INSET_FRACTION;
        Self {
            origin: DVec2::splat(s),
            cell_px: s,
        }
    }

    #[inline]
    pub fn to_screen(&self, p: DVec2) -> DVec2 {
        self.origin + p * self.cell_px
    }

    fn cell_rect(&self, c: IVec2) -> Rect {
        let p = self.to_screen(c.as_dvec2());
        Rect::new(p.x, p.y, self.cell_px, self.cell_px)
    }

    pub fn render<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        scene: &Scene,
        player: &Player,
        bank: &TextureBank,
    ) {
        let size = scene.size();
        let corner = self.to_screen(DVec2::ZERO);
        let extent = size * self.cell_px;
        target.fill_rect(Rect::new(corner.x, corner.y, extent.x, extent.y), BACKDROP);

        for y in 0..scene.height() {
            for x in 0..scene.width() {
                let rect = self.cell_rect(IVec2::new(x as i32, y as i32));
                match scene.cell_at(x, y) {
                    Cell::Empty => {}
                    Cell::Color(color) => target.fill_rect(rect, color),
                    Cell::Texture(id) => {
                        let tex = bank.texture_or_missing(id);
                        let src = Rect::new(0.0, 0.0, tex.w as f64, tex.h as f64);
                        target.draw_image(tex, src, rect);
                    }
                }
            }
        }

        for x in 0..=scene.width() {
            let x = x as f64;
            target.stroke_line(
                self.to_screen(DVec2::new(x, 0.0)),
                self.to_screen(DVec2::new(x, size.y)),
                GRID_LINE,
            );
        }
        for y in 0..=scene.height() {
            let y = y as f64;
            target.stroke_line(
                self.to_screen(DVec2::new(0.0, y)),
                self.to_screen(DVec2::new(size.x, y)),
                GRID_LINE,
            );
        }

        let eye = self.to_screen(player.position);
        target.fill_circle(eye, MARKER_RADIUS * self.cell_px, MARKER);

        let (l, r) = player.fov_range();
        let (l, r) = (self.to_screen(l), self.to_screen(r));
        target.stroke_line(l, r, MARKER);
        target.stroke_line(eye, l, MARKER);
        target.stroke_line(eye, r, MARKER);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
