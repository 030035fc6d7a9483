//! One vertical strip per screen column.
//!
//! Strip height is `screen_h / depth` where `depth` is the hit vector
//! projected on the view direction rather than its length; dividing by the
//! Euclidean distance would bow straight walls outward (fisheye).

use glam::{DVec2, IVec2};

use crate::{
    defs::{COLUMN_COUNT, EPS},
    raycast::{cast_ray, hitting_cell},
    renderer::{Rect, RenderTarget},
    world::{Cell, Player, Scene, TextureBank},
};

/// Vertical extent of one wall strip in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip {
    pub top: f64,
    pub height: f64,
}

/// Centred strip for a wall at view-axis `depth`; `None` for a hit at or
/// behind the eye.
#[inline]
pub fn strip_geometry(screen_h: f64, depth: f64) -> Option<Strip> {
    if depth <= 0.0 {
        return None;
    }
    let height = screen_h / depth;
    Some(Strip {
        top: (screen_h - height) * 0.5,
        height,
    })
}

/// Horizontal texture coordinate of a hit at `offset` inside its cell
/// (`hit - cell`).
///
/// A hit on a vertical grid line (x offset 0 or 1) samples along y,
/// anything else samples along x.
#[inline]
pub fn texture_u(offset: DVec2) -> f64 {
    let on_x_line = offset.x.abs() < EPS || (offset.x - 1.0).abs() < EPS;
    if on_x_line && offset.y > 0.0 {
        offset.y
    } else {
        offset.x
    }
}

/// Cast [`COLUMN_COUNT`] rays across the field of view and draw the wall
/// strip each one hits.  Columns whose ray escapes the scene or dies at the
/// far clip stay untouched.
pub fn render_walls<T: RenderTarget + ?Sized>(
    target: &mut T,
    scene: &Scene,
    player: &Player,
    bank: &TextureBank,
) {
    let screen_h = target.height() as f64;
    let strip_w = (target.width() as f64 / COLUMN_COUNT as f64).ceil();
    let range = player.fov_range();
    let forward = player.forward();

    for x in 0..COLUMN_COUNT {
        let aim = player.column_target(range, x, COLUMN_COUNT);
        let hit = cast_ray(scene, player.position, aim);
        let cell_pos: IVec2 = hitting_cell(player.position, hit);

        let cell = match scene.get(cell_pos) {
            Some(cell) => cell,
            None => continue,
        };

        let depth = (hit - player.position).dot(forward);
        let Some(strip) = strip_geometry(screen_h, depth) else {
            continue;
        };
        let dst = Rect::new(x as f64 * strip_w, strip.top, strip_w, strip.height);

        match cell {
            Cell::Empty => {}
            Cell::Color(color) => {
                target.fill_rect(dst, color.brightness((1.0 / depth) as f32));
            }
            Cell::Texture(id) => {
                let tex = bank.texture_or_missing(id);
                let u = texture_u(hit - cell_pos.as_dvec2());
                let src = Rect::new(tex.column(u) as f64, 0.0, 1.0, tex.h as f64);
                target.draw_image(tex, src, dst);
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
