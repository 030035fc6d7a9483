//! Grid-line ray stepping.
//!
//! A ray is carried as two points `(p1, p2)`; `p2` is the tip.  Each step
//! moves the tip to the next vertical or horizontal grid line along the
//! same line, so every cell the ray passes through is visited once.
//!
//! ```text
//!   p1 ──► p2 ──► x-line candidate ─┐ nearer one wins
//!             └─► y-line candidate ─┘
//! ```

use glam::{DVec2, IVec2};

use crate::defs::{EPS, FAR_CLIPPING_PLANE};
use crate::world::{GridVecExt, Scene};

/// Next grid coordinate past `x` when moving with sign of `dx`.
///
/// The `EPS` nudge makes a coordinate already sitting on a line advance to
/// the following one instead of returning itself.
#[inline]
pub fn snap(x: f64, dx: f64) -> f64 {
    if dx > 0.0 {
        (x + EPS).ceil()
    } else if dx < 0.0 {
        (x - EPS).floor()
    } else {
        x
    }
}

/// Cell the tip of `p1 → p2` is entering.
///
/// Flooring `p2` directly would put a tip lying on a line in the cell to the
/// right/below regardless of travel direction, so the floor is biased by
/// `EPS` along the direction of travel.
#[inline]
pub fn hitting_cell(p1: DVec2, p2: DVec2) -> IVec2 {
    let d = p2 - p1;
    (p2 + sign(d) * EPS).cell()
}

/// Advance the tip of `p1 → p2` to the next grid-line crossing.
pub fn ray_step(p1: DVec2, p2: DVec2) -> DVec2 {
    let d = p2 - p1;
    if d.x == 0.0 {
        // vertical ray: only horizontal lines can be crossed
        return DVec2::new(p2.x, snap(p2.y, d.y));
    }

    let k = d.y / d.x;
    let c = p1.y - k * p1.x;

    let x3 = snap(p2.x, d.x);
    let mut p3 = DVec2::new(x3, k * x3 + c);

    if k != 0.0 {
        let y3 = snap(p2.y, d.y);
        let p3t = DVec2::new((y3 - c) / k, y3);
        if p2.distance_squared(p3t) < p2.distance_squared(p3) {
            p3 = p3t;
        }
    }
    p3
}

/// Walk `p1 → p2` through `scene` until the tip enters an occupied cell,
/// leaves the grid, or travels past [`FAR_CLIPPING_PLANE`] from `p1`.
///
/// Returns the last tip.  Callers decide hit/miss by looking up
/// `hitting_cell(origin, tip)`.
pub fn cast_ray(scene: &Scene, p1: DVec2, p2: DVec2) -> DVec2 {
    cast_ray_counted(scene, p1, p2).0
}

/// [`cast_ray`] plus the number of steps taken.
pub fn cast_ray_counted(scene: &Scene, mut p1: DVec2, mut p2: DVec2) -> (DVec2, usize) {
    if p1 == p2 {
        // no direction to walk in
        return (p2, 0);
    }

    let start = p1;
    let far_sq = FAR_CLIPPING_PLANE * FAR_CLIPPING_PLANE;
    let mut steps = 0;

    while start.distance_squared(p1) < far_sq {
        match scene.get(hitting_cell(p1, p2)) {
            Some(cell) if cell.is_empty() => {}
            _ => break,
        }
        let p3 = ray_step(p1, p2);
        p1 = p2;
        p2 = p3;
        steps += 1;
    }
    (p2, steps)
}

#[inline]
fn sign(d: DVec2) -> DVec2 {
    // glam's `signum` maps 0.0 to 1.0; a zero component must stay unbiased
    #[inline]
    fn s(v: f64) -> f64 {
        if v > 0.0 {
            1.0
        } else if v < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
    DVec2::new(s(d.x), s(d.y))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
