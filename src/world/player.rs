use glam::DVec2;

use super::vector::GridVecExt;
use crate::defs::{FOV, NEAR_CLIPPING_PLANE};

/// Eye position and heading on the grid.
///
/// * `direction` is in radians, 0 = east, growing clockwise on screen
///   (+y points down).  The range is unconstrained; trig wraps it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub position: DVec2,
    pub direction: f64,
}

impl Player {
    pub fn new(position: DVec2, direction: f64) -> Self {
        Self {
            position,
            direction,
        }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the player looks.
    #[inline(always)]
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.direction)
    }

    /// Unit vector pointing to the player's right.
    #[inline(always)]
    pub fn right(&self) -> DVec2 {
        self.forward().rot90()
    }

    /*───────────────── projection / frustum helpers ─────────────────*/

    /// Left and right ends of the near plane.
    ///
    /// ```text
    /// F    = P + forward * near
    /// wing = rot90(norm(F - P)) * tan(fov/2) * near
    /// (F - wing, F + wing)
    /// ```
    pub fn fov_range(&self) -> (DVec2, DVec2) {
        let half = (FOV * 0.5).tan() * NEAR_CLIPPING_PLANE;
        let f = self.position + self.forward() * NEAR_CLIPPING_PLANE;
        let wing = (f - self.position).norm().rot90() * half;
        (f - wing, f + wing)
    }

    /// Point on the near plane that screen column `x` of `columns` looks
    /// through.
    #[inline]
    pub fn column_target(&self, (left, right): (DVec2, DVec2), x: usize, columns: usize) -> DVec2 {
        left.lerp_to(right, x as f64 / columns as f64)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
