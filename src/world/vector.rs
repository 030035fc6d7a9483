//! 2-D vector maths for the grid.
//!
//! Positions, ray tips and directions are [`glam::DVec2`]: double precision
//! because the boundary nudge (`EPS = 1e-7`) is below `f32` resolution once
//! coordinates reach a few cells.  `glam` already covers add/sub, component
//! mul/div, scale, `length`, `length_squared`, `dot`, `distance`,
//! `distance_squared`; the grid-specific bits live in [`GridVecExt`].

use glam::{DVec2, IVec2};

pub type Vector2 = DVec2;

pub trait GridVecExt: Sized {
    /// Unit vector, or zero for a zero-length input (never NaN).
    fn norm(self) -> Self;

    /// Quarter turn: `(x, y) -> (-y, x)`.
    ///
    /// With +y pointing down the screen this turns "forward" to the
    /// viewer's right.
    fn rot90(self) -> Self;

    /// Grid cell containing the point.
    fn cell(self) -> IVec2;

    /// `self + (target - self) * alpha`, evaluated so that alpha 0 and 1
    /// return the endpoints bit-for-bit.
    fn lerp_to(self, target: Self, alpha: f64) -> Self;
}

impl GridVecExt for DVec2 {
    #[inline]
    fn norm(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn rot90(self) -> Self {
        self.perp()
    }

    #[inline]
    fn cell(self) -> IVec2 {
        self.floor().as_ivec2()
    }

    #[inline]
    fn lerp_to(self, target: Self, alpha: f64) -> Self {
        self * (1.0 - alpha) + target * alpha
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
