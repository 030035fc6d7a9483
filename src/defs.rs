//! Fixed tuning constants shared by the caster, renderer and integrator.

use std::f64::consts::PI;

/// Boundary nudge: keeps a ray tip that sits exactly on a grid line from
/// being floored back into the cell it just left.
pub const EPS: f64 = 1e-7;

/// Distance from the eye to the projection plane (map units).
pub const NEAR_CLIPPING_PLANE: f64 = 0.1;

/// Rays stop after travelling this far from the eye (map units).
pub const FAR_CLIPPING_PLANE: f64 = 10.0;

/// Horizontal field of view (radians).
pub const FOV: f64 = PI * 0.5;

/// Number of rays cast per frame; each one becomes a screen strip.
pub const COLUMN_COUNT: usize = 300;

/// Walk / strafe speed (map units per second).
pub const PLAYER_SPEED: f64 = 2.5;

/// Turn rate (radians per second).
pub const PLAYER_TURN_SPEED: f64 = PI;

/// Longest frame step fed to the integrator (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;
