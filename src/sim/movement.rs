//! Per-tick player integration.
//!
//! Collision looks only at the cell the player would land in, not the path
//! to it: with a large `dt` (low frame rate) or high speed the player can
//! step clean over a one-cell wall.  Known limitation, kept on purpose
//! until continuous collision is needed.

use glam::DVec2;
use tracing::trace;

use super::Controls;
use crate::{
    defs::{PLAYER_SPEED, PLAYER_TURN_SPEED},
    world::{GridVecExt, Player, Scene},
};

/// What happened to the player's position this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No translation requested (turning alone still applies).
    Idle,
    Moved,
    /// Destination cell is occupied; position unchanged.
    Blocked,
}

/// Advance `player` by `dt` seconds under `controls`.
///
/// Heading always updates; the position commits only when the destination
/// lies outside the scene or in an empty cell.
pub fn integrate(player: &mut Player, controls: Controls, scene: &Scene, dt: f64) -> MoveOutcome {
    let forward = player.forward();
    let right = forward.rot90();

    let mut velocity = DVec2::ZERO;
    let mut angular = 0.0;

    /* 1. wish-velocity from held keys */
    if controls.contains(Controls::ADVANCE) {
        velocity += forward * PLAYER_SPEED;
    }
    if controls.contains(Controls::RETREAT) {
        velocity -= forward * PLAYER_SPEED;
    }
    if controls.contains(Controls::STRAFE_RIGHT) {
        velocity += right * PLAYER_SPEED;
    }
    if controls.contains(Controls::STRAFE_LEFT) {
        velocity -= right * PLAYER_SPEED;
    }
    if controls.contains(Controls::TURN_LEFT) {
        angular -= PLAYER_TURN_SPEED;
    }
    if controls.contains(Controls::TURN_RIGHT) {
        angular += PLAYER_TURN_SPEED;
    }

    /* 2. turn unconditionally */
    player.direction += angular * dt;

    /* 3. move if the landing cell is free */
    let towards = player.position + velocity * dt;
    if towards == player.position {
        return MoveOutcome::Idle;
    }
    match scene.cell_at_point(towards) {
        Some(cell) if !cell.is_empty() => {
            trace!(?towards, ?cell, "move blocked");
            MoveOutcome::Blocked
        }
        _ => {
            player.position = towards;
            MoveOutcome::Moved
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Cell, Color};
    use glam::dvec2;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const WALL: Cell = Cell::Color(Color::new(0.5, 0.5, 0.5, 1.0));

    fn open(w: usize, h: usize) -> Scene {
        Scene::from_rows(vec![vec![Cell::Empty; w]; h])
    }

    /// 8×8 with a ring of walls around (4, 4) and a few pillars.
    fn maze() -> Scene {
        let mut rows = vec![vec![Cell::Empty; 8]; 8];
        for (x, y) in [(3, 3), (4, 3), (5, 3), (3, 5), (4, 5), (5, 5), (1, 1), (6, 1), (1, 6)] {
            rows[y][x] = WALL;
        }
        Scene::from_rows(rows)
    }

    #[test]
    fn advance_east_one_second() {
        let scene = open(8, 4);
        let mut p = Player::new(dvec2(2.0, 2.0), 0.0);
        let out = integrate(&mut p, Controls::ADVANCE, &scene, 1.0);
        assert_eq!(out, MoveOutcome::Moved);
        assert_eq!(p.position, dvec2(4.5, 2.0));
        assert_eq!(p.direction, 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let scene = open(4, 4);
        let mut p = Player::new(dvec2(2.0, 2.0), 0.0);
        let out = integrate(&mut p, Controls::ADVANCE | Controls::RETREAT, &scene, 0.5);
        assert_eq!(out, MoveOutcome::Idle);
        assert_eq!(p.position, dvec2(2.0, 2.0));
    }

    #[test]
    fn strafe_right_moves_south_when_facing_east() {
        let scene = open(4, 4);
        let mut p = Player::new(dvec2(1.5, 1.0), 0.0);
        integrate(&mut p, Controls::STRAFE_RIGHT, &scene, 0.4);
        assert!((p.position - dvec2(1.5, 2.0)).length() < 1e-12);
        integrate(&mut p, Controls::STRAFE_LEFT, &scene, 0.4);
        assert!((p.position - dvec2(1.5, 1.0)).length() < 1e-12);
    }

    #[test]
    fn turning_applies_even_when_blocked() {
        let mut rows = vec![vec![Cell::Empty; 3]; 1];
        rows[0][2] = WALL;
        let scene = Scene::from_rows(rows);
        let mut p = Player::new(dvec2(1.5, 0.5), 0.0);

        let out = integrate(&mut p, Controls::ADVANCE | Controls::TURN_RIGHT, &scene, 0.25);
        assert_eq!(out, MoveOutcome::Blocked);
        assert_eq!(p.position, dvec2(1.5, 0.5));
        assert!((p.direction - PI * 0.25).abs() < 1e-12);

        integrate(&mut p, Controls::TURN_LEFT, &scene, 0.25);
        assert!(p.direction.abs() < 1e-12);
    }

    #[test]
    fn leaving_the_scene_is_allowed() {
        let scene = open(2, 2);
        let mut p = Player::new(dvec2(1.5, 1.0), 0.0);
        assert_eq!(integrate(&mut p, Controls::ADVANCE, &scene, 1.0), MoveOutcome::Moved);
        assert!(!scene.inside_scene(p.position));
    }

    #[test]
    fn fast_move_tunnels_through_thin_wall() {
        // only the landing cell is tested
        let mut rows = vec![vec![Cell::Empty; 4]; 1];
        rows[0][1] = WALL;
        let scene = Scene::from_rows(rows);
        let mut p = Player::new(dvec2(0.5, 0.5), 0.0);
        assert_eq!(integrate(&mut p, Controls::ADVANCE, &scene, 0.8), MoveOutcome::Moved);
        assert_eq!(p.position, dvec2(2.5, 0.5));
    }

    fn controls() -> impl Strategy<Value = Controls> {
        (0u8..64).prop_map(Controls::from_bits_truncate)
    }

    proptest! {
        #[test]
        fn never_lands_in_a_wall(
            ticks in proptest::collection::vec((controls(), 0.0f64..0.1), 1..200),
            dir in 0.0f64..std::f64::consts::TAU,
        ) {
            let scene = maze();
            let mut p = Player::new(dvec2(4.5, 4.5), dir);
            for (c, dt) in ticks {
                integrate(&mut p, c, &scene, dt);
                let cell = scene.cell_at_point(p.position);
                prop_assert!(cell.is_none_or(|c| c.is_empty()), "landed on {cell:?} at {:?}", p.position);
            }
        }
    }
}
