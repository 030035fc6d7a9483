//! One running game: the scene, the player and the held keys, advanced
//! and drawn once per frame by the host loop.

use glam::DVec2;
use tracing::debug;

use crate::{
    renderer::{Minimap, RenderTarget, render_walls},
    sim::{Controls, MoveOutcome, integrate},
    world::{Color, Player, Scene, TextureBank},
};

/// Backdrop behind the walls.
pub const BACKGROUND: Color = Color::hex(0x181818);

/// Fraction of the scene size used as the start point when the scene has
/// no `@` marker.
const FALLBACK_SPAWN: f64 = 0.63;
/// Heading used for a fresh session (radians).
const SPAWN_DIRECTION: f64 = std::f64::consts::PI * 1.25;

pub struct Session {
    pub scene: Scene,
    pub player: Player,
    controls: Controls,
    show_minimap: bool,
}

impl Session {
    pub fn new(scene: Scene, player: Player) -> Self {
        Self {
            scene,
            player,
            controls: Controls::empty(),
            show_minimap: true,
        }
    }

    /// Session with the player at the scene's `@` cell, or at a fixed
    /// fraction of the scene size when it has none.
    pub fn spawn(scene: Scene) -> Self {
        let position = scene
            .spawn()
            .unwrap_or_else(|| scene.size() * DVec2::splat(FALLBACK_SPAWN));
        debug!(?position, "player spawned");
        Self::new(scene, Player::new(position, SPAWN_DIRECTION))
    }

    #[inline]
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Key-down.  Holding a key (auto-repeat) leaves the set unchanged.
    pub fn press(&mut self, c: Controls) {
        self.controls.insert(c);
    }

    /// Key-up.
    pub fn release(&mut self, c: Controls) {
        self.controls.remove(c);
    }

    pub fn show_minimap(&self) -> bool {
        self.show_minimap
    }

    pub fn set_minimap(&mut self, on: bool) {
        self.show_minimap = on;
    }

    pub fn toggle_minimap(&mut self) {
        self.show_minimap = !self.show_minimap;
    }

    /// Integrate the held controls over `dt` seconds.
    pub fn update(&mut self, dt: f64) -> MoveOutcome {
        integrate(&mut self.player, self.controls, &self.scene, dt)
    }

    /// Draw the current state: background, walls, then the minimap.
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T, bank: &TextureBank) {
        target.clear(BACKGROUND);
        render_walls(target, &self.scene, &self.player, bank);
        if self.show_minimap {
            Minimap::for_width(target.width()).render(target, &self.scene, &self.player, bank);
        }
    }

    /// One frame: update, then render.
    pub fn frame<T: RenderTarget + ?Sized>(
        &mut self,
        dt: f64,
        target: &mut T,
        bank: &TextureBank,
    ) -> MoveOutcome {
        let outcome = self.update(dt);
        self.render(target, bank);
        outcome
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Rect;
    use crate::renderer::recording::{Op, Recorder};
    use crate::world::{Cell, DEFAULT_SCENE};
    use glam::dvec2;

    fn open_session() -> Session {
        let scene = Scene::from_rows(vec![vec![Cell::Empty; 5]; 5]);
        Session::new(scene, Player::new(dvec2(2.5, 2.5), 0.0))
    }

    #[test]
    fn spawn_uses_marker_or_fallback() {
        let bank = TextureBank::with_builtin();
        let marked = Session::spawn(Scene::parse(DEFAULT_SCENE, &bank).unwrap());
        assert_eq!(marked.player.position, dvec2(5.5, 5.5));

        let plain = Session::spawn(Scene::from_rows(vec![vec![Cell::Empty; 10]; 10]));
        assert!((plain.player.position - dvec2(6.3, 6.3)).length() < 1e-12);
    }

    #[test]
    fn press_release_idempotent() {
        let mut s = open_session();
        s.press(Controls::TURN_LEFT);
        s.press(Controls::TURN_LEFT);
        s.press(Controls::ADVANCE);
        assert_eq!(s.controls(), Controls::TURN_LEFT | Controls::ADVANCE);
        s.release(Controls::TURN_LEFT);
        s.release(Controls::TURN_LEFT);
        assert_eq!(s.controls(), Controls::ADVANCE);
    }

    #[test]
    fn first_frame_with_zero_dt_does_not_move() {
        let mut s = open_session();
        s.press(Controls::ADVANCE | Controls::TURN_RIGHT);
        let mut rec = Recorder::new(300, 200);
        assert_eq!(s.frame(0.0, &mut rec, &TextureBank::default_with_checker()), MoveOutcome::Idle);
        assert_eq!(s.player, Player::new(dvec2(2.5, 2.5), 0.0));
    }

    #[test]
    fn render_clears_first_and_honours_minimap_toggle() {
        let bank = TextureBank::default_with_checker();
        let mut s = open_session();

        let mut rec = Recorder::new(300, 200);
        s.render(&mut rec, &bank);
        assert_eq!(rec.ops[0], Op::Rect(Rect::new(0.0, 0.0, 300.0, 200.0), BACKGROUND));
        let with_map = rec.ops.len();
        assert!(rec.ops.iter().any(|op| matches!(op, Op::Circle(..))));

        s.toggle_minimap();
        let mut rec = Recorder::new(300, 200);
        s.render(&mut rec, &bank);
        assert!(!rec.ops.iter().any(|op| matches!(op, Op::Circle(..))));
        assert!(rec.ops.len() < with_map);
    }
}
