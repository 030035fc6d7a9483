//! End-to-end: a session rendered into the software frame-buffer.

use grid_caster::{
    renderer::{RenderTarget, Software},
    session::{BACKGROUND, Session},
    sim::{Controls, MoveOutcome},
    world::{Color, DEFAULT_SCENE, Scene, TextureBank},
};

const W: usize = 600;
const H: usize = 400;
const MAGENTA: u32 = 0xFF_FF00FF;

fn default_session(bank: &TextureBank) -> Session {
    Session::spawn(Scene::parse(DEFAULT_SCENE, bank).expect("built-in scene parses"))
}

#[test]
fn default_scene_draws_walls_and_minimap() {
    let bank = TextureBank::with_builtin();
    let mut session = default_session(&bank);
    let mut fb = Software::new(W, H);

    session.frame(0.0, &mut fb, &bank);

    let bg = BACKGROUND.to_rgba();
    // the view looks north-west straight at the red block
    assert_ne!(fb.pixel(W / 2, H / 2), bg);
    // corners stay clear
    assert_eq!(fb.pixel(W - 1, H - 1), bg);
    // player marker sits at origin + position * cell size
    let cell = W as f64 * 0.03;
    let marker = (cell + 5.5 * cell) as usize;
    assert_eq!(fb.pixel(marker, marker), MAGENTA);

    session.toggle_minimap();
    session.render(&mut fb, &bank);
    assert_ne!(fb.pixel(marker, marker), MAGENTA);
}

#[test]
fn walking_into_walls_never_ends_inside_one() {
    let bank = TextureBank::with_builtin();
    let mut session = default_session(&bank);
    let mut fb = Software::new(W / 4, H / 4);

    session.press(Controls::ADVANCE);
    let mut blocked = false;
    for frame in 0..120 {
        if frame == 60 {
            session.press(Controls::TURN_LEFT);
        }
        let outcome = session.frame(0.05, &mut fb, &bank);
        blocked |= outcome == MoveOutcome::Blocked;
        let here = session.scene.cell_at_point(session.player.position);
        assert!(
            here.is_none_or(|c| c.is_empty()),
            "frame {frame}: player inside {here:?}"
        );
    }
    assert!(blocked, "the walk should have run into the red block");
}

#[test]
fn clear_fills_every_pixel() {
    let mut fb = Software::new(5, 3);
    fb.clear(Color::hex(0x123456));
    fb.end_frame(|px, w, h| {
        assert_eq!((w, h), (5, 3));
        assert!(px.iter().all(|&p| p == 0xFF_123456));
    });
}

#[test]
fn bundled_arena_scene_loads() {
    let bank = TextureBank::with_builtin();
    let scene = Scene::parse(include_str!("../scenes/arena.scene"), &bank).unwrap();
    assert_eq!((scene.width(), scene.height()), (12, 9));

    let mut session = Session::spawn(scene);
    assert_eq!(session.player.position.x, 5.5);
    let mut fb = Software::new(W, H);
    session.frame(0.016, &mut fb, &bank);
    // enclosed arena: every column hits a wall, so the horizon row is covered
    let bg = BACKGROUND.to_rgba();
    let covered = (0..W).filter(|&x| fb.pixel(x, H / 2) != bg).count();
    assert_eq!(covered, W);
}
