use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_caster::{
    renderer::Software,
    session::Session,
    sim::{Controls, FrameClock},
    world::{DEFAULT_SCENE, Scene, TextureBank},
};

/// First-person grid raycaster.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene description file; the built-in scene is used when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Window width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 800)]
    height: usize,

    /// Start with the minimap hidden (toggle with M).
    #[arg(long)]
    no_minimap: bool,

    /// Frame-rate cap.
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

/// Movement flag bound to `key`, if any.
fn control_for(key: Key) -> Option<Controls> {
    Some(match key {
        Key::W | Key::Up => Controls::ADVANCE,
        Key::S | Key::Down => Controls::RETREAT,
        Key::A => Controls::STRAFE_LEFT,
        Key::D => Controls::STRAFE_RIGHT,
        Key::Left | Key::Q => Controls::TURN_LEFT,
        Key::Right | Key::E => Controls::TURN_RIGHT,
        _ => return None,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let bank = TextureBank::with_builtin();
    let scene = match &args.scene {
        Some(path) => Scene::load(path, &bank)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => Scene::parse(DEFAULT_SCENE, &bank).context("parsing built-in scene")?,
    };
    info!(width = scene.width(), height = scene.height(), "scene ready");

    let mut session = Session::spawn(scene);
    session.set_minimap(!args.no_minimap);

    let mut renderer = Software::default();
    let mut win = Window::new(
        "Grid Caster",
        args.width,
        args.height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .context("creating window")?;
    win.set_target_fps(args.fps);

    let mut clock = FrameClock::new();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- key edges -> held flags ------------------------- */
        for key in win.get_keys_pressed(KeyRepeat::No) {
            if let Some(c) = control_for(key) {
                session.press(c);
            } else if key == Key::M {
                session.toggle_minimap();
            }
        }
        for key in win.get_keys_released() {
            if let Some(c) = control_for(key) {
                session.release(c);
            }
        }

        /* --------------- simulate + draw --------------------------------- */
        let dt = clock.tick(t0);
        let (w, h) = win.get_size();
        if w == 0 || h == 0 {
            // minimised: keep simulating, nothing to draw into
            session.update(dt);
            win.update();
            continue;
        }
        renderer.begin_frame(w, h);
        session.frame(dt, &mut renderer, &bank);
        renderer
            .end_frame(|fb, w, h| win.update_with_buffer(fb, w, h))
            .context("presenting frame")?;

        // ─────────── accumulate & report every ~3 s ────────────────────
        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg frame: {avg_ms:.2} ms ({:.1} FPS)", 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
