//! Pixel Quest entry point
//!
//! Headless native runner: loads settings, then plays the built-in levels
//! with a simple scripted bot at a simulated 60 Hz refresh and prints the
//! final render snapshot as JSON.
//!
//! Usage: `pixel-quest [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use pixel_quest::feedback::LogFeedback;
    use pixel_quest::game::Key;
    use pixel_quest::sim::Screen;
    use pixel_quest::{Game, Settings};

    env_logger::init();
    log::info!("Pixel Quest (native) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load_from(Path::new(&path)),
        None => Settings::default(),
    };
    let seconds: u32 = match args.next() {
        Some(s) => s.parse()?,
        None => 60,
    };
    if settings.seed == 0 {
        settings.seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64;
    }

    let mut game = Game::with_builtin_levels(settings)?;
    let mut sink = LogFeedback::default();

    // Menus: title -> level select -> first level
    game.key_down(Key::Confirm);
    game.step(&mut sink);
    game.key_up(Key::Confirm);
    game.key_down(Key::Confirm);
    game.step(&mut sink);
    game.key_up(Key::Confirm);

    let frame_ms = 1000.0 / 60.0;
    let mut last_x = f32::MIN;
    let mut stuck_frames = 0;
    for frame in 0..seconds.saturating_mul(60) {
        match game.state.screen {
            Screen::Playing => {
                game.key_down(Key::Right);
                let x = game.state.player.as_ref().map_or(0.0, |p| p.body.pos.x);
                stuck_frames = if x <= last_x { stuck_frames + 1 } else { 0 };
                last_x = x;
                // Jump at walls and every so often to clear enemies
                if stuck_frames > 2 || frame % 45 == 0 {
                    game.key_down(Key::Jump);
                } else if frame % 45 > 14 {
                    game.key_up(Key::Jump);
                }
            }
            Screen::LevelComplete => {
                game.key_up(Key::Right);
                game.key_up(Key::Jump);
                if frame % 2 == 0 {
                    game.key_down(Key::Confirm);
                } else {
                    game.key_up(Key::Confirm);
                }
            }
            Screen::GameOver | Screen::Title => break,
            Screen::LevelSelect | Screen::Paused => {}
        }
        game.frame(frame as f64 * frame_ms, &mut sink);
    }

    let state = &game.state;
    log::info!(
        "Finished on {:?}: level {}, run score {}, {} ticks, {} sounds",
        state.screen,
        state.current_level + 1,
        state.run_score(),
        state.time_ticks,
        sink.sounds_played
    );
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to do here
}
