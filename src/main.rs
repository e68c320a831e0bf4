//! Orchard Rush entry point
//!
//! Headless native driver: runs one full session on a simulated 60 Hz frame
//! clock with the autoplay bot standing in for the player, then prints the
//! result. A real front end replaces the loop below with its own timers and
//! pointer events.

use glam::Vec2;

use orchard_rush::autoplay::AutoPlayer;
use orchard_rush::sim::{Category, Session};
use orchard_rush::{Rect, Settings};

/// Simulated frame interval (~60 FPS)
const FRAME_MS: u64 = 16;

fn main() {
    env_logger::init();
    log::info!("Orchard Rush (headless) starting...");

    let settings = Settings::load(Settings::FILE_NAME);
    let mut session = Session::new(&settings);

    // Screen layout: play area scaled 10x, drop zone in the strip to its right
    let mut bot = AutoPlayer::default();
    let area = *session.play_area();
    let play_px = bot.to_screen(area.bounds());
    session.set_drop_zone(Some(Rect::from_origin_size(
        Vec2::new(play_px.x, 0.0),
        Vec2::new(play_px.x / 4.0, play_px.y),
    )));

    let Some(mut handle) = session.start() else {
        log::error!("Session failed to start");
        return;
    };

    let mut now_ms = 0;
    let mut last_revision = session.revision();
    let mut last_logged_secs = session.time_remaining();
    while session.is_playing() {
        session.advance(handle, now_ms);
        bot.act(&mut session, now_ms);

        if session.revision() != last_revision {
            last_revision = session.revision();
            let snap = session.snapshot();
            if snap.time_remaining % 30 == 0 && snap.time_remaining != last_logged_secs {
                last_logged_secs = snap.time_remaining;
                log::info!("{} left, score {}", snap.clock_label(), snap.score);
            }
        }

        // Halfway through, take a breather to exercise pause/resume
        if now_ms == 60_000 {
            session.toggle_pause();
            if let Some(resumed) = session.toggle_pause() {
                handle = resumed;
            }
        }
        now_ms += FRAME_MS;
    }

    match session.last_outcome() {
        Some(outcome) => {
            println!("Final score: {}", outcome.final_score);
            for category in Category::ALL {
                println!(
                    "  {:<7} x{}",
                    category.as_str(),
                    outcome.harvest_counts.get(category)
                );
            }
            println!(
                "Best: {}{}",
                session.high_score(),
                if outcome.new_best { " (new!)" } else { "" }
            );
        }
        None => log::warn!("Session ended without an outcome"),
    }
}
