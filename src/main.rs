//! Dino Dash entry point
//!
//! Headless front end: frames go to the log, commands come from stdin.
//!
//! ```text
//! dino-dash [--demo] [settings.json]
//! ```
//!
//! Stdin commands, one per line: `j` jump, `h` short hop, `d` duck, `u` stand,
//! `q` quit. An empty line continues past the title and game-over screens.

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::Sender;
use std::thread;

use glam::Vec2;

use dino_dash::platform::{Color, InputEvent, Key, QueueInput, Renderer, SilentAudio, SystemClock};
use dino_dash::sim::{EntityKind, EntityView};
use dino_dash::{BuiltinAssets, Game, Settings};

/// Env var naming a settings file when none is passed on the command line
const SETTINGS_ENV: &str = "DINO_DASH_SETTINGS";

/// Sessions a demo run plays when the settings leave it open-ended
const DEMO_SESSIONS: u32 = 3;

/// Writes a one-line summary of each frame to the log
#[derive(Default)]
struct LogRenderer {
    frame: u64,
    runner: Option<Vec2>,
    hazards: usize,
    texts: Vec<String>,
}

impl Renderer for LogRenderer {
    fn clear(&mut self, _color: Color) {
        self.runner = None;
        self.hazards = 0;
        self.texts.clear();
    }

    fn draw(&mut self, entity: &EntityView<'_>) {
        match entity.kind {
            EntityKind::Player => {
                self.runner = Some(Vec2::new(entity.rect.center_x(), entity.rect.bottom()))
            }
            EntityKind::GroundHazard | EntityKind::AirHazard => self.hazards += 1,
            EntityKind::Platform => {}
        }
    }

    fn draw_text(&mut self, text: &str, _size: u32, _color: Color, _pos: Vec2) {
        self.texts.push(text.to_string());
    }

    fn present(&mut self) {
        self.frame += 1;
        match self.runner {
            Some(pos) => log::trace!(
                "frame {}: runner at ({:.0}, {:.0}), {} hazards, score {}",
                self.frame,
                pos.x,
                pos.y,
                self.hazards,
                self.texts.join(" ")
            ),
            None => log::info!("{}", self.texts.join(" | ")),
        }
    }
}

/// Forward stdin commands as key events until stdin closes or `q` is read
fn spawn_stdin_reader(tx: Sender<InputEvent>) {
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let events: &[InputEvent] = match line.trim() {
                "j" => &[InputEvent::KeyDown(Key::Jump)],
                "h" => &[InputEvent::KeyDown(Key::Jump), InputEvent::KeyUp(Key::Jump)],
                "d" => &[InputEvent::KeyDown(Key::Duck)],
                "u" => &[InputEvent::KeyUp(Key::Duck), InputEvent::KeyUp(Key::Jump)],
                "q" => &[InputEvent::Quit],
                "" => &[InputEvent::KeyUp(Key::Up)],
                other => {
                    log::warn!("Unknown command {:?}", other);
                    &[]
                }
            };
            for &event in events {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        log::debug!("Stdin closed");
    });
}

fn main() -> ExitCode {
    env_logger::init();

    let mut demo = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--demo" => demo = true,
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let path = path.or_else(|| std::env::var_os(SETTINGS_ENV).map(PathBuf::from));

    let mut settings = Settings::load_or_default(path.as_deref());
    if demo {
        settings.demo = true;
    }
    if settings.demo && settings.session_limit.is_none() {
        settings.session_limit = Some(DEMO_SESSIONS);
    }
    log::info!("{} starting (demo: {})", settings.title, settings.demo);

    let (tx, input) = QueueInput::channel();
    // Keep one sender here so a closed stdin does not read as a quit
    let _keepalive = tx.clone();
    spawn_stdin_reader(tx);

    let mut game = match Game::new(
        settings,
        &BuiltinAssets::default(),
        SystemClock::new(),
        input,
        LogRenderer::default(),
        SilentAudio::default(),
    ) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let results = game.run();
    let best = results.iter().map(|r| r.score()).max().unwrap_or(0);
    log::info!("Played {} session(s), best score {}", results.len(), best);
    ExitCode::SUCCESS
}
