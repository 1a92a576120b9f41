//! Game loop orchestration
//!
//! One thread, one fixed phase order per tick:
//! pace → input → simulate (physics, spawn, collide, score) → render.
//! The clock is the only place the loop blocks.

use glam::Vec2;

use crate::assets::{AssetProvider, Assets};
use crate::error::Result;
use crate::platform::{AudioOut, Clock, Color, InputEvent, InputSource, Key, Renderer};
use crate::settings::Settings;
use crate::sim::{PlayerAction, SessionState, SimEvent, TickInput, autopilot, tick};

/// How long demo mode lingers on a title or game-over screen
const DEMO_SCREEN_MS: u64 = 2000;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Player hit a hazard
    GameOver { score: u64 },
    /// Quit requested; the outer loop stops too
    Quit { score: u64 },
}

impl SessionEnd {
    pub fn score(&self) -> u64 {
        match *self {
            SessionEnd::GameOver { score } | SessionEnd::Quit { score } => score,
        }
    }
}

/// Owns the platform services and runs sessions back to back
pub struct Game<C, I, R, A> {
    settings: Settings,
    assets: Assets,
    clock: C,
    input: I,
    renderer: R,
    audio: A,
    /// Cleared by a quit event; ends the outer loop
    running: bool,
    base_seed: u64,
    sessions_started: u64,
}

impl<C: Clock, I: InputSource, R: Renderer, A: AudioOut> Game<C, I, R, A> {
    /// Validate settings and load every asset. Fails fast: there is no
    /// gameplay without sprites.
    pub fn new(
        settings: Settings,
        provider: &dyn AssetProvider,
        clock: C,
        input: I,
        renderer: R,
        audio: A,
    ) -> Result<Self> {
        settings.validate()?;
        let assets = Assets::load(provider)?;
        let base_seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("{} ready (seed {}, {} fps)", settings.title, base_seed, settings.fps);

        Ok(Self {
            settings,
            assets,
            clock,
            input,
            renderer,
            audio,
            running: true,
            base_seed,
            sessions_started: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Start screen, then sessions until quit. Returns every session's end.
    pub fn run(&mut self) -> Vec<SessionEnd> {
        let mut results = Vec::new();
        self.show_start_screen();

        while self.running && !self.session_limit_reached() {
            let mut state = self.new_session();
            let end = self.run_session(&mut state);
            results.push(end);
            self.show_game_over_screen(&state);
        }

        self.audio.stop_music();
        log::info!("Exiting after {} session(s)", results.len());
        results
    }

    /// Fresh session: score 0, new player and ground, initial cacti, timers at now
    pub fn new_session(&mut self) -> SessionState {
        let seed = self.base_seed.wrapping_add(self.sessions_started);
        self.sessions_started += 1;
        log::info!("Session {} starting (seed {})", self.sessions_started, seed);
        SessionState::new(
            &self.settings.tuning,
            &self.assets.sprites,
            seed,
            self.clock.now(),
        )
    }

    /// Tick until the session is over or quit is requested
    pub fn run_session(&mut self, state: &mut SessionState) -> SessionEnd {
        loop {
            self.clock.tick(self.settings.fps);
            if let Some(end) = self.step(state) {
                return end;
            }
        }
    }

    /// One tick after pacing: input, simulation, render
    pub fn step(&mut self, state: &mut SessionState) -> Option<SessionEnd> {
        let mut input = TickInput {
            now_ms: self.clock.now(),
            actions: Vec::new(),
        };
        for event in self.input.poll() {
            match event {
                InputEvent::Quit => {
                    log::info!("Quit requested (score {})", state.score());
                    self.running = false;
                    return Some(SessionEnd::Quit {
                        score: state.score(),
                    });
                }
                other => input.actions.extend(route(other)),
            }
        }

        if self.settings.demo {
            input.actions.extend(autopilot(state));
        }

        let outcome = tick(state, &input, self.settings.dt());
        for event in &outcome.events {
            log_event(event, state.score());
        }

        self.draw(state);

        if state.is_over() {
            return Some(SessionEnd::GameOver {
                score: state.score(),
            });
        }
        None
    }

    /// Render the play field and the score
    pub fn draw(&mut self, state: &SessionState) {
        let width = self.settings.tuning.field_width;
        self.renderer.clear(Color::SKY);
        for entity in state.entities() {
            self.renderer.draw(&entity);
        }
        self.renderer.draw_text(
            &state.score().to_string(),
            22,
            Color::GREEN,
            Vec2::new(width / 2.0, 15.0),
        );
        self.renderer.present();
    }

    pub fn show_start_screen(&mut self) {
        let (w, h) = self.field_size();
        let volume = self.settings.effective_music_volume();
        self.audio.play_music(&self.assets.music, volume, true);

        self.renderer.clear(Color::BLACK);
        let title = self.settings.title.clone();
        self.renderer.draw_text(&title, 40, Color::WHITE, Vec2::new(w / 2.0, h / 4.0));
        self.renderer.draw_text(
            "Arrows to move and space to jump",
            22,
            Color::WHITE,
            Vec2::new(w / 2.0, h / 2.0),
        );
        self.renderer.draw_text(
            "Press a key to begin playing",
            22,
            Color::WHITE,
            Vec2::new(w / 2.0, h * 3.0 / 4.0),
        );
        self.renderer.present();
        self.wait_for_key();
    }

    /// Skipped entirely once quit has been requested
    pub fn show_game_over_screen(&mut self, state: &SessionState) {
        if !self.running {
            return;
        }
        let (w, h) = self.field_size();
        self.renderer.clear(Color::BLACK);
        self.renderer
            .draw_text("GAME OVER", 40, Color::RED, Vec2::new(w / 2.0, h / 4.0));
        self.renderer.draw_text(
            &format!("Score: {}", state.score()),
            22,
            Color::WHITE,
            Vec2::new(w / 2.0, h / 2.0),
        );
        self.renderer.draw_text(
            "Press a key to play again",
            22,
            Color::WHITE,
            Vec2::new(w / 2.0, h * 3.0 / 4.0),
        );
        self.renderer.present();
        self.wait_for_key();
    }

    /// Block (at frame pace) until any key is released or quit is requested.
    /// In demo mode the wait also ends on its own after a short pause.
    pub fn wait_for_key(&mut self) {
        let mut demo_ticks = DEMO_SCREEN_MS / self.settings.frame_ms().max(1);
        loop {
            self.clock.tick(self.settings.fps);
            if self.settings.demo {
                if demo_ticks == 0 {
                    return;
                }
                demo_ticks -= 1;
            }
            for event in self.input.poll() {
                match event {
                    InputEvent::Quit => {
                        self.running = false;
                        return;
                    }
                    InputEvent::KeyUp(_) => return,
                    InputEvent::KeyDown(_) => {}
                }
            }
        }
    }

    fn session_limit_reached(&self) -> bool {
        self.settings
            .session_limit
            .is_some_and(|limit| self.sessions_started >= limit as u64)
    }

    fn field_size(&self) -> (f32, f32) {
        let t = &self.settings.tuning;
        (t.field_width, t.field_height)
    }
}

/// Map a key event to a player action
pub fn route(event: InputEvent) -> Option<PlayerAction> {
    match event {
        InputEvent::KeyDown(Key::Jump) => Some(PlayerAction::Jump),
        InputEvent::KeyDown(Key::Duck) => Some(PlayerAction::Duck),
        InputEvent::KeyDown(Key::Up) => Some(PlayerAction::Stand),
        InputEvent::KeyUp(Key::Jump) => Some(PlayerAction::JumpCut),
        InputEvent::KeyUp(Key::Duck) => Some(PlayerAction::Stand),
        InputEvent::KeyUp(Key::Up) | InputEvent::Quit => None,
    }
}

fn log_event(event: &SimEvent, score: u64) {
    match event {
        SimEvent::SessionOver { kind, id } => {
            log::info!("Session over: hit {:?} hazard #{} (score {})", kind, id, score)
        }
        SimEvent::HazardCleared { kind, id } => {
            log::debug!("{:?} hazard #{} cleared, score {}", kind, id, score)
        }
        SimEvent::HazardSpawned { kind, id } => log::debug!("{:?} hazard #{} spawned", kind, id),
        other => log::trace!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AudioHandle, AudioId, BuiltinAssets, SpriteId};
    use crate::error::GameError;
    use crate::platform::{ScriptedInput, SilentAudio, SteppedClock};
    use crate::sim::{CollisionMask, EntityView, MotionState};

    /// Renderer that keeps what it was asked to draw
    #[derive(Default)]
    struct Recorder {
        texts: Vec<String>,
        entities: usize,
        frames: usize,
    }

    impl Renderer for Recorder {
        fn clear(&mut self, _color: Color) {}

        fn draw(&mut self, _entity: &EntityView<'_>) {
            self.entities += 1;
        }

        fn draw_text(&mut self, text: &str, _size: u32, _color: Color, _pos: Vec2) {
            self.texts.push(text.to_string());
        }

        fn present(&mut self) {
            self.frames += 1;
        }
    }

    type TestGame = Game<SteppedClock, ScriptedInput, Recorder, SilentAudio>;

    fn seeded() -> Settings {
        Settings {
            seed: Some(1),
            ..Default::default()
        }
    }

    fn game(settings: Settings, input: ScriptedInput) -> TestGame {
        Game::new(
            settings,
            &BuiltinAssets::default(),
            SteppedClock::new(),
            input,
            Recorder::default(),
            SilentAudio::default(),
        )
        .unwrap()
    }

    fn press(key: Key) -> Vec<InputEvent> {
        vec![InputEvent::KeyDown(key)]
    }

    fn release(key: Key) -> Vec<InputEvent> {
        vec![InputEvent::KeyUp(key)]
    }

    #[test]
    fn test_route_keys() {
        assert_eq!(route(InputEvent::KeyDown(Key::Jump)), Some(PlayerAction::Jump));
        assert_eq!(route(InputEvent::KeyUp(Key::Jump)), Some(PlayerAction::JumpCut));
        assert_eq!(route(InputEvent::KeyDown(Key::Duck)), Some(PlayerAction::Duck));
        assert_eq!(route(InputEvent::KeyUp(Key::Duck)), Some(PlayerAction::Stand));
        assert_eq!(route(InputEvent::KeyDown(Key::Up)), Some(PlayerAction::Stand));
        assert_eq!(route(InputEvent::KeyUp(Key::Up)), None);
        assert_eq!(route(InputEvent::Quit), None);
    }

    #[test]
    fn test_session_end_score() {
        assert_eq!(SessionEnd::GameOver { score: 30 }.score(), 30);
        assert_eq!(SessionEnd::Quit { score: 0 }.score(), 0);
    }

    #[test]
    fn test_hazards_behind_player_score_on_exit() {
        let mut settings = seeded();
        settings.tuning.speed_per_point = 0.0;
        let mut game = game(settings, ScriptedInput::new());
        let mut state = game.new_session();
        for (i, cactus) in state.ground_hazards.iter_mut().enumerate() {
            let half = cactus.rect().w / 2.0;
            cactus.pos.x = i as f32 * 10.0 + half;
        }

        for _ in 0..60 {
            assert_eq!(game.step(&mut state), None);
        }
        assert_eq!(state.tracker.cleared(), 3);
        assert_eq!(state.score(), 30);
        assert!(state.ground_hazards.len() >= state.tuning.min_ground_hazards);
        assert!(state.ground_hazards.iter().all(|h| h.rect().right() >= 0.0));
    }

    #[test]
    fn test_demo_clears_cacti() {
        let mut settings = seeded();
        settings.demo = true;
        settings.tuning.speed_per_point = 0.0;
        settings.tuning.air_interval_ms = 10_000_000;
        let mut game = game(settings, ScriptedInput::new());
        let mut state = game.new_session();

        for i in 0..3000 {
            assert_eq!(game.step(&mut state), None, "hit a cactus on tick {}", i);
            assert!(state.player.pos.y <= state.tuning.ground_y);
        }
        assert!(state.score() > 0);
        assert_eq!(state.score(), 10 * state.tracker.cleared() as u64);
        assert!(state.air_hazards.is_empty());
    }

    #[test]
    fn test_overlap_ends_session_and_freezes() {
        let mut game = game(seeded(), ScriptedInput::new());
        let mut state = game.new_session();
        let player_x = state.tuning.player_x;
        state.ground_hazards[0].pos.x = player_x;

        assert_eq!(game.step(&mut state), Some(SessionEnd::GameOver { score: 0 }));
        assert!(state.is_over());

        let frozen = (state.player.pos, state.ground_hazards[0].pos, state.tick_count);
        assert_eq!(game.step(&mut state), Some(SessionEnd::GameOver { score: 0 }));
        assert_eq!(
            (state.player.pos, state.ground_hazards[0].pos, state.tick_count),
            frozen
        );
        // The fatal frame is still drawn
        assert!(game.renderer().frames >= 2);
    }

    #[test]
    fn test_early_release_cuts_jump() {
        let mut input = ScriptedInput::new();
        input.push_frame(press(Key::Jump)).push_frame(release(Key::Jump));
        let mut game = game(seeded(), input);
        let mut state = game.new_session();

        game.step(&mut state);
        let rising = state.player.vel.y;
        assert!(rising < 0.0);
        game.step(&mut state);
        assert!(state.player.vel.y < 0.0);
        assert!(state.player.vel.y > rising * 0.6, "vy {}", state.player.vel.y);
    }

    #[test]
    fn test_duck_release_stands() {
        let mut input = ScriptedInput::new();
        input.push_frame(press(Key::Duck)).push_frame(release(Key::Duck));
        let mut game = game(seeded(), input);
        let mut state = game.new_session();

        game.step(&mut state);
        assert_eq!(state.player.state, MotionState::Ducking);
        game.step(&mut state);
        assert_eq!(state.player.state, MotionState::Running);
    }

    #[test]
    fn test_quit_ends_run_without_game_over_screen() {
        let mut input = ScriptedInput::new();
        input
            .push_frame(release(Key::Jump))
            .push_idle(10)
            .push_frame(vec![InputEvent::Quit]);
        let mut game = game(seeded(), input);

        let results = game.run();
        assert_eq!(results, vec![SessionEnd::Quit { score: 0 }]);
        assert!(!game.is_running());
        assert!(!game.renderer().texts.iter().any(|t| t == "GAME OVER"));
        assert!(game.audio().playing().is_none(), "music stops on exit");
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut input = ScriptedInput::new();
        input
            .push_frame(release(Key::Jump))
            // No input: the first cactus reaches the runner well within this
            .push_idle(400)
            .push_frame(release(Key::Jump))
            .push_frame(vec![InputEvent::Quit]);
        let mut game = game(seeded(), input);

        let results = game.run();
        assert_eq!(
            results,
            vec![SessionEnd::GameOver { score: 0 }, SessionEnd::Quit { score: 0 }]
        );
        let texts = &game.renderer().texts;
        assert_eq!(texts.iter().filter(|t| *t == "GAME OVER").count(), 1);
        assert!(texts.iter().any(|t| t == "Score: 0"));
    }

    #[test]
    fn test_session_limit_stops_loop() {
        let mut settings = seeded();
        settings.session_limit = Some(2);
        let mut input = ScriptedInput::new();
        input
            .push_frame(release(Key::Jump))
            .push_idle(400)
            .push_frame(release(Key::Jump))
            .push_idle(400)
            .push_frame(release(Key::Jump));
        let mut game = game(settings, input);

        let results = game.run();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(r, SessionEnd::GameOver { .. })));
        assert!(game.is_running());
    }

    #[test]
    fn test_sessions_use_consecutive_seeds() {
        let mut game = game(seeded(), ScriptedInput::new());
        assert_eq!(game.new_session().seed, 1);
        assert_eq!(game.new_session().seed, 2);
    }

    #[test]
    fn test_start_screen_plays_music() {
        let mut input = ScriptedInput::new();
        input.push_frame(press(Key::Jump)).push_frame(release(Key::Jump));
        let mut game = game(seeded(), input);

        game.show_start_screen();
        let track = game.audio().playing().expect("music playing");
        assert_eq!(track.id, AudioId::BackgroundMusic);
        assert_eq!(game.renderer().texts[0], "Dino Dash");
        assert_eq!(game.input.remaining(), 0, "KeyDown alone does not start");
    }

    #[test]
    fn test_demo_screens_advance_alone() {
        let mut settings = seeded();
        settings.demo = true;
        let mut game = game(settings, ScriptedInput::new());
        game.show_start_screen();
        assert!(game.is_running());
    }

    #[test]
    fn test_hud_shows_score() {
        let mut game = game(seeded(), ScriptedInput::new());
        let mut state = game.new_session();
        game.step(&mut state);
        assert_eq!(game.renderer().texts.last().map(String::as_str), Some("0"));
        // ground, three cacti, runner
        assert_eq!(game.renderer().entities, 5);
    }

    struct Silent;

    impl AssetProvider for Silent {
        fn sprite(&self, id: SpriteId) -> Option<CollisionMask> {
            BuiltinAssets::default().sprite(id)
        }

        fn audio(&self, _id: AudioId) -> Option<AudioHandle> {
            None
        }
    }

    struct Blank;

    impl AssetProvider for Blank {
        fn sprite(&self, id: SpriteId) -> Option<CollisionMask> {
            match id {
                SpriteId::Cactus => Some(CollisionMask::new(4, 4)),
                other => BuiltinAssets::default().sprite(other),
            }
        }

        fn audio(&self, id: AudioId) -> Option<AudioHandle> {
            BuiltinAssets::default().audio(id)
        }
    }

    #[test]
    fn test_missing_assets_fail_fast() {
        let build = |provider: &dyn AssetProvider| {
            Game::new(
                seeded(),
                provider,
                SteppedClock::new(),
                ScriptedInput::new(),
                Recorder::default(),
                SilentAudio::default(),
            )
        };
        assert!(matches!(
            build(&Silent),
            Err(GameError::MissingAudio(AudioId::BackgroundMusic))
        ));
        assert!(matches!(
            build(&Blank),
            Err(GameError::EmptySprite(SpriteId::Cactus))
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = seeded();
        settings.music_volume = 2.0;
        let result = Game::new(
            settings,
            &BuiltinAssets::default(),
            SteppedClock::new(),
            ScriptedInput::new(),
            Recorder::default(),
            SilentAudio::default(),
        );
        assert!(matches!(result, Err(GameError::Config(_))));
    }
}
