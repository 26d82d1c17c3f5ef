//! Platform-independent game driver
//!
//! Owns the session, the tick scheduler and the local high score. The
//! browser entry point feeds it commands and frame timestamps and renders
//! whatever `snapshot` returns.

use crate::config::GameConfig;
use crate::highscores::HighScore;
use crate::platform::storage::KeyValueStorage;
use crate::platform::time::TickScheduler;
use crate::sim::{Command, GameEvent, GameSession, RenderSnapshot, handle_command, tick};

pub struct App<S> {
    session: GameSession,
    scheduler: TickScheduler,
    high_score: HighScore,
    /// Whether the last finished run set a new high score
    new_record: bool,
    storage: S,
}

impl<S: KeyValueStorage> App<S> {
    /// Load config and high score from `storage` and set up a ready session
    pub fn new(storage: S, seed: u64) -> Self {
        let config = GameConfig::load(&storage);
        Self::with_config(storage, config, seed)
    }

    pub fn with_config(storage: S, config: GameConfig, seed: u64) -> Self {
        let high_score = HighScore::load(&storage);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: GameSession::new(config, seed),
            scheduler: TickScheduler::new(),
            high_score,
            new_record: false,
            storage,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Forward a command; start and resume restart the tick clock at `now`
    pub fn command(&mut self, command: Command, now: f64) -> Option<GameEvent> {
        let event = handle_command(&mut self.session, command)?;
        match event {
            GameEvent::Started => {
                self.new_record = false;
                self.scheduler.start(now);
            }
            GameEvent::Resumed => self.scheduler.start(now),
            GameEvent::Paused => self.scheduler.stop(),
            _ => {}
        }
        Some(event)
    }

    /// Called once per animation frame. Runs at most one tick.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        if !self.scheduler.poll(now, self.session.speed) {
            return Vec::new();
        }
        let events = tick(&mut self.session);
        for event in &events {
            if let GameEvent::GameOver { score, .. } = *event {
                self.scheduler.stop();
                self.new_record = self.high_score.record(score, &self.storage);
            }
        }
        events
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.session.snapshot(self.high_score.best())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORE_KEY;
    use crate::platform::storage::MemoryStorage;
    use crate::sim::{Direction, GamePhase, Position, Snake};

    fn app() -> App<MemoryStorage> {
        App::new(MemoryStorage::new(), 42)
    }

    #[test]
    fn test_frames_do_nothing_until_start() {
        let mut app = app();
        assert!(app.frame(10_000.0).is_empty());
        assert_eq!(app.snapshot().phase, GamePhase::Ready);
        assert!(!app.is_ticking());
    }

    #[test]
    fn test_ticks_follow_speed() {
        let mut app = app();
        app.command(Command::Start, 0.0);
        app.session.food = Position::new(0, 0);

        assert!(app.frame(16.0).is_empty());
        let head = app.session().snake.head();
        app.frame(150.0);
        assert_eq!(app.session().snake.head(), head + Direction::Right.delta());
    }

    #[test]
    fn test_pause_stops_clock_and_resume_discards_debt() {
        let mut app = app();
        app.command(Command::Start, 0.0);
        app.session.food = Position::new(0, 0);
        app.command(Command::TogglePause, 10.0);
        assert!(!app.is_ticking());

        let before = app.snapshot();
        app.frame(10_000.0);
        assert_eq!(app.snapshot(), before);

        app.command(Command::TogglePause, 20_000.0);
        app.frame(20_100.0);
        assert_eq!(app.snapshot().snake_body, before.snake_body);
        app.frame(20_150.0);
        assert_ne!(app.snapshot().snake_body, before.snake_body);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let storage = MemoryStorage::new();
        storage.set(HIGH_SCORE_KEY, "5").unwrap();
        let mut app = App::new(storage, 7);
        assert_eq!(app.high_score(), 5);

        app.command(Command::Start, 0.0);
        app.session.snake = Snake::new(Position::new(0, 10), 3, Direction::Left);
        app.session.food = Position::new(0, 10);

        // Eats then runs into the wall on the same tick
        let events = app.frame(150.0);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { score: 10, .. })));
        assert!(!app.is_ticking());
        assert!(app.new_record());
        assert_eq!(app.snapshot().high_score, 10);
        assert_eq!(app.storage.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("10"));

        // A new run clears the record banner
        app.command(Command::Start, 1000.0);
        assert!(!app.new_record());
        assert_eq!(app.snapshot().score, 0);
    }
}
