//! Discrete simulation step and player commands
//!
//! The session never owns a timer: the driver calls `tick` once per elapsed
//! `speed` interval and forwards commands as they arrive.

use serde::{Deserialize, Serialize};

use super::grid::Direction;
use super::state::{DeathCause, GameEvent, GamePhase, GameSession};

/// Player commands, already decoded from raw key/touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TogglePause,
    Start,
}

impl Command {
    /// Heading requested by a move command
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::TogglePause | Command::Start => None,
        }
    }
}

/// Apply a command. Commands that don't fit the current phase are ignored.
pub fn handle_command(session: &mut GameSession, command: Command) -> Option<GameEvent> {
    if let Some(dir) = command.direction() {
        // Reversal is judged against the active heading, not the pending one
        if session.phase != GamePhase::Playing || dir.is_opposite(session.snake.direction()) {
            return None;
        }
        session.snake.set_direction(dir);
        return Some(GameEvent::Turned(dir));
    }

    match (command, session.phase) {
        (Command::TogglePause, GamePhase::Playing) => {
            session.phase = GamePhase::Paused;
            Some(GameEvent::Paused)
        }
        (Command::TogglePause, GamePhase::Paused) => {
            session.phase = GamePhase::Playing;
            Some(GameEvent::Resumed)
        }
        (Command::Start, GamePhase::Ready | GamePhase::GameOver) => {
            session.reset();
            session.phase = GamePhase::Playing;
            log::info!("Run started (seed {})", session.seed);
            Some(GameEvent::Started)
        }
        _ => None,
    }
}

/// Advance the session by one cell
pub fn tick(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != GamePhase::Playing {
        return events;
    }

    session.time_ticks += 1;

    // Food is checked against the head before it moves
    let ate_food = session.snake.is_head_at(session.food);
    session.snake.advance(ate_food);

    let mut board_full = false;
    if ate_food {
        session.score += session.config().food_score;
        session.foods_eaten += 1;
        events.push(GameEvent::AteFood {
            score: session.score,
        });

        board_full = !session.respawn_food();

        if session.foods_eaten % session.config().speed_up_interval == 0 {
            session.speed_up();
            log::debug!("Speed up: {}ms per cell", session.speed);
            events.push(GameEvent::SpeedUp {
                speed: session.speed,
            });
        }
    }

    let cause = if session
        .snake
        .check_wall_collision(session.config().cols(), session.config().rows())
    {
        Some(DeathCause::Wall)
    } else if session.snake.check_self_collision() {
        Some(DeathCause::SelfCollision)
    } else if board_full {
        Some(DeathCause::BoardFull)
    } else {
        None
    };

    if let Some(cause) = cause {
        session.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}) score {} after {} ticks",
            cause,
            session.score,
            session.time_ticks
        );
        events.push(GameEvent::GameOver {
            score: session.score,
            cause,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grid::Position;
    use crate::sim::snake::Snake;
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), seed);
        handle_command(&mut session, Command::Start);
        session
    }

    fn body(session: &GameSession) -> Vec<(i32, i32)> {
        session.snake.body().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_ready_to_playing() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.phase, GamePhase::Ready);

        // Ticks and pauses do nothing before start
        assert!(tick(&mut session).is_empty());
        assert_eq!(handle_command(&mut session, Command::TogglePause), None);
        assert_eq!(session.phase, GamePhase::Ready);

        assert_eq!(
            handle_command(&mut session, Command::Start),
            Some(GameEvent::Started)
        );
        assert_eq!(session.phase, GamePhase::Playing);

        // Start while playing is a no-op
        assert_eq!(handle_command(&mut session, Command::Start), None);
    }

    #[test]
    fn test_tick_pause() {
        let mut session = playing(1);
        session.food = Position::new(0, 0);

        assert_eq!(
            handle_command(&mut session, Command::TogglePause),
            Some(GameEvent::Paused)
        );
        assert_eq!(session.phase, GamePhase::Paused);

        // Paused sessions don't move and ignore turns
        let before = body(&session);
        assert!(tick(&mut session).is_empty());
        assert_eq!(body(&session), before);
        assert_eq!(handle_command(&mut session, Command::MoveUp), None);

        assert_eq!(
            handle_command(&mut session, Command::TogglePause),
            Some(GameEvent::Resumed)
        );
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut session = playing(1);
        session.food = Position::new(10, 10);

        let events = tick(&mut session);
        assert_eq!(body(&session), vec![(11, 10), (10, 10), (9, 10), (8, 10)]);
        assert_eq!(session.score, 10);
        assert_eq!(session.foods_eaten, 1);
        assert_eq!(events, vec![GameEvent::AteFood { score: 10 }]);
        assert!(!session.snake.body().contains(&session.food));
    }

    #[test]
    fn test_food_ahead_is_eaten_on_following_tick() {
        let mut session = playing(1);
        session.food = Position::new(11, 10);

        // First tick lands on the food, second consumes it
        tick(&mut session);
        assert_eq!(body(&session), vec![(11, 10), (10, 10), (9, 10)]);
        assert_eq!(session.score, 0);
        tick(&mut session);
        assert_eq!(body(&session), vec![(12, 10), (11, 10), (10, 10), (9, 10)]);
        assert_eq!(session.score, 10);
    }

    #[test]
    fn test_wall_hit_ends_game() {
        let mut session = playing(1);
        session.snake = Snake::new(Position::new(0, 10), 3, Direction::Left);
        session.food = Position::new(20, 20);

        let events = tick(&mut session);
        assert!(session.snake.check_wall_collision(30, 30));
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                score: 0,
                cause: DeathCause::Wall
            }]
        );

        // Dead sessions stay put
        assert!(tick(&mut session).is_empty());
    }

    #[test]
    fn test_reverse_request_rejected() {
        let mut session = playing(1);
        assert_eq!(handle_command(&mut session, Command::MoveLeft), None);
        assert_eq!(session.snake.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_up_then_left_within_one_tick() {
        // Reversal is judged against the active heading, so Up then Left
        // in the same tick leaves Left pending
        let mut session = playing(1);
        session.food = Position::new(0, 0);
        handle_command(&mut session, Command::MoveUp);
        assert_eq!(
            handle_command(&mut session, Command::MoveLeft),
            None,
            "left is still the reverse of the active right heading"
        );
        assert_eq!(session.snake.pending_direction(), Direction::Up);

        tick(&mut session);
        assert_eq!(session.snake.head(), Position::new(10, 9));
        assert_eq!(
            handle_command(&mut session, Command::MoveLeft),
            Some(GameEvent::Turned(Direction::Left))
        );
    }

    #[test]
    fn test_speed_up_every_interval() {
        let mut session = playing(1);
        let mut speedups = 0;
        for _ in 0..10 {
            // Put food under the head so each tick eats
            session.food = session.snake.head();
            for event in tick(&mut session) {
                if let GameEvent::SpeedUp { .. } = event {
                    speedups += 1;
                }
            }
            // Heading right from x=10 stays on the board for 10 ticks
            assert_eq!(session.phase, GamePhase::Playing);
        }
        assert_eq!(session.foods_eaten, 10);
        assert_eq!(session.score, 100);
        assert_eq!(speedups, 2);
        assert_eq!(session.speed, 121);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = playing(1);
        session.snake = Snake::new(Position::new(0, 10), 3, Direction::Left);
        session.score = 40;
        tick(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);

        assert_eq!(handle_command(&mut session, Command::TogglePause), None);
        assert_eq!(
            handle_command(&mut session, Command::Start),
            Some(GameEvent::Started)
        );
        assert_eq!(session.score, 0);
        assert_eq!(session.snake.head(), Position::new(10, 10));
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_board_full_ends_game() {
        // 3x1 board, snake fills two cells and eats the last one
        let config = GameConfig {
            canvas_width: 60,
            canvas_height: 20,
            initial_head: Position::new(1, 0),
            initial_length: 2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let mut session = GameSession::new(config, 5);
        assert_eq!(session.food, Position::new(2, 0));
        handle_command(&mut session, Command::Start);

        // Put the food under the head; after growing every cell is taken
        session.food = session.snake.head();
        let events = tick(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 10,
                cause: DeathCause::BoardFull
            })
        );
    }

    fn command_strategy() -> impl Strategy<Value = Command> {
        prop::sample::select(vec![
            Command::MoveUp,
            Command::MoveDown,
            Command::MoveLeft,
            Command::MoveRight,
        ])
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            steps in prop::collection::vec(prop::collection::vec(command_strategy(), 0..3), 1..200)
        ) {
            let mut session = playing(seed);
            let mut last_speed = session.speed;
            let mut last_score = session.score;

            for commands in steps {
                if session.phase != GamePhase::Playing {
                    break;
                }
                let active = session.snake.direction();
                for command in commands {
                    handle_command(&mut session, command);
                    // Never pending a reversal of the active heading
                    prop_assert!(!session.snake.pending_direction().is_opposite(active));
                }

                let old_head = session.snake.head();
                let old_len = session.snake.len();
                let heading = session.snake.pending_direction();
                let eats = session.snake.is_head_at(session.food);
                tick(&mut session);

                prop_assert_eq!(session.snake.head(), old_head + heading.delta());
                prop_assert_eq!(session.snake.len(), old_len + usize::from(eats));
                prop_assert_eq!(session.score, last_score + if eats { 10 } else { 0 });
                prop_assert!(session.speed <= last_speed);
                prop_assert!(session.speed >= session.config().min_speed);
                // Fresh food never lands on the snake; old food may end up
                // under the head until the next tick eats it
                if eats && session.phase == GamePhase::Playing {
                    prop_assert!(!session.snake.body().contains(&session.food));
                }
                last_speed = session.speed;
                last_score = session.score;
            }
        }
    }
}
