//! Snake Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use snake_arcade::App;
    use snake_arcade::leaderboard::firebase::FirebaseStore;
    use snake_arcade::leaderboard::{GlobalLeaderboard, Leaderboard};
    use snake_arcade::platform::input::{Gesture, SwipeTracker, suppresses_default, tap_command};
    use snake_arcade::platform::storage::BrowserStorage;
    use snake_arcade::platform::command_for_key;
    use snake_arcade::renderer::CanvasRenderer;
    use snake_arcade::sim::{Command, GameEvent, GamePhase};

    type Board = Rc<GlobalLeaderboard<FirebaseStore>>;

    /// Game instance holding all state
    struct Game {
        app: App<BrowserStorage>,
        renderer: CanvasRenderer,
        swipe: SwipeTracker,
        leaderboard: Option<Board>,
    }

    impl Game {
        fn command(&mut self, command: Command) {
            self.app.command(command, now());
        }
    }

    /// Monotonic clock shared with requestAnimationFrame timestamps
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snake Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let app = App::new(BrowserStorage::new(), seed);
        let renderer =
            CanvasRenderer::new(&canvas, app.session().config()).expect("Failed to init canvas");

        // The global board is optional: enabled by a database URL on the canvas
        let leaderboard = canvas
            .get_attribute("data-leaderboard-url")
            .map(|url| Rc::new(GlobalLeaderboard::new(FirebaseStore::new(&url))));
        if leaderboard.is_none() {
            log::info!("No leaderboard URL configured, global leaderboard disabled");
        }

        let game = Rc::new(RefCell::new(Game {
            app,
            renderer,
            swipe: SwipeTracker::new(),
            leaderboard: leaderboard.clone(),
        }));

        setup_keyboard(game.clone());
        setup_touch(&canvas, game.clone());
        setup_auto_pause(game.clone());

        if let Some(board) = leaderboard {
            refresh_leaderboard(board);
        }

        request_animation_frame(game);

        log::info!("Snake Arcade running! Press Enter to start.");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if suppresses_default(&key) {
                event.prevent_default();
            }
            if let Some(command) = command_for_key(&key) {
                game.borrow_mut().command(command);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .swipe
                        .begin(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end (swipe or tap)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let mut g = game.borrow_mut();
                let gesture = g
                    .swipe
                    .end(touch.client_x() as f32, touch.client_y() as f32);
                let command = match gesture {
                    Some(Gesture::Swipe(command)) => command,
                    Some(Gesture::Tap) => tap_command(g.app.session().phase),
                    None => return,
                };
                g.command(command);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.app.session().phase == GamePhase::Playing {
                        g.command(Command::TogglePause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.app.session().phase == GamePhase::Playing {
                    g.command(Command::TogglePause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let finished = {
            let mut g = game.borrow_mut();
            let events = g.app.frame(time);

            let snapshot = g.app.snapshot();
            if let Err(e) = g.renderer.render(&snapshot, g.app.new_record()) {
                log::warn!("Render error: {:?}", e);
            }

            events.iter().find_map(|event| match *event {
                GameEvent::GameOver { score, .. } => Some(score),
                _ => None,
            })
        };

        // Submission runs detached; gameplay never waits on the store
        if let Some(score) = finished {
            let board = game.borrow().leaderboard.clone();
            if let Some(board) = board {
                submit_score(board, score);
            }
        }

        request_animation_frame(game);
    }

    fn submit_score(board: Board, score: u64) {
        if score == 0 {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            if !board.is_top_three(score).await {
                return;
            }
            let name = web_sys::window()
                .and_then(|w| {
                    w.prompt_with_message_and_default(
                        &format!("Top 3 score: {}! Enter your name:", score),
                        "",
                    )
                    .ok()
                    .flatten()
                })
                .unwrap_or_default();
            if board
                .submit_if_qualifies(&name, score, js_sys::Date::now())
                .await
            {
                log::info!("Score {} added to the global leaderboard", score);
            }
            show_leaderboard(&board.fetch_top3().await);
        });
    }

    fn refresh_leaderboard(board: Board) {
        wasm_bindgen_futures::spawn_local(async move {
            show_leaderboard(&board.fetch_top3().await);
        });
    }

    /// Fill the `#leaderboard` list, if the page has one
    fn show_leaderboard(board: &Leaderboard) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(list) = document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_text_content(None);
        if board.is_empty() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some("No scores yet"));
                let _ = list.append_child(&item);
            }
            return;
        }
        for (rank, entry) in board.top().iter().enumerate() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&format!(
                    "{}. {} - {}",
                    rank + 1,
                    entry.name,
                    entry.score
                )));
                let _ = list.append_child(&item);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arcade (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let score = autopilot::run(seed);
    println!("Autopilot finished with score {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: greedy steering toward the food
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use snake_arcade::App;
    use snake_arcade::platform::MemoryStorage;
    use snake_arcade::sim::{Command, Direction, GamePhase, GameSession, grid::in_bounds};

    /// Frame interval of a 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this many frames
    const MAX_FRAMES: u32 = 200_000;

    fn command_for(direction: Direction) -> Command {
        match direction {
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
        }
    }

    /// Safe heading that most reduces the distance to food
    fn choose(session: &GameSession) -> Option<Direction> {
        let snake = &session.snake;
        let (cols, rows) = (session.config().cols(), session.config().rows());
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(snake.direction()))
            .filter(|d| {
                let next = snake.head() + d.delta();
                // The tail cell frees up unless we are about to eat
                let body_len = snake.len() - usize::from(!snake.is_head_at(session.food));
                in_bounds(next, cols, rows) && !snake.body().iter().take(body_len).any(|&p| p == next)
            })
            .min_by_key(|d| {
                let next = snake.head() + d.delta();
                (next - session.food).abs().element_sum()
            })
    }

    pub fn run(seed: u64) -> u64 {
        let mut app = App::new(MemoryStorage::new(), seed);
        let mut now = 0.0;
        app.command(Command::Start, now);

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            if let Some(direction) = choose(app.session()) {
                app.command(command_for(direction), now);
            }
            app.frame(now);
            if app.session().phase == GamePhase::GameOver {
                break;
            }
        }

        let snapshot = app.snapshot();
        log::info!(
            "Autopilot: length {}, score {}, speed {}%",
            snapshot.snake_body.len(),
            snapshot.score,
            snapshot.speed_percent
        );
        snapshot.score
    }
}
