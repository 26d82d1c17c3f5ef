//! Pixel layout for the board
//!
//! Pure functions of a snapshot, cell size and canvas size.

use crate::sim::{Direction, GamePhase, Position, RenderSnapshot};

/// Corner radius of snake segments
pub const SEGMENT_RADIUS: f64 = 5.0;
/// Eye square size and distance from the leading edge
const EYE_SIZE: f64 = 2.0;
const EYE_OFFSET: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Segment rectangle, inset one pixel so neighbours don't touch
pub fn segment_rect(pos: Position, cell: f64) -> Rect {
    Rect::new(
        pos.x as f64 * cell + 1.0,
        pos.y as f64 * cell + 1.0,
        cell - 2.0,
        cell - 2.0,
    )
}

/// Food center and body radius; the glow extends to twice the radius
pub fn food_circle(pos: Position, cell: f64) -> (f64, f64, f64) {
    (
        pos.x as f64 * cell + cell / 2.0,
        pos.y as f64 * cell + cell / 2.0,
        cell / 2.5,
    )
}

/// Two eyes on the leading edge of the head
pub fn eye_rects(head: Position, direction: Direction, cell: f64) -> [Rect; 2] {
    let x = head.x as f64 * cell;
    let y = head.y as f64 * cell;
    let eye = |ex: f64, ey: f64| Rect::new(ex, ey, EYE_SIZE, EYE_SIZE);
    let near = EYE_OFFSET - EYE_SIZE;
    let far = cell - EYE_OFFSET;
    let side_a = 5.0;
    let side_b = cell - 7.0;
    match direction {
        Direction::Right => [eye(x + far, y + side_a), eye(x + far, y + side_b)],
        Direction::Left => [eye(x + near, y + side_a), eye(x + near, y + side_b)],
        Direction::Down => [eye(x + side_a, y + far), eye(x + side_b, y + far)],
        Direction::Up => [eye(x + side_a, y + near), eye(x + side_b, y + near)],
    }
}

/// Pixel offsets of grid lines along one axis, both borders included
pub fn grid_lines(extent: u32, cell: u32) -> impl Iterator<Item = f64> {
    (0..=extent).step_by(cell.max(1) as usize).map(f64::from)
}

/// HUD text, top-left, one entry per line
pub fn hud_lines(snapshot: &RenderSnapshot) -> [String; 3] {
    [
        format!("Score: {}", snapshot.score),
        format!("Best: {}", snapshot.high_score),
        format!("Speed: {}%", snapshot.speed_percent),
    ]
}

/// Centered message drawn over a dimmed board
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: String,
    pub subtitle: String,
    pub hint: Option<String>,
}

/// Overlay for the current phase (none while playing)
pub fn overlay(snapshot: &RenderSnapshot, new_record: bool) -> Option<Overlay> {
    match snapshot.phase {
        GamePhase::Playing => None,
        GamePhase::Ready => Some(Overlay {
            title: "Snake".into(),
            subtitle: "Press Enter to start".into(),
            hint: Some("Arrow keys to steer | Space to pause".into()),
        }),
        GamePhase::Paused => Some(Overlay {
            title: "Paused".into(),
            subtitle: "Press Space to continue".into(),
            hint: None,
        }),
        GamePhase::GameOver => Some(Overlay {
            title: if new_record {
                "New Record!".into()
            } else {
                "Game Over!".into()
            },
            subtitle: format!("Score: {} | Press Enter to restart", snapshot.score),
            hint: None,
        }),
    }
}
