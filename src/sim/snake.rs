//! Snake body and heading
//!
//! The body is stored head-first. Heading changes are two-phase: a request
//! only becomes the active direction when the next move is applied.

use std::collections::VecDeque;

use super::grid::{Direction, Position, in_bounds};

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments, index 0 is the head
    body: VecDeque<Position>,
    /// Direction applied on the most recent move
    direction: Direction,
    /// Latest request, applied on the next move
    pending: Direction,
}

impl Snake {
    /// Build a straight snake whose body trails behind `head`
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        let back = direction.opposite().delta();
        let body = (0..length.max(1) as i32).map(|i| head + back * i).collect();
        Self {
            body,
            direction,
            pending: direction,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true; a snake always has a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Active direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Record a heading for the next move.
    ///
    /// No reversal check here: the state machine rejects requests opposite
    /// to the active direction before calling this.
    pub fn set_direction(&mut self, direction: Direction) {
        self.pending = direction;
    }

    /// Advance one cell. A grow move keeps the tail.
    pub fn advance(&mut self, grow: bool) {
        self.direction = self.pending;
        let new_head = self.head() + self.direction.delta();
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn is_head_at(&self, pos: Position) -> bool {
        self.head() == pos
    }

    /// Head outside the `cols` x `rows` board
    pub fn check_wall_collision(&self, cols: i32, rows: i32) -> bool {
        !in_bounds(self.head(), cols, rows)
    }

    /// Head overlapping any other segment (checked after the move)
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }
}
