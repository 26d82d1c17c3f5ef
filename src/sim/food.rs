//! Food placement
//!
//! Uniform rejection sampling over the board. Sampling is bounded; once the
//! budget runs out the free cells are enumerated and one is picked directly,
//! so a nearly full board still terminates.

use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::{Position, contains, random_position};

/// Rejection samples per board cell before falling back to a scan
const SAMPLES_PER_CELL: usize = 4;

/// Pick a cell not covered by `occupied`, or `None` if the board is full
pub fn place_food<'a, R, I>(rng: &mut R, occupied: I, cols: i32, rows: i32) -> Option<Position>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Position> + Clone,
{
    let cells = (cols.max(0) as usize) * (rows.max(0) as usize);
    if cells == 0 {
        return None;
    }

    for _ in 0..cells * SAMPLES_PER_CELL {
        let pos = random_position(rng, cols, rows);
        if !contains(occupied.clone(), pos) {
            return Some(pos);
        }
    }

    log::warn!("Food sampling exhausted, scanning {} cells", cells);
    (0..rows)
        .flat_map(|y| (0..cols).map(move |x| Position::new(x, y)))
        .filter(|&p| !contains(occupied.clone(), p))
        .choose(rng)
}
