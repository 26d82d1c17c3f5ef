//! Frame callback to simulation tick scheduling
//!
//! The browser calls us every frame; the scheduler decides whether enough
//! time has passed for the next tick. At most one tick runs per frame and
//! missed ticks are never replayed: after a pause the next deadline counts
//! from the resume time.

#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    /// Timestamp (ms) of the last tick or of start/resume
    last_tick: Option<f64>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or resume) scheduling, discarding any time debt
    pub fn start(&mut self, now: f64) {
        self.last_tick = Some(now);
    }

    /// Stop scheduling; game state is untouched
    pub fn stop(&mut self) {
        self.last_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// True if a tick is due at `now` given an `interval_ms` between ticks
    pub fn poll(&mut self, now: f64, interval_ms: u32) -> bool {
        match self.last_tick {
            Some(last) if now - last >= interval_ms as f64 => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }
}
