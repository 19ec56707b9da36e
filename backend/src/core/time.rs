//! Time management for the simulation
//!
//! The simulation runs over a wall-clock window `[start, end]` and advances in
//! fixed ticks (one simulated minute by default). The final tick is clamped to
//! `end`, so the clock never overshoots the window.

use chrono::{NaiveDateTime, TimeDelta};

/// Manages simulated time in fixed-length ticks over a run window
///
/// # Example
/// ```
/// use bikeshare_simulator_core_rs::TimeManager;
/// use chrono::{NaiveDate, TimeDelta};
///
/// let start = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap().and_hms_opt(9, 32, 0).unwrap();
///
/// let mut time = TimeManager::new(start, end, TimeDelta::minutes(1));
/// assert_eq!(time.now(), start);
///
/// assert_eq!(time.advance_tick(), Some(TimeDelta::minutes(1)));
/// assert_eq!(time.advance_tick(), Some(TimeDelta::minutes(1)));
/// assert_eq!(time.advance_tick(), None);
/// assert_eq!(time.now(), end);
/// ```
#[derive(Debug, Clone)]
pub struct TimeManager {
    /// Start of the run window
    start: NaiveDateTime,
    /// End of the run window
    end: NaiveDateTime,
    /// Current simulated time
    current: NaiveDateTime,
    /// Nominal length of one tick
    tick: TimeDelta,
    /// Ticks elapsed since `start`
    ticks_elapsed: usize,
}

impl TimeManager {
    /// Create a new TimeManager positioned at `start`
    ///
    /// A window with `end <= start` is valid and simply has no ticks.
    ///
    /// # Panics
    /// Panics if `tick` is not strictly positive
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, tick: TimeDelta) -> Self {
        assert!(tick > TimeDelta::zero(), "tick length must be positive");
        Self {
            start,
            end,
            current: start,
            tick,
            ticks_elapsed: 0,
        }
    }

    /// Advance time by one tick
    ///
    /// Returns the simulated time covered by the tick, which is shorter than
    /// the nominal tick length only for a final partial tick. Returns `None`
    /// once the clock has reached the end of the window.
    pub fn advance_tick(&mut self) -> Option<TimeDelta> {
        if self.is_finished() {
            return None;
        }

        // A tick past the representable range still lands on `end`
        let next = self
            .current
            .checked_add_signed(self.tick)
            .map_or(self.end, |t| t.min(self.end));
        let elapsed = next - self.current;
        self.current = next;
        self.ticks_elapsed += 1;
        Some(elapsed)
    }

    /// Current simulated time
    pub fn now(&self) -> NaiveDateTime {
        self.current
    }

    /// Start of the run window
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// End of the run window
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Number of ticks taken so far
    pub fn ticks_elapsed(&self) -> usize {
        self.ticks_elapsed
    }

    /// Nominal tick length
    pub fn tick_length(&self) -> TimeDelta {
        self.tick
    }

    /// Whether the clock has reached the end of the window
    pub fn is_finished(&self) -> bool {
        self.current >= self.end
    }
}
