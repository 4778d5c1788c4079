//! World clock for the Wildkin simulation.
//!
//! The clock is the single source of truth for simulated time. It counts
//! ticks and accumulates elapsed seconds. Time only moves forward: a
//! negative or non-finite step is rejected before anything changes.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// A step that is negative, zero, or not a number.
    #[error("invalid time step: {dt}")]
    InvalidStep {
        /// The rejected step, in seconds.
        dt: f32,
    },
}

/// Simulated time since the world was created.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorldClock {
    /// Ticks run so far.
    tick: u64,

    /// Simulated seconds elapsed.
    elapsed: f64,
}

impl WorldClock {
    /// A clock at time zero.
    pub const fn new() -> Self {
        Self {
            tick: 0,
            elapsed: 0.0,
        }
    }

    /// A clock resumed at `elapsed` seconds, as restored from a snapshot.
    /// Negative or non-finite values restart at zero.
    pub fn resumed(elapsed: f64) -> Self {
        Self {
            tick: 0,
            elapsed: if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 },
        }
    }

    /// Advance by `dt` seconds. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidStep`] if `dt` is not a positive finite
    /// number, or [`ClockError::TickOverflow`] if the tick counter would
    /// exceed `u64::MAX`.
    pub fn advance(&mut self, dt: f32) -> Result<u64, ClockError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ClockError::InvalidStep { dt });
        }
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        self.elapsed += f64::from(dt);
        Ok(self.tick)
    }

    /// Ticks run since the clock was created or resumed.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds elapsed.
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_ticks_and_seconds() {
        let mut clock = WorldClock::new();
        assert_eq!(clock.advance(0.5).unwrap(), 1);
        assert_eq!(clock.advance(0.25).unwrap(), 2);
        assert_eq!(clock.tick(), 2);
        assert!((clock.elapsed() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_steps_without_moving() {
        let mut clock = WorldClock::new();
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(clock.advance(dt), Err(ClockError::InvalidStep { .. })));
        }
        assert_eq!(clock.tick(), 0);
        assert!(clock.elapsed().abs() < f64::EPSILON);
    }

    #[test]
    fn overflow_is_reported() {
        let mut clock = WorldClock {
            tick: u64::MAX,
            elapsed: 0.0,
        };
        assert!(matches!(clock.advance(1.0), Err(ClockError::TickOverflow)));
        assert_eq!(clock.tick(), u64::MAX);
    }

    #[test]
    fn resumed_clamps_garbage() {
        assert!((WorldClock::resumed(12.5).elapsed() - 12.5).abs() < f64::EPSILON);
        assert!(WorldClock::resumed(-3.0).elapsed().abs() < f64::EPSILON);
        assert!(WorldClock::resumed(f64::NAN).elapsed().abs() < f64::EPSILON);
    }
}
