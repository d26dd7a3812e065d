use std::time::Duration;

use crate::constants::TIMER_PERIOD;

/// # Timers
/// The delay and sound timers both count down to 0 at 60Hz.
///
/// They run off wall-clock time handed in by the host rather than off the number
/// of executed instructions. Time that doesn't add up to a whole period is carried
/// over to the next call to `advance`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    carry: Duration,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts both timers down once for every full period in `elapsed` plus whatever was carried over.
    ///
    /// Returns how many periods elapsed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let total = self.carry.saturating_add(elapsed);
        let period = TIMER_PERIOD.as_nanos();
        let periods = total.as_nanos() / period;
        self.carry = Duration::from_nanos((total.as_nanos() % period) as u64);

        // Nothing changes after 255 periods, both timers are at 0 by then
        let ticks = periods.min(u128::from(u8::MAX)) as u8;
        self.delay = self.delay.saturating_sub(ticks);
        self.sound = self.sound.saturating_sub(ticks);

        periods.min(u128::from(u32::MAX)) as u32
    }

    /// Time accumulated towards the next period
    pub fn carry(&self) -> Duration {
        self.carry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_once_per_period() {
        let mut timers = Timers {
            delay: 10,
            sound: 5,
            ..Timers::new()
        };
        assert_eq!(timers.advance(TIMER_PERIOD), 1);
        assert_eq!((timers.delay, timers.sound), (9, 4));
    }

    #[test]
    fn test_carries_partial_periods() {
        let mut timers = Timers {
            delay: 10,
            ..Timers::new()
        };
        let half = TIMER_PERIOD / 2;
        assert_eq!(timers.advance(half), 0);
        assert_eq!(timers.delay, 10);
        assert_eq!(timers.advance(TIMER_PERIOD - half), 1);
        assert_eq!(timers.delay, 9);
        assert_eq!(timers.carry(), Duration::ZERO);
    }

    #[test]
    fn test_counts_several_periods_at_once() {
        let mut timers = Timers {
            delay: 10,
            sound: 10,
            ..Timers::new()
        };
        // 50ms is three 60Hz periods with a little left over
        assert_eq!(timers.advance(Duration::from_millis(50)), 3);
        assert_eq!((timers.delay, timers.sound), (7, 7));
        assert!(timers.carry() < TIMER_PERIOD);
    }

    #[test]
    fn test_floors_at_zero() {
        let mut timers = Timers {
            delay: 2,
            sound: 0,
            ..Timers::new()
        };
        timers.advance(Duration::from_secs(1));
        assert_eq!((timers.delay, timers.sound), (0, 0));
    }

    #[test]
    fn test_survives_huge_gaps() {
        let mut timers = Timers {
            delay: 0xFF,
            sound: 0xFF,
            ..Timers::new()
        };
        timers.advance(Duration::from_secs(60 * 60 * 24));
        assert_eq!((timers.delay, timers.sound), (0, 0));
    }
}
