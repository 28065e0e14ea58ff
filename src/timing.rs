//! Miscellaneous helper types around controlling the timing of events.

use std::time::Duration;

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

/// Keeps track of time between relatively steady pulses.
///
/// Beats try to stay aligned with the first one, but if [`Self::ready`] finds the schedule more
/// than half a period behind, it re-anchors to the current time, dropping the missed beats rather
/// than bursting them out.
pub struct Pulse {
    next: Instant,
    period: Duration,
}

impl Pulse {
    /// A beat every `period`, the first one a full period from now.
    pub fn new(period: Duration) -> Self {
        Self {
            next: Instant::now() + period,
            period,
        }
    }

    /// Drop any pending beat and restart the schedule from now.
    pub fn reset(&mut self) {
        self.next = Instant::now() + self.period;
    }

    /// How much time is left before the next beat. Zero if it is already due.
    pub fn remaining(&self) -> Duration {
        let now = Instant::now();
        if now >= self.next {
            Duration::ZERO
        } else {
            self.next.duration_since(now)
        }
    }

    /// Check for a due beat, advancing the schedule when there is one.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next {
            return false;
        }
        if now < self.next + self.period / 2 {
            self.next = self.next + self.period;
        } else {
            self.next = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use mock_instant::MockClock;

    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn first_beat_comes_a_full_period_in() {
        let mut pulse = Pulse::new(PERIOD);
        assert!(!pulse.ready());
        MockClock::advance(Duration::from_millis(60));
        assert!(!pulse.ready());
        MockClock::advance(Duration::from_millis(60));
        assert!(pulse.ready());
        assert!(!pulse.ready());
    }

    #[test]
    fn beats_hold_their_alignment() {
        let mut pulse = Pulse::new(PERIOD);
        // observed 20ms late, the next beat still comes on the original schedule
        MockClock::advance(Duration::from_millis(120));
        assert!(pulse.ready());
        MockClock::advance(Duration::from_millis(80));
        assert!(pulse.ready());
    }

    #[test]
    fn a_long_stall_drops_missed_beats() {
        let mut pulse = Pulse::new(PERIOD);
        MockClock::advance(Duration::from_millis(1000));
        assert!(pulse.ready());
        // the nine missed beats are gone, not queued up
        assert!(!pulse.ready());
        MockClock::advance(PERIOD);
        assert!(pulse.ready());
    }

    #[test]
    fn reset_pushes_the_next_beat_out() {
        let mut pulse = Pulse::new(PERIOD);
        MockClock::advance(Duration::from_millis(90));
        pulse.reset();
        MockClock::advance(Duration::from_millis(90));
        assert!(!pulse.ready());
        MockClock::advance(Duration::from_millis(20));
        assert!(pulse.ready());
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let pulse = Pulse::new(PERIOD);
        MockClock::advance(Duration::from_millis(70));
        assert_eq!(pulse.remaining(), Duration::from_millis(30));
        MockClock::advance(Duration::from_millis(70));
        assert_eq!(pulse.remaining(), Duration::ZERO);
    }
}
