//! The round clock: a one-second countdown with a single low-time alert and an expiry signal.
//!
//! [`Countdown`] is the state machine itself; [`RoundClock`] is the agent that drives it off the
//! event stream, one wall-clock second per tick. The countdown owns its remaining-seconds counter
//! from start to expiry -- the rest of the program only hears about it through
//! [`ClockTick`](Event::ClockTick) and friends.

use std::time::Duration;

use crate::{
    agent::{Agent, ControlFlow},
    constants::gameplay::LOW_TIME_MARK,
    event::Event,
    game::Replies,
    timing::Pulse,
};

/// Where a [`Countdown`] is in its life.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Never started since construction.
    Idle,
    Running,
    /// Mid-round with ticking suspended; the counter is retained.
    Paused,
    /// Counted all the way down. Stays here until restarted.
    Expired,
}

/// What a single [`Countdown::tick`] amounted to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Beat {
    /// The clock isn't running; nothing happened.
    Skipped,
    /// An ordinary second went by, leaving this many.
    Ticked(u32),
    /// The tick that crossed into the final stretch.
    LowTime(u32),
    /// The tick that exhausted the clock.
    Expired,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Countdown {
    remaining: u32,
    phase: Phase,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            phase: Phase::Idle,
        }
    }

    /// (Re)start with a full counter, from any phase.
    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.phase = if seconds == 0 {
            Phase::Expired
        } else {
            Phase::Running
        };
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Count down one second. Only ever decrements while running, so the low-time alert and the
    /// expiry each happen at most once per start.
    pub fn tick(&mut self) -> Beat {
        if self.phase != Phase::Running {
            return Beat::Skipped;
        }
        let before = self.remaining;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.phase = Phase::Expired;
            Beat::Expired
        } else if before == LOW_TIME_MARK + 1 {
            Beat::LowTime(self.remaining)
        } else {
            Beat::Ticked(self.remaining)
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`Countdown`] off the event stream.
///
/// The one-second schedule lives here, in a [`Pulse`]; the engine calls [`Agent::react`] at least
/// every round (there's a synthesized [`Event::Tick`] when nothing else happened), and the pulse
/// decides which of those calls actually count a second down.
pub struct RoundClock {
    clock: Countdown,
    pulse: Pulse,
}

impl RoundClock {
    pub fn new() -> Self {
        Self {
            clock: Countdown::new(),
            pulse: Pulse::new(Duration::from_secs(1)),
        }
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RoundClock {
    fn react(&mut self, event: &Event, replies: &mut Replies) -> ControlFlow {
        match event {
            Event::RoundStarted { seconds } => {
                self.clock.start(*seconds);
                self.pulse.reset();
            }
            Event::RoundPaused => self.clock.pause(),
            Event::RoundResumed => {
                self.clock.resume();
                // a full second of play before the next tick, however long the pause lasted
                self.pulse.reset();
            }
            _ => (),
        }
        if self.clock.is_running() && self.pulse.ready() {
            let report = match self.clock.tick() {
                Beat::Ticked(remaining) => Event::ClockTick { remaining },
                Beat::LowTime(remaining) => Event::ClockLow { remaining },
                Beat::Expired => Event::ClockExpired,
                Beat::Skipped => return ControlFlow::Continue,
            };
            replies.queue(report);
        }
        ControlFlow::Continue
    }
}
