//! The `Agent` trait and its `ControlFlow`.

use crate::{event::Event, game::Replies};

/// What should happen to an [`Agent`] after it finishes reacting to a round of events.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ControlFlow {
    /// Continue as normal and react again next round.
    Continue,
    /// Stop updating this agent and (eventually) destroy it.
    Kill,
}

impl ControlFlow {
    /// Whether an agent which returned this is still interested in events.
    pub fn is_ready(&self) -> bool {
        *self == ControlFlow::Continue
    }
}

/// A background reactor in the system.
///
/// Events are processed in rounds: every awake agent sees every event of the round, and the
/// replies collected become the next round. As that implies, events are ephemeral -- none
/// persists more than one round.
pub trait Agent {
    /// Called once when the agent is added, to queue any starting events. This will always be
    /// called before [`Self::react`] ever is.
    fn start(&mut self, _replies: &mut Replies) -> ControlFlow {
        ControlFlow::Continue
    }

    /// React to one event of a round, optionally queueing more.
    fn react(&mut self, event: &Event, replies: &mut Replies) -> ControlFlow;
}
