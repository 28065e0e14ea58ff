//! The seam between the engine half and the game half: what a game is, and how both games and
//! agents talk back to the engine.

use crate::{
    agent::Agent,
    event::Event,
    io::{input::Action, output::Screen},
};

/// Events queued and agents spawned while reacting to a round, which the engine feeds into the
/// next one.
#[derive(Default)]
pub struct Replies {
    pub(crate) agents: Vec<Box<dyn Agent>>,
    pub(crate) messages: Vec<Event>,
}

impl Replies {
    pub fn queue(&mut self, event: Event) -> &mut Self {
        self.messages.push(event);
        self
    }

    pub fn queue_all(&mut self, events: impl IntoIterator<Item = Event>) -> &mut Self {
        self.messages.extend(events);
        self
    }

    pub fn spawn(&mut self, agent: impl Agent + 'static) -> &mut Self {
        self.agents.push(Box::new(agent));
        self
    }

    pub fn queue_len(&self) -> usize {
        self.messages.len()
    }

    /// A **test-only** function, so you can ensure your code queues the correct events.
    #[cfg(test)]
    pub fn messages(&self) -> &[Event] {
        &self.messages
    }
}

/// Allows a [`Game`] to control the engine in response to events or input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Response {
    /// Nothing in particular needs to be done.
    Nothing,
    /// The visual state has updated, and the screen needs to be redrawn.
    Redraw,
    /// The game should be exited, e.g. because the host pressed `q`.
    Quit,
}

/// Represents a game which can be run in the main loop.
///
/// The `Game` is where user input and rendering happen; reacting to events with more events is an
/// [`Agent`]'s job. The idea:
///
/// - When there's relevant user input, queue events and/or update state for rendering
/// - When an event happens (including one you queued!), update state for rendering
/// - Come time to render, you already have everything you need from previous inputs/events
pub trait Game {
    /// The user has done some input; update the UI and queue events accordingly.
    fn input(&mut self, input: Action, replies: &mut Replies) -> Response;

    /// An event has happened; update the UI accordingly.
    fn event(&mut self, event: &Event) -> Response;

    /// Render the game onto the provided [`Screen`].
    fn render(&mut self, onto: &mut Screen);
}
