//! Contains the main loop: pump the backend, feed input to the game, run event rounds, render.

use std::{mem, thread, time::Duration};

use crate::{
    agent::{Agent, ControlFlow},
    event::Event,
    game::{Game, Replies, Response},
    io::{
        input::Action,
        output::Screen,
        sys::{IoRunner, IoSystem},
    },
    timing::Pulse,
};

/// How often a round of queued events gets processed.
const ROUND_PERIOD: Duration = Duration::from_millis(250);
/// Redraws are coalesced to at most ~60fps.
const FRAME_PERIOD: Duration = Duration::from_millis(16);

struct AgentRunner {
    agents: Vec<(ControlFlow, Box<dyn Agent>)>,
    replies: Replies,
}

impl AgentRunner {
    fn new() -> Self {
        Self {
            agents: Default::default(),
            replies: Default::default(),
        }
    }

    /// Perform one round of event processing.
    ///
    /// `events` and `agents` are both input and output: what's passed in is this round's work,
    /// what comes out is what the round spawned. Notably the vecs *will be cleared*, and old
    /// events *will not be available*!
    fn step(&mut self, events: &mut Vec<Event>, agents: &mut Vec<Box<dyn Agent>>) {
        self.agents.extend(
            agents
                .drain(..)
                .map(|mut a| (a.start(&mut self.replies), a)),
        );

        if events.is_empty() {
            events.push(Event::tick());
        }

        for (cf, agent) in self.agents.iter_mut() {
            if !cf.is_ready() {
                continue;
            }
            for event in events.iter() {
                *cf = agent.react(event, &mut self.replies);
                if !cf.is_ready() {
                    break;
                }
            }
        }
        self.agents.retain(|(cf, _)| *cf != ControlFlow::Kill);

        // we're done with the old events now
        events.clear();
        // pragmatically this just outputs self.replies and clears it, but this reuses allocations
        mem::swap(&mut self.replies.messages, events);
        mem::swap(&mut self.replies.agents, agents);
    }
}

struct GameRunner<G: Game> {
    game: G,
    iosys: Box<dyn IoSystem>,
    screen: Screen,
    tainted: bool,
    frame_pulse: Pulse,
}

impl<G: Game> GameRunner<G> {
    fn new(game: G, iosys: Box<dyn IoSystem>) -> Self {
        let screen = Screen::new(iosys.size());
        Self {
            game,
            iosys,
            screen,
            tainted: true,
            frame_pulse: Pulse::new(FRAME_PERIOD),
        }
    }

    /// Feed a round of events to the game. Returns whether a stop was requested.
    fn feed(&mut self, events: &[Event]) -> bool {
        for event in events {
            match self.game.event(event) {
                Response::Nothing => (),
                Response::Redraw => self.tainted = true,
                Response::Quit => return true,
            }
        }
        false
    }

    /// Drain pending input into the game. Returns whether a stop was requested.
    fn io(&mut self, events: &mut Vec<Event>, agents: &mut Vec<Box<dyn Agent>>) -> bool {
        let mut replies = Replies {
            agents: mem::take(agents),
            messages: mem::take(events),
        };
        let mut quit = false;
        while let Ok(Some(action)) = self.iosys.poll_input() {
            match action {
                Action::Closed => {
                    quit = true;
                    break;
                }
                Action::Redraw => self.tainted = true,
                other => match self.game.input(other, &mut replies) {
                    Response::Nothing => (),
                    Response::Redraw => self.tainted = true,
                    Response::Quit => {
                        quit = true;
                        break;
                    }
                },
            }
        }
        *agents = replies.agents;
        *events = replies.messages;
        quit
    }

    /// Redraw, if anything needs it and the framerate allows it.
    fn render(&mut self) {
        if !self.frame_pulse.ready() {
            return;
        }
        let new_size = self.iosys.size();
        if self.tainted || new_size != self.screen.size() {
            self.screen.resize(new_size);
            self.game.render(&mut self.screen);
            self.iosys.draw(&self.screen).unwrap();
            self.tainted = false;
        }
    }
}

/// Handles starting up and running a [`Game`].
#[must_use]
pub struct Runner<G: Game> {
    game: G,
    events: Vec<Event>,
    agents: Vec<Box<dyn Agent>>,
}

impl<G: Game> Runner<G> {
    /// Prepare a game to be run.
    pub fn new(game: G) -> Self {
        Self {
            game,
            events: vec![],
            agents: vec![],
        }
    }

    /// Set an agent to be running at game startup, to process the first round of events.
    pub fn spawn(mut self, agent: impl Agent + 'static) -> Self {
        self.agents.push(Box::new(agent));
        self
    }

    /// Add an event to be handled on the first round, by the first crop of
    /// [`spawn`][Self::spawn]ed agents.
    pub fn queue(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Load the feature-selected backend and run the game on this thread.
    ///
    /// Only returns when [`Game::event`] or [`Game::input`] requests a quit, or the terminal
    /// goes away. Returns the [`Game`], primarily for testing purposes.
    #[cfg(feature = "__sys")]
    pub fn load_run(self) -> std::io::Result<G> {
        let (iosys, iorun) = crate::io::sys::load()?;
        Ok(self.run(iosys, iorun))
    }

    /// Run the game against an already-loaded backend.
    pub fn run(self, iosys: Box<dyn IoSystem>, mut iorun: Box<dyn IoRunner>) -> G {
        let Self {
            game,
            mut events,
            mut agents,
        } = self;

        let mut ar = AgentRunner::new();
        let mut gr = GameRunner::new(game, iosys);
        let mut round_pulse = Pulse::new(ROUND_PERIOD);

        'mainloop: loop {
            // between rounds: stay responsive to input, and keep the screen fresh
            loop {
                if iorun.step() {
                    break 'mainloop;
                }
                if gr.io(&mut events, &mut agents) {
                    break 'mainloop;
                }
                gr.render();
                if round_pulse.ready() {
                    break;
                }
                thread::sleep(round_pulse.remaining().min(Duration::from_millis(2)));
            }
            if gr.feed(&events) {
                break 'mainloop;
            }
            ar.step(&mut events, &mut agents);
            gr.render();
        }
        gr.iosys.stop();
        gr.game
    }
}
