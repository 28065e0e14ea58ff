//! Wires the pieces into the actual program: the canonical state, the apps, and the glue that
//! applies gameplay consequences when events come around.

use crate::{
    app::{App, BoardApp, RosterApp},
    event::Event,
    game::{Game, Replies, Response},
    io::{
        input::{Action, Key},
        output::Screen,
    },
    state::GameState,
};

/// The whole show: the state record, the board, and the roster panel when it's open.
pub struct Show {
    state: GameState,
    board: BoardApp,
    roster: Option<RosterApp>,
}

impl Show {
    pub fn new() -> Self {
        Self {
            state: GameState::seeded(),
            board: BoardApp::new(),
            roster: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl Default for Show {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Show {
    fn input(&mut self, input: Action, replies: &mut Replies) -> Response {
        if let Action::KeyPress {
            key: Key::Char('q'),
        } = input
        {
            // never a quit key mid-round or mid-edit; too easy to fat-finger
            if !self.state.playing && self.roster.is_none() {
                return Response::Quit;
            }
        }
        let tainted = match self.roster.as_mut() {
            Some(panel) => panel.input(input, replies),
            None => self.board.input(input, replies),
        };
        if tainted {
            Response::Redraw
        } else {
            Response::Nothing
        }
    }

    fn event(&mut self, event: &Event) -> Response {
        let mut tainted = match event {
            Event::AnswerCorrect => self.state.score_correct(),
            Event::AnswerWrong => self.state.score_wrong(),
            Event::Banked => self.state.bank(),
            Event::RoundStarted { seconds } => {
                self.state.playing = true;
                self.state.time_remaining = *seconds;
                true
            }
            Event::RoundPaused | Event::ClockExpired => {
                self.state.playing = false;
                true
            }
            Event::RoundResumed => {
                self.state.playing = true;
                true
            }
            Event::RosterOpened => {
                if self.roster.is_none() {
                    self.roster = Some(RosterApp::editing(&self.state.candidates));
                }
                true
            }
            Event::RosterSaved(candidates) => {
                self.state.adopt_roster(candidates.clone());
                self.roster = None;
                true
            }
            Event::RosterClosed => {
                self.roster = None;
                true
            }
            _ => false,
        };
        tainted |= self.board.on_event(event);
        if let Some(panel) = self.roster.as_mut() {
            tainted |= panel.on_event(event);
        }
        if tainted {
            Response::Redraw
        } else {
            Response::Nothing
        }
    }

    fn render(&mut self, onto: &mut Screen) {
        self.board.render(&self.state, onto);
        if let Some(panel) = self.roster.as_mut() {
            panel.render(&self.state, onto);
        }
    }
}

/// Build the show and run it until the host quits. The one production agent is the round clock.
#[cfg(feature = "__sys")]
pub fn run(_args: impl Iterator<Item = String>) {
    use crate::{clock::RoundClock, runner::Runner};

    match Runner::new(Show::new()).spawn(RoundClock::new()).load_run() {
        Ok(_) => (),
        Err(e) => eprintln!("impossible d'initialiser le terminal : {}", e),
    }
}
