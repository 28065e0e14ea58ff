//! The UI: each app renders part of the game state and turns input into events.

use crate::{
    event::Event,
    game::Replies,
    io::{input::Action, output::Screen, XY},
    state::GameState,
};

mod board;
mod roster;

pub use board::BoardApp;
pub use roster::RosterApp;

/// A single surface of the UI: the main board, or the roster panel floating over it.
///
/// Apps exclusively handle IO: they render game state and translate user input into events.
/// Gameplay consequences happen wherever those events land, not here.
pub trait App {
    /// The name of this app. (should be constant, hence &'static)
    fn name(&self) -> &'static str;

    /// Take a single input action, queueing any events generated as a result.
    ///
    /// Returns `true` if the app will need to be redrawn, or `false` otherwise.
    fn input(&mut self, action: Action, replies: &mut Replies) -> bool;

    /// Receive an event, in case the app needs to care to render it.
    ///
    /// Returns `true` if the app will need to be redrawn, or `false` otherwise.
    fn on_event(&mut self, event: &Event) -> bool;

    /// Display the game state on screen.
    fn render(&mut self, state: &GameState, screen: &mut Screen);
}

/// A clickable region an app laid out during its last render, and what clicking it means.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct HitBox<T> {
    pub at: XY,
    pub width: usize,
    pub what: T,
}

impl<T: Copy> HitBox<T> {
    pub fn new(at: XY, width: usize, what: T) -> Self {
        Self { at, width, what }
    }

    pub fn contains(&self, pos: XY) -> bool {
        pos.y() == self.at.y() && pos.x() >= self.at.x() && pos.x() < self.at.x() + self.width
    }
}

/// What a click at `pos` hits, if anything.
pub(crate) fn hit<T: Copy>(boxes: &[HitBox<T>], pos: XY) -> Option<T> {
    boxes.iter().find(|b| b.contains(pos)).map(|b| b.what)
}
