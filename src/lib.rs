//! A console control board for hosting a "weakest link"-style quiz round: a money ladder,
//! rotating turns, a bank, and a countdown clock, driven by keyboard or mouse.
//!
//! The crate splits the way the program reads:
//!
//! - [`state`] holds the canonical game record and the handful of transitions that drive it
//! - [`clock`] owns the round countdown, as an [`agent`] fed by the event stream
//! - [`app`] renders state and turns input into [`Event`]s
//! - [`show`] glues those together into the [`game::Game`] the [`runner`] main loop runs
//! - [`io`] is the screen/input layer, with backends behind the `sys_*` features

pub mod agent;
pub mod app;
pub mod clock;
pub mod constants;
pub mod event;
pub mod game;
pub mod io;
pub mod runner;
pub mod show;
pub mod state;
pub mod timing;
mod util;

pub use event::Event;
pub use state::{Candidate, GameState};
