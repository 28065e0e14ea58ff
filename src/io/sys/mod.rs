//! The backends that connect a [`Screen`] and [`Action`]s to an actual display. Each is
//! controlled by a similarly-named feature and exports a struct implementing [`IoSystem`].

use std::io;

use super::{input::Action, output::Screen, XY};

#[cfg(feature = "sys_cli")]
pub mod ansi_cli;
#[cfg(feature = "sys_nop")]
pub mod nop;

/// An input/output backend.
///
/// The output is called a "display" to distinguish it from the [`Screen`]. Each `IoSystem` is
/// paired with an [`IoRunner`] which does the actual platform work; the runner must be stepped
/// regularly on the thread that created it.
pub trait IoSystem {
    /// Actually render a [`Screen`] to the display.
    fn draw(&mut self, screen: &Screen) -> io::Result<()>;
    /// Get the size of the display, in characters.
    fn size(&self) -> XY;
    /// If a user input is pending, return it.
    fn poll_input(&mut self) -> io::Result<Option<Action>>;
    /// Tell the paired [`IoRunner`] to finish up and release whatever it's holding.
    ///
    /// This will always be the last method called on this object, so feel free to panic in the
    /// others if they're called after this one.
    fn stop(&mut self);
}

/// The other half of an [`IoSystem`]: the part that must run on its home thread.
pub trait IoRunner {
    /// Process any pending backend work. Returns `true` once the paired [`IoSystem`] has stopped.
    fn step(&mut self) -> bool;
}

/// Initialize the backend selected by the enabled `sys_*` features, preferring the real terminal.
#[cfg(feature = "__sys")]
#[allow(unreachable_code)]
pub fn load() -> io::Result<(Box<dyn IoSystem>, Box<dyn IoRunner>)> {
    #[cfg(feature = "sys_cli")]
    {
        let (sys, run) = ansi_cli::AnsiSystem::new()?;
        return Ok((Box::new(sys), Box::new(run)));
    }
    #[cfg(feature = "sys_nop")]
    {
        let (sys, run) = nop::NopSystem::new();
        return Ok((Box::new(sys), Box::new(run)));
    }
    unreachable!("__sys enabled with no backend; enable sys_cli or sys_nop")
}
