//! A backend that does nothing: no display, no input. Lets the rest of the program run on
//! platforms (or in harnesses) with no terminal at all.

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::io::{input::Action, output::Screen, XY};

use super::{IoRunner, IoSystem};

pub struct NopSystem {
    stop: Arc<AtomicBool>,
}

impl NopSystem {
    pub fn new() -> (NopSystem, NopRunner) {
        let stop = Arc::new(AtomicBool::new(false));
        (Self { stop: stop.clone() }, NopRunner { stop })
    }
}

impl IoSystem for NopSystem {
    fn draw(&mut self, _screen: &Screen) -> io::Result<()> {
        Ok(())
    }

    fn size(&self) -> XY {
        XY(80, 24)
    }

    fn poll_input(&mut self) -> io::Result<Option<Action>> {
        Ok(None)
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

pub struct NopRunner {
    stop: Arc<AtomicBool>,
}

impl IoRunner for NopRunner {
    fn step(&mut self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}
