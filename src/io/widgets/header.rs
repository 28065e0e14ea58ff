use std::mem;

use crate::{
    io::{
        clifmt::Text,
        output::Screen,
        XY,
    },
    text1, util,
};

/// The status line across the top of the screen: title on the left, the clock on the right, and
/// any notice right-aligned against the clock. (Note this must be rewritten every frame!)
pub struct Header<'a> {
    screen: &'a mut Screen,
    title: String,
    notice: String,
    clock: Vec<Text>,
}

impl<'a> Header<'a> {
    pub fn new(screen: &'a mut Screen) -> Self {
        Self {
            screen,
            title: String::new(),
            notice: String::new(),
            clock: vec![],
        }
    }

    util::setters! {
        title(t: &str) => title = t.into(),
        notice(n: &str) => notice = n.into(),
        clock(c: Vec<Text>) => clock = c,
    }
}

impl<'a> Drop for Header<'a> {
    fn drop(&mut self) {
        let width = self.screen.size().x();
        if width == 0 {
            return;
        }
        let clock = mem::take(&mut self.clock);
        let clock_width: usize = clock.iter().map(|t| t.text.chars().count()).sum();
        let title_width = self.title.chars().count();

        let mut line = vec![text1!(bold "{}"(mem::take(&mut self.title)))];
        // right-align the notice against the clock, with at least one space of separation
        let pad = width.saturating_sub(title_width + clock_width + 1);
        line.push(text1!(yellow "{0:>1$} "(mem::take(&mut self.notice), pad)));
        line.extend(clock);
        self.screen.write(XY(0, 0), line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text;

    fn row_string(screen: &Screen, y: usize) -> String {
        screen[y].iter().map(|c| c.ch).collect()
    }

    #[test]
    fn clock_lands_on_the_right_edge() {
        let mut screen = Screen::new(XY(20, 1));
        screen
            .header()
            .title("TITRE")
            .clock(text!("02:30"));
        assert_eq!(row_string(&screen, 0), "TITRE          02:30");
    }

    #[test]
    fn notice_sits_against_the_clock() {
        let mut screen = Screen::new(XY(20, 1));
        screen
            .header()
            .title("T")
            .notice("Pause")
            .clock(text!("02:30"));
        assert_eq!(row_string(&screen, 0), "T        Pause 02:30");
    }
}
