use std::mem;

use crate::{
    io::{
        clifmt::Text,
        output::Screen,
        XY,
    },
    util,
};

/// A box of text which can be written to a `Screen`. Chunks are split on newlines and each line
/// is clipped to the box; there is no word wrap. Meant to be regenerated on the fly, every frame;
/// the actual writing happens on drop.
pub struct Textbox<'a> {
    screen: &'a mut Screen,
    chunks: Vec<Text>,
    pos: XY,
    width: Option<usize>,
    height: Option<usize>,
}

impl<'a> Textbox<'a> {
    pub fn new(screen: &'a mut Screen, text: Vec<Text>) -> Self {
        Self {
            screen,
            chunks: text,
            pos: XY(0, 0),
            width: None,
            height: None,
        }
    }

    util::setters! {
        pos(x: usize, y: usize) => pos = XY(x, y),
        xy(xy: XY) => pos = xy,
        width(w: usize) => width = Some(w),
        height(h: usize) => height = Some(h),
    }
}

impl<'a> Drop for Textbox<'a> {
    fn drop(&mut self) {
        let XY(x, y) = self.pos;
        let size = self.screen.size();
        if x >= size.x() || y >= size.y() {
            return;
        }
        let width = self.width.unwrap_or(size.x() - x).min(size.x() - x);
        let height = self.height.unwrap_or(size.y() - y);
        if width == 0 || height == 0 {
            return;
        }

        // break the chunks into lines on newlines
        let mut lines: Vec<Vec<Text>> = vec![vec![]];
        for chunk in mem::take(&mut self.chunks) {
            let mut first = true;
            for piece in chunk.text.split('\n') {
                if !first {
                    lines.push(vec![]);
                }
                first = false;
                if !piece.is_empty() {
                    lines
                        .last_mut()
                        .expect("lines always starts non-empty")
                        .push(Text {
                            text: piece.into(),
                            fmt: chunk.fmt,
                        });
                }
            }
        }

        for (i, line) in lines.into_iter().take(height).enumerate() {
            let mut remaining = width;
            let mut clipped = Vec::with_capacity(line.len());
            for mut chunk in line {
                if remaining == 0 {
                    break;
                }
                let len = chunk.text.chars().count();
                if len > remaining {
                    chunk.text = chunk.text.chars().take(remaining).collect();
                }
                remaining -= chunk.text.chars().count();
                clipped.push(chunk);
            }
            self.screen.write(XY(x, y + i), clipped);
        }
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
    fn newlines_start_new_rows() {
        let mut screen = Screen::new(XY(8, 3));
        screen.textbox(text!("un\ndeux", " trois")).pos(1, 0);
        assert_eq!(row_string(&screen, 0), " un     ");
        assert_eq!(row_string(&screen, 1), " deux tr");
    }

    #[test]
    fn width_clips_each_line() {
        let mut screen = Screen::new(XY(10, 2));
        screen.textbox(text!("abcdef\nxy")).pos(0, 0).width(3);
        assert_eq!(row_string(&screen, 0), "abc       ");
        assert_eq!(row_string(&screen, 1), "xy        ");
    }

    #[test]
    fn height_drops_extra_lines() {
        let mut screen = Screen::new(XY(4, 3));
        screen.textbox(text!("a\nb\nc")).pos(0, 0).height(2);
        assert_eq!(row_string(&screen, 0), "a   ");
        assert_eq!(row_string(&screen, 1), "b   ");
        assert_eq!(row_string(&screen, 2), "    ");
    }

    #[test]
    fn offscreen_boxes_draw_nothing() {
        let mut screen = Screen::new(XY(4, 2));
        screen.textbox(text!("hidden")).pos(9, 9);
        assert_eq!(row_string(&screen, 0), "    ");
    }
}
