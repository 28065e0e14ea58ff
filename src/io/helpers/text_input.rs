use crate::io::{clifmt::Text, input::Key};

/// Indicates what the text input needs from its owner.
#[derive(Debug, PartialEq, Eq)]
pub enum TextInputRequest {
    /// Action doesn't require any response.
    Nothing,
    /// User pressed Escape; whoever owns the input decides what that closes.
    Dismissed,
    /// User submitted the current contents by pressing Enter. The line is left in place, so an
    /// owner rejecting it can let the user fix it; call [`TextInput::clear`] on acceptance.
    Line(String),
}

/// A single-line text editor. Cursor positions are in characters, not bytes, so accented names
/// behave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    line: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn clear(&mut self) {
        self.line.clear();
        self.cursor = 0;
    }

    /// Replace the contents, putting the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.line = text.into();
        self.cursor = self.line.chars().count();
    }

    fn byte_at(&self, cursor: usize) -> usize {
        self.line
            .char_indices()
            .nth(cursor)
            .map(|(at, _)| at)
            .unwrap_or(self.line.len())
    }

    fn len(&self) -> usize {
        self.line.chars().count()
    }

    pub fn keypress(&mut self, key: Key) -> TextInputRequest {
        match key {
            Key::Char(ch) => {
                let at = self.byte_at(self.cursor);
                self.line.insert(at, ch);
                self.cursor += 1;
            }
            Key::Backspace if self.cursor > 0 => {
                self.line.remove(self.byte_at(self.cursor - 1));
                self.cursor -= 1;
            }
            Key::Delete if self.cursor < self.len() => {
                self.line.remove(self.byte_at(self.cursor));
            }
            Key::Left if self.cursor > 0 => self.cursor -= 1,
            Key::Right if self.cursor < self.len() => self.cursor += 1,
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.len(),
            Key::Enter => return TextInputRequest::Line(self.line.clone()),
            Key::Escape => return TextInputRequest::Dismissed,
            _ => (),
        }
        TextInputRequest::Nothing
    }

    /// The line as render chunks, with the cursor position inverted.
    pub fn render(&self) -> Vec<Text> {
        let at = self.byte_at(self.cursor);
        let mut rest = self.line[at..].chars();
        let under_cursor = rest.next().unwrap_or(' ');
        vec![
            Text::plain(&self.line[..at]),
            Text::of(under_cursor.to_string()).invert(),
            Text::of(rest.collect()),
        ]
    }
}
