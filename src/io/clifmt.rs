//! The CLI formatting vocabulary shared by every view and backend:
//!
//! - [`Format`], the common ANSI-ish formatting options
//! - [`Text`] and [`Cell`], a formatted string chunk and a formatted character
//! - [`text!`](crate::text) / [`text1!`](crate::text1), which build `Text`s with formatting
//!   prefixes, e.g. `text1!(red bold "{}:{}"(min, sec))`

/// The color of a piece of formatted text. The numeric values are the ANSI color codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    Default = 9,
    BrightBlack = 60,
    BrightRed = 61,
    BrightGreen = 62,
    BrightYellow = 63,
    BrightBlue = 64,
    BrightMagenta = 65,
    BrightCyan = 66,
    BrightWhite = 67,
}

impl Default for Color {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Format {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub underline: bool,
    pub invert: bool,
}

impl Format {
    pub const NONE: Self = Format {
        fg: Color::Default,
        bg: Color::Default,
        bold: false,
        underline: false,
        invert: false,
    };
}

/// Generates the formatting combinators for `Text` and `Cell`.
macro_rules! fmt_methods {
    ( $type:ident: $( $color:ident => $variant:ident ),* $(,)? ) => {
        impl $type {
            #[must_use]
            pub fn fmt(mut self, fmt: Format) -> Self {
                self.fmt = fmt;
                self
            }
            #[must_use]
            pub fn fg(mut self, c: Color) -> Self {
                self.fmt.fg = c;
                self
            }
            #[must_use]
            pub fn bg(mut self, c: Color) -> Self {
                self.fmt.bg = c;
                self
            }
            #[must_use]
            pub fn bold(mut self) -> Self {
                self.fmt.bold = true;
                self
            }
            #[must_use]
            pub fn underline(mut self) -> Self {
                self.fmt.underline = true;
                self
            }
            #[must_use]
            pub fn invert(mut self) -> Self {
                self.fmt.invert = true;
                self
            }
            $( paste::paste! {
                #[must_use]
                pub fn $color(mut self) -> Self {
                    self.fmt.fg = Color::$variant;
                    self
                }
                #[must_use]
                pub fn [< on_ $color >](mut self) -> Self {
                    self.fmt.bg = Color::$variant;
                    self
                }
            } )*
        }
    };
}

macro_rules! fmt_colors {
    ( $type:ident ) => {
        fmt_methods! { $type:
            black => Black,                 bright_black => BrightBlack,
            red => Red,                     bright_red => BrightRed,
            green => Green,                 bright_green => BrightGreen,
            yellow => Yellow,               bright_yellow => BrightYellow,
            blue => Blue,                   bright_blue => BrightBlue,
            magenta => Magenta,             bright_magenta => BrightMagenta,
            cyan => Cyan,                   bright_cyan => BrightCyan,
            white => White,                 bright_white => BrightWhite,
            default => Default,
        }
    };
}

/// A single chunk of formatted text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub fmt: Format,
}

fmt_colors!(Text);

impl Text {
    pub fn of(text: String) -> Text {
        Text {
            text,
            fmt: Format::NONE,
        }
    }

    pub fn plain(text: &str) -> Text {
        Text::of(text.into())
    }
}

/// A single character that's been formatted. This is really only meant to be used in `Screen`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fmt: Format,
}

fmt_colors!(Cell);

impl Cell {
    pub const fn of(ch: char) -> Cell {
        Cell {
            ch,
            fmt: Format::NONE,
        }
    }

    pub const BLANK: Cell = Cell::of(' ');
}

#[macro_export]
macro_rules! text1 {
    (
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ) => {
        $crate::io::clifmt::Text::of(
            format!( $text $(, $( $arg ),* )? )
        ) $( . $name () )*
    };
}

#[macro_export]
macro_rules! text {
    ( $(
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ),+ $(,)? ) => {
        vec![
            $(
                $crate::io::clifmt::Text::of(
                    format!( $text $(, $( $arg ),* )? )
                ) $( . $name () )*
            ),+
        ]
    };
}
