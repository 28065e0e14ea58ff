//! The crossterm-based terminal backend.
//!
//! [`AnsiRunner`] owns the terminal: it flips it into raw mode on creation, restores it on drop
//! (and on panic, through a hook), and pumps crossterm events into an mpsc queue as it's stepped.
//! [`AnsiSystem`] drains that queue and renders [`Screen`]s as runs of ANSI-styled text.

use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, TryRecvError},
        Arc,
    },
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{self as ct, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{
        Attribute, Color as CtColor, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::io::{
    clifmt::{Cell, Color, Format},
    input::{Action, Key, MouseButton},
    output::Screen,
    XY,
};

use super::{IoRunner, IoSystem};

fn key_for(code: ct::KeyCode) -> Option<Key> {
    let key = match code {
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::F(n) => Key::F(n),
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::Tab => Key::Tab,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::Insert => Key::Insert,
        ct::KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(key)
}

fn button_for(btn: ct::MouseButton) -> MouseButton {
    match btn {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Middle => MouseButton::Middle,
        ct::MouseButton::Right => MouseButton::Right,
    }
}

pub struct AnsiRunner {
    actions: mpsc::Sender<Action>,
    stop: Arc<AtomicBool>,
}

impl AnsiRunner {
    fn init_term() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> io::Result<()> {
        execute!(
            io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn new(actions: mpsc::Sender<Action>, stop: Arc<AtomicBool>) -> io::Result<Self> {
        Self::init_term()?;
        std::panic::set_hook(Box::new(|info| {
            // get the terminal back into a state where the panic is actually readable
            let _ = Self::clean_term();
            println!("{}", info);
        }));
        Ok(Self { actions, stop })
    }
}

impl Drop for AnsiRunner {
    fn drop(&mut self) {
        let _ = Self::clean_term();
    }
}

impl IoRunner for AnsiRunner {
    fn step(&mut self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }

        macro_rules! try_send {
            ( $type:ident $( ($nt:expr) )? $( { $($br:tt)* } )? ) => {
                match self.actions.send(Action::$type $(($nt))? $({$($br)*})? ) {
                    Ok(_) => (),
                    Err(_) => return true,
                }
            }
        }

        // zero timeout to avoid blocking in `step`
        match ct::poll(Duration::ZERO) {
            Ok(false) => return false,
            Ok(true) => (),
            Err(e) => {
                try_send!(Error(format!("polling: {}", e)));
                return true;
            }
        }
        let ev = match ct::read() {
            Ok(ev) => ev,
            Err(e) => {
                try_send!(Error(format!("reading: {}", e)));
                return true;
            }
        };
        match ev {
            ct::Event::Key(ct::KeyEvent { code, kind, .. }) => match key_for(code) {
                Some(key) if kind == ct::KeyEventKind::Release => try_send!(KeyRelease { key }),
                Some(key) => try_send!(KeyPress { key }),
                None => try_send!(Unknown(format!("key {:?}", code))),
            },
            ct::Event::Mouse(ct::MouseEvent {
                row,
                column: col,
                kind,
                ..
            }) => {
                let pos = XY(col as usize, row as usize);
                match kind {
                    ct::MouseEventKind::Down(btn) => try_send!(MousePress {
                        button: button_for(btn),
                        pos
                    }),
                    ct::MouseEventKind::Up(btn) => try_send!(MouseRelease {
                        button: button_for(btn),
                        pos
                    }),
                    ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => {
                        try_send!(MouseMove { pos })
                    }
                    ct::MouseEventKind::ScrollUp => try_send!(MousePress {
                        button: MouseButton::ScrollUp,
                        pos
                    }),
                    ct::MouseEventKind::ScrollDown => try_send!(MousePress {
                        button: MouseButton::ScrollDown,
                        pos
                    }),
                }
            }
            ct::Event::Resize(..) | ct::Event::FocusGained => try_send!(Redraw),
            _ => (),
        }

        false
    }
}

fn ct_color(color: Color) -> CtColor {
    match color {
        Color::Black => CtColor::Black,
        Color::BrightBlack => CtColor::DarkGrey,
        Color::Red => CtColor::DarkRed,
        Color::BrightRed => CtColor::Red,
        Color::Green => CtColor::DarkGreen,
        Color::BrightGreen => CtColor::Green,
        Color::Yellow => CtColor::DarkYellow,
        Color::BrightYellow => CtColor::Yellow,
        Color::Blue => CtColor::DarkBlue,
        Color::BrightBlue => CtColor::Blue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::BrightMagenta => CtColor::Magenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::BrightCyan => CtColor::Cyan,
        Color::White => CtColor::Grey,
        Color::BrightWhite => CtColor::White,
        Color::Default => CtColor::Reset,
    }
}

// `unwrap` below is safe because we're queueing into a `Vec`, an infallible destination for bytes.
fn queue_format(out: &mut Vec<u8>, fmt: &Format) {
    queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(ct_color(fmt.fg)),
        SetBackgroundColor(ct_color(fmt.bg)),
    )
    .unwrap();
    if fmt.bold {
        queue!(out, SetAttribute(Attribute::Bold)).unwrap();
    }
    if fmt.underline {
        queue!(out, SetAttribute(Attribute::Underlined)).unwrap();
    }
    if fmt.invert {
        queue!(out, SetAttribute(Attribute::Reverse)).unwrap();
    }
}

/// Render one row of cells, restyling only where the format changes.
fn render_row(row: &[Cell], out: &mut Vec<u8>) {
    let mut ch_b = [0u8; 4];
    let mut last: Option<Format> = None;
    for cell in row {
        if last != Some(cell.fmt) {
            queue_format(out, &cell.fmt);
            last = Some(cell.fmt);
        }
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    queue!(out, MoveDown(1), MoveToColumn(0)).unwrap();
}

pub struct AnsiSystem {
    queue: mpsc::Receiver<Action>,
    stop: Arc<AtomicBool>,
}

impl AnsiSystem {
    pub fn new() -> io::Result<(AnsiSystem, AnsiRunner)> {
        let (send, recv) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let runner = AnsiRunner::new(send, stop.clone())?;
        Ok((
            Self {
                queue: recv,
                stop,
            },
            runner,
        ))
    }
}

impl IoSystem for AnsiSystem {
    fn size(&self) -> XY {
        let (x, y) = terminal::size().unwrap_or((80, 24));
        XY(x as usize, y as usize)
    }

    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        let mut out = vec![];
        queue!(&mut out, MoveTo(0, 0)).unwrap();
        for row in screen.rows() {
            render_row(row, &mut out);
        }
        let stdout = io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&out)?;
        stdout.flush()
    }

    fn poll_input(&mut self) -> io::Result<Option<Action>> {
        match self.queue.try_recv() {
            Ok(action) => Ok(Some(action)),
            // the runner is gone, so the terminal is too
            Err(TryRecvError::Disconnected) => Ok(Some(Action::Closed)),
            Err(TryRecvError::Empty) => Ok(None),
        }
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // flush anything the runner sent before it noticed
        while self.queue.try_recv().is_ok() {}
    }
}
