//! The main board: money ladder, roster, bank, clock, and the host's controls.

use crate::{
    app::{hit, App, HitBox},
    constants::{
        gameplay::{LADDER, LOW_TIME_MARK, ROUND_SECONDS},
        graphics::{HEADER_HEIGHT, LADDER_WIDTH, MAX_NAME},
    },
    event::Event,
    game::Replies,
    io::{
        clifmt::Text,
        input::{Action, Key, MouseButton},
        output::Screen,
        XY,
    },
    state::GameState,
    text, text1,
};

/// Where the round is, as far as the board has heard from the event stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RoundPhase {
    /// Nothing started yet.
    Idle,
    Running,
    Paused,
    /// The clock ran out.
    Over,
}

/// The board's clickable controls.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Button {
    Correct,
    Bank,
    Wrong,
    Pause,
    Start,
    Roster,
}

/// The scoreboard everyone looks at, and the host's controls.
///
/// Round progress (phase, seconds left) is cached here from events rather than read out of
/// [`GameState`]: while a round runs, the clock agent owns the real counter.
pub struct BoardApp {
    phase: RoundPhase,
    /// Seconds left, as last reported by the clock.
    remaining: u32,
    /// Transient status line for the header.
    notice: Option<String>,
    buttons: Vec<HitBox<Button>>,
}

fn width(s: &str) -> usize {
    s.chars().count()
}

impl BoardApp {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            remaining: ROUND_SECONDS,
            notice: None,
            buttons: vec![],
        }
    }

    fn press(&mut self, button: Button, replies: &mut Replies) -> bool {
        match button {
            Button::Correct if self.phase == RoundPhase::Running => {
                replies.queue(Event::AnswerCorrect);
                true
            }
            Button::Wrong if self.phase == RoundPhase::Running => {
                replies.queue(Event::AnswerWrong);
                true
            }
            Button::Bank if self.phase == RoundPhase::Running => {
                replies.queue(Event::Banked);
                true
            }
            Button::Pause => self.toggle_pause(replies),
            Button::Start => self.start_or_resume(replies),
            Button::Roster => {
                replies.queue(Event::RosterOpened);
                true
            }
            _ => false,
        }
    }

    fn start_or_resume(&mut self, replies: &mut Replies) -> bool {
        match self.phase {
            RoundPhase::Idle | RoundPhase::Over => {
                replies.queue(Event::RoundStarted {
                    seconds: ROUND_SECONDS,
                });
                true
            }
            RoundPhase::Paused => {
                replies.queue(Event::RoundResumed);
                true
            }
            RoundPhase::Running => false,
        }
    }

    fn toggle_pause(&mut self, replies: &mut Replies) -> bool {
        match self.phase {
            RoundPhase::Running => {
                replies.queue(Event::RoundPaused);
                true
            }
            RoundPhase::Paused => {
                replies.queue(Event::RoundResumed);
                true
            }
            _ => false,
        }
    }

    fn clock_text(&self) -> Vec<Text> {
        let mmss = format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60);
        if self.remaining <= LOW_TIME_MARK {
            text!(bright_red bold "{}"(mmss))
        } else {
            text!("{}"(mmss))
        }
    }

    /// The start menu, shown whenever no round is underway.
    fn render_menu(&mut self, state: &GameState, screen: &mut Screen) {
        let size = screen.size();
        let mid = size.y() / 2;
        let center = |s: &str| (size.x().saturating_sub(width(s))) / 2;

        let start = "[Entrée] Commencer la partie";
        let x = center(start);
        screen.write(XY(x, mid.saturating_sub(1)), text!(bold "{}"(start)));
        self.buttons
            .push(HitBox::new(XY(x, mid.saturating_sub(1)), width(start), Button::Start));

        let roster = "[g] Gérer les candidats";
        let x = center(roster);
        screen.write(XY(x, mid), text!("{}"(roster)));
        self.buttons
            .push(HitBox::new(XY(x, mid), width(roster), Button::Roster));

        let quit = "[q] Quitter";
        screen.write(XY(center(quit), mid + 1), text!(bright_black "{}"(quit)));

        if state.bank_amount > 0 {
            let total = format!("Total : {} €", state.bank_amount);
            screen.write(XY(center(&total), mid + 3), text!(yellow bold "{}"(total)));
        }
    }

    /// The in-round board: ladder on the left, roster in the middle, totals and controls below.
    fn render_board(&mut self, state: &GameState, screen: &mut Screen) {
        let size = screen.size();
        let top = HEADER_HEIGHT + 1;
        let bottom = size.y().saturating_sub(1);

        // the money ladder, highest rung on top
        for (rung, amount) in LADDER.iter().enumerate() {
            let y = top + (LADDER.len() - 1 - rung);
            let line = format!("{:>7} €", amount);
            let chunk = if rung == state.level {
                text1!(invert bold " {} "(line))
            } else if rung < state.level {
                text1!(bright_black " {} "(line))
            } else {
                text1!(" {} "(line))
            };
            screen.write(XY(0, y), vec![chunk]);
        }
        for y in HEADER_HEIGHT..bottom {
            screen.write(XY(LADDER_WIDTH, y), text!(bright_black "│"));
        }

        // the contestants, in roster order
        let names_x = LADDER_WIDTH + 3;
        let spacing = if bottom.saturating_sub(3 + top) >= state.candidates.len() * 2 {
            2
        } else {
            1
        };
        for (i, candidate) in state.candidates.iter().enumerate() {
            let y = top + i * spacing;
            let mut name: String = candidate.name.chars().take(MAX_NAME).collect();
            let marker = if candidate.current && candidate.active {
                text1!(bright_yellow bold "► ")
            } else {
                Text::plain("  ")
            };
            let name = if !candidate.active {
                name.push_str(" (éliminé)");
                text1!(bright_black "{}"(name))
            } else if candidate.current {
                text1!(bold underline "{}"(name))
            } else {
                text1!("{}"(name))
            };
            screen.write(XY(names_x, y), vec![marker, name]);
        }

        // the "candidats" shortcut, top right like the original
        let manage = "[g] Candidats";
        let manage_x = size.x().saturating_sub(width(manage) + 1);
        screen.write(XY(manage_x, HEADER_HEIGHT), text!(bright_black "{}"(manage)));
        self.buttons
            .push(HitBox::new(XY(manage_x, HEADER_HEIGHT), width(manage), Button::Roster));

        // totals
        let at_risk = format!("En jeu : {} €", state.current_amount);
        screen.write(XY(1, bottom.saturating_sub(2)), text!(green bold "{}"(at_risk)));
        if let Some(player) = state.current_player() {
            let turn = format!("Au tour de : {}", player.name);
            screen.write(
                XY(width(&at_risk) + 5, bottom.saturating_sub(2)),
                text!(cyan "{}"(turn)),
            );
        }
        let total = format!("Total : {} €", state.bank_amount);
        screen.write(XY(1, bottom.saturating_sub(1)), text!(yellow bold "{}"(total)));

        // the button row
        let labels: [(&str, Button); 4] = [
            ("[c] Bonne réponse", Button::Correct),
            ("[b] Banque", Button::Bank),
            ("[x] Mauvaise réponse", Button::Wrong),
            ("[p] Pause", Button::Pause),
        ];
        let gap = 3;
        let row_width: usize =
            labels.iter().map(|(s, _)| width(s)).sum::<usize>() + gap * (labels.len() - 1);
        let mut x = (size.x().saturating_sub(row_width)) / 2;
        for (label, button) in labels {
            let chunk = match button {
                Button::Correct => text1!(bright_green "{}"(label)),
                Button::Bank => text1!(bright_yellow "{}"(label)),
                Button::Wrong => text1!(bright_red "{}"(label)),
                _ => Text::plain(label),
            };
            screen.write(XY(x, bottom), vec![chunk]);
            self.buttons
                .push(HitBox::new(XY(x, bottom), width(label), button));
            x += width(label) + gap;
        }
    }
}

impl Default for BoardApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for BoardApp {
    fn name(&self) -> &'static str {
        "plateau"
    }

    fn input(&mut self, action: Action, replies: &mut Replies) -> bool {
        match action {
            Action::KeyPress { key } => match key {
                Key::Char('c') => self.press(Button::Correct, replies),
                Key::Char('x') => self.press(Button::Wrong, replies),
                Key::Char('b') => self.press(Button::Bank, replies),
                Key::Char('p') => self.press(Button::Pause, replies),
                Key::Char('s') | Key::Enter => self.press(Button::Start, replies),
                Key::Char('g') => self.press(Button::Roster, replies),
                _ => false,
            },
            Action::MousePress {
                button: MouseButton::Left,
                pos,
            } => match hit(&self.buttons, pos) {
                Some(button) => self.press(button, replies),
                None => false,
            },
            _ => false,
        }
    }

    fn on_event(&mut self, event: &Event) -> bool {
        match event {
            Event::RoundStarted { seconds } => {
                self.phase = RoundPhase::Running;
                self.remaining = *seconds;
                self.notice = None;
                true
            }
            Event::RoundPaused => {
                self.phase = RoundPhase::Paused;
                self.notice = Some("Pause".into());
                true
            }
            Event::RoundResumed => {
                self.phase = RoundPhase::Running;
                self.notice = None;
                true
            }
            Event::ClockTick { remaining } => {
                self.remaining = *remaining;
                true
            }
            Event::ClockLow { remaining } => {
                self.remaining = *remaining;
                self.notice = Some("Plus que 10 secondes !".into());
                true
            }
            Event::ClockExpired => {
                self.phase = RoundPhase::Over;
                self.remaining = 0;
                self.notice = Some("Temps écoulé !".into());
                true
            }
            // facts that change what the board shows
            Event::AnswerCorrect | Event::AnswerWrong | Event::Banked | Event::RosterSaved(_) => {
                true
            }
            _ => false,
        }
    }

    fn render(&mut self, state: &GameState, screen: &mut Screen) {
        self.buttons.clear();
        screen
            .header()
            .title("LE MAILLON FAIBLE")
            .notice(self.notice.as_deref().unwrap_or(""))
            .clock(self.clock_text());
        if screen.size().y() <= HEADER_HEIGHT {
            return;
        }
        match self.phase {
            RoundPhase::Idle | RoundPhase::Over => self.render_menu(state, screen),
            RoundPhase::Running | RoundPhase::Paused => self.render_board(state, screen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRECT: Action = Action::KeyPress {
        key: Key::Char('c'),
    };
    const WRONG: Action = Action::KeyPress {
        key: Key::Char('x'),
    };
    const BANK: Action = Action::KeyPress {
        key: Key::Char('b'),
    };
    const PAUSE: Action = Action::KeyPress {
        key: Key::Char('p'),
    };
    const ENTER: Action = Action::KeyPress { key: Key::Enter };

    fn running() -> BoardApp {
        let mut board = BoardApp::new();
        board.on_event(&Event::RoundStarted { seconds: 150 });
        board
    }

    fn input(board: &mut BoardApp, action: Action) -> Vec<Event> {
        let mut replies = Replies::default();
        board.input(action, &mut replies);
        replies.messages().to_vec()
    }

    #[test]
    fn judging_keys_are_inert_while_idle() {
        let mut board = BoardApp::new();
        for action in [CORRECT, WRONG, BANK, PAUSE] {
            assert!(input(&mut board, action).is_empty());
        }
    }

    #[test]
    fn enter_starts_a_full_round() {
        let mut board = BoardApp::new();
        assert_eq!(input(&mut board, ENTER), vec![Event::RoundStarted { seconds: 150 }]);
    }

    #[test]
    fn judging_keys_queue_their_events() {
        let mut board = running();
        assert_eq!(input(&mut board, CORRECT), vec![Event::AnswerCorrect]);
        assert_eq!(input(&mut board, WRONG), vec![Event::AnswerWrong]);
        assert_eq!(input(&mut board, BANK), vec![Event::Banked]);
    }

    #[test]
    fn enter_resumes_a_paused_round() {
        let mut board = running();
        assert_eq!(input(&mut board, PAUSE), vec![Event::RoundPaused]);
        board.on_event(&Event::RoundPaused);
        // judging is blocked mid-pause
        assert!(input(&mut board, CORRECT).is_empty());
        assert_eq!(input(&mut board, ENTER), vec![Event::RoundResumed]);
    }

    #[test]
    fn expiry_sends_the_board_back_to_the_menu() {
        let mut board = running();
        board.on_event(&Event::ClockExpired);
        assert_eq!(board.phase, RoundPhase::Over);
        assert_eq!(input(&mut board, ENTER), vec![Event::RoundStarted { seconds: 150 }]);
    }

    #[test]
    fn clock_events_update_the_cache() {
        let mut board = running();
        assert!(board.on_event(&Event::ClockTick { remaining: 42 }));
        assert_eq!(board.remaining, 42);
        board.on_event(&Event::ClockLow { remaining: 10 });
        assert_eq!(board.notice.as_deref(), Some("Plus que 10 secondes !"));
    }

    #[test]
    fn menu_buttons_resolve_after_a_render() {
        let mut board = BoardApp::new();
        let mut screen = Screen::new(XY(80, 24));
        board.render(&GameState::seeded(), &mut screen);
        let start = board
            .buttons
            .iter()
            .find(|b| b.what == Button::Start)
            .copied()
            .expect("the menu lays out a start button");
        assert_eq!(
            input(&mut board, Action::MousePress { button: MouseButton::Left, pos: start.at }),
            vec![Event::RoundStarted { seconds: 150 }]
        );
        // a click off every button does nothing
        assert!(input(&mut board, Action::MousePress { button: MouseButton::Left, pos: XY(0, 23) })
            .is_empty());
    }

    #[test]
    fn board_buttons_resolve_after_a_render() {
        let mut board = running();
        let mut state = GameState::seeded();
        state.playing = true;
        let mut screen = Screen::new(XY(80, 24));
        board.render(&state, &mut screen);
        let bank = board
            .buttons
            .iter()
            .find(|b| b.what == Button::Bank)
            .copied()
            .expect("the board lays out a bank button");
        // click the far end of the label, not just its first cell
        let pos = bank.at + (bank.width - 1, 0);
        assert_eq!(
            input(&mut board, Action::MousePress { button: MouseButton::Left, pos }),
            vec![Event::Banked]
        );
    }
}