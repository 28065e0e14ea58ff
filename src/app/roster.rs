//! The contestant-management panel: edits a working copy of the roster, and only touches the
//! real one when the host saves.

use crate::{
    app::{hit, App, HitBox},
    constants::{gameplay::MAX_CANDIDATES, graphics::MAX_NAME},
    event::Event,
    game::Replies,
    io::{
        clifmt::Text,
        helpers::{TextInput, TextInputRequest},
        input::{Action, Key, MouseButton},
        output::Screen,
        XY,
    },
    state::{Candidate, GameState},
    text, text1,
};

/// Which part of the panel is eating keystrokes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Focus {
    List,
    /// Typing the name for a brand-new contestant.
    Add,
    /// Typing a new name for the selected contestant.
    Rename,
}

/// The panel's clickable regions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Target {
    Row(usize),
    Save,
    Cancel,
}

/// The modal contestant editor.
pub struct RosterApp {
    /// The working copy; the real roster is only replaced on save.
    local: Vec<Candidate>,
    sel: usize,
    next_id: u32,
    entry: TextInput,
    focus: Focus,
    notice: Option<String>,
    boxes: Vec<HitBox<Target>>,
}

impl RosterApp {
    /// Open the panel over a copy of the given roster.
    pub fn editing(roster: &[Candidate]) -> Self {
        let next_id = roster.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            local: roster.to_vec(),
            sel: 0,
            next_id,
            entry: TextInput::new(),
            focus: Focus::List,
            notice: None,
            boxes: vec![],
        }
    }

    #[cfg(test)]
    pub fn roster(&self) -> &[Candidate] {
        &self.local
    }

    fn add(&mut self, name: String) {
        let name = name.trim();
        if name.is_empty() {
            self.notice = Some("Le nom ne peut pas être vide".into());
            return;
        }
        if self.local.len() >= MAX_CANDIDATES {
            self.notice = Some(format!("Maximum {} candidats autorisés", MAX_CANDIDATES));
            return;
        }
        let mut candidate = Candidate::new(self.next_id, name);
        candidate.current = self.local.is_empty();
        self.next_id += 1;
        self.local.push(candidate);
        self.sel = self.local.len() - 1;
        self.entry.clear();
        self.notice = None;
    }

    fn rename(&mut self, name: String) {
        let name = name.trim();
        if name.is_empty() {
            self.notice = Some("Le nom ne peut pas être vide".into());
            return;
        }
        self.local[self.sel].name = name.into();
        self.entry.clear();
        self.focus = Focus::List;
        self.notice = None;
    }

    fn remove(&mut self) {
        self.local.remove(self.sel);
        if self.sel >= self.local.len() {
            self.sel = self.local.len().saturating_sub(1);
        }
    }

    /// Exactly one current player at a time, eliminated or not.
    fn make_current(&mut self) {
        for (i, candidate) in self.local.iter_mut().enumerate() {
            candidate.current = i == self.sel;
        }
    }

    fn list_key(&mut self, key: Key, replies: &mut Replies) -> bool {
        match key {
            Key::Up if self.sel > 0 => {
                self.sel -= 1;
                true
            }
            Key::Down if self.sel + 1 < self.local.len() => {
                self.sel += 1;
                true
            }
            Key::Char('n') => {
                self.entry.clear();
                self.focus = Focus::Add;
                self.notice = None;
                true
            }
            Key::Char('r') if !self.local.is_empty() => {
                self.entry.set(&self.local[self.sel].name);
                self.focus = Focus::Rename;
                self.notice = None;
                true
            }
            Key::Char('x') | Key::Delete if !self.local.is_empty() => {
                self.remove();
                true
            }
            Key::Char(' ') if !self.local.is_empty() => {
                self.local[self.sel].active = !self.local[self.sel].active;
                true
            }
            Key::Char('j') if !self.local.is_empty() => {
                self.make_current();
                true
            }
            Key::Enter => {
                replies.queue(Event::RosterSaved(self.local.clone()));
                true
            }
            Key::Escape => {
                replies.queue(Event::RosterClosed);
                true
            }
            _ => false,
        }
    }

    fn entry_key(&mut self, key: Key) -> bool {
        match self.entry.keypress(key) {
            TextInputRequest::Line(name) => match self.focus {
                Focus::Add => self.add(name),
                Focus::Rename => self.rename(name),
                Focus::List => unreachable!("entry only has focus in Add/Rename"),
            },
            TextInputRequest::Dismissed => {
                self.entry.clear();
                self.focus = Focus::List;
                self.notice = None;
            }
            TextInputRequest::Nothing => (),
        }
        true
    }
}

impl App for RosterApp {
    fn name(&self) -> &'static str {
        "candidats"
    }

    fn input(&mut self, action: Action, replies: &mut Replies) -> bool {
        match action {
            Action::KeyPress { key } => match self.focus {
                Focus::List => self.list_key(key, replies),
                Focus::Add | Focus::Rename => self.entry_key(key),
            },
            Action::MousePress {
                button: MouseButton::Left,
                pos,
            } => match hit(&self.boxes, pos) {
                Some(Target::Row(i)) => {
                    self.sel = i;
                    self.focus = Focus::List;
                    true
                }
                Some(Target::Save) => {
                    replies.queue(Event::RosterSaved(self.local.clone()));
                    true
                }
                Some(Target::Cancel) => {
                    replies.queue(Event::RosterClosed);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn on_event(&mut self, _event: &Event) -> bool {
        // the panel is a snapshot; the board underneath keeps moving on its own
        false
    }

    fn render(&mut self, _state: &GameState, screen: &mut Screen) {
        self.boxes.clear();
        let size = screen.size();
        let w = 46.min(size.x());
        let h = (self.local.len() + 9).min(size.y());
        if w < 4 || h < 6 {
            return;
        }
        let x0 = (size.x() - w) / 2;
        let y0 = (size.y() - h) / 2;
        let inner = w - 2;

        let blank: String = " ".repeat(inner);
        let rule: String = "─".repeat(inner);
        screen.write(XY(x0, y0), text!("┌{}┐"(rule)));
        for y in y0 + 1..y0 + h - 1 {
            screen.write(XY(x0, y), text!("│{}│"(blank)));
        }
        screen.write(XY(x0, y0 + h - 1), text!("└{}┘"(rule)));

        let left = x0 + 2;
        screen.write(XY(left, y0 + 1), text!(bold "Gestion des candidats"));

        // the name entry, when it has focus
        let entry_y = y0 + 2;
        match self.focus {
            Focus::Add => {
                let mut line = text!(cyan "Nouveau : ");
                line.extend(self.entry.render());
                screen.write(XY(left, entry_y), line);
            }
            Focus::Rename => {
                let mut line = text!(cyan "Renommer : ");
                line.extend(self.entry.render());
                screen.write(XY(left, entry_y), line);
            }
            Focus::List => (),
        }

        // the roster rows
        let rows_y = y0 + 3;
        if self.local.is_empty() {
            screen.write(
                XY(left, rows_y),
                text!(bright_black "Aucun candidat. Ajoutez-en pour commencer."),
            );
        }
        for (i, candidate) in self.local.iter().enumerate() {
            let y = rows_y + i;
            let marker = if i == self.sel && self.focus == Focus::List {
                text1!(bold "► ")
            } else {
                Text::plain("  ")
            };
            let name: String = candidate.name.chars().take(MAX_NAME).collect();
            let name = if candidate.active {
                text1!("{:<17}"(name))
            } else {
                text1!(bright_black "{:<17}"(name))
            };
            let status = if candidate.active {
                text1!(green "[Actif]   ")
            } else {
                text1!(red "[Éliminé] ")
            };
            let player = if candidate.current {
                text1!(bright_yellow "[Joueur]")
            } else {
                Text::plain("")
            };
            screen.write(XY(left, y), vec![marker, name, status, player]);
            self.boxes
                .push(HitBox::new(XY(left, y), inner - 2, Target::Row(i)));
        }

        // notices, then the footer keys
        let notice_y = rows_y + self.local.len().max(1) + 1;
        if let Some(notice) = &self.notice {
            screen.write(XY(left, notice_y), text!(bright_red "{}"(notice.clone())));
        }
        let help_y = y0 + h - 3;
        screen.write(
            XY(left, help_y),
            text!(bright_black "[n] nouveau  [r] renommer  [x] supprimer"),
        );
        screen.write(
            XY(left, help_y + 1),
            text!(bright_black "[espace] actif/éliminé  [j] joueur courant"),
        );

        let save = "[Entrée] Enregistrer";
        let cancel = "[Échap] Annuler";
        let buttons_y = y0 + h - 2;
        screen.write(XY(left, buttons_y), text!(bold "{}"(save)));
        self.boxes.push(HitBox::new(
            XY(left, buttons_y),
            save.chars().count(),
            Target::Save,
        ));
        let cancel_x = left + save.chars().count() + 3;
        screen.write(XY(cancel_x, buttons_y), text!("{}"(cancel)));
        self.boxes.push(HitBox::new(
            XY(cancel_x, buttons_y),
            cancel.chars().count(),
            Target::Cancel,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTER: Action = Action::KeyPress { key: Key::Enter };
    const ESCAPE: Action = Action::KeyPress { key: Key::Escape };

    fn press(app: &mut RosterApp, key: Key) -> Vec<Event> {
        let mut replies = Replies::default();
        app.input(Action::KeyPress { key }, &mut replies);
        replies.messages().to_vec()
    }

    fn type_str(app: &mut RosterApp, text: &str) {
        for ch in text.chars() {
            press(app, Key::Char(ch));
        }
    }

    fn add(app: &mut RosterApp, name: &str) {
        // a successful add leaves the entry focused for the next name, so only reach for
        // `n` from the list
        if app.focus == Focus::List {
            press(app, Key::Char('n'));
        }
        type_str(app, name);
        press(app, Key::Enter);
    }

    fn full_panel() -> RosterApp {
        let mut app = RosterApp::editing(&[]);
        for i in 0..MAX_CANDIDATES {
            add(&mut app, &format!("Candidat {}", i + 1));
        }
        assert_eq!(app.roster().len(), MAX_CANDIDATES);
        app
    }

    #[test]
    fn first_added_becomes_current() {
        let mut app = RosterApp::editing(&[]);
        add(&mut app, "Zoé");
        add(&mut app, "Marc");
        assert_eq!(app.roster().len(), 2);
        assert!(app.roster()[0].current);
        assert!(!app.roster()[1].current);
        assert!(app.roster().iter().all(|c| c.active));
        assert_eq!((app.roster()[0].id, app.roster()[1].id), (1, 2));
    }

    #[test]
    fn empty_names_are_rejected_with_a_notice() {
        let mut app = RosterApp::editing(&[]);
        add(&mut app, "   ");
        assert!(app.roster().is_empty());
        assert_eq!(app.notice.as_deref(), Some("Le nom ne peut pas être vide"));
        // still in the entry, so the host can just type the name
        assert_eq!(app.focus, Focus::Add);
    }

    #[test]
    fn a_ninth_candidate_is_rejected() {
        let mut app = full_panel();
        add(&mut app, "Candidat 9");
        assert_eq!(app.roster().len(), MAX_CANDIDATES);
        assert_eq!(app.notice.as_deref(), Some("Maximum 8 candidats autorisés"));
    }

    #[test]
    fn renaming_rewrites_the_selected_candidate() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        press(&mut app, Key::Down);
        press(&mut app, Key::Char('r'));
        // the entry starts pre-filled with the old name
        assert_eq!(app.entry.line(), "Thomas");
        for _ in 0.."Thomas".len() {
            press(&mut app, Key::Backspace);
        }
        type_str(&mut app, "Théo");
        press(&mut app, Key::Enter);
        assert_eq!(app.roster()[1].name, "Théo");
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn renaming_to_nothing_is_rejected() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        press(&mut app, Key::Char('r'));
        for _ in 0.."Julie".len() {
            press(&mut app, Key::Backspace);
        }
        press(&mut app, Key::Enter);
        assert_eq!(app.roster()[0].name, "Julie");
        assert_eq!(app.notice.as_deref(), Some("Le nom ne peut pas être vide"));
    }

    #[test]
    fn toggling_marks_elimination() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        press(&mut app, Key::Char(' '));
        assert!(!app.roster()[0].active);
        press(&mut app, Key::Char(' '));
        assert!(app.roster()[0].active);
    }

    #[test]
    fn exactly_one_current_player_at_a_time() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        press(&mut app, Key::Down);
        press(&mut app, Key::Down);
        press(&mut app, Key::Char('j'));
        let current: Vec<_> = app.roster().iter().filter(|c| c.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name, "Sophie");
    }

    #[test]
    fn removal_clamps_the_selection() {
        let mut app = RosterApp::editing(&[]);
        add(&mut app, "Un");
        add(&mut app, "Deux");
        press(&mut app, Key::Escape);
        // adding leaves the newest row selected; removing it moves up
        assert_eq!(app.sel, 1);
        press(&mut app, Key::Char('x'));
        assert_eq!(app.roster().len(), 1);
        assert_eq!(app.sel, 0);
        press(&mut app, Key::Char('x'));
        assert!(app.roster().is_empty());
        // removing from an empty list is ignored
        assert!(press(&mut app, Key::Char('x')).is_empty());
    }

    #[test]
    fn saving_hands_back_the_edited_roster() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        press(&mut app, Key::Char(' '));
        let mut replies = Replies::default();
        app.input(ENTER, &mut replies);
        match replies.messages() {
            [Event::RosterSaved(roster)] => {
                assert_eq!(roster.len(), 6);
                assert!(!roster[0].active);
            }
            other => panic!("expected a save event, got {:?}", other),
        }
    }

    #[test]
    fn escape_discards() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        let mut replies = Replies::default();
        app.input(ESCAPE, &mut replies);
        assert_eq!(replies.messages(), &[Event::RosterClosed]);
    }

    #[test]
    fn escape_in_the_entry_only_closes_the_entry() {
        let mut app = RosterApp::editing(&[]);
        press(&mut app, Key::Char('n'));
        let events = press(&mut app, Key::Escape);
        assert!(events.is_empty());
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn panel_buttons_resolve_after_a_render() {
        let mut app = RosterApp::editing(&GameState::seeded().candidates);
        let mut screen = Screen::new(XY(80, 24));
        app.render(&GameState::seeded(), &mut screen);
        let save = app
            .boxes
            .iter()
            .find(|b| b.what == Target::Save)
            .copied()
            .expect("the panel lays out a save button");
        let mut replies = Replies::default();
        app.input(
            Action::MousePress {
                button: MouseButton::Left,
                pos: save.at,
            },
            &mut replies,
        );
        assert!(matches!(replies.messages(), [Event::RosterSaved(_)]));
    }
}
