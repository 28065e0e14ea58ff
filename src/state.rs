//! The in-memory record every view renders from, and the transitions that drive it.
//!
//! All of this is deliberately dumb data plus a handful of small mutations; anything with a
//! schedule attached (the clock) or a keyboard attached (the apps) lives elsewhere and talks to
//! this through [`Event`](crate::event::Event)s.

use crate::constants::gameplay::{LADDER, ROUND_SECONDS};

/// One contestant on the show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    /// Still in the game, as opposed to eliminated.
    pub active: bool,
    /// Whose turn it is. At most one candidate carries this marker.
    pub current: bool,
}

impl Candidate {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
            current: false,
        }
    }
}

/// The current state of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Money at risk on the ladder right now.
    pub current_amount: u32,
    /// Money locked in by banking.
    pub bank_amount: u32,
    /// The configured round length, in seconds. A running clock keeps its own counter; see
    /// [`RoundClock`](crate::clock::RoundClock).
    pub time_remaining: u32,
    /// Whether a round is underway (and not paused).
    pub playing: bool,
    pub candidates: Vec<Candidate>,
    /// The current rung, as an index into [`LADDER`].
    pub level: usize,
}

impl GameState {
    /// The starting state: the stock roster, nothing at risk, nothing banked.
    pub fn seeded() -> Self {
        let mut candidates: Vec<_> = ["Julie", "Thomas", "Sophie", "Lucas", "Emma", "Nicolas"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| Candidate::new(i as u32 + 1, name))
            .collect();
        candidates[0].current = true;
        Self {
            current_amount: 0,
            bank_amount: 0,
            time_remaining: ROUND_SECONDS,
            playing: false,
            candidates,
            level: 0,
        }
    }

    pub fn current_player(&self) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.current)
    }

    /// Hand the turn to the next active candidate in roster order, wrapping at the end.
    ///
    /// With one or zero active candidates there is nothing to rotate. If nobody holds the turn
    /// marker (the current player was eliminated or removed in the panel), the turn lands on the
    /// first active candidate.
    pub fn advance_turn(&mut self) {
        let active: Vec<usize> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .map(|(i, _)| i)
            .collect();
        if active.len() <= 1 {
            return;
        }
        let up_next = match active.iter().position(|&i| self.candidates[i].current) {
            Some(at) => active[(at + 1) % active.len()],
            None => active[0],
        };
        for (i, c) in self.candidates.iter_mut().enumerate() {
            c.current = i == up_next;
        }
    }

    /// A correct answer climbs one rung (topping out at the last) and passes the turn on.
    /// Returns whether anything changed.
    pub fn score_correct(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.level = (self.level + 1).min(LADDER.len() - 1);
        self.current_amount = LADDER[self.level];
        self.advance_turn();
        true
    }

    /// A wrong answer drops the chain back to zero and passes the turn on.
    pub fn score_wrong(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.level = 0;
        self.current_amount = 0;
        self.advance_turn();
        true
    }

    /// Banking locks in the amount at risk and restarts the chain. The turn does not move.
    pub fn bank(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.bank_amount += self.current_amount;
        self.current_amount = 0;
        self.level = 0;
        true
    }

    /// Replace the roster with an edited copy from the management panel.
    pub fn adopt_roster(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `n` active candidates named A, B, C, ..., first one current, mid-round.
    fn playing(n: usize) -> GameState {
        let mut state = GameState::seeded();
        state.candidates = (0..n)
            .map(|i| Candidate::new(i as u32 + 1, &((b'A' + i as u8) as char).to_string()))
            .collect();
        if n > 0 {
            state.candidates[0].current = true;
        }
        state.playing = true;
        state
    }

    fn current_name(state: &GameState) -> &str {
        &state.current_player().expect("someone should be current").name
    }

    #[test]
    fn rotation_is_a_noop_with_at_most_one_active() {
        for n in [0, 1] {
            let mut state = playing(n);
            let before = state.candidates.clone();
            state.advance_turn();
            assert_eq!(state.candidates, before);
        }

        let mut state = playing(3);
        state.candidates[1].active = false;
        state.candidates[2].active = false;
        state.advance_turn();
        assert_eq!(current_name(&state), "A");
    }

    #[test]
    fn rotation_cycles_in_roster_order() {
        let mut state = playing(3);
        for expected in ["B", "C", "A", "B"] {
            state.advance_turn();
            assert_eq!(current_name(&state), expected);
            assert_eq!(state.candidates.iter().filter(|c| c.current).count(), 1);
        }
    }

    #[test]
    fn full_cycle_returns_to_the_start() {
        for n in 2..=8 {
            let mut state = playing(n);
            for _ in 0..n {
                state.advance_turn();
            }
            assert_eq!(current_name(&state), "A", "with {} candidates", n);
        }
    }

    #[test]
    fn rotation_skips_the_eliminated() {
        let mut state = playing(3);
        state.candidates[1].active = false;
        state.advance_turn();
        assert_eq!(current_name(&state), "C");
        state.advance_turn();
        assert_eq!(current_name(&state), "A");
    }

    #[test]
    fn rotation_with_no_marker_lands_on_first_active() {
        let mut state = playing(3);
        state.candidates[0].current = false;
        state.advance_turn();
        assert_eq!(current_name(&state), "A");

        let mut state = playing(3);
        state.candidates[0].current = false;
        state.candidates[0].active = false;
        state.advance_turn();
        assert_eq!(current_name(&state), "B");
    }

    #[test]
    fn correct_climbs_the_ladder_and_tops_out() {
        let mut state = playing(2);
        assert!(state.score_correct());
        assert_eq!((state.level, state.current_amount), (1, 50));
        for _ in 0..20 {
            state.score_correct();
            assert_eq!(state.current_amount, LADDER[state.level]);
        }
        assert_eq!((state.level, state.current_amount), (9, 5000));
    }

    #[test]
    fn wrong_resets_the_chain() {
        let mut state = playing(2);
        for _ in 0..4 {
            state.score_correct();
        }
        assert!(state.score_wrong());
        assert_eq!((state.level, state.current_amount), (0, 0));
    }

    #[test]
    fn bank_accumulates_without_rotating() {
        let mut state = playing(3);
        state.score_correct();
        state.score_correct();
        let at_risk = state.current_amount;
        let turn_holder = current_name(&state).to_string();
        assert!(state.bank());
        assert_eq!(state.bank_amount, at_risk);
        assert_eq!((state.level, state.current_amount), (0, 0));
        assert_eq!(current_name(&state), turn_holder);

        state.score_correct();
        assert!(state.bank());
        assert_eq!(state.bank_amount, at_risk + 50);
    }

    #[test]
    fn transitions_are_inert_while_not_playing() {
        let mut state = playing(3);
        state.score_correct();
        state.playing = false;
        let before = state.clone();
        assert!(!state.score_correct());
        assert!(!state.score_wrong());
        assert!(!state.bank());
        assert_eq!(state, before);
    }

    #[test]
    fn three_player_scenario_plays_out() {
        let mut state = playing(3);
        state.score_correct();
        assert_eq!((state.level, state.current_amount), (1, 50));
        assert_eq!(current_name(&state), "B");
        state.score_correct();
        assert_eq!((state.level, state.current_amount), (2, 100));
        assert_eq!(current_name(&state), "C");
        state.score_wrong();
        assert_eq!((state.level, state.current_amount), (0, 0));
        assert_eq!(current_name(&state), "A");
    }

    #[test]
    fn seeded_state_is_ready_to_host() {
        let state = GameState::seeded();
        assert_eq!(state.candidates.len(), 6);
        assert_eq!(current_name(&state), "Julie");
        assert!(state.candidates.iter().all(|c| c.active));
        assert!(!state.playing);
        assert_eq!((state.level, state.current_amount, state.bank_amount), (0, 0, 0));
        assert_eq!(state.time_remaining, ROUND_SECONDS);
    }
}
