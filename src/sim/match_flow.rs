//! Match controller
//!
//! Round counting, opponent replacement, termination and match reset.

use super::combatant::Combatant;
use super::state::{DuelPhase, DuelState, GameEvent, MatchResult, MatchState};
use crate::audio::SoundEffect;
use crate::consts::{MAX_DIFFICULTY, REPLACEMENT_DIFFICULTY_STEP};

impl DuelState {
    /// Step to the next round.
    ///
    /// A defeated opponent is replaced by a harder one; otherwise the current
    /// opponent re-rolls its round policy. Both weapons are re-armed.
    pub fn advance_round(&mut self) {
        self.matchup.round_number += 1;
        let round = self.matchup.round_number;

        if self.opponent.is_defeated() {
            let difficulty = (round + REPLACEMENT_DIFFICULTY_STEP).min(MAX_DIFFICULTY as u32);
            log::info!("Opponent defeated, a difficulty {} challenger steps up", difficulty);
            self.opponent = Combatant::opponent(
                &self.settings.opponent_weapon,
                difficulty as i64,
                &mut self.rng,
            );
        } else {
            self.opponent.reset_for_round(&mut self.rng);
        }
        self.player.reset_for_round(&mut self.rng);
    }

    /// Match result if the match should end now
    pub fn check_termination(&self) -> Option<MatchResult> {
        if self.player.is_defeated() {
            Some(MatchResult::OpponentWin)
        } else if self.opponent.is_defeated() {
            Some(MatchResult::PlayerWin)
        } else if self.matchup.round_number >= self.matchup.max_rounds {
            Some(MatchResult::RoundsExhausted)
        } else {
            None
        }
    }

    /// Whether another round may be started
    pub fn can_start_round(&self) -> bool {
        !self.matchup.is_over && self.matchup.round_number < self.matchup.max_rounds
    }

    /// Enter `GameOver` with `result`
    pub(crate) fn finish_match(&mut self, result: MatchResult) {
        self.matchup.is_over = true;
        self.matchup.result = Some(result);
        self.phase = DuelPhase::GameOver;
        self.schedule.clear();
        log::info!(
            "Match over after {} rounds: {} (score {})",
            self.matchup.round_number,
            result.as_str(),
            self.matchup.score
        );
        self.push_event(GameEvent::Cue(SoundEffect::GameOver));
        self.push_event(GameEvent::MatchOver(result));
    }

    /// Start a fresh match with the same settings, keeping the RNG stream
    pub fn reset_match(&mut self) {
        self.matchup = MatchState::new(self.settings.max_rounds);
        self.player.restore();
        self.opponent = Combatant::opponent(
            &self.settings.opponent_weapon,
            self.settings.opponent_difficulty,
            &mut self.rng,
        );
        self.timer.reset();
        self.schedule.clear();
        self.outcomes.clear();
        self.reaction_history.clear();
        self.player_reaction_ms = None;
        self.match_started_at = None;
        self.phase = DuelPhase::Waiting;
    }
}
