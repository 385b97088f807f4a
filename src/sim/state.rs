//! Duel state structures

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::HitKind;
use super::combatant::{Actor, Combatant};
use super::timer::ReactionTimer;
use crate::audio::SoundEffect;
use crate::persistence::RoundRecord;
use crate::settings::DuelSettings;

/// Duel phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelPhase {
    /// Outside any match (reached by aborting)
    Menu,
    /// Ready for the next round to be started
    Waiting,
    /// Round started, draw signal pending
    Countdown,
    /// Draw signal given, first shot wins the round
    Shooting,
    /// Round resolved, waiting for the continue command
    Result,
    /// Match ended
    GameOver,
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    PlayerWin,
    OpponentWin,
    RoundsExhausted,
}

impl MatchResult {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchResult::PlayerWin => "player_win",
            MatchResult::OpponentWin => "opponent_win",
            MatchResult::RoundsExhausted => "rounds_exhausted",
        }
    }
}

/// The resolved result of one fire action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub actor: Actor,
    pub result: HitKind,
    pub damage_applied: u32,
    /// Time from draw signal to the shot
    pub reaction_ms: u64,
    pub timestamp_ms: u64,
}

/// Match progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub round_number: u32,
    pub max_rounds: u32,
    /// Player score
    pub score: u64,
    pub is_over: bool,
    pub result: Option<MatchResult>,
}

impl MatchState {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            round_number: 0,
            max_rounds: max_rounds.max(1),
            score: 0,
            is_over: false,
            result: None,
        }
    }
}

/// Instants scheduled for the current round, polled every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSchedule {
    pub countdown_started_at: Option<u64>,
    pub draw_at: Option<u64>,
    pub opponent_shot_at: Option<u64>,
    pub gun_pump_at: Option<u64>,
    pub shell_drop_at: Option<u64>,
}

impl RoundSchedule {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Something the host should hear about after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Fire-and-forget audio cue
    Cue(SoundEffect),
    /// A round was resolved and should be persisted
    RoundResolved(RoundRecord),
    /// The match ended
    MatchOver(MatchResult),
}

/// Read-only view of one combatant for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub capacity: u32,
    /// Opponent difficulty (scripted combatants only)
    pub difficulty: Option<u8>,
    /// Opponent reaction for this round (scripted combatants only)
    pub reaction_secs: Option<f64>,
}

impl CombatantView {
    fn of(c: &Combatant) -> Self {
        Self {
            health: c.health(),
            max_health: c.max_health,
            ammo: c.weapon.remaining_ammo(),
            capacity: c.weapon.capacity,
            difficulty: c.policy().map(|p| p.difficulty),
            reaction_secs: c.policy().map(|p| p.reaction_secs),
        }
    }
}

/// Everything a display needs, copied out of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelSnapshot {
    pub phase: DuelPhase,
    pub round_number: u32,
    pub max_rounds: u32,
    pub score: u64,
    pub player: CombatantView,
    pub opponent: CombatantView,
    pub latest_outcome: Option<RoundOutcome>,
    /// Player reaction in the current round, if the player fired
    pub player_reaction_ms: Option<u64>,
    /// Whole seconds left on the "Get Ready" countdown
    pub countdown_remaining_secs: Option<u64>,
    pub best_reaction_ms: Option<u64>,
    pub average_reaction_ms: Option<u64>,
    pub match_result: Option<MatchResult>,
}

/// Complete duel state for one match instance
#[derive(Debug, Clone)]
pub struct DuelState {
    pub settings: DuelSettings,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: DuelPhase,
    pub player: Combatant,
    pub opponent: Combatant,
    pub timer: ReactionTimer,
    pub matchup: MatchState,
    pub schedule: RoundSchedule,
    /// Append-only for the match
    pub outcomes: Vec<RoundOutcome>,
    /// Player reaction times this match
    pub reaction_history: Vec<u64>,
    /// Player reaction in the current round
    pub player_reaction_ms: Option<u64>,
    /// When the first round of the match was started
    pub match_started_at: Option<u64>,
    events: Vec<GameEvent>,
}

impl DuelState {
    /// Create a match ready for its first round
    pub fn new(settings: DuelSettings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Combatant::player(&settings.player_weapon);
        let opponent = Combatant::opponent(
            &settings.opponent_weapon,
            settings.opponent_difficulty,
            &mut rng,
        );
        Self {
            matchup: MatchState::new(settings.max_rounds),
            settings,
            seed,
            rng,
            phase: DuelPhase::Waiting,
            player,
            opponent,
            timer: ReactionTimer::new(),
            schedule: RoundSchedule::default(),
            outcomes: Vec::new(),
            reaction_history: Vec::new(),
            player_reaction_ms: None,
            match_started_at: None,
            events: Vec::new(),
        }
    }

    pub fn combatant(&self, actor: Actor) -> &Combatant {
        match actor {
            Actor::Player => &self.player,
            Actor::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, actor: Actor) -> &mut Combatant {
        match actor {
            Actor::Player => &mut self.player,
            Actor::Opponent => &mut self.opponent,
        }
    }

    pub fn latest_outcome(&self) -> Option<&RoundOutcome> {
        self.outcomes.last()
    }

    pub fn best_reaction_ms(&self) -> Option<u64> {
        self.reaction_history.iter().copied().min()
    }

    pub fn average_reaction_ms(&self) -> Option<u64> {
        if self.reaction_history.is_empty() {
            return None;
        }
        let total: u64 = self.reaction_history.iter().sum();
        Some(total / self.reaction_history.len() as u64)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Copy out what a display needs at `now_ms`
    pub fn snapshot(&self, now_ms: u64) -> DuelSnapshot {
        let countdown_remaining_secs = match (self.phase, self.schedule.countdown_started_at) {
            (DuelPhase::Countdown, Some(started)) => Some(
                self.settings
                    .countdown_secs
                    .saturating_sub(now_ms.saturating_sub(started) / 1000),
            ),
            _ => None,
        };
        DuelSnapshot {
            phase: self.phase,
            round_number: self.matchup.round_number,
            max_rounds: self.matchup.max_rounds,
            score: self.matchup.score,
            player: CombatantView::of(&self.player),
            opponent: CombatantView::of(&self.opponent),
            latest_outcome: self.latest_outcome().copied(),
            player_reaction_ms: self.player_reaction_ms,
            countdown_remaining_secs,
            best_reaction_ms: self.best_reaction_ms(),
            average_reaction_ms: self.average_reaction_ms(),
            match_result: self.matchup.result,
        }
    }
}
