//! Deterministic duel simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters as the `now_ms` passed to `tick`
//! - Seeded RNG only
//! - No audio, file or platform dependencies

pub mod collision;
pub mod combatant;
pub mod match_flow;
pub mod policy;
pub mod region;
pub mod state;
pub mod tick;
pub mod timer;
pub mod weapon;

pub use collision::{HitKind, ShotPath, resolve_shot};
pub use combatant::{Actor, Combatant, Controller, Facing};
pub use policy::{AimChoice, OpponentPolicy};
pub use region::Region;
pub use state::{
    CombatantView, DuelPhase, DuelSnapshot, DuelState, GameEvent, MatchResult, MatchState,
    RoundOutcome, RoundSchedule,
};
pub use tick::{TickInput, tick};
pub use timer::ReactionTimer;
pub use weapon::{FireOutcome, Weapon};
