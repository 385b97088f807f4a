//! Eagle Eyes - a quick-draw duel engine
//!
//! Core modules:
//! - `sim`: Round state machine, weapons, opponent policy and hit resolution
//! - `platform`: Clock sources (monotonic and simulated)
//! - `persistence`: Append-only round result log
//! - `audio`: Fire-and-forget cue sink
//! - `settings`: Data-driven duel configuration
//! - `hud`: Status and result text for whatever draws the screen
//! - `session`: Wires a duel to a clock and its sinks

pub mod audio;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::DuelSession;
pub use settings::{DifficultyPreset, DuelSettings, WeaponSpec};

/// Engine configuration constants
pub mod consts {
    /// Reference simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;

    /// Arena dimensions (screen space, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Sample points along a shot path
    pub const SHOT_SAMPLE_STEPS: u32 = 20;
    /// Length of a player shot path (pixels)
    pub const SHOT_RANGE: f32 = 1000.0;
    /// Muzzle offset from a combatant's centre toward its foe
    pub const MUZZLE_OFFSET: f32 = 30.0;

    /// Fixed damage per hit location
    pub const HEAD_DAMAGE: u32 = 50;
    pub const BODY_DAMAGE: u32 = 20;

    /// Health every combatant starts a match with
    pub const MAX_HEALTH: u32 = 100;

    /// Draw signal delay range after a round is started
    pub const DRAW_DELAY_MIN_MS: u64 = 2000;
    pub const DRAW_DELAY_MAX_MS: u64 = 4000;
    /// Gun-pump cue lead time before the draw signal
    pub const GUN_PUMP_LEAD_MS: u64 = 1800;
    /// Shell-drop cue delay after the player's shot
    pub const SHELL_DROP_DELAY_MS: u64 = 300;

    /// Opponent difficulty bounds
    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 10;
    /// Added to the round number when a defeated opponent is replaced
    pub const REPLACEMENT_DIFFICULTY_STEP: u32 = 3;

    /// Default match length
    pub const MAX_ROUNDS: u32 = 5;
}

/// Milliseconds to seconds
#[inline]
pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Round a value to `places` decimal places
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
