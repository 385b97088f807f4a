//! Duel settings
//!
//! Persisted as a JSON file next to the result log.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::policy::sanitize_difficulty;

/// Named opponent difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
    Deadly,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
            DifficultyPreset::Deadly => "Deadly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "norm" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            "deadly" | "max" => Some(DifficultyPreset::Deadly),
            _ => None,
        }
    }

    /// Numeric difficulty for the opponent policy
    pub fn difficulty(&self) -> u8 {
        match self {
            DifficultyPreset::Easy => 2,
            DifficultyPreset::Normal => 5,
            DifficultyPreset::Hard => 8,
            DifficultyPreset::Deadly => MAX_DIFFICULTY,
        }
    }
}

/// Weapon stats as configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    /// Head-hit damage
    pub damage: u32,
    /// Body-hit damage
    pub body_damage: u32,
    /// Base on-target probability (0.0 - 1.0)
    pub accuracy: f64,
    /// Minimum time between shots
    pub cooldown_ms: u64,
    /// Rounds per cylinder
    pub capacity: u32,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            name: "Revolver".to_string(),
            damage: HEAD_DAMAGE,
            body_damage: BODY_DAMAGE,
            accuracy: 0.8,
            cooldown_ms: 500,
            capacity: 6,
        }
    }
}

impl WeaponSpec {
    /// The opponent's revolver is a touch less accurate before its bonus
    pub fn opponent() -> Self {
        Self {
            accuracy: 0.7,
            ..Self::default()
        }
    }
}

/// Duel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelSettings {
    // === Match ===
    /// Rounds before the match ends on points
    pub max_rounds: u32,
    /// Opponent difficulty (clamped to 1..=10)
    pub opponent_difficulty: i64,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Timing ===
    /// Draw signal delay range after a round is started
    pub draw_delay_min_ms: u64,
    pub draw_delay_max_ms: u64,
    /// Seconds shown on the "Get Ready" countdown
    pub countdown_secs: u64,
    /// Host tick rate
    pub tick_hz: u32,

    // === Weapons ===
    pub player_weapon: WeaponSpec,
    pub opponent_weapon: WeaponSpec,

    // === Output ===
    /// Append-only round log (JSON lines)
    pub results_path: String,
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            opponent_difficulty: DifficultyPreset::Normal.difficulty() as i64,
            seed: None,

            draw_delay_min_ms: DRAW_DELAY_MIN_MS,
            draw_delay_max_ms: DRAW_DELAY_MAX_MS,
            countdown_secs: 3,
            tick_hz: SIM_HZ,

            player_weapon: WeaponSpec::default(),
            opponent_weapon: WeaponSpec::opponent(),

            results_path: "game_data.jsonl".to_string(),
        }
    }
}

impl DuelSettings {
    /// Settings with the opponent set from a preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            opponent_difficulty: preset.difficulty() as i64,
            ..Self::default()
        }
    }

    /// Milliseconds per host tick
    pub fn tick_ms(&self) -> u64 {
        (1000 / self.tick_hz.max(1) as u64).max(1)
    }

    /// Copy with every field pulled into range
    pub fn sanitized(&self) -> Self {
        let mut s = self.clone();

        let difficulty = sanitize_difficulty(s.opponent_difficulty) as i64;
        if difficulty != s.opponent_difficulty {
            log::warn!(
                "Opponent difficulty {} out of range, using {}",
                s.opponent_difficulty,
                difficulty
            );
            s.opponent_difficulty = difficulty;
        }
        if s.max_rounds == 0 {
            log::warn!("max_rounds must be at least 1");
            s.max_rounds = 1;
        }
        if s.draw_delay_min_ms > s.draw_delay_max_ms {
            log::warn!(
                "draw_delay_min_ms ({}) > draw_delay_max_ms ({}), swapping",
                s.draw_delay_min_ms,
                s.draw_delay_max_ms
            );
            std::mem::swap(&mut s.draw_delay_min_ms, &mut s.draw_delay_max_ms);
        }
        if s.tick_hz == 0 {
            log::warn!("tick_hz must be at least 1, using {}", SIM_HZ);
            s.tick_hz = SIM_HZ;
        }
        for weapon in [&mut s.player_weapon, &mut s.opponent_weapon] {
            if !(0.0..=1.0).contains(&weapon.accuracy) {
                log::warn!("{} accuracy {} clamped", weapon.name, weapon.accuracy);
                weapon.accuracy = weapon.accuracy.clamp(0.0, 1.0);
            }
            if weapon.capacity == 0 {
                log::warn!("{} capacity must be at least 1", weapon.name);
                weapon.capacity = 1;
            }
        }
        s
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<DuelSettings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let s = DuelSettings::default();
        assert_eq!(s.max_rounds, 5);
        assert_eq!(s.opponent_difficulty, 5);
        assert_eq!((s.draw_delay_min_ms, s.draw_delay_max_ms), (2000, 4000));
        assert_eq!(s.player_weapon.accuracy, 0.8);
        assert_eq!(s.opponent_weapon.accuracy, 0.7);
        assert_eq!(s.player_weapon.capacity, 6);
        assert_eq!(s.tick_ms(), 16);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Hard));
        assert_eq!(DifficultyPreset::from_str("max"), Some(DifficultyPreset::Deadly));
        assert_eq!(DifficultyPreset::from_str("brutal"), None);
        assert_eq!(DuelSettings::from_preset(DifficultyPreset::Easy).opponent_difficulty, 2);
    }

    #[test]
    fn test_sanitize_clamps_everything() {
        let mut s = DuelSettings {
            max_rounds: 0,
            opponent_difficulty: 40,
            draw_delay_min_ms: 5000,
            draw_delay_max_ms: 1000,
            tick_hz: 0,
            ..DuelSettings::default()
        };
        s.player_weapon.accuracy = 1.7;
        s.opponent_weapon.capacity = 0;

        let s = s.sanitized();
        assert_eq!(s.max_rounds, 1);
        assert_eq!(s.opponent_difficulty, 10);
        assert_eq!((s.draw_delay_min_ms, s.draw_delay_max_ms), (1000, 5000));
        assert_eq!(s.tick_hz, 60);
        assert_eq!(s.player_weapon.accuracy, 1.0);
        assert_eq!(s.opponent_weapon.capacity, 1);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: DuelSettings = serde_json::from_str(r#"{ "max_rounds": 3 }"#).unwrap();
        assert_eq!(s.max_rounds, 3);
        assert_eq!(s.opponent_difficulty, 5);
        assert_eq!(s.results_path, "game_data.jsonl");
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("eagle_eyes_settings_{}.json", std::process::id()));
        let s = DuelSettings {
            max_rounds: 7,
            seed: Some(42),
            ..DuelSettings::default()
        };
        s.save(&path).unwrap();
        let loaded = DuelSettings::load(&path);
        assert_eq!(loaded, s);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let loaded = DuelSettings::load("/definitely/not/here/eagle_eyes.json");
        assert_eq!(loaded, DuelSettings::default());
    }
}
