//! Audio cues
//!
//! The simulation only names the cue; playing it is fire-and-forget and never
//! blocks or fails the tick. Hosts without a sound device can keep the log
//! backend, which records each cue at debug level.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// A round was started
    RoundStarted,
    /// Cylinders refilled at round start
    Reload,
    /// Hammer cocked shortly before the draw
    GunPump,
    /// The draw signal
    DrawSignal,
    /// Any discharged shot
    ShotFired,
    /// A shot landed on head or body
    HitConfirmed,
    /// Spent casing hits the ground after the player's shot
    ShellDrop,
    /// Match ended
    GameOver,
}

impl SoundEffect {
    /// Asset-style name, e.g. for mapping to sample files
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::RoundStarted => "round_start",
            SoundEffect::Reload => "reload",
            SoundEffect::GunPump => "gun_pump",
            SoundEffect::DrawSignal => "draw",
            SoundEffect::ShotFired => "gunshot",
            SoundEffect::HitConfirmed => "hit",
            SoundEffect::ShellDrop => "shell_drop",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Anything that can play a cue
pub trait CueSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Swallows every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCues;

impl CueSink for NullCues {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager for the duel
///
/// Applies volume and mute before handing cues to the log backend.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues actually played (not muted)
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("cue {} (vol {:.2})", effect.name(), vol);
    }
}

/// Records cues in order, for tests and replays
#[derive(Debug, Default, Clone)]
pub struct RecordedCues {
    pub cues: Vec<SoundEffect>,
}

impl CueSink for RecordedCues {
    fn play(&mut self, effect: SoundEffect) {
        self.cues.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_manager_plays_nothing() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::ShotFired);
        assert_eq!(audio.played(), 1);

        audio.set_muted(true);
        audio.play(SoundEffect::ShotFired);
        assert_eq!(audio.played(), 1);

        audio.set_muted(false);
        audio.set_master_volume(-2.0);
        audio.play(SoundEffect::DrawSignal);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_recorded_cues_keep_order() {
        let mut rec = RecordedCues::default();
        rec.play(SoundEffect::GunPump);
        rec.play(SoundEffect::DrawSignal);
        assert_eq!(rec.cues, vec![SoundEffect::GunPump, SoundEffect::DrawSignal]);
    }
}
