//! Single-action revolver model
//!
//! Ammo, inter-shot cooldown and a Bernoulli on-target roll per discharge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::HitKind;
use crate::settings::WeaponSpec;

/// Result of a trigger pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireOutcome {
    /// Cooldown running or cylinder empty: no round left the barrel
    NoEffect,
    /// Shot left the barrel on target and goes to hit resolution
    OnTarget,
    /// Shot left the barrel but went wide
    OffTarget,
}

impl FireOutcome {
    /// Whether a round was actually discharged
    pub fn discharged(self) -> bool {
        self != FireOutcome::NoEffect
    }
}

/// A weapon owned by exactly one combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Damage of a head hit
    pub damage: u32,
    /// Damage of a body hit
    pub body_damage: u32,
    /// Base probability that a discharge is on target
    pub accuracy: f64,
    pub cooldown_ms: u64,
    pub capacity: u32,
    remaining_ammo: u32,
    /// `None` behaves as negative infinity: the first shot is always eligible
    last_fired_at: Option<u64>,
}

impl Weapon {
    pub fn new(spec: &WeaponSpec) -> Self {
        let capacity = spec.capacity.max(1);
        Self {
            name: spec.name.clone(),
            damage: spec.damage,
            body_damage: spec.body_damage,
            accuracy: spec.accuracy.clamp(0.0, 1.0),
            cooldown_ms: spec.cooldown_ms,
            capacity,
            remaining_ammo: capacity,
            last_fired_at: None,
        }
    }

    pub fn remaining_ammo(&self) -> u32 {
        self.remaining_ammo
    }

    pub fn last_fired_at(&self) -> Option<u64> {
        self.last_fired_at
    }

    /// True iff the cooldown has passed and a round is chambered
    pub fn can_fire(&self, now_ms: u64) -> bool {
        let cooled = self
            .last_fired_at
            .is_none_or(|last| now_ms.saturating_sub(last) > self.cooldown_ms);
        cooled && self.remaining_ammo > 0
    }

    /// Pull the trigger.
    ///
    /// `bonus` is added to the base accuracy (total clamped to 1.0). An
    /// ineligible pull changes nothing and reports `NoEffect`.
    pub fn fire<R: Rng>(&mut self, now_ms: u64, bonus: f64, rng: &mut R) -> FireOutcome {
        if !self.can_fire(now_ms) {
            return FireOutcome::NoEffect;
        }
        self.last_fired_at = Some(now_ms);
        self.remaining_ammo -= 1;
        debug_assert!(self.remaining_ammo <= self.capacity);

        if rng.random_bool(self.effective_accuracy(bonus)) {
            FireOutcome::OnTarget
        } else {
            FireOutcome::OffTarget
        }
    }

    /// Base accuracy plus bonus, kept inside [0, 1]
    pub fn effective_accuracy(&self, bonus: f64) -> f64 {
        (self.accuracy + bonus.max(0.0)).clamp(0.0, 1.0)
    }

    /// Refill the cylinder. Cooldown is untouched.
    pub fn reload(&mut self) {
        self.remaining_ammo = self.capacity;
    }

    /// Damage dealt by a resolved hit
    pub fn damage_for(&self, hit: HitKind) -> u32 {
        match hit {
            HitKind::Head => self.damage,
            HitKind::Body => self.body_damage,
            HitKind::Miss => 0,
        }
    }
}
