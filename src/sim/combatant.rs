//! Duel participants
//!
//! Player and opponent share one type. What differs is where the decision to
//! fire comes from, held as a `Controller` value, and which way they face.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::policy::OpponentPolicy;
use super::region::Region;
use super::weapon::Weapon;
use crate::consts::{MAX_HEALTH, MUZZLE_OFFSET};
use crate::settings::WeaponSpec;

/// Which side of the duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Player,
    Opponent,
}

impl Actor {
    pub fn foe(self) -> Actor {
        match self {
            Actor::Player => Actor::Opponent,
            Actor::Opponent => Actor::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Actor::Player => "player",
            Actor::Opponent => "opponent",
        }
    }
}

/// Horizontal facing (cosmetic, also places the muzzle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Source of fire decisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// Fires on an explicit command
    Human,
    /// Fires when its scheduled shot instant arrives
    Scripted(OpponentPolicy),
}

impl Controller {
    /// Did this combatant decide to fire on this tick?
    ///
    /// `commanded` is the human fire command for the tick, `shot_at_ms` the
    /// scripted shot instant scheduled for the round.
    pub fn fires_now(&self, commanded: bool, shot_at_ms: Option<u64>, now_ms: u64) -> bool {
        match self {
            Controller::Human => commanded,
            Controller::Scripted(_) => shot_at_ms.is_some_and(|at| now_ms >= at),
        }
    }

    pub fn policy(&self) -> Option<&OpponentPolicy> {
        match self {
            Controller::Human => None,
            Controller::Scripted(policy) => Some(policy),
        }
    }
}

/// One duelist with its own weapon and hit regions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub actor: Actor,
    pub controller: Controller,
    pub facing: Facing,
    health: u32,
    pub max_health: u32,
    pub weapon: Weapon,
    /// Standing position (top-left of the silhouette)
    pub position: Vec2,
    pub head: Region,
    pub body: Region,
}

impl Combatant {
    /// Silhouette layout relative to `position`: 50x30 head over a 50x70 body
    fn regions_at(position: Vec2) -> (Region, Region) {
        (
            Region::from_xywh(position.x, position.y, 50.0, 30.0),
            Region::from_xywh(position.x, position.y + 30.0, 50.0, 70.0),
        )
    }

    fn new(actor: Actor, controller: Controller, facing: Facing, position: Vec2, weapon: &WeaponSpec) -> Self {
        let (head, body) = Self::regions_at(position);
        Self {
            actor,
            controller,
            facing,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            weapon: Weapon::new(weapon),
            position,
            head,
            body,
        }
    }

    /// Human duelist on the left, facing right
    pub fn player(weapon: &WeaponSpec) -> Self {
        Self::new(
            Actor::Player,
            Controller::Human,
            Facing::Right,
            Vec2::new(100.0, 300.0),
            weapon,
        )
    }

    /// Scripted duelist on the right, facing left
    pub fn opponent<R: Rng>(weapon: &WeaponSpec, difficulty: i64, rng: &mut R) -> Self {
        Self::new(
            Actor::Opponent,
            Controller::Scripted(OpponentPolicy::roll(difficulty, rng)),
            Facing::Left,
            Vec2::new(650.0, 300.0),
            weapon,
        )
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Subtract damage, saturating at zero. Returns the damage actually applied.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.health);
        self.health -= applied;
        debug_assert!(self.health <= self.max_health);
        applied
    }

    /// Centre of the whole silhouette
    pub fn center(&self) -> Vec2 {
        self.head.union(&self.body).center()
    }

    /// Where shots leave the barrel
    pub fn muzzle(&self) -> Vec2 {
        self.center() + Vec2::new(self.facing.sign() * MUZZLE_OFFSET, 0.0)
    }

    pub fn policy(&self) -> Option<&OpponentPolicy> {
        self.controller.policy()
    }

    /// Accuracy bonus granted by the controller
    pub fn accuracy_bonus(&self) -> f64 {
        self.policy().map_or(0.0, |p| p.accuracy_bonus)
    }

    /// Prepare for a new round: reload and re-roll any scripted policy
    pub fn reset_for_round<R: Rng>(&mut self, rng: &mut R) {
        if let Controller::Scripted(policy) = &mut self.controller {
            policy.reroll(rng);
        }
        self.weapon.reload();
    }

    /// Full restore for a new match
    pub fn restore(&mut self) {
        self.health = self.max_health;
        self.weapon.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_health_saturates_at_zero() {
        let mut player = Combatant::player(&WeaponSpec::default());
        assert_eq!(player.take_damage(50), 50);
        assert_eq!(player.take_damage(70), 50);
        assert_eq!(player.health(), 0);
        assert!(player.is_defeated());

        player.restore();
        assert_eq!(player.health(), player.max_health);
    }

    #[test]
    fn test_muzzles_face_each_other() {
        let mut rng = Pcg32::seed_from_u64(1);
        let player = Combatant::player(&WeaponSpec::default());
        let opponent = Combatant::opponent(&WeaponSpec::opponent(), 5, &mut rng);
        assert_eq!(player.muzzle(), Vec2::new(155.0, 350.0));
        assert_eq!(opponent.muzzle(), Vec2::new(645.0, 350.0));
    }

    #[test]
    fn test_controller_decisions() {
        let mut rng = Pcg32::seed_from_u64(2);
        let player = Combatant::player(&WeaponSpec::default());
        let opponent = Combatant::opponent(&WeaponSpec::opponent(), 5, &mut rng);

        assert!(player.controller.fires_now(true, Some(0), 10));
        assert!(!player.controller.fires_now(false, Some(0), 10));

        assert!(!opponent.controller.fires_now(true, Some(100), 99));
        assert!(opponent.controller.fires_now(false, Some(100), 100));
        assert!(!opponent.controller.fires_now(false, None, 100));
    }

    #[test]
    fn test_round_reset_reloads_and_rerolls() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut opponent = Combatant::opponent(&WeaponSpec::opponent(), 8, &mut rng);
        opponent.weapon.fire(0, 0.0, &mut rng);
        opponent.reset_for_round(&mut rng);
        assert_eq!(opponent.weapon.remaining_ammo(), opponent.weapon.capacity);
        assert_eq!(opponent.policy().map(|p| p.difficulty), Some(8));
        assert!((opponent.accuracy_bonus() - 0.16).abs() < 1e-9);
    }
}
