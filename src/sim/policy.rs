//! Scripted opponent policy
//!
//! Difficulty (1..=10) scales how fast the opponent draws and how well it
//! shoots. Everything is rolled fresh each round; nothing carries over from
//! earlier rounds.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::region::Region;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Aim-point attempts before falling back to firing away from the target
const MISS_AIM_ATTEMPTS: u32 = 32;
/// Distance behind the muzzle used by the fallback miss aim
const MISS_FALLBACK_DISTANCE: f32 = 100.0;

/// Jitter (±x, ±y) around the region centre for deliberate aims
const HEAD_AIM_JITTER: (i32, i32) = (20, 10);
const BODY_AIM_JITTER: (i32, i32) = (30, 20);

/// Clamp any requested difficulty into the supported range
pub fn sanitize_difficulty(requested: i64) -> u8 {
    requested.clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64) as u8
}

/// Reaction window `(fastest, slowest)` in seconds for a difficulty
pub fn reaction_bounds(difficulty: u8) -> (f64, f64) {
    let d = difficulty as f64;
    let base = (1.0 - 0.08 * d).max(0.1);
    let spread = (0.3 - 0.02 * d).max(0.05);
    (base, base + spread)
}

/// Accuracy added to the opponent's weapon at fire time
pub fn accuracy_bonus(difficulty: u8) -> f64 {
    (0.02 * difficulty as f64).min(0.2)
}

/// Relative weights for `(head, body, miss)`; not normalised
pub fn target_weights(difficulty: u8) -> (f64, f64, f64) {
    let d = difficulty as f64;
    (0.3 + 0.02 * d, 0.5, (0.2 - 0.02 * d).max(0.0))
}

/// Where the opponent decides to put an on-target shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimChoice {
    Head,
    Body,
    Miss,
}

/// Per-round opponent decisions derived from difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentPolicy {
    pub difficulty: u8,
    /// Delay after the draw signal before the opponent fires (2 decimals)
    pub reaction_secs: f64,
    pub accuracy_bonus: f64,
}

impl OpponentPolicy {
    /// Roll a policy for `difficulty` (clamped into range)
    pub fn roll<R: Rng>(difficulty: i64, rng: &mut R) -> Self {
        let difficulty = sanitize_difficulty(difficulty);
        Self {
            difficulty,
            reaction_secs: roll_reaction_secs(difficulty, rng),
            accuracy_bonus: accuracy_bonus(difficulty),
        }
    }

    /// Recompute the round values from difficulty alone
    pub fn reroll<R: Rng>(&mut self, rng: &mut R) {
        *self = Self::roll(self.difficulty as i64, rng);
    }

    /// Reaction delay in whole milliseconds
    pub fn reaction_ms(&self) -> u64 {
        (self.reaction_secs * 1000.0).round() as u64
    }

    /// Weighted pick of head / body / miss
    pub fn choose_target<R: Rng>(&self, rng: &mut R) -> AimChoice {
        let (head, body, miss) = target_weights(self.difficulty);
        let roll = rng.random::<f64>() * (head + body + miss);
        if roll < head {
            AimChoice::Head
        } else if roll < head + body || miss <= 0.0 {
            AimChoice::Body
        } else {
            AimChoice::Miss
        }
    }

    /// End point for a shot from `muzzle` at a target's regions
    pub fn aim_point<R: Rng>(
        &self,
        choice: AimChoice,
        muzzle: Vec2,
        head: &Region,
        body: &Region,
        rng: &mut R,
    ) -> Vec2 {
        match choice {
            AimChoice::Head => jittered(head.center(), HEAD_AIM_JITTER, rng),
            AimChoice::Body => jittered(body.center(), BODY_AIM_JITTER, rng),
            AimChoice::Miss => clear_aim_point(muzzle, head, body, rng),
        }
    }
}

fn roll_reaction_secs<R: Rng>(difficulty: u8, rng: &mut R) -> f64 {
    let (fastest, slowest) = reaction_bounds(difficulty);
    crate::round_to(rng.random_range(fastest..=slowest), 2)
}

fn jittered<R: Rng>(center: Vec2, (jx, jy): (i32, i32), rng: &mut R) -> Vec2 {
    center
        + Vec2::new(
            rng.random_range(-jx..=jx) as f32,
            rng.random_range(-jy..=jy) as f32,
        )
}

/// A random arena point whose straight path from `muzzle` touches neither region
fn clear_aim_point<R: Rng>(muzzle: Vec2, head: &Region, body: &Region, rng: &mut R) -> Vec2 {
    let hull = head.union(body);
    for _ in 0..MISS_AIM_ATTEMPTS {
        let p = Vec2::new(
            rng.random_range(0.0..ARENA_WIDTH),
            rng.random_range(0.0..ARENA_HEIGHT),
        );
        if !hull.intersects_segment(muzzle, p) {
            return p;
        }
    }
    let away = (muzzle - hull.center()).normalize_or_zero();
    let away = if away == Vec2::ZERO { Vec2::NEG_Y } else { away };
    muzzle + away * MISS_FALLBACK_DISTANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_regions() -> (Region, Region) {
        (
            Region::from_xywh(100.0, 300.0, 50.0, 30.0),
            Region::from_xywh(100.0, 330.0, 50.0, 70.0),
        )
    }

    #[test]
    fn test_difficulty_is_clamped() {
        assert_eq!(sanitize_difficulty(-4), 1);
        assert_eq!(sanitize_difficulty(0), 1);
        assert_eq!(sanitize_difficulty(7), 7);
        assert_eq!(sanitize_difficulty(42), 10);

        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(OpponentPolicy::roll(99, &mut rng).difficulty, 10);
    }

    #[test]
    fn test_reaction_bounds_reference_values() {
        let (lo, hi) = reaction_bounds(5);
        assert!((lo - 0.6).abs() < 1e-9);
        assert!((hi - 0.8).abs() < 1e-9);

        let (lo, hi) = reaction_bounds(10);
        assert!((lo - 0.2).abs() < 1e-9);
        assert!((hi - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_bonus_caps() {
        assert!((accuracy_bonus(1) - 0.02).abs() < 1e-9);
        assert!((accuracy_bonus(5) - 0.1).abs() < 1e-9);
        assert!((accuracy_bonus(10) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_max_difficulty_never_misses_on_purpose() {
        let mut rng = Pcg32::seed_from_u64(11);
        let policy = OpponentPolicy::roll(10, &mut rng);
        for _ in 0..2000 {
            assert_ne!(policy.choose_target(&mut rng), AimChoice::Miss);
        }
    }

    #[test]
    fn test_target_choice_follows_weights() {
        let mut rng = Pcg32::seed_from_u64(12);
        let policy = OpponentPolicy::roll(5, &mut rng);
        // Weights 0.4 / 0.5 / 0.1
        let mut counts = [0u32; 3];
        for _ in 0..20_000 {
            match policy.choose_target(&mut rng) {
                AimChoice::Head => counts[0] += 1,
                AimChoice::Body => counts[1] += 1,
                AimChoice::Miss => counts[2] += 1,
            }
        }
        let share = |n: u32| n as f64 / 20_000.0;
        assert!((share(counts[0]) - 0.4).abs() < 0.02);
        assert!((share(counts[1]) - 0.5).abs() < 0.02);
        assert!((share(counts[2]) - 0.1).abs() < 0.02);
    }

    #[test]
    fn test_head_aim_stays_near_head() {
        let mut rng = Pcg32::seed_from_u64(13);
        let policy = OpponentPolicy::roll(5, &mut rng);
        let (head, body) = player_regions();
        for _ in 0..500 {
            let p = policy.aim_point(AimChoice::Head, Vec2::new(645.0, 350.0), &head, &body, &mut rng);
            assert!((p.x - head.center().x).abs() <= 20.0);
            assert!((p.y - head.center().y).abs() <= 10.0);
        }
    }

    #[test]
    fn test_reroll_keeps_difficulty() {
        let mut rng = Pcg32::seed_from_u64(14);
        let mut policy = OpponentPolicy::roll(3, &mut rng);
        policy.reroll(&mut rng);
        assert_eq!(policy.difficulty, 3);
        let (lo, hi) = reaction_bounds(3);
        assert!(policy.reaction_secs >= lo - 1e-9 && policy.reaction_secs <= hi + 1e-9);
    }

    proptest! {
        #[test]
        fn prop_reaction_within_bounds(seed in any::<u64>(), difficulty in 1i64..=10) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let policy = OpponentPolicy::roll(difficulty, &mut rng);
            let (lo, hi) = reaction_bounds(difficulty as u8);
            prop_assert!(policy.reaction_secs >= lo - 1e-9);
            prop_assert!(policy.reaction_secs <= hi + 1e-9);
            // Two decimals
            let cents = policy.reaction_secs * 100.0;
            prop_assert!((cents - cents.round()).abs() < 1e-6);
        }

        #[test]
        fn prop_miss_aim_clears_regions(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let policy = OpponentPolicy::roll(4, &mut rng);
            let (head, body) = player_regions();
            let muzzle = Vec2::new(645.0, 350.0);
            let p = policy.aim_point(AimChoice::Miss, muzzle, &head, &body, &mut rng);
            prop_assert!(!head.union(&body).intersects_segment(muzzle, p));
            let path = crate::sim::collision::ShotPath::to_point(muzzle, p);
            prop_assert_eq!(
                crate::sim::collision::resolve_shot(&path, &head, &body),
                crate::sim::collision::HitKind::Miss
            );
        }
    }
}
