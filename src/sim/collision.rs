//! Shot resolution against a combatant's hit regions
//!
//! A shot is a straight segment from the muzzle to an end point. Rather than
//! exact line/box intersection, the segment is sampled at a fixed number of
//! evenly spaced points and each point is tested against the head, then the
//! body. A region thinner than the sample spacing can be stepped over; that
//! approximation is part of the game's feel and is kept as-is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::region::Region;
use crate::consts::{SHOT_RANGE, SHOT_SAMPLE_STEPS};

/// Where a shot landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Head,
    Body,
    Miss,
}

impl HitKind {
    pub fn is_hit(self) -> bool {
        self != HitKind::Miss
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HitKind::Head => "head",
            HitKind::Body => "body",
            HitKind::Miss => "miss",
        }
    }
}

/// A straight shot path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPath {
    pub from: Vec2,
    pub to: Vec2,
}

impl ShotPath {
    /// Path ending exactly at `target`
    pub fn to_point(from: Vec2, target: Vec2) -> Self {
        Self { from, to: target }
    }

    /// Path through `toward`, extended to the full shot range.
    /// A zero-length aim degenerates to a path that never leaves the muzzle.
    pub fn extended(from: Vec2, toward: Vec2) -> Self {
        let dir = (toward - from).normalize_or_zero();
        Self {
            from,
            to: from + dir * SHOT_RANGE,
        }
    }

    /// Sample point `i` of `steps` (i = 1..=steps; step `steps` is the end point)
    #[inline]
    pub fn sample(&self, i: u32, steps: u32) -> Vec2 {
        self.from.lerp(self.to, i as f32 / steps as f32)
    }
}

/// Resolve a shot against head and body regions with the default sample count
pub fn resolve_shot(path: &ShotPath, head: &Region, body: &Region) -> HitKind {
    resolve_shot_stepped(path, head, body, SHOT_SAMPLE_STEPS)
}

/// Resolve a shot by sampling `steps` points in increasing distance order.
///
/// Each sample is tested against the head first, then the body; the first
/// region touched wins. No sample inside either region is a miss.
pub fn resolve_shot_stepped(path: &ShotPath, head: &Region, body: &Region, steps: u32) -> HitKind {
    let steps = steps.max(1);
    for i in 1..=steps {
        let p = path.sample(i, steps);
        if head.contains_point(p) {
            return HitKind::Head;
        }
        if body.contains_point(p) {
            return HitKind::Body;
        }
    }
    HitKind::Miss
}
