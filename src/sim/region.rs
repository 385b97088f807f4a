//! Axis-aligned hit regions
//!
//! Regions live in screen space (x right, y down). Containment is half-open
//! like a screen rect: the left/top edges are inside, the right/bottom edges
//! are not.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Build from top-left corner and size
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Smallest region covering both
    pub fn union(&self, other: &Region) -> Region {
        Region {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Region moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Region {
        Region {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Point-in-rectangle test (half-open)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Exact segment-vs-box test (slab method, closed box).
    ///
    /// Only used to pick aim points that must stay clear of a target; shot
    /// resolution itself samples the path instead.
    pub fn intersects_segment(&self, a: Vec2, b: Vec2) -> bool {
        let d = b - a;
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for axis in 0..2 {
            let (origin, dir, lo, hi) = (a[axis], d[axis], self.min[axis], self.max[axis]);
            if dir.abs() < f32::EPSILON {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_half_open() {
        let region = Region::from_xywh(100.0, 300.0, 50.0, 30.0);
        assert!(region.contains_point(Vec2::new(100.0, 300.0)));
        assert!(region.contains_point(Vec2::new(149.9, 329.9)));
        assert!(!region.contains_point(Vec2::new(150.0, 310.0)));
        assert!(!region.contains_point(Vec2::new(120.0, 330.0)));
    }

    #[test]
    fn test_new_orders_corners() {
        let region = Region::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 0.0));
        assert_eq!(region.min, Vec2::ZERO);
        assert_eq!(region.max, Vec2::new(10.0, 10.0));
        assert_eq!(region.center(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_segment_crossing_box() {
        let region = Region::from_xywh(100.0, 300.0, 50.0, 100.0);
        assert!(region.intersects_segment(Vec2::new(650.0, 350.0), Vec2::new(0.0, 350.0)));
        assert!(region.intersects_segment(Vec2::new(125.0, 350.0), Vec2::new(125.0, 360.0)));
    }

    #[test]
    fn test_segment_missing_box() {
        let region = Region::from_xywh(100.0, 300.0, 50.0, 100.0);
        // Passes above
        assert!(!region.intersects_segment(Vec2::new(650.0, 200.0), Vec2::new(0.0, 250.0)));
        // Stops short
        assert!(!region.intersects_segment(Vec2::new(650.0, 350.0), Vec2::new(200.0, 350.0)));
    }

    #[test]
    fn test_union_covers_both() {
        let head = Region::from_xywh(100.0, 300.0, 50.0, 30.0);
        let body = Region::from_xywh(100.0, 330.0, 50.0, 70.0);
        let hull = head.union(&body);
        assert_eq!(hull, Region::from_xywh(100.0, 300.0, 50.0, 100.0));
    }
}
