//! Wall collision detection and response for the bouncing cube
//!
//! Every axis is tested on its own, so a single step can strike one, two or
//! three walls. Three at once is a corner hit.

use glam::Vec3;

use super::bounds::{Axis, Bounds, Wall};
use crate::sign_or_positive;

/// Set of walls struck during one step
///
/// Each axis contributes at most one wall, so the set never holds more than
/// three entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitSet {
    bits: u8,
}

impl HitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, wall: Wall) {
        self.bits |= 1 << wall.index();
    }

    pub fn contains(&self, wall: Wall) -> bool {
        self.bits & (1 << wall.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// All three axes struck in the same step
    pub fn is_corner(&self) -> bool {
        self.len() == 3
    }

    /// Walls in face order
    pub fn iter(&self) -> impl Iterator<Item = Wall> + '_ {
        Wall::ALL.into_iter().filter(|w| self.contains(*w))
    }

    /// Whether the given axis was struck (on either side)
    pub fn hit_axis(&self, axis: Axis) -> bool {
        self.contains(Wall::from_axis(axis, true)) || self.contains(Wall::from_axis(axis, false))
    }
}

impl FromIterator<Wall> for HitSet {
    fn from_iter<I: IntoIterator<Item = Wall>>(iter: I) -> Self {
        let mut set = HitSet::new();
        for wall in iter {
            set.insert(wall);
        }
        set
    }
}

/// Detect wall contact, reflect and clamp
///
/// For each axis where the cube has passed its limit, or sits on it while
/// still moving outward, the velocity component is negated and the position
/// is snapped back onto the limit so the cube never sinks into the wall. A
/// cube on the limit that is moving inward (or not at all) along that axis
/// was already bounced and is left alone.
pub fn resolve_walls(position: &mut Vec3, velocity: &mut Vec3, bounds: &Bounds) -> HitSet {
    let limit = bounds.limit();
    let mut local = *position - bounds.center;
    let mut hits = HitSet::new();

    for axis in Axis::ALL {
        let i = axis.index();
        let side = sign_or_positive(local[i]);
        let reached = local[i].abs() > limit[i]
            || (local[i].abs() == limit[i] && velocity[i] * side > 0.0);
        if reached {
            velocity[i] = -velocity[i];
            local[i] = side * limit[i];
            hits.insert(Wall::from_axis(axis, side > 0.0));
        }
    }

    *position = bounds.center + local;
    hits
}
