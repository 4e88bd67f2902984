//! Box geometry: axes, walls and the inner/outer bounding volume

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{INNER_HALF_EXTENTS, OUTER_HALF_EXTENTS};

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a Vec3
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One face of the outer box
///
/// The discriminant order matches the face order of a box mesh:
/// +x, -x, +y, -y, +z, -z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl Wall {
    pub const ALL: [Wall; 6] = [
        Wall::Right,
        Wall::Left,
        Wall::Top,
        Wall::Bottom,
        Wall::Front,
        Wall::Back,
    ];

    /// Wall on the given side of an axis
    pub fn from_axis(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Wall::Right,
            (Axis::X, false) => Wall::Left,
            (Axis::Y, true) => Wall::Top,
            (Axis::Y, false) => Wall::Bottom,
            (Axis::Z, true) => Wall::Front,
            (Axis::Z, false) => Wall::Back,
        }
    }

    /// Stable index 0..6 (face order)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn axis(self) -> Axis {
        match self {
            Wall::Right | Wall::Left => Axis::X,
            Wall::Top | Wall::Bottom => Axis::Y,
            Wall::Front | Wall::Back => Axis::Z,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Wall::Right | Wall::Top | Wall::Front)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Wall::Right => "right",
            Wall::Left => "left",
            Wall::Top => "top",
            Wall::Bottom => "bottom",
            Wall::Front => "front",
            Wall::Back => "back",
        }
    }
}

/// Outer box with the moving cube's half-extents
///
/// Positions are measured relative to `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    pub outer_half: Vec3,
    pub inner_half: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(OUTER_HALF_EXTENTS, INNER_HALF_EXTENTS)
    }
}

impl Bounds {
    pub fn new(outer_half: Vec3, inner_half: Vec3) -> Self {
        debug_assert!(
            outer_half.cmpge(inner_half).all(),
            "inner cube must fit inside the outer box"
        );
        Self {
            center: Vec3::ZERO,
            outer_half,
            inner_half,
        }
    }

    /// Distance the cube center may travel from `center` along each axis
    /// before its face touches a wall. Never negative.
    #[inline]
    pub fn limit(&self) -> Vec3 {
        (self.outer_half - self.inner_half).max(Vec3::ZERO)
    }

    /// Whether a world position keeps the cube fully inside the box
    pub fn contains(&self, position: Vec3) -> bool {
        (position - self.center).abs().cmple(self.limit()).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_axis_round_trip() {
        for wall in Wall::ALL {
            assert_eq!(Wall::from_axis(wall.axis(), wall.is_positive()), wall);
        }
    }

    #[test]
    fn test_wall_indices_follow_face_order() {
        let indices: Vec<usize> = Wall::ALL.iter().map(|w| w.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(Wall::from_axis(Axis::Y, false), Wall::Bottom);
    }

    #[test]
    fn test_default_limit() {
        let bounds = Bounds::default();
        let limit = bounds.limit();
        assert!((limit.y - 9.5).abs() < 1e-6);
        assert!((limit.x - (15.0 - crate::consts::LOGO_ASPECT / 2.0)).abs() < 1e-5);
        assert_eq!(limit.x, limit.z);
    }

    #[test]
    fn test_limit_never_negative() {
        // Degenerate box built without the debug check
        let bounds = Bounds {
            center: Vec3::ZERO,
            outer_half: Vec3::new(1.0, 1.0, 1.0),
            inner_half: Vec3::new(2.0, 0.5, 1.0),
        };
        assert_eq!(bounds.limit(), Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_contains_respects_center() {
        let mut bounds = Bounds::new(Vec3::splat(5.0), Vec3::splat(1.0));
        bounds.center = Vec3::new(10.0, 0.0, 0.0);
        assert!(bounds.contains(Vec3::new(14.0, -4.0, 0.0)));
        assert!(!bounds.contains(Vec3::ZERO));
    }
}
