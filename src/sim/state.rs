//! Simulation state and per-step outputs

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounds, Wall};
use super::collision::HitSet;
use super::feedback::{Color, WallFades};
use crate::consts::{INITIAL_CUBE_COLOR, INITIAL_VELOCITY};

/// Sound to play for a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    /// One wall struck (each wall has its own sound)
    Wall(Wall),
    /// Two walls struck at once (an edge)
    DoubleHit,
    /// All three axes struck at once
    Corner,
}

impl SoundEvent {
    /// Pick the sound for a bounce, or nothing if no wall was hit
    pub fn for_hits(hits: &HitSet) -> Option<Self> {
        match hits.len() {
            0 => None,
            1 => hits.iter().next().map(SoundEvent::Wall),
            2 => Some(SoundEvent::DoubleHit),
            _ => Some(SoundEvent::Corner),
        }
    }
}

/// Everything the host needs after one step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub position: Vec3,
    /// Velocity after any reflections
    pub velocity: Vec3,
    /// Walls struck this step
    pub hits: HitSet,
    /// Cube color after the step
    pub color: Color,
    /// Wall highlight opacity in face order
    pub intensities: [f32; 6],
    /// Wall highlight color in face order
    pub wall_colors: [Color; 6],
    pub corner_hits: u32,
    pub sound: Option<SoundEvent>,
}

impl StepOutcome {
    pub fn bounced(&self) -> bool {
        !self.hits.is_empty()
    }

    pub fn corner(&self) -> bool {
        self.hits.is_corner()
    }
}

/// The bouncing cube
///
/// Created once at startup, then advanced with [`BounceSimulator::step`].
#[derive(Debug, Clone)]
pub struct BounceSimulator {
    pub bounds: Bounds,
    pub position: Vec3,
    /// Units per reference frame; may be edited by the host between steps
    pub velocity: Vec3,
    pub color: Color,
    pub fades: WallFades,
    pub corner_hits: u32,
    /// Total walls struck since start (corner counts as three)
    pub wall_hits: u64,
    /// Steps taken since start
    pub steps: u64,
    pub(crate) rng: Pcg32,
}

impl BounceSimulator {
    pub fn new(seed: u64) -> Self {
        Self::with_bounds(Bounds::default(), INITIAL_VELOCITY, seed)
    }

    pub fn with_bounds(bounds: Bounds, velocity: Vec3, seed: u64) -> Self {
        Self {
            bounds,
            position: bounds.center,
            velocity,
            color: Color::from_hex(INITIAL_CUBE_COLOR),
            fades: WallFades::new(),
            corner_hits: 0,
            wall_hits: 0,
            steps: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Replace the velocity (live control panel edits)
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Snapshot of the current state without stepping
    pub fn outcome(&self, hits: HitSet, sound: Option<SoundEvent>) -> StepOutcome {
        StepOutcome {
            position: self.position,
            velocity: self.velocity,
            hits,
            color: self.color,
            intensities: self.fades.intensities(),
            wall_colors: self.fades.colors(),
            corner_hits: self.corner_hits,
            sound,
        }
    }
}
