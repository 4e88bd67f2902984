//! Per-step simulation update
//!
//! Order within a step:
//! 1. Fade timers count down
//! 2. The cube moves
//! 3. Walls it reached reflect the velocity and clamp the position
//! 4. A bounce lights the struck walls and recolors the cube

use super::collision::resolve_walls;
use super::feedback::Color;
use super::state::{BounceSimulator, SoundEvent, StepOutcome};
use crate::consts::REFERENCE_FPS;

impl BounceSimulator {
    /// Advance the cube by `dt` seconds
    ///
    /// The reported position is always inside the box, whatever `dt` and
    /// velocity are: a cube that would pass a wall is stopped on it and
    /// bounced in the same step.
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.steps += 1;

        self.fades.decay(dt);

        self.position += self.velocity * dt * REFERENCE_FPS;
        let hits = resolve_walls(&mut self.position, &mut self.velocity, &self.bounds);

        if !hits.is_empty() {
            let previous = self.color;
            for wall in hits.iter() {
                self.fades.trigger(wall, previous);
            }
            self.color = Color::random(&mut self.rng);
            self.wall_hits += hits.len() as u64;

            if hits.is_corner() {
                self.corner_hits += 1;
                log::info!("Corner hit #{} at {:?}", self.corner_hits, self.position);
            } else {
                log::debug!(
                    "Bounce off {:?}, new color {}",
                    hits.iter().map(|w| w.as_str()).collect::<Vec<_>>(),
                    self.color
                );
            }
        }

        self.outcome(hits, SoundEvent::for_hits(&hits))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;

    use super::*;
    use crate::consts::{FADE_DURATION, SIM_DT};
    use crate::sim::bounds::{Bounds, Wall};

    fn logo_sim(position: Vec3, velocity: Vec3) -> BounceSimulator {
        let bounds = Bounds::new(Vec3::new(15.0, 10.0, 15.0), Vec3::new(0.13, 0.5, 0.13));
        let mut sim = BounceSimulator::with_bounds(bounds, velocity, 1234);
        sim.position = position;
        sim
    }

    #[test]
    fn test_step_moves_cube() {
        let mut sim = logo_sim(Vec3::ZERO, Vec3::new(0.03, 0.03, 0.03));
        let outcome = sim.step(1.0 / REFERENCE_FPS);
        assert!(!outcome.bounced());
        assert!((outcome.position - Vec3::splat(0.03)).length() < 1e-6);
        assert_eq!(outcome.sound, None);
        assert_eq!(outcome.color.hex(), crate::consts::INITIAL_CUBE_COLOR);
    }

    #[test]
    fn test_x_wall_example() {
        let mut sim = logo_sim(Vec3::new(14.9, 0.0, 0.0), Vec3::new(0.04, 0.03, 0.05));
        let limit = sim.bounds.limit();
        let old_color = sim.color;

        let outcome = sim.step(SIM_DT);

        assert_eq!(outcome.hits.len(), 1);
        assert!(outcome.hits.contains(Wall::Right));
        assert_eq!(outcome.velocity.x, -0.04);
        assert_eq!(outcome.position.x, limit.x);
        assert_eq!(outcome.corner_hits, 0);
        assert_eq!(outcome.sound, Some(SoundEvent::Wall(Wall::Right)));
        assert_eq!(outcome.intensities[Wall::Right.index()], 1.0);
        assert_eq!(outcome.wall_colors[Wall::Right.index()], old_color);
        // Untouched axes keep moving
        assert!(outcome.position.y > 0.0);
        assert!(outcome.position.z > 0.0);
    }

    #[test]
    fn test_corner_example() {
        let bounds = Bounds::new(Vec3::new(15.0, 10.0, 15.0), Vec3::new(0.13, 0.5, 0.13));
        let mut sim = logo_sim(bounds.limit(), Vec3::splat(0.03));

        let outcome = sim.step(SIM_DT);

        assert!(outcome.corner());
        assert_eq!(outcome.corner_hits, 1);
        assert_eq!(outcome.sound, Some(SoundEvent::Corner));
        for wall in [Wall::Right, Wall::Top, Wall::Front] {
            assert_eq!(sim.fades.timer(wall), FADE_DURATION);
        }
        assert_eq!(outcome.position, bounds.limit());
    }

    #[test]
    fn test_double_hit_does_not_count_corner() {
        let mut sim = logo_sim(Vec3::new(-15.0, 10.0, 0.0), Vec3::new(-0.1, 0.1, 0.1));
        let outcome = sim.step(SIM_DT);
        assert_eq!(outcome.hits.len(), 2);
        assert_eq!(outcome.sound, Some(SoundEvent::DoubleHit));
        assert_eq!(outcome.corner_hits, 0);
    }

    #[test]
    fn test_bounce_changes_color_deterministically() {
        let mut a = logo_sim(Vec3::new(20.0, 0.0, 0.0), Vec3::X);
        let mut b = logo_sim(Vec3::new(20.0, 0.0, 0.0), Vec3::X);
        let ca = a.step(SIM_DT).color;
        let cb = b.step(SIM_DT).color;
        assert_eq!(ca, cb);
    }

    #[test]
    fn test_fade_reaches_zero() {
        let mut sim = logo_sim(Vec3::new(0.0, -9.5, 0.0), Vec3::new(0.0, -0.01, 0.0));
        sim.step(SIM_DT);
        assert_eq!(sim.fades.intensity(Wall::Bottom), 1.0);

        let mut elapsed = 0.0;
        while elapsed < FADE_DURATION + SIM_DT {
            sim.step(SIM_DT);
            elapsed += SIM_DT;
        }
        assert_eq!(sim.fades.intensity(Wall::Bottom), 0.0);
    }

    #[test]
    fn test_huge_dt_stays_in_box() {
        let mut sim = logo_sim(Vec3::ZERO, Vec3::new(2.0, -2.0, 2.0));
        let limit = sim.bounds.limit();

        let first = sim.step(10.0);
        assert!(first.corner());
        assert_eq!(first.position, Vec3::new(limit.x, -limit.y, limit.z));
        assert_eq!(first.velocity, Vec3::new(-2.0, 2.0, -2.0));

        // No tunneling: the next huge step lands on the opposite corner
        let second = sim.step(10.0);
        assert!(second.corner());
        assert_eq!(second.position, Vec3::new(-limit.x, limit.y, -limit.z));
        assert_eq!(sim.corner_hits, 2);
    }

    #[test]
    fn test_no_double_bounce_after_hit() {
        let mut sim = logo_sim(Vec3::new(14.9, 0.0, 0.0), Vec3::new(0.04, 0.0, 0.0));
        assert!(sim.step(SIM_DT).bounced());
        for _ in 0..10 {
            assert!(!sim.step(SIM_DT).bounced());
        }
        assert!(sim.velocity.x < 0.0);
    }

    #[test]
    fn test_zero_dt_after_bounce_does_not_rebounce() {
        let mut sim = logo_sim(Vec3::new(14.9, 0.0, 0.0), Vec3::new(0.04, 0.0, 0.0));
        assert!(sim.step(SIM_DT).bounced());
        let color = sim.color;

        let still = sim.step(0.0);
        assert!(!still.bounced());
        assert_eq!(still.sound, None);
        assert_eq!(still.velocity.x, -0.04);
        assert_eq!(still.color, color);

        assert!(!sim.step(SIM_DT).bounced());
        assert_eq!(sim.wall_hits, 1);
    }

    #[test]
    fn test_resting_on_wall_is_not_a_hit() {
        let mut sim = logo_sim(Vec3::new(14.9, 0.0, 0.0), Vec3::new(0.04, 0.0, 0.0));
        sim.step(SIM_DT);
        // Slider dragged to zero while touching the wall
        sim.set_velocity(Vec3::ZERO);
        for _ in 0..10 {
            let outcome = sim.step(SIM_DT);
            assert!(!outcome.bounced());
            assert_eq!(outcome.sound, None);
        }
    }

    #[test]
    fn test_velocity_edit_between_steps() {
        let mut sim = logo_sim(Vec3::ZERO, Vec3::new(0.03, 0.0, 0.0));
        sim.step(SIM_DT);
        sim.set_velocity(Vec3::new(0.0, 0.5, 0.0));
        let before = sim.position;
        let outcome = sim.step(1.0 / REFERENCE_FPS);
        assert_eq!(outcome.position.x, before.x);
        assert!((outcome.position.y - before.y - 0.5).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_step_keeps_cube_inside(
            vx in -2.0f32..2.0, vy in -2.0f32..2.0, vz in -2.0f32..2.0,
            dts in proptest::collection::vec(0.0f32..0.5, 1..200),
        ) {
            let mut sim = logo_sim(Vec3::ZERO, Vec3::new(vx, vy, vz));
            let limit = sim.bounds.limit();
            for dt in dts {
                let outcome = sim.step(dt);
                prop_assert!(outcome.position.abs().cmple(limit).all());
                prop_assert!(outcome.hits.len() <= 3);
            }
        }

        #[test]
        fn prop_corner_counter_counts_triple_hits(
            vx in -2.0f32..2.0, vy in -2.0f32..2.0, vz in -2.0f32..2.0,
            steps in 1usize..400,
        ) {
            let mut sim = logo_sim(Vec3::ZERO, Vec3::new(vx, vy, vz));
            let mut expected = 0;
            for _ in 0..steps {
                let before = sim.corner_hits;
                let outcome = sim.step(SIM_DT * 4.0);
                if outcome.hits.len() == 3 {
                    expected += 1;
                    prop_assert_eq!(outcome.corner_hits, before + 1);
                } else {
                    prop_assert_eq!(outcome.corner_hits, before);
                }
            }
            prop_assert_eq!(sim.corner_hits, expected);
        }

        #[test]
        fn prop_fade_never_rises_between_hits(
            vx in -2.0f32..2.0, vy in -2.0f32..2.0, vz in -2.0f32..2.0,
            steps in 1usize..300,
        ) {
            let mut sim = logo_sim(Vec3::ZERO, Vec3::new(vx, vy, vz));
            let mut last = sim.fades.intensities();
            for _ in 0..steps {
                let outcome = sim.step(SIM_DT);
                for wall in Wall::ALL {
                    let i = wall.index();
                    if !outcome.hits.contains(wall) {
                        prop_assert!(outcome.intensities[i] <= last[i]);
                    } else {
                        prop_assert_eq!(outcome.intensities[i], 1.0);
                    }
                }
                last = outcome.intensities;
            }
        }
    }
}
