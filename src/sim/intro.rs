//! Intro camera pan
//!
//! Holds the camera close to the front face, then eases it out to a
//! three-quarter view of the box. Once finished it stays put for good.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{INTRO_DURATION, INTRO_END, INTRO_HOLD, INTRO_START};
use crate::lerp_vec3;

/// Where the intro is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntroPhase {
    /// Waiting at the start position
    Holding,
    /// Moving toward the end position
    Panning,
    /// Pinned at the end position (terminal)
    Done,
}

/// Quadratic ease in/out on [0, 1]
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// One-shot camera pan driven by wall-clock time since start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroPan {
    /// Seconds to wait before moving
    pub hold: f32,
    /// Seconds the pan takes
    pub duration: f32,
    pub start: Vec3,
    pub end: Vec3,
    phase: IntroPhase,
}

impl Default for IntroPan {
    fn default() -> Self {
        Self::new(INTRO_HOLD, INTRO_DURATION, INTRO_START, INTRO_END)
    }
}

impl IntroPan {
    pub fn new(hold: f32, duration: f32, start: Vec3, end: Vec3) -> Self {
        Self {
            hold: hold.max(0.0),
            duration: duration.max(0.0),
            start,
            end,
            phase: IntroPhase::Holding,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Done
    }

    /// Normalized pan progress for an elapsed time (0 while holding)
    pub fn progress(&self, elapsed: f32) -> f32 {
        if elapsed <= self.hold {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((elapsed - self.hold) / self.duration).min(1.0)
    }

    /// Camera position at `elapsed` seconds since start
    ///
    /// After the pan completes the end position is returned forever, even
    /// if a smaller elapsed time is passed later.
    pub fn sample(&mut self, elapsed: f32) -> Vec3 {
        if self.phase == IntroPhase::Done {
            return self.end;
        }

        let t = self.progress(elapsed);
        if t >= 1.0 {
            self.phase = IntroPhase::Done;
            log::info!("Intro pan finished");
            return self.end;
        }

        self.phase = if elapsed <= self.hold {
            IntroPhase::Holding
        } else {
            IntroPhase::Panning
        };
        lerp_vec3(self.start, self.end, ease_in_out_quad(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!(ease_in_out_quad(0.25) < 0.25);
        assert!(ease_in_out_quad(0.75) > 0.75);
    }

    #[test]
    fn test_starts_at_start() {
        let mut intro = IntroPan::default();
        assert_eq!(intro.sample(0.0), INTRO_START);
        assert_eq!(intro.phase(), IntroPhase::Holding);
        assert_eq!(intro.sample(INTRO_HOLD), INTRO_START);
        assert_eq!(intro.phase(), IntroPhase::Holding);
    }

    #[test]
    fn test_pans_between() {
        let mut intro = IntroPan::default();
        let mid = intro.sample(INTRO_HOLD + INTRO_DURATION / 2.0);
        assert_eq!(intro.phase(), IntroPhase::Panning);
        let halfway = (INTRO_START + INTRO_END) / 2.0;
        assert!((mid - halfway).length() < 1e-4);
    }

    #[test]
    fn test_pinned_at_end() {
        let mut intro = IntroPan::default();
        assert_eq!(intro.sample(INTRO_HOLD + INTRO_DURATION), INTRO_END);
        assert!(intro.is_done());
        // Terminal: never goes back
        assert_eq!(intro.sample(0.0), INTRO_END);
        assert_eq!(intro.sample(2.0), INTRO_END);
        assert_eq!(intro.phase(), IntroPhase::Done);
    }

    #[test]
    fn test_zero_duration_finishes_after_hold() {
        let mut intro = IntroPan::new(0.5, 0.0, Vec3::ZERO, Vec3::ONE);
        assert_eq!(intro.sample(0.25), Vec3::ZERO);
        assert_eq!(intro.sample(0.6), Vec3::ONE);
        assert!(intro.is_done());
    }
}
