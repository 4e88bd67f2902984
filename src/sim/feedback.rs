//! Transient wall highlights and cube colors
//!
//! A struck wall lights up in the cube's pre-bounce color, then fades
//! linearly to nothing over `FADE_DURATION`. This module only tracks the
//! numbers; the renderer decides what "lit" looks like.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::Wall;
use crate::consts::{FADE_DURATION, MAX_COLOR, WALL_BASE_COLOR};

/// Timers below this are treated as expired (absorbs f32 drift from summed steps)
const TIMER_EPSILON: f32 = 1e-5;

/// 24-bit RGB color (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & MAX_COLOR)
    }

    pub fn hex(self) -> u32 {
        self.0
    }

    /// Uniform over the whole 24-bit space
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..=MAX_COLOR))
    }

    /// Channels as 0-1 floats (sRGB, not linearized)
    pub fn to_rgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Per-wall highlight countdowns
#[derive(Debug, Clone, PartialEq)]
pub struct WallFades {
    timers: [f32; 6],
    colors: [Color; 6],
}

impl Default for WallFades {
    fn default() -> Self {
        Self {
            timers: [0.0; 6],
            colors: [Color::from_hex(WALL_BASE_COLOR); 6],
        }
    }
}

impl WallFades {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light a wall at full intensity with the given color
    pub fn trigger(&mut self, wall: Wall, color: Color) {
        let i = wall.index();
        self.timers[i] = FADE_DURATION;
        self.colors[i] = color;
    }

    /// Count every timer down; expired walls snap back to the base color
    pub fn decay(&mut self, dt: f32) {
        for (timer, color) in self.timers.iter_mut().zip(self.colors.iter_mut()) {
            if *timer > 0.0 {
                *timer -= dt;
                if *timer <= TIMER_EPSILON {
                    *timer = 0.0;
                    *color = Color::from_hex(WALL_BASE_COLOR);
                }
            }
        }
    }

    pub fn timer(&self, wall: Wall) -> f32 {
        self.timers[wall.index()]
    }

    pub fn color(&self, wall: Wall) -> Color {
        self.colors[wall.index()]
    }

    /// Highlight opacity, 1 right after a hit and 0 once faded
    pub fn intensity(&self, wall: Wall) -> f32 {
        (self.timer(wall) / FADE_DURATION).clamp(0.0, 1.0)
    }

    /// Intensities in face order
    pub fn intensities(&self) -> [f32; 6] {
        Wall::ALL.map(|w| self.intensity(w))
    }

    /// Highlight colors in face order
    pub fn colors(&self) -> [Color; 6] {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_color_channels() {
        let c = Color::from_hex(0xff8000);
        let [r, g, b] = c.to_rgb();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn test_color_masks_high_bits() {
        assert_eq!(Color::from_hex(0x12ab_cdef).hex(), 0xab_cdef);
    }

    #[test]
    fn test_random_color_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(Color::random(&mut rng).hex() <= MAX_COLOR);
        }
    }

    #[test]
    fn test_trigger_full_intensity() {
        let mut fades = WallFades::new();
        fades.trigger(Wall::Top, Color::from_hex(0x0000ff));
        assert_eq!(fades.timer(Wall::Top), FADE_DURATION);
        assert_eq!(fades.intensity(Wall::Top), 1.0);
        assert_eq!(fades.color(Wall::Top).hex(), 0x0000ff);
        assert_eq!(fades.intensity(Wall::Bottom), 0.0);
    }

    #[test]
    fn test_linear_fade() {
        let mut fades = WallFades::new();
        fades.trigger(Wall::Left, Color::from_hex(0x123456));
        fades.decay(FADE_DURATION / 4.0);
        assert!((fades.intensity(Wall::Left) - 0.75).abs() < 1e-5);
        fades.decay(FADE_DURATION / 4.0);
        assert!((fades.intensity(Wall::Left) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_expired_wall_snaps_off() {
        let mut fades = WallFades::new();
        fades.trigger(Wall::Back, Color::from_hex(0xabcdef));
        fades.decay(FADE_DURATION + 0.1);
        assert_eq!(fades.timer(Wall::Back), 0.0);
        assert_eq!(fades.intensity(Wall::Back), 0.0);
        assert_eq!(fades.color(Wall::Back).hex(), WALL_BASE_COLOR);
    }

    #[test]
    fn test_fixed_steps_expire_exactly_at_duration() {
        let dt = crate::consts::SIM_DT;
        let mut fades = WallFades::new();
        fades.trigger(Wall::Right, Color::from_hex(0x00ff00));
        let steps = (FADE_DURATION / dt).round() as usize;
        for _ in 0..steps - 1 {
            fades.decay(dt);
        }
        assert!(fades.intensity(Wall::Right) > 0.0);
        fades.decay(dt);
        assert_eq!(fades.intensity(Wall::Right), 0.0);
        assert_eq!(fades.color(Wall::Right).hex(), WALL_BASE_COLOR);
    }

    #[test]
    fn test_retrigger_resets_timer() {
        let mut fades = WallFades::new();
        fades.trigger(Wall::Front, Color::from_hex(0x111111));
        fades.decay(0.4);
        fades.trigger(Wall::Front, Color::from_hex(0x222222));
        assert_eq!(fades.intensity(Wall::Front), 1.0);
        assert_eq!(fades.color(Wall::Front).hex(), 0x222222);
    }
}
