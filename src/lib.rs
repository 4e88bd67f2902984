//! Logo Bounce - a bouncing logo cube inside a translucent box
//!
//! Core modules:
//! - `sim`: Bounce simulation (collision, wall feedback, intro camera pan)
//! - `app`: Host context that drives the simulation once per frame
//! - `renderer`: WebGPU ray-traced scene
//! - `audio`: Bounce sound recipes and playback
//! - `hud`: Corner-hit counter text
//! - `settings`: Live configuration (velocity, volume, toggles)

pub mod app;
pub mod audio;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, FrameView};
pub use settings::Settings;

use glam::Vec3;

/// Scene configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (120 Hz keeps bounces crisp at any refresh rate)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted from the host (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Velocity is expressed in units per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Outer box: 30 x 20 x 30
    pub const OUTER_HALF_EXTENTS: Vec3 = Vec3::new(15.0, 10.0, 15.0);
    /// Width/height ratio of the classic DVD logo
    pub const LOGO_ASPECT: f32 = 2.262_820_5;
    /// Inner cube: LOGO_ASPECT x 1 x LOGO_ASPECT
    pub const INNER_HALF_EXTENTS: Vec3 = Vec3::new(LOGO_ASPECT / 2.0, 0.5, LOGO_ASPECT / 2.0);

    /// Starting velocity (units per reference frame)
    pub const INITIAL_VELOCITY: Vec3 = Vec3::new(0.03, 0.03, 0.03);
    /// Velocity slider range
    pub const VELOCITY_MIN: f32 = -2.0;
    pub const VELOCITY_MAX: f32 = 2.0;

    /// Wall highlight fade-out time (seconds)
    pub const FADE_DURATION: f32 = 0.5;
    /// Cube color before the first bounce
    pub const INITIAL_CUBE_COLOR: u32 = 0x0000ff;
    /// The logo cube lets a little of the far wall show through
    pub const CUBE_OPACITY: f32 = 0.9;
    /// Resting wall color (invisible, shown when edges are off)
    pub const WALL_BASE_COLOR: u32 = 0x00ffff;
    /// Colors are drawn from 0..=MAX_COLOR
    pub const MAX_COLOR: u32 = 0xff_ffff;

    /// Intro: hold still, then pan out to the top-left-front corner
    pub const INTRO_HOLD: f32 = 1.0;
    pub const INTRO_DURATION: f32 = 5.0;
    pub const INTRO_START: Vec3 = Vec3::new(0.0, 0.0, 15.0);
    pub const INTRO_END: Vec3 = Vec3::new(-20.0, 15.0, 37.5);

    /// Perspective camera
    pub const CAMERA_FOV_DEG: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
}

/// Component-wise sign that treats zero as positive
#[inline]
pub fn sign_or_positive(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}
