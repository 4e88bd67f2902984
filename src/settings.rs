//! Live settings
//!
//! Read from JSON (native) or the page URL query string (web), then edited
//! live from the control panel. Nothing is persisted.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_VELOCITY, VELOCITY_MAX, VELOCITY_MIN};
use crate::sim::Axis;

/// Bounce visualization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Motion ===
    /// Cube velocity along x (units per reference frame)
    pub velocity_x: f32,
    /// Cube velocity along y
    pub velocity_y: f32,
    /// Cube velocity along z
    pub velocity_z: f32,

    // === Audio ===
    /// Bounce sound volume (0.0 - 1.0, 0 = silent)
    pub sound_volume: f32,

    // === Display ===
    /// Draw box and cube edges
    pub show_edges: bool,
    /// Show the corner-hit counter
    pub show_counter: bool,

    /// RNG seed for cube colors (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            velocity_x: INITIAL_VELOCITY.x,
            velocity_y: INITIAL_VELOCITY.y,
            velocity_z: INITIAL_VELOCITY.z,

            sound_volume: 0.5,

            show_edges: false,
            show_counter: true,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Clamp every value into its documented range
    pub fn sanitize(&mut self) {
        self.velocity_x = clamp_velocity(self.velocity_x);
        self.velocity_y = clamp_velocity(self.velocity_y);
        self.velocity_z = clamp_velocity(self.velocity_z);
        self.sound_volume = clamp_volume(self.sound_volume);
    }

    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.velocity_x, self.velocity_y, self.velocity_z)
    }

    pub fn set_velocity_axis(&mut self, axis: Axis, value: f32) {
        let value = clamp_velocity(value);
        match axis {
            Axis::X => self.velocity_x = value,
            Axis::Y => self.velocity_y = value,
            Axis::Z => self.velocity_z = value,
        }
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = clamp_volume(volume);
    }

    /// Volume actually used for playback (0 means don't play at all)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_volume.is_finite() {
            self.sound_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Apply `key=value` pairs from a URL query string
    ///
    /// Keys: `vx`, `vy`, `vz`, `volume`, `edges`, `counter`, `seed`.
    /// Unknown keys and unparsable values are logged and skipped.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "vx" => parse_into(value, |v| self.set_velocity_axis(Axis::X, v)),
                "vy" => parse_into(value, |v| self.set_velocity_axis(Axis::Y, v)),
                "vz" => parse_into(value, |v| self.set_velocity_axis(Axis::Z, v)),
                "volume" => parse_into(value, |v| self.set_sound_volume(v)),
                "edges" => parse_flag(value).map(|b| self.show_edges = b).is_some(),
                "counter" => parse_flag(value).map(|b| self.show_counter = b).is_some(),
                "seed" => value.parse::<u64>().map(|s| self.seed = Some(s)).is_ok(),
                _ => {
                    log::warn!("Ignoring unknown setting '{}'", key);
                    continue;
                }
            };
            if !applied {
                log::warn!("Ignoring bad value '{}' for setting '{}'", value, key);
            }
        }
    }
}

fn clamp_velocity(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(VELOCITY_MIN, VELOCITY_MAX)
    } else {
        0.0
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

fn parse_into(value: &str, apply: impl FnOnce(f32)) -> bool {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() => {
            apply(v);
            true
        }
        _ => false,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
