//! Perspective camera and orbit controls

use glam::{Mat4, Vec3};

use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};

/// Perspective camera looking at a target point
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            fov_y: CAMERA_FOV_DEG,
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Maps clip space back to world space (for per-pixel ray setup)
    pub fn inverse_view_proj(&self) -> Mat4 {
        self.view_proj().inverse()
    }
}

/// Damping applied to orbit velocity each frame (0 = no motion, 1 = no damping)
const DAMPING: f32 = 0.1;
/// Radians of rotation per pixel dragged
const ROTATE_SPEED: f32 = 0.005;
/// Keep pitch away from the poles so `look_at` stays well defined
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 120.0;

/// Drag-to-orbit camera controls with damping
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    yaw_vel: f32,
    pitch_vel: f32,
    zoom_vel: f32,
}

impl OrbitControls {
    /// Controls that start from an existing eye position
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = if offset.length() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            distance,
            target,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
            zoom_vel: 0.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Pointer drag in pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw_vel -= dx * ROTATE_SPEED;
        self.pitch_vel += dy * ROTATE_SPEED;
    }

    /// Wheel delta (positive zooms out)
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_vel += delta * 0.001;
    }

    /// Apply a share of the pending motion and bleed off the rest
    pub fn update(&mut self) -> Vec3 {
        self.yaw += self.yaw_vel * DAMPING;
        self.pitch = (self.pitch + self.pitch_vel * DAMPING).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance =
            (self.distance * (1.0 + self.zoom_vel * DAMPING)).clamp(MIN_DISTANCE, MAX_DISTANCE);

        self.yaw_vel *= 1.0 - DAMPING;
        self.pitch_vel *= 1.0 - DAMPING;
        self.zoom_vel *= 1.0 - DAMPING;

        self.position()
    }
}
