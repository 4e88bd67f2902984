//! GPU-side scene data (must match `scene_shader.wgsl`)

use bytemuck::{Pod, Zeroable};

use super::camera::Camera;
use crate::app::FrameView;
use crate::consts::CUBE_OPACITY;

/// Everything the fragment shader needs, packed as vec4s to avoid padding
/// surprises between Rust and WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub inv_view_proj: [[f32; 4]; 4], // offset 0
    /// xyz = eye
    pub eye: [f32; 4], // offset 64
    /// xyz = outer half extents, w = 1 if edges are drawn
    pub outer_half: [f32; 4], // offset 80
    /// xyz = cube half extents
    pub inner_half: [f32; 4], // offset 96
    /// xyz = cube center
    pub cube_pos: [f32; 4], // offset 112
    /// rgb = cube color (sRGB), a = cube opacity
    pub cube_color: [f32; 4], // offset 128
    /// rgb = highlight color (sRGB), a = intensity, in face order
    pub walls: [[f32; 4]; 6], // offset 144
    /// xyz = outer box center
    pub box_center: [f32; 4], // offset 240
}

impl SceneUniforms {
    pub fn new(frame: &FrameView, camera: &Camera) -> Self {
        let bounds = &frame.bounds;
        let mut walls = [[0.0; 4]; 6];
        for (i, wall) in walls.iter_mut().enumerate() {
            let [r, g, b] = frame.wall_colors[i].to_rgb();
            *wall = [r, g, b, frame.intensities[i]];
        }
        let [r, g, b] = frame.color.to_rgb();

        Self {
            inv_view_proj: camera.inverse_view_proj().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            outer_half: bounds
                .outer_half
                .extend(if frame.show_edges { 1.0 } else { 0.0 })
                .to_array(),
            inner_half: bounds.inner_half.extend(0.0).to_array(),
            cube_pos: frame.position.extend(1.0).to_array(),
            cube_color: [r, g, b, CUBE_OPACITY],
            walls,
            box_center: bounds.center.extend(1.0).to_array(),
        }
    }
}
