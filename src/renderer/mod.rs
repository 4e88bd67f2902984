//! Rendering module

pub mod camera;
pub mod scene_pipeline;
pub mod uniforms;

pub use scene_pipeline::SceneRenderState;
