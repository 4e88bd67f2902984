//! Bounce simulation module
//!
//! All bounce logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time only comes in through `dt` / elapsed arguments
//! - No rendering, audio or platform dependencies

pub mod bounds;
pub mod collision;
pub mod feedback;
pub mod intro;
pub mod state;
pub mod tick;

pub use bounds::{Axis, Bounds, Wall};
pub use collision::{HitSet, resolve_walls};
pub use feedback::{Color, WallFades};
pub use intro::{IntroPan, IntroPhase, ease_in_out_quad};
pub use state::{BounceSimulator, SoundEvent, StepOutcome};
