//! Host context
//!
//! Owns everything the frame loop touches: the simulator, the intro pan,
//! orbit controls, HUD bookkeeping and live settings. Platform code calls
//! [`App::update`] once per animation frame and draws the returned
//! [`FrameView`].

use glam::Vec3;

use crate::audio::{self, SoundSink};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::{HudCounter, HudUpdate};
use crate::renderer::camera::OrbitControls;
use crate::settings::Settings;
use crate::sim::{Axis, BounceSimulator, Bounds, Color, HitSet, IntroPan, IntroPhase, StepOutcome};

/// What to draw this frame
#[derive(Debug, Clone)]
pub struct FrameView {
    /// Camera position (always looking at the box center)
    pub eye: Vec3,
    /// Cube center
    pub position: Vec3,
    pub color: Color,
    /// Wall highlight opacity in face order
    pub intensities: [f32; 6],
    /// Wall highlight color in face order
    pub wall_colors: [Color; 6],
    pub bounds: Bounds,
    pub show_edges: bool,
    pub show_counter: bool,
    pub corner_hits: u32,
    /// Walls struck since the previous frame, across all substeps
    pub hits: HitSet,
    /// Counter element change, if any
    pub hud: Option<HudUpdate>,
}

impl FrameView {
    pub fn from_outcome(
        outcome: &StepOutcome,
        bounds: Bounds,
        eye: Vec3,
        show_edges: bool,
        show_counter: bool,
    ) -> Self {
        Self {
            eye,
            position: outcome.position,
            color: outcome.color,
            intensities: outcome.intensities,
            wall_colors: outcome.wall_colors,
            bounds,
            show_edges,
            show_counter,
            corner_hits: outcome.corner_hits,
            hits: outcome.hits,
            hud: None,
        }
    }
}

/// The running visualization
pub struct App {
    pub sim: BounceSimulator,
    settings: Settings,
    intro: IntroPan,
    /// Becomes available once the intro is done
    orbit: Option<OrbitControls>,
    hud: HudCounter,
    accumulator: f32,
    last: StepOutcome,
}

impl App {
    /// `fallback_seed` is used when the settings don't pin one
    pub fn new(mut settings: Settings, fallback_seed: u64) -> Self {
        settings.sanitize();
        let seed = settings.seed.unwrap_or(fallback_seed);
        let sim = BounceSimulator::with_bounds(Bounds::default(), settings.velocity(), seed);
        let last = sim.outcome(HitSet::new(), None);
        log::info!(
            "Bounce started: seed={}, velocity={:?}, limit={:?}",
            seed,
            sim.velocity,
            sim.bounds.limit()
        );

        Self {
            sim,
            settings,
            intro: IntroPan::default(),
            orbit: None,
            hud: HudCounter::new(),
            accumulator: 0.0,
            last,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn intro_phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    // === Control panel ===

    /// Slider edit: takes effect on the next step
    pub fn set_velocity_axis(&mut self, axis: Axis, value: f32) {
        self.settings.set_velocity_axis(axis, value);
        let v = self.settings.velocity();
        self.sim.velocity[axis.index()] = v[axis.index()];
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.settings.set_sound_volume(volume);
    }

    pub fn set_show_edges(&mut self, show: bool) {
        self.settings.show_edges = show;
    }

    pub fn set_show_counter(&mut self, show: bool) {
        self.settings.show_counter = show;
    }

    // === Camera input (ignored until the intro is over) ===

    pub fn drag(&mut self, dx: f32, dy: f32) {
        if let Some(orbit) = &mut self.orbit {
            orbit.drag(dx, dy);
        }
    }

    pub fn zoom(&mut self, delta: f32) {
        if let Some(orbit) = &mut self.orbit {
            orbit.zoom(delta);
        }
    }

    /// Advance one animation frame
    ///
    /// `frame_dt` is the wall-clock time since the previous frame and
    /// `elapsed` the time since start, both in seconds. Bounce sounds are
    /// handed to `sink` as they happen.
    pub fn update(&mut self, frame_dt: f32, elapsed: f32, sink: &mut dyn SoundSink) -> FrameView {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut hits = HitSet::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let outcome = self.sim.step(SIM_DT);
            for wall in outcome.hits.iter() {
                hits.insert(wall);
            }
            if let Some(event) = outcome.sound {
                audio::trigger(sink, event, self.settings.effective_volume());
            }
            self.last = outcome;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        debug_assert!(self.sim.bounds.contains(self.sim.position));

        let eye = self.camera_eye(elapsed);

        let mut frame = FrameView::from_outcome(
            &self.last,
            self.sim.bounds,
            eye,
            self.settings.show_edges,
            self.settings.show_counter,
        );
        frame.hits = hits;
        frame.hud = self.hud.update(self.sim.corner_hits, self.settings.show_counter);
        frame
    }

    fn camera_eye(&mut self, elapsed: f32) -> Vec3 {
        if let Some(orbit) = &mut self.orbit {
            return orbit.update();
        }
        let eye = self.intro.sample(elapsed);
        if self.intro.is_done() {
            self.orbit = Some(OrbitControls::from_eye(eye, self.sim.bounds.center));
        }
        eye
    }
}
