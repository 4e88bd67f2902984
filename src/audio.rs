//! Bounce sound effects
//!
//! Procedurally generated - no external files needed! Each sound is a short
//! recipe of oscillator tones. The browser build plays recipes through the
//! Web Audio API; native builds just log what would have played.

use crate::sim::{SoundEvent, Wall};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One oscillator burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub freq: f32,
    pub waveform: Waveform,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Offset from trigger time (seconds)
    pub start: f64,
    /// Decay length (seconds)
    pub duration: f64,
}

impl Tone {
    const fn new(freq: f32, waveform: Waveform, gain: f32, start: f64, duration: f64) -> Self {
        Self {
            freq,
            waveform,
            gain,
            start,
            duration,
        }
    }
}

/// Wall ping pitch - each face gets its own note
pub fn wall_pitch(wall: Wall) -> f32 {
    match wall {
        Wall::Right => 523.25,  // C5
        Wall::Left => 440.0,    // A4
        Wall::Top => 659.25,    // E5
        Wall::Bottom => 392.0,  // G4
        Wall::Front => 587.33,  // D5
        Wall::Back => 349.23,   // F4
    }
}

/// Tones that make up a sound event
pub fn recipe(event: SoundEvent) -> Vec<Tone> {
    match event {
        SoundEvent::Wall(wall) => vec![
            Tone::new(wall_pitch(wall), Waveform::Sine, 0.4, 0.0, 0.12),
            // Soft octave shimmer
            Tone::new(wall_pitch(wall) * 2.0, Waveform::Triangle, 0.08, 0.0, 0.08),
        ],
        SoundEvent::DoubleHit => vec![
            Tone::new(660.0, Waveform::Triangle, 0.35, 0.0, 0.1),
            Tone::new(880.0, Waveform::Triangle, 0.35, 0.07, 0.12),
        ],
        SoundEvent::Corner => [523.25, 659.25, 783.99, 1046.5]
            .iter()
            .enumerate()
            .map(|(i, freq)| Tone::new(*freq, Waveform::Triangle, 0.3, i as f64 * 0.08, 0.35))
            .chain(std::iter::once(Tone::new(
                65.41,
                Waveform::Sine,
                0.4,
                0.0,
                0.4,
            )))
            .collect(),
    }
}

/// External audio collaborator
///
/// Playback is fire-and-forget: every call starts an independent sound that
/// never cuts off one already playing.
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent, volume: f32);
}

/// Hand a bounce sound to the sink, unless muted
///
/// Returns whether anything was triggered.
pub fn trigger(sink: &mut dyn SoundSink, event: SoundEvent, volume: f32) -> bool {
    if volume.is_nan() || volume <= 0.0 {
        return false;
    }
    sink.play(event, volume.min(1.0));
    true
}

/// Sink that records and logs events (native builds, tests)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: Vec<(SoundEvent, f32)>,
}

impl SoundSink for LogSink {
    fn play(&mut self, event: SoundEvent, volume: f32) {
        log::debug!("Sound {:?} at volume {:.2}", event, volume);
        self.played.push((event, volume));
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundSink, Tone, Waveform, recipe};
    use crate::sim::SoundEvent;

    /// Audio manager using the Web Audio API
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.start;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration + 0.05).ok();
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, event: SoundEvent, volume: f32) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in recipe(event) {
                Self::play_tone(ctx, &tone, volume);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_wall_has_own_pitch() {
        let mut pitches: Vec<f32> = Wall::ALL.iter().map(|w| wall_pitch(*w)).collect();
        pitches.sort_by(|a, b| a.partial_cmp(b).unwrap());
        pitches.dedup();
        assert_eq!(pitches.len(), 6);
    }

    #[test]
    fn test_recipes() {
        let wall = recipe(SoundEvent::Wall(Wall::Top));
        assert_eq!(wall[0].freq, wall_pitch(Wall::Top));
        assert_eq!(recipe(SoundEvent::DoubleHit).len(), 2);

        let corner = recipe(SoundEvent::Corner);
        assert_eq!(corner.len(), 5);
        // Fanfare notes start one after another
        assert!(corner[1].start > corner[0].start);
        assert!(corner.iter().all(|t| t.gain > 0.0 && t.duration > 0.0));
    }

    #[test]
    fn test_zero_volume_suppresses() {
        let mut sink = LogSink::default();
        assert!(!trigger(&mut sink, SoundEvent::Corner, 0.0));
        assert!(!trigger(&mut sink, SoundEvent::Corner, f32::NAN));
        assert!(sink.played.is_empty());

        assert!(trigger(&mut sink, SoundEvent::DoubleHit, 0.3));
        assert_eq!(sink.played, vec![(SoundEvent::DoubleHit, 0.3)]);
    }
}
