//! Sine tone generator driven from the audio callback.

use std::f64::consts::PI;
use std::sync::Arc;

use cpal::{FromSample, Sample};

use super::frequency::Frequency;

/// Value of a full-scale sine at `frequency` for sample number `position`.
#[inline]
pub fn sine_sample(frequency: f64, position: u64, sample_rate: f64) -> f64 {
    (2.0 * PI * frequency * (position as f64 / sample_rate)).sin()
}

/// Renders a continuous sine wave at whatever frequency is currently set.
///
/// The sample position only ever moves forward, so frequency changes take
/// effect on the next buffer without resetting the waveform's time base.
pub struct ToneGenerator {
    frequency: Arc<Frequency>,
    sample_rate: f64,
    position: u64,
}

impl ToneGenerator {
    pub fn new(frequency: Arc<Frequency>, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate: sample_rate as f64,
            position: 0,
        }
    }

    /// Start counting from `position` instead of zero.
    #[cfg(test)]
    pub fn starting_at(mut self, position: u64) -> Self {
        self.position = position;
        self
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Fill an interleaved output buffer. Every channel of a frame carries
    /// the same sample, and the position advances once per frame.
    pub fn fill<T>(&mut self, data: &mut [T], channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        let frequency = self.frequency.read();
        for frame in data.chunks_mut(channels.max(1)) {
            let value = sine_sample(frequency, self.position, self.sample_rate);
            let value = T::from_sample(value as f32);
            for sample in frame.iter_mut() {
                *sample = value;
            }
            self.position = self.position.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44_100;
    const EPSILON: f32 = 1e-5;

    fn generator(hz: f64) -> (Arc<Frequency>, ToneGenerator) {
        let freq = Arc::new(Frequency::new(hz));
        let tone = ToneGenerator::new(Arc::clone(&freq), RATE);
        (freq, tone)
    }

    #[test]
    fn test_buffer_matches_sine_formula() {
        let k = 12_345;
        let (_freq, tone) = generator(440.0);
        let mut tone = tone.starting_at(k);
        let mut buffer = [0.0f32; 256];
        tone.fill(&mut buffer, 1);

        for (i, sample) in buffer.iter().enumerate() {
            let expected =
                (2.0 * PI * 440.0 * (k + i as u64) as f64 / RATE as f64).sin() as f32;
            assert!((sample - expected).abs() < EPSILON, "sample {i}: {sample} != {expected}");
        }
        assert_eq!(tone.position(), k + 256);
    }

    #[test]
    fn test_zero_frequency_is_silent() {
        let (_freq, tone) = generator(0.0);
        let mut tone = tone.starting_at(999);
        let mut buffer = [1.0f32; 128];
        tone.fill(&mut buffer, 1);
        assert!(buffer.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_position_advances_across_frequency_changes() {
        let (freq, tone) = generator(440.0);
        let mut tone = tone.starting_at(77);
        let mut buffer = [0.0f32; 512];

        for (i, hz) in [440.0, 880.0, 0.0, 2637.0205, 0.0].iter().enumerate() {
            freq.write(*hz);
            tone.fill(&mut buffer, 1);
            assert_eq!(tone.position(), 77 + (i as u64 + 1) * 512);
        }
    }

    #[test]
    fn test_phase_continues_after_note_change() {
        let (freq, mut tone) = generator(440.0);
        let mut first = [0.0f32; 100];
        tone.fill(&mut first, 1);

        freq.write(880.0);
        let mut second = [0.0f32; 100];
        tone.fill(&mut second, 1);

        let expected = sine_sample(880.0, 100, RATE as f64) as f32;
        assert!((second[0] - expected).abs() < EPSILON);
    }

    #[test]
    fn test_multichannel_frames_share_sample() {
        let (_freq, mut tone) = generator(1000.0);
        let mut buffer = [0.0f32; 64];
        tone.fill(&mut buffer, 2);

        for (i, frame) in buffer.chunks(2).enumerate() {
            assert_eq!(frame[0], frame[1]);
            let expected = sine_sample(1000.0, i as u64, RATE as f64) as f32;
            assert!((frame[0] - expected).abs() < EPSILON);
        }
        assert_eq!(tone.position(), 32);
    }

    #[test]
    fn test_integer_output() {
        let (_freq, mut tone) = generator(RATE as f64 / 4.0);
        let mut buffer = [0i16; 4];
        tone.fill(&mut buffer, 1);
        // quarter-rate sine: 0, 1, 0, -1
        assert_eq!(buffer[0], 0);
        assert!(buffer[1] > 32_000);
        assert!(buffer[2].abs() < 2);
        assert!(buffer[3] < -32_000);
    }

    #[test]
    fn test_position_wraps() {
        let (_freq, tone) = generator(440.0);
        let mut tone = tone.starting_at(u64::MAX - 1);
        let mut buffer = [0.0f32; 4];
        tone.fill(&mut buffer, 1);
        assert_eq!(tone.position(), 2);
    }
}
