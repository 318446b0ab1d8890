//! Note grid — equal-tempered pitches anchored at C0.

use std::f64::consts::TAU;

use crate::config::{BASE_FREQUENCY, MAX_NOTES, NOTES_PER_OCTAVE};

/// Frequency of a grid note in Hz.
///
/// Formula: `16.352 * 2^(note / 12)`
pub fn note_to_frequency(note: usize) -> f64 {
    BASE_FREQUENCY * (2.0_f64).powf(note as f64 / NOTES_PER_OCTAVE as f64)
}

/// Per-note angular increments (radians per sample) for a fixed sample rate.
#[derive(Debug, Clone)]
pub struct NoteGrid {
    sample_rate: f64,
    increments: [f64; MAX_NOTES],
}

impl NoteGrid {
    /// `sample_rate` must already be validated as positive.
    pub fn new(sample_rate: f64) -> Self {
        let mut increments = [0.0; MAX_NOTES];
        for (note, inc) in increments.iter_mut().enumerate() {
            *inc = TAU * note_to_frequency(note) / sample_rate;
        }
        NoteGrid {
            sample_rate,
            increments,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frequency(&self, note: usize) -> f64 {
        note_to_frequency(note)
    }

    pub fn increment(&self, note: usize) -> f64 {
        self.increments[note]
    }
}
