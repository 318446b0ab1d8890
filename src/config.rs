//! Synthesizer configuration and fixed policy constants.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Semitones per octave.
pub const NOTES_PER_OCTAVE: usize = 12;

/// Size of the note grid: 8 octaves starting at C0.
pub const MAX_NOTES: usize = 8 * NOTES_PER_OCTAVE;

/// Frequency of C0 in Hz, the lowest note of the grid.
pub const BASE_FREQUENCY: f64 = 16.352;

/// Peak amplitude that loud spectra are compressed down to.
pub const DEFAULT_DESIRED_PEAK: f32 = 0.05;

/// Steeper slope attenuates treble more.
pub const DEFAULT_EQUALIZER_SLOPE: f32 = 0.5;

/// Notes at or below this amplitude are not emitted.
pub const DEFAULT_SQUELCH: f32 = 0.0;

/// Half-open range of note indices `[start, end)` that are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteRange {
    pub start: usize,
    pub end: usize,
}

impl NoteRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, note: usize) -> bool {
        note >= self.start && note < self.end
    }

    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Construction parameters for a [`crate::dsp::engine::Synthesizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    /// Lowest rendered octave (0 = C0).
    #[serde(default)]
    pub start_octave: i32,
    /// Highest rendered octave, inclusive.
    #[serde(default = "default_end_octave")]
    pub end_octave: i32,
    #[serde(default = "default_desired_peak")]
    pub desired_peak: f32,
    #[serde(default = "default_equalizer_slope")]
    pub equalizer_slope: f32,
    #[serde(default)]
    pub squelch: f32,
}

fn default_sample_rate() -> f64 {
    44100.0
}

fn default_end_octave() -> i32 {
    (MAX_NOTES / NOTES_PER_OCTAVE) as i32 - 1
}

fn default_desired_peak() -> f32 {
    DEFAULT_DESIRED_PEAK
}

fn default_equalizer_slope() -> f32 {
    DEFAULT_EQUALIZER_SLOPE
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: default_sample_rate(),
            start_octave: 0,
            end_octave: default_end_octave(),
            desired_peak: DEFAULT_DESIRED_PEAK,
            equalizer_slope: DEFAULT_EQUALIZER_SLOPE,
            squelch: DEFAULT_SQUELCH,
        }
    }
}

impl SynthConfig {
    /// Config with the default normalization and equalization policy.
    pub fn new(sample_rate: f64, start_octave: i32, end_octave: i32) -> Self {
        SynthConfig {
            sample_rate,
            start_octave,
            end_octave,
            ..Default::default()
        }
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every parameter and derive the active note range.
    pub fn validate(&self) -> Result<NoteRange, ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }

        let octave_error = ConfigError::InvalidOctaveRange {
            start_octave: self.start_octave,
            end_octave: self.end_octave,
        };
        let octaves = (MAX_NOTES / NOTES_PER_OCTAVE) as i32;
        if self.start_octave < 0 || self.start_octave > self.end_octave || self.end_octave >= octaves {
            return Err(octave_error);
        }
        let start = self.start_octave as usize * NOTES_PER_OCTAVE;
        let end = (self.end_octave as usize + 1) * NOTES_PER_OCTAVE;

        check_policy("desiredPeak", self.desired_peak)?;
        check_policy("equalizerSlope", self.equalizer_slope)?;
        check_policy("squelch", self.squelch)?;

        Ok(NoteRange { start, end })
    }
}

fn check_policy(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPolicy { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_full_grid() {
        let range = SynthConfig::default().validate().unwrap();
        assert_eq!(range, NoteRange { start: 0, end: MAX_NOTES });
    }

    #[test]
    fn note_count_matches_octaves() {
        for start in 0..8 {
            for end in start..8 {
                let range = SynthConfig::new(48000.0, start, end).validate().unwrap();
                assert_eq!(range.len(), ((end + 1 - start) * 12) as usize);
                assert_eq!(range.start, start as usize * 12);
            }
        }
    }

    #[test]
    fn rejects_bad_sample_rate() {
        for sr in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
            let err = SynthConfig::new(sr, 0, 7).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSampleRate { .. }));
        }
    }

    #[test]
    fn rejects_bad_octave_range() {
        for (start, end) in [(-1, 3), (4, 3), (0, 8), (8, 8), (0, i32::MAX), (i32::MAX, i32::MAX)] {
            let err = SynthConfig::new(44100.0, start, end).validate().unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidOctaveRange {
                    start_octave: start,
                    end_octave: end
                }
            );
        }
    }

    #[test]
    fn rejects_negative_policy() {
        let config = SynthConfig {
            equalizer_slope: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPolicy { name: "equalizerSlope", .. })
        ));
    }

    #[test]
    fn json_fills_defaults() {
        let config = SynthConfig::from_json(r#"{"sampleRate": 32000, "startOctave": 2, "endOctave": 5}"#)
            .unwrap();
        assert_eq!(config.sample_rate, 32000.0);
        assert_eq!(config.start_octave, 2);
        assert_eq!(config.end_octave, 5);
        assert_eq!(config.desired_peak, DEFAULT_DESIRED_PEAK);
        assert_eq!(config.equalizer_slope, DEFAULT_EQUALIZER_SLOPE);
        assert_eq!(config.squelch, DEFAULT_SQUELCH);
    }
}
