//! Spectrum-to-note mapper.
//!
//! Folds an arbitrary-length magnitude spectrum onto the active notes,
//! then compresses loud spectra to a fixed peak with a treble-attenuating
//! equalizer curve.

use crate::config::{MAX_NOTES, NoteRange, SynthConfig};
use crate::error::MessageError;

#[derive(Debug, Clone)]
pub struct SpectrumMapper {
    range: NoteRange,
    /// Peak the loudest note is scaled to when the input exceeds it.
    pub desired_peak: f32,
    /// Per-note attenuation slope: `1 / (1 + note * slope)`.
    pub equalizer_slope: f32,
}

impl SpectrumMapper {
    pub fn new(range: NoteRange, config: &SynthConfig) -> Self {
        SpectrumMapper {
            range,
            desired_peak: config.desired_peak,
            equalizer_slope: config.equalizer_slope,
        }
    }

    pub fn note_range(&self) -> NoteRange {
        self.range
    }

    /// Number of consecutive spectrum samples folded into one note.
    pub fn binning(&self, len: usize) -> usize {
        len.div_ceil(self.range.len())
    }

    pub fn equalizer_factor(&self, note: usize) -> f32 {
        1.0 / (1.0 + note as f32 * self.equalizer_slope)
    }

    /// Build a full amplitude table from `spectrum`.
    pub fn map(&self, spectrum: &[f32]) -> Result<[f32; MAX_NOTES], MessageError> {
        let note_count = self.range.len();
        let len = spectrum.len();
        if len < note_count {
            return Err(MessageError::UndersizedSpectrum { len, note_count });
        }

        let binning = self.binning(len);
        let mut mags = [0.0_f32; MAX_NOTES];
        for (ii, &mag) in spectrum.iter().enumerate() {
            let note = self.range.start + ii / binning;
            if self.range.contains(note) {
                mags[note] += mag;
            }
        }

        let max = mags.iter().fold(0.0_f32, |m, &v| m.max(v));
        if max > self.desired_peak {
            let scale = self.desired_peak / max;
            for (note, mag) in mags.iter_mut().enumerate() {
                *mag *= scale * self.equalizer_factor(note);
            }
        }

        Ok(mags)
    }
}
