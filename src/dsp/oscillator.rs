//! Continuous-phase sine oscillators, one per grid note.

use std::f64::consts::TAU;

use crate::config::MAX_NOTES;

use super::notes::NoteGrid;

/// A numerically controlled sine oscillator with a fixed increment.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f64,
    increment: f64,
}

impl Oscillator {
    pub fn new(increment: f64) -> Self {
        Oscillator {
            phase: 0.0,
            increment,
        }
    }

    /// Current phase in radians, always in `[0, 2π)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Generate the next sample at unit amplitude.
    pub fn next_sample(&mut self) -> f64 {
        let sample = self.phase.sin();
        self.phase = (self.phase + self.increment).rem_euclid(TAU);
        sample
    }

    /// Add `out.len()` samples scaled by `amplitude` into `out`.
    pub fn mix_into(&mut self, amplitude: f32, out: &mut [f32]) {
        let amp = amplitude as f64;
        for s in out.iter_mut() {
            *s += (self.next_sample() * amp) as f32;
        }
    }

    /// Fill a fresh buffer with `n` samples scaled by `amplitude`.
    pub fn generate(&mut self, amplitude: f32, n: usize) -> Vec<f32> {
        let mut out = vec![0.0; n];
        self.mix_into(amplitude, &mut out);
        out
    }

    /// Move the phase forward `n` samples without producing output.
    pub fn advance(&mut self, n: usize) {
        self.phase = (self.phase + self.increment * n as f64).rem_euclid(TAU);
    }
}

/// Index-addressed oscillators covering the whole note grid.
#[derive(Debug, Clone)]
pub struct OscillatorBank {
    oscillators: Vec<Oscillator>,
}

impl OscillatorBank {
    pub fn new(grid: &NoteGrid) -> Self {
        let oscillators = (0..MAX_NOTES)
            .map(|note| Oscillator::new(grid.increment(note)))
            .collect();
        OscillatorBank { oscillators }
    }

    pub fn get(&self, note: usize) -> &Oscillator {
        &self.oscillators[note]
    }

    pub fn mix_into(&mut self, note: usize, amplitude: f32, out: &mut [f32]) {
        self.oscillators[note].mix_into(amplitude, out);
    }

    pub fn generate(&mut self, note: usize, amplitude: f32, n: usize) -> Vec<f32> {
        self.oscillators[note].generate(amplitude, n)
    }

    pub fn advance(&mut self, note: usize, n: usize) {
        self.oscillators[note].advance(n);
    }

    pub fn len(&self) -> usize {
        self.oscillators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_zero_at_start() {
        let mut osc = Oscillator::new(TAU * 440.0 / 44100.0);
        let sample = osc.next_sample();
        assert!(sample.abs() < 1e-10, "Sine should start near 0, got {sample}");
    }

    #[test]
    fn amplitude_bounds_output() {
        let mut osc = Oscillator::new(TAU * 440.0 / 44100.0);
        let out = osc.generate(0.25, 44100);
        assert!(out.iter().all(|s| s.abs() <= 0.25 + 1e-6));
        let peak = out.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.24, "Peak should approach amplitude, got {peak}");
    }

    #[test]
    fn phase_stays_wrapped() {
        let mut osc = Oscillator::new(TAU * 3000.0 / 8000.0);
        for _ in 0..10_000 {
            osc.next_sample();
            assert!(osc.phase() >= 0.0 && osc.phase() < TAU);
        }
        osc.advance(1_000_003);
        assert!(osc.phase() >= 0.0 && osc.phase() < TAU);
    }

    #[test]
    fn split_generation_is_continuous() {
        let inc = TAU * 261.63 / 44100.0;
        let mut whole = Oscillator::new(inc);
        let mut split = Oscillator::new(inc);

        let reference = whole.generate(0.5, 300);
        let mut joined = split.generate(0.5, 128);
        joined.extend(split.generate(0.5, 172));

        for (i, (a, b)) in reference.iter().zip(&joined).enumerate() {
            assert!((a - b).abs() < 1e-6, "Mismatch at sample {i}: {a} vs {b}");
        }
    }

    #[test]
    fn advance_matches_generation() {
        let inc = TAU * 1000.0 / 44100.0;
        let mut played = Oscillator::new(inc);
        let mut skipped = Oscillator::new(inc);
        played.generate(1.0, 777);
        skipped.advance(777);
        assert!((played.phase() - skipped.phase()).abs() < 1e-9);
    }

    #[test]
    fn mix_into_accumulates() {
        let mut osc = Oscillator::new(TAU * 440.0 / 44100.0);
        let mut reference = Oscillator::new(TAU * 440.0 / 44100.0);
        let mut out = vec![1.0_f32; 64];
        osc.mix_into(0.5, &mut out);
        let tone = reference.generate(0.5, 64);
        for (o, t) in out.iter().zip(&tone) {
            assert!((o - (1.0 + t)).abs() < 1e-6);
        }
    }

    #[test]
    fn fast_increment_stays_wrapped() {
        let mut osc = Oscillator::new(3.5 * TAU);
        for _ in 0..1000 {
            osc.next_sample();
            assert!(osc.phase() >= 0.0 && osc.phase() < TAU, "phase {}", osc.phase());
        }
    }

    #[test]
    fn bank_generate_continues_across_calls() {
        let grid = NoteGrid::new(44100.0);
        let mut bank = OscillatorBank::new(&grid);
        let mut joined = bank.generate(57, 0.3, 150);
        joined.extend(bank.generate(57, 0.3, 250));

        let inc = grid.increment(57);
        for (k, s) in joined.iter().enumerate() {
            let expected = 0.3 * (inc * k as f64).sin();
            assert!(
                (*s as f64 - expected).abs() < 1e-5,
                "Discontinuity at sample {k}: {s} vs {expected}"
            );
        }
        // Other notes are untouched
        assert_eq!(bank.get(56).phase(), 0.0);
    }

    #[test]
    fn bank_covers_grid() {
        let grid = NoteGrid::new(48000.0);
        let bank = OscillatorBank::new(&grid);
        assert_eq!(bank.len(), MAX_NOTES);
        assert!((bank.get(0).increment() - grid.increment(0)).abs() < 1e-15);
        assert!((bank.get(95).increment() - grid.increment(95)).abs() < 1e-15);
    }
}
