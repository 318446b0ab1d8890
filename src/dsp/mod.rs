//! DSP Engine — additive synthesis over a fixed note grid.
//!
//! The control path turns magnitude spectra into per-note amplitudes;
//! the render path sums one sine oscillator per audible note into the
//! host's output block.

pub mod amplitudes;
pub mod engine;
pub mod mapper;
pub mod notes;
pub mod oscillator;
pub mod renderer;
