//! Renderer — sums every audible note into the host's output block.

use crate::config::NoteRange;

use super::amplitudes::AmplitudeTable;
use super::oscillator::OscillatorBank;

/// Render-path state: the oscillator bank plus a reader handle on the
/// shared amplitude table. Phase lives here and is never touched by the
/// control path.
#[derive(Debug)]
pub struct Renderer {
    range: NoteRange,
    squelch: f32,
    bank: OscillatorBank,
    table: AmplitudeTable,
}

impl Renderer {
    pub fn new(range: NoteRange, squelch: f32, bank: OscillatorBank, table: AmplitudeTable) -> Self {
        Renderer {
            range,
            squelch,
            bank,
            table,
        }
    }

    pub fn bank(&self) -> &OscillatorBank {
        &self.bank
    }

    /// Overwrite `out` with the sum of all notes above the squelch.
    ///
    /// Every active note advances its phase by `out.len()` samples whether
    /// or not it was emitted. Returns the number of samples produced.
    pub fn render_into(&mut self, out: &mut [f32]) -> usize {
        out.fill(0.0);
        let n = out.len();
        if n == 0 {
            return 0;
        }

        let Renderer {
            range,
            squelch,
            bank,
            table,
        } = self;

        table.with_table(|amps| {
            for note in range.iter() {
                let mag = amps[note];
                if mag > *squelch {
                    bank.mix_into(note, mag, out);
                } else {
                    bank.advance(note, n);
                }
            }
        });

        n
    }

    pub fn render(&mut self, n: usize) -> Vec<f32> {
        let mut out = vec![0.0; n];
        self.render_into(&mut out);
        out
    }
}
