pub mod config;
pub mod dsp;
pub mod error;
pub mod message;

use crate::dsp::engine::Synthesizer;
use crate::message::Message;
use wasm_bindgen::prelude::*;

pub use crate::config::SynthConfig;
pub use crate::error::{ConfigError, MessageError, SynthError};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the crate version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed synthesizer for AudioWorklet hosts.
///
/// The worklet pulls blocks with `render`; spectra arrive from the main
/// thread through `set_spectrum` or `post_message`.
#[wasm_bindgen]
pub struct WasmSynth {
    synth: Synthesizer,
}

#[wasm_bindgen]
impl WasmSynth {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: f64, start_octave: i32, end_octave: i32) -> Result<WasmSynth, JsValue> {
        let synth = Synthesizer::make(sample_rate, start_octave, end_octave)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(WasmSynth { synth })
    }

    /// Install a magnitude spectrum directly.
    pub fn set_spectrum(&self, magnitudes: Vec<f32>) -> Result<(), JsValue> {
        self.synth
            .set_spectrum(&magnitudes)
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Decode and apply a control message, e.g.
    /// `{ pair: ["null", { f32Vector: [...] }] }`.
    pub fn post_message(&self, msg: JsValue) -> Result<(), JsValue> {
        let msg: Message = serde_wasm_bindgen::from_value(msg)?;
        self.synth
            .handle_message(&msg)
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Render the next block of mono f32 samples.
    pub fn render(&mut self, num_samples: usize) -> Vec<f32> {
        self.synth.render(num_samples)
    }

    pub fn note_count(&self) -> usize {
        self.synth.note_count()
    }
}
