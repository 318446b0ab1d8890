//! Synthesizer engine — ties the control path to the render path.
//!
//! ```text
//! Message ─▶ SynthControl (mapper) ─▶ AmplitudeTable ─▶ Renderer ─▶ output block
//! ```
//!
//! [`Synthesizer`] is owned by the host's render loop. [`SynthControl`] is a
//! cloneable `Send` handle for whatever thread delivers control messages,
//! and [`MessagePort`] queues messages for synchronous processing.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use log::{debug, warn};

use crate::config::{MAX_NOTES, NoteRange, SynthConfig};
use crate::error::{MessageError, SynthError};
use crate::message::Message;

use super::amplitudes::AmplitudeTable;
use super::mapper::SpectrumMapper;
use super::notes::NoteGrid;
use super::oscillator::OscillatorBank;
use super::renderer::Renderer;

/// A source-only additive synthesizer block.
#[derive(Debug)]
pub struct Synthesizer {
    config: SynthConfig,
    range: NoteRange,
    grid: NoteGrid,
    table: AmplitudeTable,
    mapper: SpectrumMapper,
    renderer: Renderer,
}

impl Synthesizer {
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        let range = config.validate()?;
        let grid = NoteGrid::new(config.sample_rate);
        let table = AmplitudeTable::new();
        let mapper = SpectrumMapper::new(range, &config);
        let renderer = Renderer::new(
            range,
            config.squelch,
            OscillatorBank::new(&grid),
            table.clone(),
        );

        debug!(
            "synthesizer ready: {} Hz, notes {}..{}",
            config.sample_rate, range.start, range.end
        );

        Ok(Synthesizer {
            config,
            range,
            grid,
            table,
            mapper,
            renderer,
        })
    }

    /// Construct with the default normalization policy.
    pub fn make(sample_rate: f64, start_octave: i32, end_octave: i32) -> Result<Self, SynthError> {
        Self::new(SynthConfig::new(sample_rate, start_octave, end_octave))
    }

    /// A handle for delivering control messages from another thread.
    pub fn control(&self) -> SynthControl {
        SynthControl {
            mapper: self.mapper.clone(),
            table: self.table.clone(),
        }
    }

    /// Apply a control message on the caller's thread.
    pub fn handle_message(&self, msg: &Message) -> Result<(), MessageError> {
        self.control().handle_message(msg)
    }

    pub fn set_spectrum(&self, spectrum: &[f32]) -> Result<(), MessageError> {
        self.control().set_spectrum(spectrum)
    }

    /// Fill the host's output block. Always produces `out.len()` samples.
    pub fn work(&mut self, out: &mut [f32]) -> usize {
        self.renderer.render_into(out)
    }

    pub fn render(&mut self, n: usize) -> Vec<f32> {
        self.renderer.render(n)
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn note_range(&self) -> NoteRange {
        self.range
    }

    pub fn note_count(&self) -> usize {
        self.range.len()
    }

    pub fn frequency(&self, note: usize) -> f64 {
        self.grid.frequency(note)
    }

    pub fn amplitudes(&self) -> [f32; MAX_NOTES] {
        self.table.snapshot()
    }
}

/// Control-path handle: maps spectra and installs them into the table.
#[derive(Debug, Clone)]
pub struct SynthControl {
    mapper: SpectrumMapper,
    table: AmplitudeTable,
}

impl SynthControl {
    /// Validate a spectrum PDU and install its amplitudes.
    /// On error the table keeps its last valid contents.
    pub fn handle_message(&self, msg: &Message) -> Result<(), MessageError> {
        self.set_spectrum(msg.spectrum()?)
    }

    pub fn set_spectrum(&self, spectrum: &[f32]) -> Result<(), MessageError> {
        let mags = self.mapper.map(spectrum)?;
        self.table.replace(mags);
        debug!(
            "installed amplitudes from {} bins (binning {})",
            spectrum.len(),
            self.mapper.binning(spectrum.len())
        );
        Ok(())
    }
}

/// Outcome of draining the inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub applied: usize,
    pub rejected: usize,
}

/// Queued inbox for asynchronously arriving control messages.
#[derive(Debug)]
pub struct MessagePort {
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    control: SynthControl,
}

impl MessagePort {
    /// Unbounded inbox.
    pub fn new(control: SynthControl) -> Self {
        let (sender, receiver) = unbounded();
        MessagePort {
            sender,
            receiver,
            control,
        }
    }

    /// Inbox holding at most `capacity` pending messages.
    pub fn bounded(control: SynthControl, capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        MessagePort {
            sender,
            receiver,
            control,
        }
    }

    /// A sender that can be cloned and handed to message producers.
    pub fn sender(&self) -> Sender<Message> {
        self.sender.clone()
    }

    /// Queue a message without blocking. Returns false if it was dropped.
    pub fn post(&self, msg: Message) -> bool {
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("control inbox full, dropping message");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Process up to `max_messages` pending messages, one at a time.
    pub fn process_messages(&self, max_messages: usize) -> ProcessStats {
        let mut stats = ProcessStats::default();
        while stats.applied + stats.rejected < max_messages {
            let Ok(msg) = self.receiver.try_recv() else {
                break;
            };
            apply(&self.control, &msg, &mut stats);
        }
        stats
    }

    /// Block and process messages until every other sender is dropped.
    pub fn run(self) -> ProcessStats {
        let MessagePort {
            sender,
            receiver,
            control,
        } = self;
        drop(sender);

        let mut stats = ProcessStats::default();
        for msg in receiver.iter() {
            apply(&control, &msg, &mut stats);
        }
        stats
    }
}

fn apply(control: &SynthControl, msg: &Message, stats: &mut ProcessStats) {
    match control.handle_message(msg) {
        Ok(()) => stats.applied += 1,
        Err(e) => {
            warn!("dropping control message: {e}");
            stats.rejected += 1;
        }
    }
}
