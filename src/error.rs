use std::fmt;

#[derive(Debug)]
pub enum SynthError {
    Config(ConfigError),
    Message(MessageError),
}

/// Rejected construction parameters. Fatal: no instance is created.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidSampleRate { sample_rate: f64 },
    InvalidOctaveRange { start_octave: i32, end_octave: i32 },
    InvalidPolicy { name: &'static str, value: f32 },
}

/// Rejected control message. The amplitude table is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageError {
    NotAPair,
    NotAFloatVector,
    UndersizedSpectrum { len: usize, note_count: usize },
    Json(String),
}

impl MessageError {
    /// True for shape errors (wrong message kind), false for size errors.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, MessageError::UndersizedSpectrum { .. })
    }
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::Config(e) => write!(f, "Configuration error: {e}"),
            SynthError::Message(e) => write!(f, "Message error: {e}"),
        }
    }
}

impl std::error::Error for SynthError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRate { sample_rate } => {
                write!(f, "Sample rate must be positive and finite, got {sample_rate}")
            }
            ConfigError::InvalidOctaveRange { start_octave, end_octave } => write!(
                f,
                "Octave range {start_octave}..={end_octave} is outside the note grid"
            ),
            ConfigError::InvalidPolicy { name, value } => {
                write!(f, "Invalid value {value} for {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::NotAPair => write!(f, "Received a malformed PDU, must be a pair"),
            MessageError::NotAFloatVector => write!(f, "PDU vector must be uniform float32"),
            MessageError::UndersizedSpectrum { len, note_count } => write!(
                f,
                "Magnitude vector of length {len} is shorter than the {note_count} available notes"
            ),
            MessageError::Json(msg) => write!(f, "Could not decode message: {msg}"),
        }
    }
}

impl std::error::Error for MessageError {}

impl From<ConfigError> for SynthError {
    fn from(e: ConfigError) -> Self {
        SynthError::Config(e)
    }
}

impl From<MessageError> for SynthError {
    fn from(e: MessageError) -> Self {
        SynthError::Message(e)
    }
}

impl From<serde_json::Error> for MessageError {
    fn from(e: serde_json::Error) -> Self {
        MessageError::Json(e.to_string())
    }
}
