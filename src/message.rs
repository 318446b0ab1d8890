//! Control message values.
//!
//! A control update is a tagged pair: the first element carries metadata
//! (usually `Null` or a dictionary-like symbol), the second the magnitude
//! spectrum as a uniform float32 vector.

use serde::{Deserialize, Serialize};

use crate::error::MessageError;

/// A small polymorphic message value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Message {
    Null,
    Bool(bool),
    Symbol(String),
    Double(f64),
    F32Vector(Vec<f32>),
    Pair(Box<Message>, Box<Message>),
}

impl Message {
    /// Build a spectrum PDU: `(meta . magnitudes)`.
    pub fn pdu(meta: Message, magnitudes: Vec<f32>) -> Self {
        Message::Pair(Box::new(meta), Box::new(Message::F32Vector(magnitudes)))
    }

    /// Decode a message from its JSON form, e.g.
    /// `{"pair": ["null", {"f32Vector": [0.1, 0.2]}]}`.
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Borrow the magnitude vector carried by a spectrum PDU.
    pub fn spectrum(&self) -> Result<&[f32], MessageError> {
        let Message::Pair(_, payload) = self else {
            return Err(MessageError::NotAPair);
        };
        match payload.as_ref() {
            Message::F32Vector(v) => Ok(v),
            _ => Err(MessageError::NotAFloatVector),
        }
    }
}
