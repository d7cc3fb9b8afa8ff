//! Codec error types

use thiserror::Error;

use super::Format;

/// Failure inside a format library while encoding or decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The payload could not be rendered
    #[error("{format} encode failed: {message}")]
    Encode {
        /// Format being produced
        format: Format,
        /// Library error message
        message: String,
    },

    /// The input could not be read as a film
    #[error("{format} decode failed: {message}")]
    Decode {
        /// Format being read
        format: Format,
        /// Library error message
        message: String,
    },
}

impl CodecError {
    /// Create an encode error
    pub fn encode(format: Format, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: err.to_string(),
        }
    }

    /// Create a decode error
    pub fn decode(format: Format, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            format,
            message: err.to_string(),
        }
    }

    /// Format the error came from
    pub fn format(&self) -> Format {
        match self {
            Self::Encode { format, .. } | Self::Decode { format, .. } => *format,
        }
    }
}
