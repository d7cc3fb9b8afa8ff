//! Per-format encode/decode strategies
//!
//! Each wire format is a self-contained [`Codec`] registered in a
//! [`CodecRegistry`]. The negotiator and the response writer only ever talk
//! to the registry, so a new format means one new codec and one
//! [`CodecRegistry::register`] call.
//!
//! # Decode outcomes
//!
//! Decoding never panics and never returns a bare `Result`; callers branch on
//! [`DecodeOutcome`]:
//!
//! | Format | Malformed input |
//! |--------|-----------------|
//! | JSON   | [`DecodeOutcome::Absent`] |
//! | XML    | [`DecodeOutcome::Fatal`] |
//! | Text   | never fails, unknown or bad lines are skipped |
//! | YAML   | [`DecodeOutcome::Absent`] |
//!
//! # Example
//!
//! ```rust
//! use film_service::codec::{CodecRegistry, DecodeOutcome, Format};
//! use film_service::model::{Film, Payload};
//!
//! let registry = CodecRegistry::standard();
//! let body = registry.encode(Format::Text, &Payload::Film(Film::new("Heat").with_year(1995)));
//! assert!(body.unwrap().starts_with("Id: 0\nTitle: Heat\nYear: 1995\n"));
//!
//! match registry.decode(Format::Json, r#"{"title":"Heat"}"#) {
//!     DecodeOutcome::Entity(film) => assert_eq!(film.title.as_deref(), Some("Heat")),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod error;
mod format;
mod json;
mod registry;
mod text;
mod xml;
mod yaml;

pub use error::CodecError;
pub use format::Format;
pub use json::JsonCodec;
pub use registry::CodecRegistry;
pub use text::TextCodec;
pub use xml::XmlCodec;
pub use yaml::YamlCodec;

use crate::model::{Film, Payload};

/// Result of decoding a request body into a film
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A film was read (possibly only partially populated)
    Entity(Film),
    /// No film could be read; the caller decides the status code
    Absent,
    /// The format treats this input as an unrecoverable error
    Fatal(CodecError),
}

impl DecodeOutcome {
    /// The decoded film, if any
    pub fn into_entity(self) -> Option<Film> {
        match self {
            Self::Entity(film) => Some(film),
            Self::Absent | Self::Fatal(_) => None,
        }
    }
}

/// An encode/decode strategy for one wire format
///
/// Implementations hold no mutable state and are shared across requests.
pub trait Codec: Send + Sync {
    /// The format this codec reads and writes
    fn format(&self) -> Format;

    /// Render a payload
    fn encode(&self, payload: &Payload) -> Result<String, CodecError>;

    /// Read a single film
    fn decode(&self, input: &str) -> DecodeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_entity() {
        assert_eq!(
            DecodeOutcome::Entity(Film::new("Ran")).into_entity(),
            Some(Film::new("Ran"))
        );
        assert_eq!(DecodeOutcome::Absent.into_entity(), None);
        assert_eq!(
            DecodeOutcome::Fatal(CodecError::decode(Format::Xml, "bad")).into_entity(),
            None
        );
    }
}
