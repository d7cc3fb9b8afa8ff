//! Format to codec lookup

use std::collections::HashMap;
use std::fmt;

use super::{Codec, DecodeOutcome, Format, JsonCodec, TextCodec, XmlCodec, YamlCodec};
use crate::model::Payload;

/// Codecs keyed by format
///
/// Built once at startup and shared read-only behind an `Arc`. Lookups for
/// a format with no registered codec fall back to the JSON codec.
pub struct CodecRegistry {
    codecs: HashMap<Format, Box<dyn Codec>>,
}

impl CodecRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// A registry with the JSON, XML, text and YAML codecs
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(JsonCodec);
        registry.register(XmlCodec);
        registry.register(TextCodec);
        registry.register(YamlCodec);
        registry
    }

    /// Add or replace the codec for its format
    pub fn register(&mut self, codec: impl Codec + 'static) -> &mut Self {
        self.codecs.insert(codec.format(), Box::new(codec));
        self
    }

    /// Codec for a format, or the JSON codec when none is registered
    pub fn codec(&self, format: Format) -> Option<&dyn Codec> {
        self.codecs
            .get(&format)
            .or_else(|| self.codecs.get(&Format::Json))
            .map(|codec| codec.as_ref())
    }

    /// Formats with a registered codec
    pub fn formats(&self) -> Vec<Format> {
        Format::ALL
            .into_iter()
            .filter(|f| self.codecs.contains_key(f))
            .collect()
    }

    /// Encode a payload; failures are logged and yield `None`
    pub fn encode(&self, format: Format, payload: &Payload) -> Option<String> {
        let Some(codec) = self.codec(format) else {
            tracing::error!(%format, "no codec registered");
            return None;
        };

        match codec.encode(payload) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!(error = %e, %format, "failed to encode response");
                None
            }
        }
    }

    /// Decode a single film
    pub fn decode(&self, format: Format, input: &str) -> DecodeOutcome {
        match self.codec(format) {
            Some(codec) => codec.decode(input),
            None => DecodeOutcome::Absent,
        }
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}
