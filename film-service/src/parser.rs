//! Request body decoding by `Content-Type`

use std::sync::Arc;

use axum::http::{header, HeaderMap};

use crate::codec::{CodecRegistry, DecodeOutcome, Format};

/// Decodes request bodies into films
#[derive(Debug, Clone)]
pub struct EntityParser {
    registry: Arc<CodecRegistry>,
}

impl EntityParser {
    /// Create a parser over a shared registry
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    /// Format implied by a `Content-Type` value, if recognized
    pub fn format_for(content_type: Option<&str>) -> Option<Format> {
        content_type.and_then(Format::from_content_type)
    }

    /// Whether a `Content-Type` value names a format that can be decoded
    pub fn is_supported(content_type: Option<&str>) -> bool {
        Self::format_for(content_type).is_some()
    }

    /// Decode a body using the format named by `content_type`
    ///
    /// A missing or unrecognized content type yields [`DecodeOutcome::Absent`].
    pub fn parse(&self, body: &str, content_type: Option<&str>) -> DecodeOutcome {
        match Self::format_for(content_type) {
            Some(format) => {
                tracing::debug!(%format, bytes = body.len(), "decoding request body");
                self.registry.decode(format, body)
            }
            None => {
                tracing::warn!(content_type, "unsupported request content type");
                DecodeOutcome::Absent
            }
        }
    }
}

/// `Content-Type` header as a string, if present and valid
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn parser() -> EntityParser {
        EntityParser::new(Arc::new(CodecRegistry::standard()))
    }

    #[test]
    fn test_parse_by_content_type() {
        let film = parser()
            .parse(r#"{"title":"Dune","year":2021}"#, Some("application/json; charset=UTF-8"))
            .into_entity()
            .unwrap();
        assert_eq!(film.title.as_deref(), Some("Dune"));

        let film = parser()
            .parse("Title: Dune\nYear: 2021", Some("text/plain"))
            .into_entity()
            .unwrap();
        assert_eq!(film.year, 2021);
    }

    #[test]
    fn test_unsupported_content_type_is_absent() {
        assert_eq!(parser().parse("title=Dune", Some("application/x-www-form-urlencoded")), DecodeOutcome::Absent);
        assert_eq!(parser().parse("{}", None), DecodeOutcome::Absent);
    }

    #[test]
    fn test_xml_failure_is_fatal() {
        let outcome = parser().parse("<film>", Some("application/xml"));
        assert!(matches!(outcome, DecodeOutcome::Fatal(_)));
    }

    #[test]
    fn test_is_supported() {
        assert!(EntityParser::is_supported(Some("application/x-yaml")));
        assert!(!EntityParser::is_supported(Some("text/html")));
        assert!(!EntityParser::is_supported(None));
    }

    #[test]
    fn test_content_type_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_type(&headers), None);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        assert_eq!(content_type(&headers), Some("application/xml"));
    }
}
