//! Encoded responses
//!
//! [`ResponseWriter`] is the only place success bodies are produced: it runs
//! the payload through the negotiated codec and stamps the matching
//! `Content-Type`.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::codec::{CodecRegistry, Format};
use crate::model::Payload;

/// A fully encoded response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Format the body was encoded in
    pub format: Format,
    /// Encoded body, empty when encoding failed
    pub body: String,
    /// `Location` header for created resources
    pub location: Option<String>,
}

impl FilmResponse {
    /// Attach a `Location` header
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Value of the `Content-Type` header
    pub fn content_type(&self) -> String {
        self.format.content_type()
    }
}

impl IntoResponse for FilmResponse {
    fn into_response(self) -> Response {
        let content_type = self.content_type();
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();

        if let Ok(value) = HeaderValue::from_str(&content_type) {
            headers.insert(header::CONTENT_TYPE, value);
        }

        if let Some(location) = self.location {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    headers.insert(header::LOCATION, value);
                }
                Err(e) => tracing::warn!(error = %e, location, "invalid Location header"),
            }
        }

        response
    }
}

/// Encodes payloads into [`FilmResponse`]s
#[derive(Debug, Clone)]
pub struct ResponseWriter {
    registry: Arc<CodecRegistry>,
}

impl ResponseWriter {
    /// Create a writer over a shared registry
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    /// Encode `payload` in `format`
    ///
    /// An encode failure is logged by the registry and produces an empty body
    /// with the requested status and content type.
    pub fn write(&self, status: StatusCode, format: Format, payload: &Payload) -> FilmResponse {
        let body = self.registry.encode(format, payload).unwrap_or_default();

        FilmResponse {
            status,
            format,
            body,
            location: None,
        }
    }

    /// `200 OK` with an encoded payload
    pub fn ok(&self, format: Format, payload: impl Into<Payload>) -> FilmResponse {
        self.write(StatusCode::OK, format, &payload.into())
    }

    /// `201 Created` with an encoded payload and `Location`
    pub fn created(
        &self,
        format: Format,
        payload: impl Into<Payload>,
        location: impl Into<String>,
    ) -> FilmResponse {
        self.write(StatusCode::CREATED, format, &payload.into())
            .with_location(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, CodecError, DecodeOutcome};
    use crate::model::Film;

    struct FailingXml;

    impl Codec for FailingXml {
        fn format(&self) -> Format {
            Format::Xml
        }

        fn encode(&self, _payload: &Payload) -> Result<String, CodecError> {
            Err(CodecError::encode(Format::Xml, "writer closed"))
        }

        fn decode(&self, _input: &str) -> DecodeOutcome {
            DecodeOutcome::Absent
        }
    }

    fn writer() -> ResponseWriter {
        ResponseWriter::new(Arc::new(CodecRegistry::standard()))
    }

    #[test]
    fn test_write_sets_content_type() {
        let response = writer().ok(Format::Yaml, Film::new("Heat"));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type(), "application/x-yaml; charset=UTF-8");
        assert!(response.body.contains("title: Heat"));
    }

    #[test]
    fn test_encode_failure_gives_empty_body() {
        let mut registry = CodecRegistry::standard();
        registry.register(FailingXml);
        let writer = ResponseWriter::new(Arc::new(registry));

        let response = writer.ok(Format::Xml, Film::new("Heat"));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.format, Format::Xml);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_created_has_location() {
        let response = writer().created(Format::Json, Film::new("Dune").with_id(5), "/filmapi/films/5");
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.location.as_deref(), Some("/filmapi/films/5"));
    }

    #[test]
    fn test_into_response_headers() {
        let response = writer()
            .created(Format::Text, Film::new("Dune").with_id(5), "/films/5")
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=UTF-8"
        );
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/films/5");
    }
}
