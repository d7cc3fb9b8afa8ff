//! Response format negotiation
//!
//! Precedence:
//!
//! 1. A non-empty `format` query parameter, resolved verbatim. An
//!    unrecognized selector means JSON; `Accept` is not consulted.
//! 2. The `Accept` header, checked for XML, then text, then YAML.
//! 3. JSON.

use std::collections::HashMap;

use axum::http::{header, HeaderMap};

use crate::codec::Format;

/// Name of the query parameter that forces a response format
pub const FORMAT_PARAM: &str = "format";

/// Pick the response format from the raw request inputs
///
/// # Example
///
/// ```rust
/// use film_service::codec::Format;
/// use film_service::negotiate::negotiate;
///
/// assert_eq!(negotiate(Some("xml"), Some("application/json")), Format::Xml);
/// assert_eq!(negotiate(None, Some("text/plain")), Format::Text);
/// assert_eq!(negotiate(Some("csv"), Some("application/xml")), Format::Json);
/// assert_eq!(negotiate(None, None), Format::Json);
/// ```
pub fn negotiate(format_param: Option<&str>, accept: Option<&str>) -> Format {
    if let Some(selector) = format_param.filter(|s| !s.is_empty()) {
        return Format::resolve(selector);
    }

    accept.and_then(Format::from_accept).unwrap_or_default()
}

/// Pick the response format for a request's query parameters and headers
pub fn negotiate_request(params: &HashMap<String, String>, headers: &HeaderMap) -> Format {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());

    negotiate(params.get(FORMAT_PARAM).map(String::as_str), accept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_param_beats_accept() {
        assert_eq!(negotiate(Some("yaml"), Some("application/xml")), Format::Yaml);
        assert_eq!(negotiate(Some("json"), Some("text/plain")), Format::Json);
    }

    #[test]
    fn test_unknown_param_is_json_even_with_accept() {
        assert_eq!(negotiate(Some("Xml"), Some("application/xml")), Format::Json);
    }

    #[test]
    fn test_empty_param_falls_through_to_accept() {
        assert_eq!(negotiate(Some(""), Some("application/x-yaml")), Format::Yaml);
    }

    #[test]
    fn test_accept_priority_and_default() {
        assert_eq!(
            negotiate(None, Some("application/x-yaml, application/xml")),
            Format::Xml
        );
        assert_eq!(negotiate(None, Some("text/html")), Format::Json);
        assert_eq!(negotiate(None, None), Format::Json);
    }

    #[test]
    fn test_negotiate_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let mut params = HashMap::new();
        params.insert("format".to_string(), "xml".to_string());
        assert_eq!(negotiate_request(&params, &headers), Format::Xml);

        headers.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));
        assert_eq!(negotiate_request(&HashMap::new(), &headers), Format::Text);
        assert_eq!(negotiate_request(&HashMap::new(), &HeaderMap::new()), Format::Json);
    }
}
