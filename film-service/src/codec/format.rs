//! Wire formats and the request metadata that selects them

use std::fmt;

/// A supported wire representation
///
/// # Example
///
/// ```rust
/// use film_service::codec::Format;
///
/// assert_eq!(Format::default(), Format::Json);
/// assert_eq!(Format::Yaml.mime_type(), "application/x-yaml");
/// assert_eq!(Format::resolve("xml"), Format::Xml);
/// assert_eq!(Format::resolve("bogus"), Format::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// `application/json`
    #[default]
    Json,
    /// `application/xml`
    Xml,
    /// `text/plain`
    Text,
    /// `application/x-yaml`
    Yaml,
}

impl Format {
    /// Every format, in content-type checking order
    pub const ALL: [Format; 4] = [Format::Json, Format::Xml, Format::Text, Format::Yaml];

    /// Value of the `format` query parameter that selects this format
    #[must_use]
    pub const fn selector(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Text => "text",
            Self::Yaml => "yaml",
        }
    }

    /// MIME type written to `Content-Type`
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Text => "text/plain",
            Self::Yaml => "application/x-yaml",
        }
    }

    /// Full `Content-Type` header value, always UTF-8
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{}; charset=UTF-8", self.mime_type())
    }

    /// Exact, case-sensitive lookup of a `format` selector
    pub fn from_selector(selector: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.selector() == selector)
    }

    /// Resolve a selector, falling back to the default format
    pub fn resolve(selector: &str) -> Self {
        Self::from_selector(selector).unwrap_or_default()
    }

    /// Pick a format from an `Accept` header
    ///
    /// Only XML, text and YAML are looked for, in that priority order. JSON is
    /// what the caller gets when nothing matches.
    pub fn from_accept(accept: &str) -> Option<Self> {
        [Format::Xml, Format::Text, Format::Yaml]
            .into_iter()
            .find(|f| accept.contains(f.mime_type()))
    }

    /// Pick a decoder from a `Content-Type` header
    ///
    /// Substring match in the order JSON, XML, text, YAML; first match wins,
    /// so parameters such as `; charset=UTF-8` are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| content_type.contains(f.mime_type()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_are_case_sensitive() {
        assert_eq!(Format::from_selector("yaml"), Some(Format::Yaml));
        assert_eq!(Format::from_selector("YAML"), None);
        assert_eq!(Format::resolve("XML"), Format::Json);
    }

    #[test]
    fn test_content_type_header() {
        assert_eq!(Format::Text.content_type(), "text/plain; charset=UTF-8");
        assert_eq!(Format::Json.content_type(), "application/json; charset=UTF-8");
    }

    #[test]
    fn test_accept_priority() {
        assert_eq!(
            Format::from_accept("application/x-yaml, text/plain, application/xml"),
            Some(Format::Xml)
        );
        assert_eq!(
            Format::from_accept("application/x-yaml;q=0.9, text/plain"),
            Some(Format::Text)
        );
        assert_eq!(Format::from_accept("application/json"), None);
        assert_eq!(Format::from_accept("*/*"), None);
    }

    #[test]
    fn test_content_type_first_match_wins() {
        assert_eq!(
            Format::from_content_type("application/json; charset=UTF-8"),
            Some(Format::Json)
        );
        assert_eq!(
            Format::from_content_type("text/plain;charset=utf-8"),
            Some(Format::Text)
        );
        assert_eq!(Format::from_content_type("text/html"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Format::Xml), "xml");
    }
}
