//! Film catalog data model
//!
//! [`Film`] is the unit of storage and serialization. [`Films`] is the
//! collection envelope used when a list of films is encoded, and [`Payload`]
//! is everything an encoder can be asked to render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A film record
///
/// Every field except `id` is optional at the data-model level. The `id` is
/// assigned by the store on insert and is never taken from a request body on
/// update.
///
/// # Example
///
/// ```rust
/// use film_service::model::Film;
///
/// let film = Film::new("Dune")
///     .with_year(2021)
///     .with_director("Villeneuve");
///
/// assert_eq!(film.id, 0);
/// assert_eq!(film.title.as_deref(), Some("Dune"));
/// assert!(film.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Film {
    /// Server-assigned identifier (0 until stored)
    pub id: i32,
    /// Title, required by validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Release year, 0 when unknown
    pub year: i32,
    /// Director name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Cast, comma-joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<String>,
    /// Free-text review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl Film {
    /// Create a film with only a title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the identifier
    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Set the release year
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Set the director
    #[must_use]
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Set the cast
    #[must_use]
    pub fn with_stars(mut self, stars: impl Into<String>) -> Self {
        self.stars = Some(stars.into());
        self
    }

    /// Set the review
    #[must_use]
    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    /// Check the fields the store requires before insert or update
    ///
    /// Decoding is lenient and may produce a film with nothing but defaults;
    /// this is where such a film is turned away.
    pub fn validate(&self) -> Result<(), String> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err("Film title is required".to_string()),
        }
    }
}

/// Collection envelope for a list of films
///
/// Only the XML encoding cares about the wrapper: the collection root is
/// `<films>` and each entry is a `<film>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Films {
    /// The wrapped films, in order
    #[serde(rename = "film", default)]
    pub films: Vec<Film>,
}

impl Films {
    /// Wrap a list of films
    pub fn new(films: Vec<Film>) -> Self {
        Self { films }
    }
}

impl From<Vec<Film>> for Films {
    fn from(films: Vec<Film>) -> Self {
        Self::new(films)
    }
}

/// A value handed to an encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A single film
    Film(Film),
    /// An ordered list of films
    Films(Vec<Film>),
    /// A key/value result such as a status message
    Message(BTreeMap<String, String>),
}

impl Payload {
    /// Build a single-entry message payload
    ///
    /// # Example
    ///
    /// ```rust
    /// use film_service::model::Payload;
    ///
    /// let payload = Payload::message("Film deleted successfully.");
    /// match payload {
    ///     Payload::Message(map) => assert_eq!(map["message"], "Film deleted successfully."),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn message(text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert("message".to_string(), text.into());
        Self::Message(map)
    }
}

impl From<Film> for Payload {
    fn from(film: Film) -> Self {
        Self::Film(film)
    }
}

impl From<Vec<Film>> for Payload {
    fn from(films: Vec<Film>) -> Self {
        Self::Films(films)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let film = Film::new("Dune")
            .with_id(7)
            .with_year(2021)
            .with_director("Villeneuve")
            .with_stars("Chalamet, Zendaya")
            .with_review("Great");

        assert_eq!(film.id, 7);
        assert_eq!(film.year, 2021);
        assert_eq!(film.director.as_deref(), Some("Villeneuve"));
        assert_eq!(film.stars.as_deref(), Some("Chalamet, Zendaya"));
        assert_eq!(film.review.as_deref(), Some("Great"));
    }

    #[test]
    fn test_validate_requires_title() {
        assert!(Film::default().validate().is_err());
        assert!(Film::new("   ").validate().is_err());
        assert!(Film::new("Alien").validate().is_ok());
    }

    #[test]
    fn test_default_is_zeroed() {
        let film = Film::default();
        assert_eq!(film.id, 0);
        assert_eq!(film.year, 0);
        assert!(film.title.is_none());
    }

    #[test]
    fn test_payload_conversions() {
        assert!(matches!(Payload::from(Film::new("Heat")), Payload::Film(_)));
        assert!(matches!(Payload::from(vec![Film::new("Heat")]), Payload::Films(ref f) if f.len() == 1));
    }
}
