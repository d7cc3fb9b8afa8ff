//! JSON codec

use super::{Codec, CodecError, DecodeOutcome, Format};
use crate::model::Payload;

/// Field-for-field JSON mapping; unset optional fields are omitted
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, payload: &Payload) -> Result<String, CodecError> {
        let encoded = match payload {
            Payload::Film(film) => serde_json::to_string(film),
            Payload::Films(films) => serde_json::to_string(films),
            Payload::Message(map) => serde_json::to_string(map),
        };
        encoded.map_err(|e| CodecError::encode(Format::Json, e))
    }

    fn decode(&self, input: &str) -> DecodeOutcome {
        match serde_json::from_str(input) {
            Ok(film) => DecodeOutcome::Entity(film),
            Err(e) => {
                tracing::warn!(error = %e, "JSON body could not be read as a film");
                DecodeOutcome::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Film;

    fn dune() -> Film {
        Film::new("Dune")
            .with_id(1)
            .with_year(2021)
            .with_director("Villeneuve")
            .with_stars("Chalamet")
            .with_review("Great")
    }

    #[test]
    fn test_encode_film_in_field_order() {
        let body = JsonCodec.encode(&Payload::Film(dune())).unwrap();
        assert_eq!(
            body,
            r#"{"id":1,"title":"Dune","year":2021,"director":"Villeneuve","stars":"Chalamet","review":"Great"}"#
        );
    }

    #[test]
    fn test_encode_omits_unset_fields() {
        let body = JsonCodec.encode(&Payload::Film(Film::new("Heat"))).unwrap();
        assert_eq!(body, r#"{"id":0,"title":"Heat","year":0}"#);
    }

    #[test]
    fn test_encode_collection_and_message() {
        let body = JsonCodec
            .encode(&Payload::Films(vec![Film::new("A"), Film::new("B")]))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));

        let body = JsonCodec.encode(&Payload::message("done")).unwrap();
        assert_eq!(body, r#"{"message":"done"}"#);
    }

    #[test]
    fn test_decode_partial_body() {
        let outcome = JsonCodec.decode(r#"{"title":"Alien","year":1979,"unknown":true}"#);
        let film = outcome.into_entity().unwrap();
        assert_eq!(film.title.as_deref(), Some("Alien"));
        assert_eq!(film.year, 1979);
        assert!(film.director.is_none());
    }

    #[test]
    fn test_decode_malformed_is_absent() {
        assert_eq!(JsonCodec.decode("{\"title\": "), DecodeOutcome::Absent);
        assert_eq!(JsonCodec.decode(""), DecodeOutcome::Absent);
        assert_eq!(JsonCodec.decode("null"), DecodeOutcome::Absent);
        assert_eq!(JsonCodec.decode(r#"{"year":"soon"}"#), DecodeOutcome::Absent);
    }

    #[test]
    fn test_round_trip() {
        let body = JsonCodec.encode(&Payload::Film(dune())).unwrap();
        assert_eq!(JsonCodec.decode(&body), DecodeOutcome::Entity(dune()));
    }
}
