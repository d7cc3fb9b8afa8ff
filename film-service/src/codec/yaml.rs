//! YAML codec

use super::{Codec, CodecError, DecodeOutcome, Format};
use crate::model::Payload;

/// YAML codec; a single film is a mapping, a list is a sequence of mappings
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, payload: &Payload) -> Result<String, CodecError> {
        let encoded = match payload {
            Payload::Film(film) => serde_yaml::to_string(film),
            Payload::Films(films) => serde_yaml::to_string(films),
            Payload::Message(map) => serde_yaml::to_string(map),
        };
        encoded.map_err(|e| CodecError::encode(Format::Yaml, e))
    }

    fn decode(&self, input: &str) -> DecodeOutcome {
        match serde_yaml::from_str(input) {
            Ok(film) => DecodeOutcome::Entity(film),
            Err(e) => {
                tracing::warn!(error = %e, "YAML body could not be read as a film");
                DecodeOutcome::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Film;

    #[test]
    fn test_encode_film_mapping() {
        let body = YamlCodec
            .encode(&Payload::Film(Film::new("Alien").with_id(1).with_year(1979)))
            .unwrap();
        assert_eq!(body, "id: 1\ntitle: Alien\nyear: 1979\n");
    }

    #[test]
    fn test_encode_collection_is_sequence() {
        let body = YamlCodec
            .encode(&Payload::Films(vec![Film::new("A"), Film::new("B")]))
            .unwrap();
        assert_eq!(body.matches("- id: 0").count(), 2);
    }

    #[test]
    fn test_decode_mapping() {
        let film = YamlCodec
            .decode("title: Arrival\nyear: 2016\ndirector: Villeneuve\n")
            .into_entity()
            .unwrap();
        assert_eq!(film.title.as_deref(), Some("Arrival"));
        assert_eq!(film.year, 2016);
        assert_eq!(film.director.as_deref(), Some("Villeneuve"));
    }

    #[test]
    fn test_round_trip_keeps_ambiguous_strings() {
        let film = Film::new("yes")
            .with_id(12)
            .with_year(1999)
            .with_director("1999")
            .with_stars("null, ~, true")
            .with_review("  key: value  ");
        let body = YamlCodec.encode(&Payload::Film(film.clone())).unwrap();
        assert_eq!(YamlCodec.decode(&body), DecodeOutcome::Entity(film));
    }

    #[test]
    fn test_decode_malformed_is_absent() {
        assert_eq!(YamlCodec.decode("title: [unclosed"), DecodeOutcome::Absent);
        assert_eq!(YamlCodec.decode("year: soon"), DecodeOutcome::Absent);
        assert_eq!(YamlCodec.decode("- just\n- a list\n"), DecodeOutcome::Absent);
    }
}
