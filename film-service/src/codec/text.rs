//! Line-oriented plain text codec
//!
//! A film renders as six `Label: value` lines. Lists render each film
//! followed by a `---` separator line. Unset values render as empty strings.

use std::fmt::Write;

use super::{Codec, CodecError, DecodeOutcome, Format};
use crate::model::{Film, Payload};

const SEPARATOR: &str = "---";

/// Plain text codec; decoding never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

fn write_film(out: &mut String, film: &Film) -> std::fmt::Result {
    writeln!(out, "Id: {}", film.id)?;
    writeln!(out, "Title: {}", film.title.as_deref().unwrap_or_default())?;
    writeln!(out, "Year: {}", film.year)?;
    writeln!(out, "Director: {}", film.director.as_deref().unwrap_or_default())?;
    writeln!(out, "Stars: {}", film.stars.as_deref().unwrap_or_default())?;
    writeln!(out, "Review: {}", film.review.as_deref().unwrap_or_default())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Codec for TextCodec {
    fn format(&self) -> Format {
        Format::Text
    }

    fn encode(&self, payload: &Payload) -> Result<String, CodecError> {
        let mut out = String::new();
        let written = match payload {
            Payload::Film(film) => write_film(&mut out, film),
            Payload::Films(films) => films.iter().try_for_each(|film| {
                write_film(&mut out, film)?;
                writeln!(out, "{SEPARATOR}")
            }),
            Payload::Message(map) => map
                .iter()
                .try_for_each(|(key, value)| writeln!(out, "{key}: {value}")),
        };
        written.map_err(|e| CodecError::encode(Format::Text, e))?;
        Ok(out)
    }

    /// Reads `key: value` lines; keys are case-insensitive
    ///
    /// Lines without a colon, unknown keys and non-numeric `id`/`year`
    /// values are skipped. An empty value leaves the field unset.
    fn decode(&self, input: &str) -> DecodeOutcome {
        let mut film = Film::default();

        for line in input.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "id" => match value.parse() {
                    Ok(id) => film.id = id,
                    Err(_) => tracing::debug!(value, "ignoring non-numeric id"),
                },
                "title" => film.title = non_empty(value),
                "year" => match value.parse() {
                    Ok(year) => film.year = year,
                    Err(_) => tracing::debug!(value, "ignoring non-numeric year"),
                },
                "director" => film.director = non_empty(value),
                "stars" => film.stars = non_empty(value),
                "review" => film.review = non_empty(value),
                _ => {}
            }
        }

        DecodeOutcome::Entity(film)
    }
}
