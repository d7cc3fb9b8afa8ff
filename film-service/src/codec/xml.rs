//! XML codec
//!
//! A single film is rooted at `<film>`, a list at `<films>` with one `<film>`
//! child per entry, and a message map at `<response>`. Output is indented and
//! starts with an XML declaration.
//!
//! Decoding walks reader events instead of going through serde so that
//! field text keeps its leading and trailing whitespace.

use quick_xml::{events::Event, Reader};
use serde::Serialize;

use super::{Codec, CodecError, DecodeOutcome, Format};
use crate::model::{Film, Films, Payload};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Root element for a single film
pub const FILM_ROOT: &str = "film";
/// Root element for a film list
pub const FILMS_ROOT: &str = "films";
/// Root element for a message map
pub const MESSAGE_ROOT: &str = "response";

/// XML codec; malformed input is a fatal decode error
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl XmlCodec {
    fn render<T: Serialize>(value: &T, root: &str) -> Result<String, CodecError> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(root))
            .map_err(|e| CodecError::encode(Format::Xml, e))?;
        serializer.indent(' ', 2);
        value
            .serialize(serializer)
            .map_err(|e| CodecError::encode(Format::Xml, e))?;
        Ok(format!("{DECLARATION}\n{body}\n"))
    }

    /// Read a flat `<film>` element; the root name itself is not checked
    fn read_film(input: &str) -> Result<Film, String> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut film = Film::default();
        let mut depth = 0usize;
        let mut field = String::new();
        let mut text = String::new();
        let mut closed = false;

        loop {
            match reader.read_event().map_err(|e| e.to_string())? {
                Event::Start(start) => {
                    if closed {
                        return Err("more than one root element".to_string());
                    }
                    depth += 1;
                    match depth {
                        1 => {}
                        2 => {
                            field = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                            text.clear();
                        }
                        _ => return Err(format!("unexpected element inside <{field}>")),
                    }
                }
                Event::Empty(start) => match depth {
                    0 if !closed => closed = true,
                    1 => {
                        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                        assign(&mut film, &name, "")?;
                    }
                    _ => return Err("unexpected empty element".to_string()),
                },
                Event::Text(t) if depth == 2 => {
                    text.push_str(&t.unescape().map_err(|e| e.to_string())?);
                }
                Event::CData(c) if depth == 2 => {
                    text.push_str(&c.decode().map_err(|e| e.to_string())?);
                }
                Event::End(_) => {
                    if depth == 2 {
                        assign(&mut film, &field, &text)?;
                    }
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| "unmatched closing tag".to_string())?;
                    if depth == 0 {
                        closed = true;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if closed {
            Ok(film)
        } else {
            Err("document ended before the film element was closed".to_string())
        }
    }
}

fn assign(film: &mut Film, field: &str, value: &str) -> Result<(), String> {
    match field {
        "id" => film.id = parse_number(field, value)?,
        "year" => film.year = parse_number(field, value)?,
        "title" => film.title = Some(value.to_string()),
        "director" => film.director = Some(value.to_string()),
        "stars" => film.stars = Some(value.to_string()),
        "review" => film.review = Some(value.to_string()),
        other => tracing::debug!(element = other, "ignoring unknown film element"),
    }
    Ok(())
}

fn parse_number(field: &str, value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number for {field}: '{value}'"))
}

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn encode(&self, payload: &Payload) -> Result<String, CodecError> {
        match payload {
            Payload::Film(film) => Self::render(film, FILM_ROOT),
            Payload::Films(films) => Self::render(&Films::new(films.clone()), FILMS_ROOT),
            Payload::Message(map) => Self::render(map, MESSAGE_ROOT),
        }
    }

    fn decode(&self, input: &str) -> DecodeOutcome {
        match Self::read_film(input) {
            Ok(film) => DecodeOutcome::Entity(film),
            Err(e) => {
                tracing::error!(error = %e, "XML body could not be read as a film");
                DecodeOutcome::Fatal(CodecError::decode(Format::Xml, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_film() {
        let film = Film::new("Dune").with_id(3).with_year(2021);
        let body = XmlCodec.encode(&Payload::Film(film)).unwrap();

        assert!(body.starts_with("<?xml version=\"1.0\""));
        assert!(body.contains("<film>"));
        assert!(body.contains("<id>3</id>"));
        assert!(body.contains("<title>Dune</title>"));
        assert!(body.contains("<year>2021</year>"));
        assert!(!body.contains("<director>"));
        assert!(body.trim_end().ends_with("</film>"));
    }

    #[test]
    fn test_encode_collection() {
        let body = XmlCodec
            .encode(&Payload::Films(vec![Film::new("A"), Film::new("B")]))
            .unwrap();

        assert!(body.contains("<films>"));
        assert_eq!(body.matches("<film>").count(), 2);
        assert!(body.trim_end().ends_with("</films>"));
    }

    #[test]
    fn test_encode_message() {
        let body = XmlCodec.encode(&Payload::message("ok")).unwrap();
        assert!(body.contains("<response>"));
        assert!(body.contains("<message>ok</message>"));
    }

    #[test]
    fn test_decode_film() {
        let input = "<film><title>Alien</title><year>1979</year><director>Scott</director></film>";
        let film = XmlCodec.decode(input).into_entity().unwrap();
        assert_eq!(film.title.as_deref(), Some("Alien"));
        assert_eq!(film.year, 1979);
        assert_eq!(film.director.as_deref(), Some("Scott"));
        assert_eq!(film.id, 0);
    }

    #[test]
    fn test_decode_own_output() {
        let film = Film::new("Heat").with_id(2).with_year(1995).with_stars("Pacino, De Niro");
        let body = XmlCodec.encode(&Payload::Film(film.clone())).unwrap();
        assert_eq!(XmlCodec.decode(&body), DecodeOutcome::Entity(film));
    }

    #[test]
    fn test_decode_keeps_edge_whitespace() {
        let film = Film::new("  Padded  ")
            .with_id(4)
            .with_review(" spaced review ")
            .with_director("");
        let body = XmlCodec.encode(&Payload::Film(film.clone())).unwrap();
        assert_eq!(XmlCodec.decode(&body), DecodeOutcome::Entity(film));
    }

    #[test]
    fn test_decode_escapes_and_cdata() {
        let input = "<film><title>Tom &amp; Jerry</title><review><![CDATA[ <b>fun</b> ]]></review><rating>5</rating></film>";
        let film = XmlCodec.decode(input).into_entity().unwrap();
        assert_eq!(film.title.as_deref(), Some("Tom & Jerry"));
        assert_eq!(film.review.as_deref(), Some(" <b>fun</b> "));
    }

    #[test]
    fn test_decode_nested_field_is_fatal() {
        let outcome = XmlCodec.decode("<films><film><title>A</title></film></films>");
        assert!(matches!(outcome, DecodeOutcome::Fatal(_)));
    }

    #[test]
    fn test_decode_malformed_is_fatal() {
        let outcome = XmlCodec.decode("<film><title>Dune</title>");
        assert!(matches!(outcome, DecodeOutcome::Fatal(ref e) if e.format() == Format::Xml));

        let outcome = XmlCodec.decode("<film><year>soon</year></film>");
        assert!(matches!(outcome, DecodeOutcome::Fatal(_)));
    }
}
