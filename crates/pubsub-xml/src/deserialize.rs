//! Notification XML parsing.
//!
//! Element order inside a `TopicConfiguration` is not significant and unknown
//! elements (for example `Filter`) are skipped. Events may appear either as
//! repeated `<Event>` children or wrapped in an `<Events>` container.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};

use crate::error::XmlError;
use crate::model::{NotificationConfiguration, TopicConfiguration};

/// Parse a `NotificationConfiguration` document.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed, has no root element, or the
/// root is not a `NotificationConfiguration`.
pub fn from_xml(xml: &[u8]) -> Result<NotificationConfiguration, XmlError> {
    let mut reader = Reader::from_reader(xml);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag_name = tag_str(name.as_ref())?;
                if tag_name != "NotificationConfiguration" {
                    return Err(XmlError::UnexpectedElement(tag_name.to_owned()));
                }
                return read_notification_configuration(&mut reader);
            }
            Event::Empty(e) => {
                let name = e.name();
                let tag_name = tag_str(name.as_ref())?;
                if tag_name != "NotificationConfiguration" {
                    return Err(XmlError::UnexpectedElement(tag_name.to_owned()));
                }
                return Ok(NotificationConfiguration::default());
            }
            Event::Eof => {
                return Err(XmlError::MissingElement("root element".to_owned()));
            }
            // Declaration, comments, processing instructions.
            _ => {}
        }
    }
}

fn tag_str(raw: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(raw).map_err(|e| XmlError::ParseError(e.to_string()))
}

fn read_notification_configuration(
    reader: &mut Reader<&[u8]>,
) -> Result<NotificationConfiguration, XmlError> {
    let mut topic_configurations = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match tag_str(name.as_ref())? {
                    "TopicConfiguration" => {
                        topic_configurations.push(read_topic_configuration(reader)?);
                    }
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in NotificationConfiguration".to_owned(),
                ));
            }
            _ => {}
        }
    }

    Ok(NotificationConfiguration {
        topic_configurations,
    })
}

fn read_topic_configuration(reader: &mut Reader<&[u8]>) -> Result<TopicConfiguration, XmlError> {
    let mut id = None;
    let mut topic_arn = None;
    let mut events = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match tag_str(name.as_ref())? {
                    "Id" => id = Some(read_text_content(reader)?),
                    "Topic" | "TopicArn" => topic_arn = Some(read_text_content(reader)?),
                    "Event" => events.push(read_text_content(reader)?),
                    "Events" => read_events(reader, &mut events)?,
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in TopicConfiguration".to_owned(),
                ));
            }
            _ => {}
        }
    }

    Ok(TopicConfiguration {
        id,
        topic_arn: topic_arn.ok_or_else(|| XmlError::MissingElement("Topic".to_owned()))?,
        events,
    })
}

fn read_events(reader: &mut Reader<&[u8]>, events: &mut Vec<String>) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                if tag_str(name.as_ref())? == "Event" {
                    events.push(read_text_content(reader)?);
                } else {
                    skip_element(reader)?;
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in Events".to_owned(),
                ));
            }
            _ => {}
        }
    }
}

/// Read the text content of the current element and consume its end tag.
///
/// Whitespace is kept as written; entity and character references are
/// resolved in place.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::CData(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::GeneralRef(e) => resolve_reference(&e, &mut text)?,
            Event::End(_) => return Ok(text),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_owned(),
                ));
            }
            _ => {}
        }
    }
}

/// Append the text a `&name;` or `&#nn;` reference stands for.
fn resolve_reference(reference: &BytesRef<'_>, text: &mut String) -> Result<(), XmlError> {
    if let Some(ch) = reference.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = reference
        .decode()
        .map_err(|err| XmlError::ParseError(err.to_string()))?;
    let value = resolve_predefined_entity(&name)
        .ok_or_else(|| XmlError::ParseError(format!("unknown entity &{name};")))?;
    text.push_str(value);
    Ok(())
}

/// Skip over an element and all its children.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_owned(),
                ));
            }
            _ => {}
        }
    }
}
