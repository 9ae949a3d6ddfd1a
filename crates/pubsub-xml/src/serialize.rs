//! Notification XML rendering.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::error::XmlError;
use crate::model::{NotificationConfiguration, TopicConfiguration};

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Render a configuration as a complete XML document.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml(config: &NotificationConfiguration) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("NotificationConfiguration")
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(|w| {
            for tc in &config.topic_configurations {
                write_topic_configuration(w, tc)?;
            }
            Ok::<(), io::Error>(())
        })?;

    Ok(buf)
}

fn write_topic_configuration<W: Write>(
    writer: &mut Writer<W>,
    tc: &TopicConfiguration,
) -> io::Result<()> {
    writer
        .create_element("TopicConfiguration")
        .write_inner_content(|w| {
            if let Some(id) = tc.id.as_deref() {
                write_text_element(w, "Id", id)?;
            }
            write_text_element(w, "Topic", &tc.topic_arn)?;
            for event in &tc.events {
                write_text_element(w, "Event", event)?;
            }
            Ok::<(), io::Error>(())
        })?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}
