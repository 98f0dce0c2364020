//! XML encoding for cache values.
//!
//! Values are written inside a `<value>` root element. Objects become child
//! elements named by key, arrays become repeated `<item>` children, null
//! becomes an empty element and every scalar becomes escaped text.
//!
//! Markup carries no types, so decoding yields strings for text content,
//! null for empty elements (`<a/>`), arrays for elements whose children are
//! all `<item>`, and objects for everything else. Repeated child names are
//! collected into an array. Empty arrays and objects come back as `""`.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{CacheError, Result, Value};

const ROOT: &str = "value";
const ITEM: &str = "item";

/// Serializes a value to XML bytes.
pub fn encode_xml(value: &Value) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    match value {
        Value::Text(text) => write_text(&mut writer, ROOT, text)?,
        Value::Integer(n) => write_text(&mut writer, ROOT, &n.to_string())?,
        Value::Float(f) => write_text(&mut writer, ROOT, &f.to_string())?,
        Value::Bytes(bytes) => write_text(&mut writer, ROOT, &STANDARD.encode(bytes))?,
        Value::Structured(value) => write_element(&mut writer, ROOT, value)?,
    }
    Ok(writer.into_inner())
}

/// Deserializes XML bytes into a generic structured value.
pub fn decode_xml(payload: &[u8]) -> Result<Value> {
    let document = std::str::from_utf8(payload).map_err(deserialization)?;
    let mut reader = Reader::from_str(document);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().map_err(deserialization)? {
            Event::Start(start) => stack.push(Frame::new(element_name(&start))),
            Event::Empty(start) => {
                attach(&mut stack, &mut root, element_name(&start), serde_json::Value::Null)?
            }
            Event::Text(text) => match stack.last_mut() {
                Some(frame) => frame
                    .text
                    .push_str(&text.unescape().map_err(deserialization)?),
                None if text.iter().all(u8::is_ascii_whitespace) => {}
                None => {
                    return Err(CacheError::Deserialization(
                        "text outside of the root element".to_string(),
                    ))
                }
            },
            Event::CData(data) => match stack.last_mut() {
                Some(frame) => frame.text.push_str(&String::from_utf8_lossy(&data)),
                None => {
                    return Err(CacheError::Deserialization(
                        "CDATA outside of the root element".to_string(),
                    ))
                }
            },
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    CacheError::Deserialization("unexpected closing tag".to_string())
                })?;
                let (name, value) = frame.finish();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if let Some(frame) = stack.last() {
        return Err(CacheError::Deserialization(format!(
            "unclosed element <{}>",
            frame.name
        )));
    }

    root.map(Value::Structured).ok_or_else(|| {
        CacheError::Deserialization("document has no root element".to_string())
    })
}

/// An element whose closing tag has not been read yet.
struct Frame {
    name: String,
    children: Vec<(String, serde_json::Value)>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
            text: String::new(),
        }
    }

    fn finish(self) -> (String, serde_json::Value) {
        if self.children.is_empty() {
            return (self.name, serde_json::Value::String(self.text));
        }

        if self.children.iter().all(|(name, _)| name == ITEM) {
            let items = self.children.into_iter().map(|(_, value)| value).collect();
            return (self.name, serde_json::Value::Array(items));
        }

        let mut grouped: BTreeMap<String, Vec<serde_json::Value>> = BTreeMap::new();
        for (name, value) in self.children {
            grouped.entry(name).or_default().push(value);
        }

        let fields = grouped
            .into_iter()
            .map(|(name, mut values)| {
                let value = if values.len() == 1 {
                    values.remove(0)
                } else {
                    serde_json::Value::Array(values)
                };
                (name, value)
            })
            .collect();

        (self.name, serde_json::Value::Object(fields))
    }
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<serde_json::Value>,
    name: String,
    value: serde_json::Value,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push((name, value));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(value);
            Ok(())
        }
        None => Err(CacheError::Deserialization(
            "document has more than one root element".to_string(),
        )),
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &serde_json::Value,
) -> Result<()> {
    match value {
        serde_json::Value::Null => write_event(writer, Event::Empty(BytesStart::new(name))),
        serde_json::Value::Bool(b) => write_text(writer, name, &b.to_string()),
        serde_json::Value::Number(n) => write_text(writer, name, &n.to_string()),
        serde_json::Value::String(s) => write_text(writer, name, s),
        serde_json::Value::Array(items) => {
            write_event(writer, Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_element(writer, ITEM, item)?;
            }
            write_event(writer, Event::End(BytesEnd::new(name)))
        }
        serde_json::Value::Object(fields) => {
            if fields.len() == 1 && fields.contains_key(ITEM) {
                return Err(CacheError::Serialization(format!(
                    "an object whose only key is {ITEM:?} cannot be told apart from an array"
                )));
            }
            write_event(writer, Event::Start(BytesStart::new(name)))?;
            for (key, field) in fields {
                if !is_xml_name(key) {
                    return Err(CacheError::Serialization(format!(
                        "object key {key:?} is not a valid XML element name"
                    )));
                }
                write_element(writer, key, field)?;
            }
            write_event(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Element names must start with a letter or underscore and contain only
/// letters, digits, `-`, `_` and `.`.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn deserialization(err: impl std::fmt::Display) -> CacheError {
    CacheError::Deserialization(err.to_string())
}
