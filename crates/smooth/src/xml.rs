//! Conversion of manifest XML into an [`AttributeTree`].
//!
//! Attributes and child elements both become keys of the element object. An element that
//! occurs more than once under the same parent becomes an array, in document order, so
//! consumers must go through [`one_or_many`](crate::tree::one_or_many).
//!
//! ```xml
//! <StreamIndex Type="video">
//!   <QualityLevel Bitrate="2962000" />
//!   <c t="0" d="20020000" />
//! </StreamIndex>
//! ```
//!
//! becomes
//!
//! ```json
//! {
//!   "StreamIndex": {
//!     "Type": "video",
//!     "QualityLevel": { "Bitrate": 2962000 },
//!     "c": { "t": 0, "d": 20020000 }
//!   }
//! }
//! ```

use std::sync::LazyLock;

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use regex::Regex;
use serde_json::{Number, Value};

use crate::tree::{AttributeTree, Object};

pub const TEXT_KEY: &str = "#text";

static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0|[1-9]\d*)$").unwrap());
static FLOAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0|[1-9]\d*)\.\d+$").unwrap());

pub trait XmlAdapter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn parse(&self, xml: &str) -> Result<AttributeTree, Self::Error>;
}

impl<X> XmlAdapter for &X
where
    X: XmlAdapter + ?Sized,
{
    type Error = X::Error;

    fn parse(&self, xml: &str) -> Result<AttributeTree, Self::Error> {
        (**self).parse(xml)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum XmlError {
    #[error("Non XML value was provided")]
    NotXml,

    #[error("Unclosed element: {0}")]
    Unclosed(String),

    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),
}

#[derive(Debug, Clone, Copy)]
pub struct QuickXmlAdapter {
    /// Convert integer, float and boolean attribute values into JSON numbers and booleans.
    pub parse_attribute_values: bool,
}

impl Default for QuickXmlAdapter {
    fn default() -> Self {
        Self {
            parse_attribute_values: true,
        }
    }
}

struct Element {
    name: String,
    object: Object,
    text: Option<String>,
}

impl Element {
    fn into_value(self) -> Value {
        match (self.object.is_empty(), self.text) {
            (true, text) => Value::String(text.unwrap_or_default()),
            (false, None) => Value::Object(self.object),
            (false, Some(text)) => {
                let mut object = self.object;
                object.insert(TEXT_KEY.to_string(), Value::String(text));
                Value::Object(object)
            }
        }
    }
}

impl QuickXmlAdapter {
    fn element(&self, start: &BytesStart<'_>) -> Result<Element, XmlError> {
        let mut object = Object::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?;
            let value = if self.parse_attribute_values {
                scalar(&value)
            } else {
                Value::String(value.into_owned())
            };
            object.insert(key, value);
        }

        Ok(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            object,
            text: None,
        })
    }
}

impl XmlAdapter for QuickXmlAdapter {
    type Error = XmlError;

    fn parse(&self, xml: &str) -> Result<AttributeTree, Self::Error> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut document = Object::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(self.element(&start)?),
                Event::Empty(start) => {
                    let element = self.element(&start)?;
                    let parent = stack.last_mut().map_or(&mut document, |e| &mut e.object);
                    insert(parent, element.name.clone(), element.into_value());
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(XmlError::NotXml)?;
                    let parent = stack.last_mut().map_or(&mut document, |e| &mut e.object);
                    insert(parent, element.name.clone(), element.into_value());
                }
                Event::Text(text) => {
                    if let Some(element) = stack.last_mut() {
                        append_text(element, &text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(element) = stack.last_mut() {
                        append_text(element, &String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                // declarations, comments, processing instructions and doctype
                _ => {}
            }
        }

        if let Some(element) = stack.pop() {
            return Err(XmlError::Unclosed(element.name));
        }
        if document.is_empty() {
            return Err(XmlError::NotXml);
        }

        Ok(Value::Object(document))
    }
}

fn append_text(element: &mut Element, text: &str) {
    match &mut element.text {
        Some(existing) => existing.push_str(text),
        None => element.text = Some(text.to_string()),
    }
}

/// Inserts a child, turning repeated siblings into an array.
fn insert(object: &mut Object, name: String, value: Value) {
    match object.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            object.insert(name, value);
        }
    }
}

/// Leading zeros (hex codec data) and integers wider than 64 bits stay strings.
fn scalar(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if INTEGER_REGEX.is_match(raw) {
        if let Ok(value) = raw.parse::<u64>() {
            return Value::Number(value.into());
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Value::Number(value.into());
        }
    } else if FLOAT_REGEX.is_match(raw) {
        if let Some(value) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(value);
        }
    }

    Value::String(raw.to_string())
}
