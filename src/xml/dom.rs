// Copyright (c) 2016-2021 Fabian Schuiki

//! A minimal document tree on top of the quick-xml event reader.
//!
//! BNF documents are mixed content: text between elements is significant. The
//! tree therefore keeps text and elements interleaved in document order.

use crate::error::XmlError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// An element with its attributes and content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Content>,
}

/// A piece of element content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    fn from_start(start: &BytesStart, position: u64) -> Result<XmlElement, XmlError> {
        let syntax = |message: String| XmlError::Syntax { position, message };
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = vec![];
        for attr in start.attributes() {
            let attr = attr.map_err(|e| syntax(format!("bad attribute in <{}>: {}", tag, e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| syntax(format!("bad value of `{}` in <{}>: {}", key, tag, e)))?
                .into_owned();
            attrs.push((key, value));
        }
        Ok(XmlElement {
            tag,
            attrs,
            children: vec![],
        })
    }

    /// The value of an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> + '_ {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }

    /// The first child element with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.tag == tag)
    }

    /// The concatenated text directly inside this element.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Content::Text(t) => Some(t.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }
}

/// Parse a document and return its root element.
pub fn parse(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = vec![];
    let mut root = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| XmlError::Syntax {
            position,
            message: e.to_string(),
        })?;
        match event {
            Event::Start(ref e) => stack.push(XmlElement::from_start(e, position)?),
            Event::Empty(ref e) => {
                let elem = XmlElement::from_start(e, position)?;
                close(&mut stack, &mut root, elem);
            }
            Event::End(_) => match stack.pop() {
                Some(elem) => close(&mut stack, &mut root, elem),
                None => {
                    return Err(XmlError::Syntax {
                        position,
                        message: "unexpected closing tag".into(),
                    })
                }
            },
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|e| XmlError::Syntax {
                    position,
                    message: e.to_string(),
                })?;
                if let Some(top) = stack.last_mut() {
                    top.children.push(Content::Text(text.into_owned()));
                }
            }
            Event::CData(ref e) => {
                if let Some(top) = stack.last_mut() {
                    let bytes: &[u8] = e;
                    let text = String::from_utf8_lossy(bytes).into_owned();
                    top.children.push(Content::Text(text));
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Syntax {
            position: reader.buffer_position() as u64,
            message: format!("unclosed element <{}>", open.tag),
        });
    }
    root.ok_or_else(|| XmlError::Missing {
        kind: "element",
        name: "root".into(),
    })
}

/// Attach a finished element to its parent, or make it the root.
fn close(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, elem: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Content::Element(elem)),
        None => {
            if root.is_none() {
                *root = Some(elem);
            }
        }
    }
}
