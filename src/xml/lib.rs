// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate reads BNF grammar fragments from XML documents.
//!
//! A document has a root element containing `BNFdef` elements. Each names a
//! nonterminal and holds its definition in an `rhs` child:
//!
//! ```xml
//! <root>
//!   <BNFdef name="digit">
//!     <rhs><alt><kw>0</kw></alt><alt><kw>1</kw></alt></rhs>
//!   </BNFdef>
//! </root>
//! ```

#[macro_use]
extern crate log;

pub mod dom;
mod error;

pub use crate::error::XmlError;

use crate::dom::{Content, XmlElement};
use bnfmerge_grammar::raw::{Element, RawGrammar};
use std::path::Path;

/// Read the definitions from a document.
pub fn read_str(input: &str) -> Result<RawGrammar, XmlError> {
    let root = dom::parse(input)?;
    let mut raw = RawGrammar::new();
    for def in root.elements().filter(|e| e.tag == "BNFdef") {
        let name = def.attr("name").ok_or_else(|| XmlError::Missing {
            kind: "attribute",
            name: "`name` of <BNFdef>".into(),
        })?;
        let rhs = def.child("rhs").ok_or_else(|| XmlError::Missing {
            kind: "element",
            name: format!("<rhs> of <BNFdef name=\"{}\">", name),
        })?;
        raw.add_definition(name, convert_content(&rhs.children)?);
    }
    Ok(raw)
}

/// Read the definitions from a file.
pub fn read_file(path: impl AsRef<Path>) -> Result<RawGrammar, XmlError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = read_str(&input).map_err(|e| e.in_file(path))?;
    debug!("Read {} definitions from {}", raw.len(), path.display());
    Ok(raw)
}

/// Read and merge the definitions from several files, in order.
pub fn read_files<I>(paths: I) -> Result<RawGrammar, XmlError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut raw = RawGrammar::new();
    for path in paths {
        raw.merge(read_file(path)?);
    }
    info!("Read {} nonterminal definitions", raw.len());
    Ok(raw)
}

fn convert_content(content: &[Content]) -> Result<Vec<Element>, XmlError> {
    let mut elements = vec![];
    for c in content {
        match c {
            Content::Text(text) if text.trim().is_empty() => (),
            Content::Text(text) => elements.push(Element::Text(text.clone())),
            Content::Element(elem) => elements.push(convert_element(elem)?),
        }
    }
    Ok(elements)
}

fn convert_element(elem: &XmlElement) -> Result<Element, XmlError> {
    Ok(match elem.tag.as_str() {
        "BNF" => match elem.attr("name") {
            Some(name) => Element::Reference(name.to_string()),
            None => {
                return Err(XmlError::Missing {
                    kind: "attribute",
                    name: "`name` of <BNF>".into(),
                })
            }
        },
        "kw" | "sjkw" | "mono" | "sym" => Element::Keyword(elem.text()),
        "terminalsymbol" => Element::Terminal(elem.text()),
        "seeTheRules" => Element::SeeTheRules,
        "ellipsis" => Element::Ellipsis,
        "opt" => Element::Optional(convert_content(&elem.children)?),
        "group" => Element::Group(convert_content(&elem.children)?),
        "alt" | "minialt" => Element::Alternation(convert_content(&elem.children)?),
        other => {
            warn!("ignoring unsupported element <{}>", other);
            Element::Text(String::new())
        }
    })
}
