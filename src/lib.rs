// Copyright (c) 2016-2021 Fabian Schuiki

//! A converter that merges BNF grammar fragments into a single grammar.

// Re-export everything from the common crate.
pub extern crate bnfmerge_common as common;
pub use crate::common::*;

// Pull in subcrates.
pub extern crate bnfmerge_grammar as grammar;
pub extern crate bnfmerge_xml as xml;

use crate::grammar::{Config, Grammar};
use std::path::Path;

/// Read BNF XML files and convert them into a normalized grammar.
pub fn load<I>(paths: I, config: &Config, diag: &dyn DiagEmitter) -> Result<Grammar, xml::XmlError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let raw = xml::read_files(paths)?;
    Ok(grammar::convert(&raw, config, diag))
}
