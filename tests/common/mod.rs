// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

//! Utilities for grammar conversion tests.

pub use bnfmerge::errors::DiagCollector;
pub use bnfmerge::grammar::*;

/// A small excerpt in the shape of the SQL standard's BNF XML.
pub const COLUMNS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sql>
  <BNFdef name="digit">
    <rhs><alt><kw>0</kw></alt><alt><kw>1</kw></alt><alt><kw>2</kw></alt></rhs>
  </BNFdef>
  <BNFdef name="unsigned integer">
    <rhs><BNF name="digit"/><ellipsis/></rhs>
  </BNFdef>
  <BNFdef name="column list">
    <rhs>
      <kw>(</kw> <BNF name="column name"/>
      <opt><kw>,</kw> <BNF name="column name"/></opt><ellipsis/>
      <kw>)</kw>
    </rhs>
  </BNFdef>
  <BNFdef name="column name">
    <rhs><seeTheRules/></rhs>
  </BNFdef>
</sql>
"#;

/// Convert a document into a normalized grammar.
pub fn convert_str(input: &str, config: &Config, diag: &DiagCollector) -> Grammar {
    let raw = bnfmerge::xml::read_str(input).expect("test input is well-formed");
    convert(&raw, config, diag)
}

/// Convert a document and render it.
pub fn render_str(input: &str, config: &Config) -> (String, DiagCollector) {
    let diag = DiagCollector::new();
    let grammar = convert_str(input, config, &diag);
    (serialize(&grammar, config), diag)
}
