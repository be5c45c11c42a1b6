// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate implements the grammar model of the bnfmerge grammar converter.
//!
//! A grammar passes through four stages:
//!
//! 1. [`builder`] turns [`raw`] records into a [`Grammar`] of unbound rules,
//! 2. [`normalize`] binds references and, for strict BNF, desugars the
//!    grammar into plain alternatives,
//! 3. [`filter`] optionally restricts it to the rules reachable from a root,
//! 4. [`render`] prints it in one of the supported [`Style`]s.

#[macro_use]
extern crate log;

pub mod ast;
pub mod builder;
pub mod config;
pub mod filter;
pub mod normalize;
pub mod raw;
pub mod render;

pub use crate::ast::{Grammar, Node, Nonterminal, ProductionRule};
pub use crate::config::{Config, Recursion, Style};
pub use crate::raw::{Element, RawGrammar};
pub use crate::render::{serialize, Render, Renderable};

use bnfmerge_common::errors::DiagEmitter;

/// Build and normalize the grammar described by `raw`.
pub fn convert(raw: &RawGrammar, config: &Config, diag: &dyn DiagEmitter) -> Grammar {
    let mut grammar = builder::build_grammar(raw, diag);
    normalize::normalize(&mut grammar, config, diag);
    grammar
}
