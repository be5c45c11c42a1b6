// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate contains the fundamental utilities used by the rest of the
//! bnfmerge grammar converter.

pub mod errors;
pub mod name;

pub use self::errors::{DiagBuilder, DiagCollector, DiagEmitter, Severity, StderrEmitter};
