// Copyright (c) 2016-2021 Fabian Schuiki

use std::path::PathBuf;
use thiserror::Error;

/// An error encountered while reading BNF XML input.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// A required element or attribute is absent.
    #[error("missing {kind} {name}")]
    Missing { kind: &'static str, name: String },

    /// An error within a specific file.
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        source: Box<XmlError>,
    },
}

impl XmlError {
    /// Attach the file the error occurred in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> XmlError {
        XmlError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
