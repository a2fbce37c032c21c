// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

/// Error returned when decoding exported annotations.
#[derive(Debug)]
pub enum ExportError {
    /// The JSON payload could not be encoded or decoded.
    Json(serde_json::Error),
    /// The CSV text does not start with an `X,Y,Label` header.
    MissingHeader,
    /// A CSV row does not have the expected shape.
    MalformedRow {
        /// 1-based line number of the row.
        line: usize,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A CSV row names a label outside the label set.
    UnknownLabel {
        /// 1-based line number of the row.
        line: usize,
        /// The offending label.
        label: String,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid annotation JSON: {err}"),
            Self::MissingHeader => f.write_str("annotation CSV is missing its X,Y,Label header"),
            Self::MalformedRow { line, reason } => {
                write!(f, "malformed annotation CSV row on line {line}: {reason}")
            }
            Self::UnknownLabel { line, label } => {
                write!(f, "unknown label {label:?} on line {line}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
