// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `X,Y,Label` annotations file.

use std::fmt::Write as _;

use pointmark_store::LabelSet;

use crate::{ExportError, ExportedPoint};

const HEADER: [&str; 3] = ["X", "Y", "Label"];

/// Writes records as an `X,Y,Label` CSV document.
///
/// Coordinates are truncated to whole pixels. Labels containing commas,
/// quotes or line breaks are quoted.
#[must_use]
pub fn write_csv(points: &[ExportedPoint]) -> String {
    let mut out = String::from("X,Y,Label\n");
    for p in points {
        let _ = writeln!(
            out,
            "{},{},{}",
            pixel(p.position[0]),
            pixel(p.position[1]),
            quoted(&p.label)
        );
    }
    out
}

/// Reads an `X,Y,Label` CSV document.
///
/// Blank lines are skipped. Labels are checked against `labels` and their
/// `label_index` is resolved from it.
///
/// # Errors
///
/// - [`ExportError::MissingHeader`] if the first non-blank line is not the header.
/// - [`ExportError::MalformedRow`] for rows without three fields, with
///   non-numeric coordinates, or with an unterminated quote.
/// - [`ExportError::UnknownLabel`] for labels the set does not accept.
pub fn read_csv(text: &str, labels: &LabelSet) -> Result<Vec<ExportedPoint>, ExportError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = rows.next().ok_or(ExportError::MissingHeader)?;
    let header = split_row(header).map_err(|reason| ExportError::MalformedRow {
        line: header_line,
        reason,
    })?;
    if header.len() != HEADER.len() || header.iter().zip(HEADER).any(|(a, b)| a.trim() != b) {
        return Err(ExportError::MissingHeader);
    }

    let mut points = Vec::new();
    for (line, row) in rows {
        let fields = split_row(row).map_err(|reason| ExportError::MalformedRow { line, reason })?;
        let [x, y, label] = <[String; 3]>::try_from(fields).map_err(|_| ExportError::MalformedRow {
            line,
            reason: "expected 3 fields",
        })?;
        let coordinate = |field: &str| {
            field
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(ExportError::MalformedRow {
                    line,
                    reason: "coordinate is not a number",
                })
        };
        let position = [coordinate(&x)?, coordinate(&y)?];
        if !labels.accepts(&label) {
            return Err(ExportError::UnknownLabel { line, label });
        }
        points.push(ExportedPoint {
            position,
            label_index: labels.index_of(&label),
            label,
        });
    }
    log::debug!("read {} annotation rows", points.len());
    Ok(points)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "truncating to whole pixels is the file format"
)]
fn pixel(value: f64) -> i64 {
    value.trunc() as i64
}

fn quoted(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn split_row(row: &str) -> Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = row.chars().peekable();
    let mut in_quotes = false;
    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quote");
    }
    fields.push(field);
    Ok(fields)
}
