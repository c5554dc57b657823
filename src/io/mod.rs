pub mod resource_file;
pub mod task_file;

use std::path::Path;

use crate::error::{PlanError, Result};

/// Read a whole input file into memory.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Comma-separated, one record per line: no quoting, no header, fields
/// trimmed, ragged rows allowed.
fn line_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes())
}

/// A non-blank line: 1-based number, trimmed text and its fields.
struct Line<'a> {
    number: usize,
    text: &'a str,
    fields: Vec<String>,
}

/// Split every non-blank line of `content` into fields.
fn records(content: &str) -> Result<Vec<Line<'_>>> {
    let mut out = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let mut fields: Vec<String> = match line_reader(text).records().next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => Vec::new(),
        };
        // A trailing run of empty fields carries no data.
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        out.push(Line {
            number: i + 1,
            text,
            fields,
        });
    }
    Ok(out)
}

impl Line<'_> {
    fn error(&self, source: crate::error::FieldError) -> PlanError {
        PlanError::Format {
            line: self.number,
            text: self.text.to_string(),
            source,
        }
    }
}
