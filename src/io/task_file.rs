//! Task file format, one task per line:
//!
//! ```text
//! <id>,<title>,<start yyyyMMdd+HHmm>,<end yyyyMMdd+HHmm>[,<dep id>,...]
//! ```

use super::{records, Line};
use crate::error::{FieldError, Result};
use crate::model::datetime::parse_datetime;
use crate::model::Task;

const MIN_FIELDS: usize = 4;

/// Parse a whole task file. Fails on the first malformed line and returns
/// nothing in that case.
pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    records(content)?
        .iter()
        .map(|line| parse_task_line(line).map_err(|e| line.error(e)))
        .collect()
}

fn parse_task_line(line: &Line<'_>) -> std::result::Result<Task, FieldError> {
    let fields = &line.fields;
    if fields.len() < MIN_FIELDS {
        return Err(FieldError::MissingFields {
            expected: MIN_FIELDS,
            found: fields.len(),
        });
    }

    let id = parse_id(&fields[0])?;
    let title = fields[1].as_str();
    let start = parse_datetime(&fields[2])?;
    let end = parse_datetime(&fields[3])?;

    let dependencies = fields[MIN_FIELDS..]
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| parse_id(f))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Task::new(id, title, start, end, dependencies))
}

fn parse_id(s: &str) -> std::result::Result<i32, FieldError> {
    s.parse()
        .map_err(|_| FieldError::InvalidInteger(s.to_string()))
}
