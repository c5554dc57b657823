//! Resource file format, one resource per line:
//!
//! ```text
//! <name>[,<task id>:<percentage>]*
//! ```
//!
//! Fields without a `:` are ignored, as are fields that do not split into
//! exactly two parts. A two-part field must hold two integers.

use super::records;
use crate::error::{FieldError, Result};
use crate::model::{Resource, TaskId};

pub fn parse_resources(content: &str) -> Result<Vec<Resource>> {
    records(content)?
        .iter()
        .map(|line| parse_resource_line(&line.fields).map_err(|e| line.error(e)))
        .collect()
}

fn parse_resource_line(fields: &[String]) -> std::result::Result<Resource, FieldError> {
    let Some((name, rest)) = fields.split_first() else {
        return Err(FieldError::MissingFields {
            expected: 1,
            found: 0,
        });
    };
    let mut resource = Resource::new(name.as_str());
    for field in rest {
        if let Some((task_id, pct)) = parse_allocation(field)? {
            resource.add_allocation(task_id, pct);
        }
    }
    Ok(resource)
}

/// Parse a `task:percentage` entry. `Ok(None)` means the entry is not an
/// allocation and should be skipped.
pub fn parse_allocation(field: &str) -> std::result::Result<Option<(TaskId, i32)>, FieldError> {
    if !field.contains(':') {
        return Ok(None);
    }
    let mut parts: Vec<&str> = field.split(':').collect();
    // "1:" has a single meaningful part.
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    let [task, pct] = parts.as_slice() else {
        return Ok(None);
    };
    Ok(Some((parse_int(task)?, parse_int(pct)?)))
}

fn parse_int(s: &str) -> std::result::Result<i32, FieldError> {
    let s = s.trim();
    s.parse()
        .map_err(|_| FieldError::InvalidInteger(s.to_string()))
}
