use bolddesk_api::{SortDirection, MAX_PER_PAGE};
use regex::Regex;

use crate::error::BoldDeskError;

pub const MAX_SUBJECT_LENGTH: usize = 400;
pub const MAX_DESCRIPTION_LENGTH: usize = 20_000;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_Q_LENGTH: usize = 1000;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s.]+$";
const FIELD_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_.]*$";

fn compile(pattern: &str) -> Result<Regex, BoldDeskError> {
    Regex::new(pattern)
        .map_err(|e| BoldDeskError::InvalidInput(format!("regex compile error: {}", e)))
}

/// Strip ASCII control characters (newlines and tabs are kept), trim
/// whitespace, and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, BoldDeskError> {
    if input.len() > max_len {
        return Err(BoldDeskError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(BoldDeskError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a record ID: must be positive. `what` names the ID in the message.
pub fn validate_id(id: i64, what: &str) -> Result<i64, BoldDeskError> {
    if id < 1 {
        return Err(BoldDeskError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            what, id
        )));
    }
    Ok(id)
}

/// Validate an email address: trimmed, one `@`, a dotted domain.
pub fn validate_email(input: &str) -> Result<String, BoldDeskError> {
    let trimmed = input.trim();
    if compile(EMAIL_PATTERN)?.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(BoldDeskError::InvalidInput(format!(
            "invalid email address '{}'",
            input
        )))
    }
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: u32) -> Result<u32, BoldDeskError> {
    if page < 1 {
        return Err(BoldDeskError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate page size (must be 1..=100).
pub fn validate_per_page(per_page: u32) -> Result<u32, BoldDeskError> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(BoldDeskError::InvalidInput(format!(
            "per-page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }
    Ok(per_page)
}

/// Validate an ordering clause such as `createdon`, `createdon desc` or
/// `-createdon` (leading minus means descending). A bare field sorts descending.
pub fn validate_order_by(input: &str) -> Result<(String, SortDirection), BoldDeskError> {
    let trimmed = input.trim();
    let mut parts = trimmed.split_whitespace();
    let (field, direction) = match (parts.next(), parts.next(), parts.next()) {
        (Some(field), None, None) => match field.strip_prefix('-') {
            Some(field) => (field, SortDirection::Desc),
            None => (field, SortDirection::default()),
        },
        (Some(field), Some(dir), None) => {
            let direction = dir.parse::<SortDirection>().map_err(|_| {
                BoldDeskError::InvalidInput(format!(
                    "unknown sort direction '{}'. Valid values: asc, desc",
                    dir
                ))
            })?;
            (field, direction)
        }
        _ => {
            return Err(BoldDeskError::InvalidInput(format!(
                "invalid order '{}'. Expected: <field> [asc|desc]",
                input
            )))
        }
    };
    if !compile(FIELD_PATTERN)?.is_match(field) {
        return Err(BoldDeskError::InvalidInput(format!(
            "invalid sort field '{}'",
            field
        )));
    }
    Ok((field.to_ascii_lowercase(), direction))
}

/// Validate a raw `Q` filter expression: `field:value` terms joined by `AND`,
/// with balanced brackets and quotes.
pub fn validate_q_expression(input: &str) -> Result<String, BoldDeskError> {
    let expr = sanitize_text(input, MAX_Q_LENGTH)?;
    if expr.matches('[').count() != expr.matches(']').count() {
        return Err(BoldDeskError::InvalidInput(format!(
            "unbalanced brackets in filter '{}'",
            expr
        )));
    }
    if expr.replace("\\\"", "").matches('"').count() % 2 != 0 {
        return Err(BoldDeskError::InvalidInput(format!(
            "unbalanced quotes in filter '{}'",
            expr
        )));
    }
    let field_re = compile(FIELD_PATTERN)?;
    for term in expr.split(" AND ") {
        let (field, value) = term.split_once(':').ok_or_else(|| {
            BoldDeskError::InvalidInput(format!(
                "filter term '{}' is not of the form field:value",
                term.trim()
            ))
        })?;
        if !field_re.is_match(field.trim()) || value.trim().is_empty() {
            return Err(BoldDeskError::InvalidInput(format!(
                "filter term '{}' is not of the form field:value",
                term.trim()
            )));
        }
    }
    Ok(expr)
}

/// Parse a comma-separated list of positive IDs, e.g. `1,2, 3`.
pub fn parse_id_list(input: &str) -> Result<Vec<i64>, BoldDeskError> {
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            let id = part.parse::<i64>().map_err(|_| {
                BoldDeskError::InvalidInput(format!("'{}' is not a valid ID", part))
            })?;
            validate_id(id, "ID")
        })
        .collect()
}
