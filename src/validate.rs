//! Input validation for new tasks and due-date parsing.
//!
//! Rules are checked in a fixed order and only the first violation is
//! reported. The `Display` text of each error is the exact message shown to
//! the user.

use chrono::{Datelike, Duration, NaiveDate};

pub const MIN_TEXT_LEN: usize = 3;
pub const MAX_TEXT_LEN: usize = 100;

/// The form input a validation error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text,
    DueDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a task")]
    EmptyText,
    #[error("Task must be at least 3 characters")]
    TextTooShort,
    #[error("Task must be less than 100 characters")]
    TextTooLong,
    #[error("Please select a due date")]
    MissingDueDate,
    #[error("Please select a valid due date")]
    InvalidDueDate,
}

impl ValidationError {
    /// Which input should receive the attention cue.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyText
            | ValidationError::TextTooShort
            | ValidationError::TextTooLong => Field::Text,
            ValidationError::MissingDueDate | ValidationError::InvalidDueDate => Field::DueDate,
        }
    }
}

/// Validated input, ready to become a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub due_date: NaiveDate,
}

/// Validate raw form input. Text is trimmed before length checks; lengths
/// are counted in characters.
pub fn validate_input(
    raw_text: &str,
    raw_due: &str,
    today: NaiveDate,
) -> Result<NewTask, ValidationError> {
    let text = raw_text.trim();
    let len = text.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyText);
    }
    if len < MIN_TEXT_LEN {
        return Err(ValidationError::TextTooShort);
    }
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TextTooLong);
    }
    if raw_due.trim().is_empty() {
        return Err(ValidationError::MissingDueDate);
    }
    let due_date = parse_due_input(raw_due, today).ok_or(ValidationError::InvalidDueDate)?;
    Ok(NewTask {
        text: text.to_string(),
        due_date,
    })
}

/// Parse a due date relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - weekday names, optionally prefixed with "this" or "next"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return offset(today, 1),
        "yesterday" => return offset(today, -1),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return offset(today, days);
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return weeks.checked_mul(7).and_then(|days| offset(today, days));
            }
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    let current = today.weekday().num_days_from_monday() as i64;
    for (name, target) in weekdays {
        let ahead = (target + 7 - current) % 7;
        if s == name || s == format!("this {name}") {
            return offset(today, ahead);
        }
        if s == format!("next {name}") {
            let days = if ahead == 0 { 7 } else { ahead + 7 };
            return offset(today, days);
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// `today` shifted by `days`, or `None` past the representable range.
fn offset(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|d| today.checked_add_signed(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    }

    fn check(text: &str, due: &str) -> Result<NewTask, ValidationError> {
        validate_input(text, due, today())
    }

    #[test]
    fn text_length_boundaries() {
        assert_eq!(check("ab", "2025-01-10"), Err(ValidationError::TextTooShort));
        assert!(check("abc", "2025-01-10").is_ok());
        assert!(check(&"x".repeat(100), "2025-01-10").is_ok());
        assert_eq!(check(&"x".repeat(101), "2025-01-10"), Err(ValidationError::TextTooLong));
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        let err = check("   ", "2025-01-10").unwrap_err();
        assert_eq!(err, ValidationError::EmptyText);
        assert_eq!(err.to_string(), "Please enter a task");
        assert_eq!(err.field(), Field::Text);
    }

    #[test]
    fn length_is_measured_after_trimming() {
        assert_eq!(check("  ab  ", "2025-01-10"), Err(ValidationError::TextTooShort));
        assert_eq!(check("  abc  ", "2025-01-10").unwrap().text, "abc");
    }

    #[test]
    fn empty_due_date_always_fails() {
        let err = check("Valid task", "").unwrap_err();
        assert_eq!(err.to_string(), "Please select a due date");
        assert_eq!(err.field(), Field::DueDate);
        assert_eq!(check("Valid task", "   "), Err(ValidationError::MissingDueDate));
    }

    #[test]
    fn text_rules_take_precedence_over_due_date() {
        assert_eq!(check("", ""), Err(ValidationError::EmptyText));
        assert_eq!(check("ab", ""), Err(ValidationError::TextTooShort));
    }

    #[test]
    fn garbage_due_date_is_rejected() {
        assert_eq!(check("Valid task", "someday"), Err(ValidationError::InvalidDueDate));
    }

    #[test]
    fn out_of_range_relative_dates_are_invalid() {
        assert_eq!(check("Valid task", "in 99999999d"), Err(ValidationError::InvalidDueDate));
        assert_eq!(check("Valid task", "in 99999999w"), Err(ValidationError::InvalidDueDate));
        assert_eq!(check("Valid task", "in 9999999999999999d"), Err(ValidationError::InvalidDueDate));
        assert_eq!(check("Valid task", "in -99999999d"), Err(ValidationError::InvalidDueDate));
        assert_eq!(parse_due_input("tomorrow", NaiveDate::MAX), None);
        assert_eq!(parse_due_input("next friday", NaiveDate::MAX.pred_opt().unwrap()), None);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check(&"é".repeat(100), "today").is_ok());
    }

    #[test]
    fn parses_natural_dates() {
        let t = today();
        assert_eq!(parse_due_input("today", t), Some(t));
        assert_eq!(parse_due_input("Tomorrow", t), NaiveDate::from_ymd_opt(2025, 1, 9));
        assert_eq!(parse_due_input("in 3d", t), NaiveDate::from_ymd_opt(2025, 1, 11));
        assert_eq!(parse_due_input("in 1w", t), NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(parse_due_input("friday", t), NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(parse_due_input("wed", t), Some(t));
        assert_eq!(parse_due_input("next wed", t), NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(parse_due_input("2025-02-01", t), NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(parse_due_input("2025-13-01", t), None);
    }
}
