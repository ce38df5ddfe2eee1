//! Form validation helpers.
//!
//! Each form struct derives [`Validate`] with one `custom` rule per field; the
//! rule functions here carry the user-facing messages. [`collect_errors`]
//! flattens the validator output into the ordered message list rendered
//! above a form.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Ordered, non-empty list of field-level messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(Vec<String>);

impl FormErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }
}

/// Forms that validate in a fixed field order
pub trait FormFields: Validate {
    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// Run the derived rules and flatten the result
    fn check(&self) -> Result<(), FormErrors> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(collect_errors(&errors, Self::FIELDS)),
        }
    }
}

/// Order in which a field's failed rules are reported: presence, then
/// length, then everything else.
fn rule_rank(code: &str) -> u8 {
    match code {
        "required" => 0,
        "length" => 1,
        _ => 2,
    }
}

/// Flatten validator errors into messages, ordered by `fields`.
///
/// Only one message per field is kept, picked by [`rule_rank`].
pub fn collect_errors(errors: &ValidationErrors, fields: &[&str]) -> FormErrors {
    let field_errors = errors.field_errors();
    let mut messages = Vec::new();

    for field in fields {
        let first = field_errors
            .get(*field)
            .and_then(|errs| errs.iter().min_by_key(|e| rule_rank(&e.code)));
        if let Some(first) = first {
            let msg = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            messages.push(msg);
        }
    }

    // Anything reported under a name missing from `fields`
    if messages.is_empty() {
        messages.push("Submitted form is invalid".to_string());
    }

    FormErrors(messages)
}

/// Build a validation error with its display message
pub fn rule(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Non-empty after trimming
pub fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", message));
    }
    Ok(())
}

/// Person-name rule: present and ASCII alphanumeric. The length cap is a
/// `length` rule on the field itself.
pub fn person_name(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule("required", format!("{} must be specified.", label)));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(rule(
            "alphanumeric",
            format!("{} has non-alphanumeric characters.", label),
        ));
    }
    Ok(())
}

/// Identifier of another record, chosen from a select list
pub fn reference(
    value: &str,
    missing: &'static str,
    malformed: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule("required", missing));
    }
    if Uuid::parse_str(value).is_err() {
        return Err(rule("reference", malformed));
    }
    Ok(())
}

/// Optional ISO-8601 date; empty means absent
pub fn optional_date(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso_date(value).is_some() {
        return Ok(());
    }
    Err(rule("date", message))
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a UTC timestamp.
///
/// Calendar dates land on midnight UTC. Years outside 1..=9999 are
/// rejected; PostgreSQL cannot store most of them.
pub fn parse_iso_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let parsed = match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive)),
        Err(_) => DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
    };
    parsed.filter(|dt| (1..=9999).contains(&dt.year()))
}

/// Empty string to `None`, anything else parsed
pub fn optional_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        None
    } else {
        parse_iso_date(value)
    }
}

/// Trim every value in place
pub fn trim_owned(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "sample_first"))]
        first: String,
        #[validate(custom(function = "sample_second"))]
        second: String,
    }

    fn sample_first(value: &str) -> Result<(), ValidationError> {
        required(value, "First is required")
    }

    fn sample_second(value: &str) -> Result<(), ValidationError> {
        required(value, "Second is required")
    }

    impl FormFields for Sample {
        const FIELDS: &'static [&'static str] = &["first", "second"];
    }

    #[test]
    fn test_errors_follow_field_order() {
        let sample = Sample {
            first: String::new(),
            second: "  ".to_string(),
        };
        let errors = sample.check().unwrap_err();
        assert_eq!(
            errors.messages(),
            &["First is required".to_string(), "Second is required".to_string()]
        );
    }

    #[test]
    fn test_valid_sample() {
        let sample = Sample {
            first: "a".to_string(),
            second: "b".to_string(),
        };
        assert!(sample.check().is_ok());
    }

    #[test]
    fn test_person_name_rules() {
        assert!(person_name("Jane", "First name").is_ok());
        assert!(person_name("R2D2", "First name").is_ok());

        let err = person_name("", "First name").unwrap_err();
        assert_eq!(err.message.unwrap(), "First name must be specified.");

        let err = person_name("Mary Ann", "First name").unwrap_err();
        assert_eq!(err.message.unwrap(), "First name has non-alphanumeric characters.");
    }

    #[test]
    fn test_presence_reported_before_length() {
        let mut errors = ValidationErrors::new();
        errors.add("name", rule("length", "too short"));
        errors.add("name", rule("required", "missing"));
        errors.add("other", rule("alphanumeric", "bad chars"));
        errors.add("other", rule("length", "too long"));

        let collected = collect_errors(&errors, &["name", "other"]);
        assert_eq!(
            collected.messages(),
            &["missing".to_string(), "too long".to_string()]
        );
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("1775-12-16").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1775, 12, 16));

        let ts = parse_iso_date("2020-02-29T10:30:00+02:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2020-02-29 08:30");

        assert!(parse_iso_date("16/12/1775").is_none());
        assert!(parse_iso_date("2021-02-30").is_none());
        assert!(parse_iso_date("-5000-01-01").is_none());
        assert!(parse_iso_date("0000-06-01").is_none());
        assert!(parse_iso_date("+12000-01-01").is_none());
        assert!(parse_iso_date("9999-12-31").is_some());
    }

    #[test]
    fn test_optional_date() {
        assert!(optional_date("", "Invalid date of birth").is_ok());
        assert!(optional_date("1817-07-18", "Invalid date of birth").is_ok());
        let err = optional_date("yesterday", "Invalid date of birth").unwrap_err();
        assert_eq!(err.message.unwrap(), "Invalid date of birth");
    }

    #[test]
    fn test_reference() {
        let id = Uuid::new_v4().to_string();
        assert!(reference(&id, "missing", "malformed").is_ok());
        assert_eq!(
            reference("", "missing", "malformed").unwrap_err().message.unwrap(),
            "missing"
        );
        assert_eq!(
            reference("42", "missing", "malformed").unwrap_err().message.unwrap(),
            "malformed"
        );
    }

    #[test]
    fn test_trim_owned() {
        let mut value = "  Fiction \n".to_string();
        trim_owned(&mut value);
        assert_eq!(value, "Fiction");
    }
}
