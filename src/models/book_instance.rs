//! Book instance (physical copy) model and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::dates;
use crate::validation::{self, rule, FormErrors, FormFields};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Maintenance,
        BookStatus::Available,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown book status '{}'", s))
    }
}

/// Full book instance model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<DateTime<Utc>>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceInput {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(custom(function = "book_rule"))]
    pub book: String,
    #[serde(default)]
    #[validate(custom(function = "imprint_rule"))]
    pub imprint: String,
    #[serde(default = "default_status")]
    #[validate(custom(function = "status_rule"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "due_back_rule"))]
    pub due_back: String,
}

fn default_status() -> String {
    BookStatus::default().to_string()
}

impl Default for BookInstanceForm {
    fn default() -> Self {
        Self {
            book: String::new(),
            imprint: String::new(),
            status: default_status(),
            due_back: String::new(),
        }
    }
}

fn book_rule(value: &str) -> Result<(), ValidationError> {
    validation::reference(
        value,
        "Book must be specified.",
        "Book must be selected from the list.",
    )
}

fn imprint_rule(value: &str) -> Result<(), ValidationError> {
    validation::required(value, "Imprint must be specified.")
}

fn status_rule(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BookStatus>()
        .map(|_| ())
        .map_err(|_| rule("status", "Invalid status"))
}

fn due_back_rule(value: &str) -> Result<(), ValidationError> {
    validation::optional_date(value, "Invalid due back")
}

impl FormFields for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];
}

impl BookInstanceForm {
    pub fn from_instance(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: dates::iso_or_empty(instance.due_back.as_ref()),
        }
    }

    pub fn normalized(mut self) -> Self {
        validation::trim_owned(&mut self.book);
        validation::trim_owned(&mut self.imprint);
        validation::trim_owned(&mut self.status);
        validation::trim_owned(&mut self.due_back);
        if self.status.is_empty() {
            self.status = default_status();
        }
        self
    }

    pub fn selected_book(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.book).ok()
    }

    pub fn to_input(&self) -> Result<BookInstanceInput, FormErrors> {
        self.check()?;
        match (self.selected_book(), self.status.parse::<BookStatus>()) {
            (Some(book_id), Ok(status)) => Ok(BookInstanceInput {
                book_id,
                imprint: self.imprint.clone(),
                status,
                due_back: validation::optional_timestamp(&self.due_back),
            }),
            // check() already rejected both of these
            _ => {
                let mut errors = validator::ValidationErrors::new();
                errors.add("book", rule("reference", "Book must be selected from the list."));
                Err(validation::collect_errors(&errors, Self::FIELDS))
            }
        }
    }
}

/// Book instance with display fields, for templates
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub url: String,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
}

impl From<&BookInstance> for BookInstanceView {
    fn from(instance: &BookInstance) -> Self {
        Self {
            id: instance.id,
            url: instance.url(),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back_formatted: dates::medium_or(instance.due_back.as_ref(), ""),
            due_back_yyyy_mm_dd: dates::iso_or_empty(instance.due_back.as_ref()),
        }
    }
}
