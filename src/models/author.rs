//! Author model and related types

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::dates;
use crate::validation::{self, FormErrors, FormFields};

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_of_death: Option<DateTime<Utc>>,
}

impl Author {
    /// "Family, First"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Whole years between birth and death, or birth and `today` for
    /// living authors.
    ///
    /// A death date before the birth date is not rejected anywhere; it
    /// shows up here as a negative span.
    pub fn lifespan(&self, today: NaiveDate) -> String {
        let Some(born) = self.date_of_birth else {
            return "No data".to_string();
        };
        let end_year = match self.date_of_death {
            Some(died) => died.year(),
            None => today.year(),
        };
        (end_year - born.year()).to_string()
    }
}

/// Validated author fields, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_of_death: Option<DateTime<Utc>>,
}

/// Author create/update form as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(max = 100, message = "First name must not exceed 100 characters."),
        custom(function = "first_name_rule")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(max = 100, message = "Family name must not exceed 100 characters."),
        custom(function = "family_name_rule")
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "date_of_birth_rule"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "date_of_death_rule"))]
    pub date_of_death: String,
}

fn first_name_rule(value: &str) -> Result<(), ValidationError> {
    validation::person_name(value, "First name")
}

fn family_name_rule(value: &str) -> Result<(), ValidationError> {
    validation::person_name(value, "Family name")
}

fn date_of_birth_rule(value: &str) -> Result<(), ValidationError> {
    validation::optional_date(value, "Invalid date of birth")
}

fn date_of_death_rule(value: &str) -> Result<(), ValidationError> {
    validation::optional_date(value, "Invalid date of death")
}

impl FormFields for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];
}

impl AuthorForm {
    /// Prefill for the update form; dates as `YYYY-MM-DD`
    pub fn from_author(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: dates::iso_or_empty(author.date_of_birth.as_ref()),
            date_of_death: dates::iso_or_empty(author.date_of_death.as_ref()),
        }
    }

    /// Trim every field
    pub fn normalized(mut self) -> Self {
        validation::trim_owned(&mut self.first_name);
        validation::trim_owned(&mut self.family_name);
        validation::trim_owned(&mut self.date_of_birth);
        validation::trim_owned(&mut self.date_of_death);
        self
    }

    pub fn to_input(&self) -> Result<AuthorInput, FormErrors> {
        self.check()?;
        Ok(AuthorInput {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: validation::optional_timestamp(&self.date_of_birth),
            date_of_death: validation::optional_timestamp(&self.date_of_death),
        })
    }
}

/// Author as handed to the templates, with its display fields
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub lifespan: String,
}

impl AuthorView {
    pub fn new(author: &Author, today: NaiveDate) -> Self {
        Self {
            id: author.id,
            url: author.url(),
            name: author.name(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth_formatted: dates::medium_or(author.date_of_birth.as_ref(), "No data"),
            date_of_death_formatted: dates::medium_or(author.date_of_death.as_ref(), "No data"),
            lifespan: author.lifespan(today),
        }
    }
}
