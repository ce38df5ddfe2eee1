//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{self, FormErrors, FormFields};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreInput {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(
        length(
            min = 3,
            max = 100,
            message = "Genre name must contain between 3 and 100 characters."
        ),
        custom(function = "genre_name_rule")
    )]
    pub name: String,
}

fn genre_name_rule(value: &str) -> Result<(), ValidationError> {
    validation::required(value, "Genre name required")
}

impl FormFields for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];
}

impl GenreForm {
    pub fn from_genre(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }

    pub fn normalized(mut self) -> Self {
        validation::trim_owned(&mut self.name);
        self
    }

    pub fn to_input(&self) -> Result<GenreInput, FormErrors> {
        self.check()?;
        Ok(GenreInput {
            name: self.name.clone(),
        })
    }
}

/// Genre with its url, for templates
#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
            url: genre.url(),
        }
    }
}

/// Checkbox entry on the book form
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    pub id: Uuid,
    pub name: String,
    pub checked: bool,
}

impl GenreOption {
    /// Mark every genre whose id is in `selected`
    pub fn mark(genres: &[Genre], selected: &[Uuid]) -> Vec<GenreOption> {
        genres
            .iter()
            .map(|g| GenreOption {
                id: g.id,
                name: g.name.clone(),
                checked: selected.contains(&g.id),
            })
            .collect()
    }
}
