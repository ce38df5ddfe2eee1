//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{self, rule, FormErrors, FormFields};

/// Book record. `genre_ids` holds references to genres, resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    pub genre_ids: Vec<Uuid>,
}

/// Book create/update form.
///
/// `genre` comes from a checkbox group: absent, one value or several, it
/// always deserializes into a sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(custom(function = "title_rule"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "author_rule"))]
    pub author: String,
    #[serde(default)]
    #[validate(custom(function = "summary_rule"))]
    pub summary: String,
    #[serde(default)]
    #[validate(custom(function = "isbn_rule"))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = "genre_rule"))]
    pub genre: Vec<String>,
}

fn title_rule(value: &str) -> Result<(), ValidationError> {
    validation::required(value, "Title must not be empty.")
}

fn author_rule(value: &str) -> Result<(), ValidationError> {
    validation::reference(
        value,
        "Author must not be empty.",
        "Author must be selected from the list.",
    )
}

fn summary_rule(value: &str) -> Result<(), ValidationError> {
    validation::required(value, "Summary must not be empty.")
}

fn isbn_rule(value: &str) -> Result<(), ValidationError> {
    validation::required(value, "ISBN must not be empty.")
}

fn genre_rule(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| Uuid::parse_str(v).is_err()) {
        return Err(rule("reference", "Genre selection is invalid."));
    }
    Ok(())
}

impl FormFields for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];
}

impl BookForm {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(Uuid::to_string).collect(),
        }
    }

    pub fn normalized(mut self) -> Self {
        validation::trim_owned(&mut self.title);
        validation::trim_owned(&mut self.author);
        validation::trim_owned(&mut self.summary);
        validation::trim_owned(&mut self.isbn);
        for g in self.genre.iter_mut() {
            validation::trim_owned(g);
        }
        self.genre.retain(|g| !g.is_empty());
        self
    }

    /// Genre ids that parse, in submission order
    pub fn selected_genres(&self) -> Vec<Uuid> {
        self.genre
            .iter()
            .filter_map(|g| Uuid::parse_str(g).ok())
            .collect()
    }

    pub fn selected_author(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.author).ok()
    }

    pub fn to_input(&self) -> Result<BookInput, FormErrors> {
        self.check()?;
        let author_id = self
            .selected_author()
            .ok_or_else(|| validation_fallback("Author must be selected from the list."))?;
        Ok(BookInput {
            title: self.title.clone(),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            author_id,
            genre_ids: self.selected_genres(),
        })
    }
}

fn validation_fallback(message: &str) -> FormErrors {
    let mut errors = validator::ValidationErrors::new();
    errors.add("author", rule("reference", message.to_string()));
    validation::collect_errors(&errors, BookForm::FIELDS)
}

/// Book with its url, for templates
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            url: book.url(),
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
        }
    }
}
