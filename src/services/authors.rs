//! Author service

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorForm},
        book::Book,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Author and their books, fetched concurrently
    pub async fn with_books(&self, id: Uuid) -> AppResult<(Author, Vec<Book>)> {
        tokio::try_join!(
            self.repository.authors.get_by_id(id),
            self.repository.books.find_by_author(id),
        )
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<FormOutcome<Author, AuthorForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let author = self.repository.authors.create(&input).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(FormOutcome::Saved(author))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: AuthorForm,
    ) -> AppResult<FormOutcome<Author, AuthorForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let author = self.repository.authors.update(id, &input).await?;
        tracing::info!("Updated author {}", author.id);
        Ok(FormOutcome::Saved(author))
    }

    /// Delete unless books still reference the author
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, books) = self.with_books(id).await?;
        if !books.is_empty() {
            tracing::warn!("Author {} still has {} book(s), not deleting", id, books.len());
            return Ok(DeleteOutcome::Blocked {
                record: author,
                dependents: books,
            });
        }

        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
