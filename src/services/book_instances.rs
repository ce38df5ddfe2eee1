//! Book instance service

use std::collections::HashMap;

use uuid::Uuid;

use super::FormOutcome;
use crate::{
    error::{AppResult, OptionalExt},
    models::{
        book::Book,
        book_instance::{BookInstance, BookInstanceForm},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies, each with the book it belongs to
    pub async fn list(&self) -> AppResult<Vec<(BookInstance, Option<Book>)>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances.list(),
            self.repository.books.list(),
        )?;

        let by_id: HashMap<Uuid, Book> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = by_id.get(&instance.book_id).cloned();
                (instance, book)
            })
            .collect())
    }

    /// Copy and its book; the book may have vanished underneath it
    pub async fn detail(&self, id: Uuid) -> AppResult<(BookInstance, Option<Book>)> {
        let instance = self.repository.book_instances.get_by_id(id).await?;
        let book = self
            .repository
            .books
            .get_by_id(instance.book_id)
            .await
            .optional()?;
        Ok((instance, book))
    }

    /// Books offered in the form's select list
    pub async fn book_options(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Copy to edit plus the book list, fetched concurrently
    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstance, Vec<Book>)> {
        tokio::try_join!(
            self.repository.book_instances.get_by_id(id),
            self.repository.books.list(),
        )
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstance, BookInstanceForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let instance = self.repository.book_instances.create(&input).await?;
        tracing::info!(
            "Created copy {} of book {} ({})",
            instance.id,
            instance.book_id,
            instance.status
        );
        Ok(FormOutcome::Saved(instance))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstance, BookInstanceForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let instance = self.repository.book_instances.update(id, &input).await?;
        tracing::info!("Updated copy {}", instance.id);
        Ok(FormOutcome::Saved(instance))
    }

    /// Copies have no dependents, so deletion is unconditional
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.book_instances.delete(id).await?;
        tracing::info!("Deleted copy {}", id);
        Ok(())
    }
}
