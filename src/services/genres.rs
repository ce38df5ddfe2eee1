//! Genre service

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::AppResult,
    models::{
        book::Book,
        genre::{Genre, GenreForm},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    /// Genre and the books tagged with it, fetched concurrently
    pub async fn with_books(&self, id: Uuid) -> AppResult<(Genre, Vec<Book>)> {
        tokio::try_join!(
            self.repository.genres.get_by_id(id),
            self.repository.books.find_by_genre(id),
        )
    }

    /// Create a genre, or hand back the one that already has this name
    pub async fn create(&self, form: GenreForm) -> AppResult<FormOutcome<Genre, GenreForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        if let Some(existing) = self.repository.genres.find_by_name(&input.name).await? {
            tracing::debug!("Genre '{}' already exists as {}", existing.name, existing.id);
            return Ok(FormOutcome::Existing(existing));
        }

        let genre = self.repository.genres.create(&input).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(FormOutcome::Saved(genre))
    }

    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<FormOutcome<Genre, GenreForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let genre = self.repository.genres.update(id, &input).await?;
        tracing::info!("Updated genre {}", genre.id);
        Ok(FormOutcome::Saved(genre))
    }

    /// Delete unless books are still tagged with the genre
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, books) = self.with_books(id).await?;
        if !books.is_empty() {
            tracing::warn!("Genre {} still tags {} book(s), not deleting", id, books.len());
            return Ok(DeleteOutcome::Blocked {
                record: genre,
                dependents: books,
            });
        }

        self.repository.genres.delete(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{author::AuthorInput, book::BookInput};

    fn named(name: &str) -> GenreForm {
        GenreForm {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_returns_existing() {
        let service = GenresService::new(Repository::in_memory());

        let FormOutcome::Saved(first) = service.create(named("Fiction")).await.unwrap() else {
            panic!("expected a new genre");
        };
        let FormOutcome::Existing(second) = service.create(named("  Fiction ")).await.unwrap()
        else {
            panic!("expected the existing genre");
        };

        assert_eq!(first.id, second.id);
        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Fiction");
    }

    #[tokio::test]
    async fn test_short_name_rejected() {
        let service = GenresService::new(Repository::in_memory());
        let outcome = service.create(named("Sf")).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Invalid { .. }));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_renames_in_place() {
        let service = GenresService::new(Repository::in_memory());
        let FormOutcome::Saved(genre) = service.create(named("Fiction")).await.unwrap() else {
            panic!("expected a new genre");
        };

        let FormOutcome::Saved(renamed) = service.update(genre.id, named(" Fantasy ")).await.unwrap()
        else {
            panic!("expected the genre to be saved");
        };
        assert_eq!(renamed.id, genre.id);
        assert_eq!(renamed.name, "Fantasy");

        let invalid = service.update(genre.id, named("")).await.unwrap();
        assert!(matches!(invalid, FormOutcome::Invalid { .. }));
        assert_eq!(service.list().await.unwrap(), vec![renamed]);
    }

    #[tokio::test]
    async fn test_update_unknown_genre_is_not_found() {
        let service = GenresService::new(Repository::in_memory());
        let err = service
            .update(Uuid::new_v4(), named("Fantasy"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_guard_counts_dependents() {
        let repository = Repository::in_memory();
        let service = GenresService::new(repository.clone());
        let FormOutcome::Saved(genre) = service.create(named("Romance")).await.unwrap() else {
            panic!("expected a new genre");
        };
        let author = repository
            .authors
            .create(&AuthorInput {
                first_name: "Jane".to_string(),
                family_name: "Austen".to_string(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap();
        let book = repository
            .books
            .create(&BookInput {
                title: "Emma".to_string(),
                summary: "s".to_string(),
                isbn: "i".to_string(),
                author_id: author.id,
                genre_ids: vec![genre.id],
            })
            .await
            .unwrap();

        match service.delete(genre.id).await.unwrap() {
            DeleteOutcome::Blocked { dependents, .. } => {
                assert_eq!(dependents.len(), 1);
                assert_eq!(dependents[0].id, book.id);
            }
            DeleteOutcome::Deleted => panic!("genre with books was deleted"),
        }

        repository.books.delete(book.id).await.unwrap();
        assert!(matches!(service.delete(genre.id).await.unwrap(), DeleteOutcome::Deleted));
    }
}
