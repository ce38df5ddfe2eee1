//! Catalog overview service

use serde::Serialize;

use crate::{error::AppResult, models::book_instance::BookStatus, repository::Repository};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub book_count: i64,
    pub book_instance_count: i64,
    /// Copies with status `Available`
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Count every collection concurrently
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let (books, instances, available, authors, genres) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.book_instances.count(),
            self.repository.book_instances.count_by_status(BookStatus::Available),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;

        Ok(CatalogSummary {
            book_count: books,
            book_instance_count: instances,
            book_instance_available_count: available,
            author_count: authors,
            genre_count: genres,
        })
    }
}
