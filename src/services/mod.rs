//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::{repository::Repository, validation::FormErrors};

/// Result of a create/update submission
#[derive(Debug)]
pub enum FormOutcome<T, F> {
    /// Rejected before any write; carries the trimmed submission back
    Invalid { form: F, errors: FormErrors },
    /// Written to the datastore
    Saved(T),
    /// A record with the same natural key already existed; nothing written
    Existing(T),
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome<T, D> {
    Deleted,
    /// Dependents still reference the record; nothing removed
    Blocked { record: T, dependents: Vec<D> },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}
