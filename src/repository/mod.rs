//! Repository layer for datastore operations.
//!
//! One trait per entity, each with a PostgreSQL implementation next to it
//! and a shared in-memory implementation in [`memory`].

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use authors::AuthorRepository;
pub use book_instances::BookInstanceRepository;
pub use books::BookRepository;
pub use genres::GenreRepository;

/// Repositories for every entity, built once at startup
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub book_instances: Arc<dyn BookInstanceRepository>,
}

impl Repository {
    /// Create a new repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            genres: Arc::new(genres::GenresRepository::new(pool.clone())),
            book_instances: Arc::new(book_instances::BookInstancesRepository::new(pool)),
        }
    }

    /// Create a repository over a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::default();
        Self {
            authors: Arc::new(store.clone()),
            books: Arc::new(store.clone()),
            genres: Arc::new(store.clone()),
            book_instances: Arc::new(store),
        }
    }
}
