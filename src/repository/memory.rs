//! In-memory datastore.
//!
//! Implements every repository trait over one shared set of tables, so that
//! reference checks can see across entities the way the PostgreSQL foreign
//! keys do. Used by the `memory` backend and by the test suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    authors, book_instances, books, genres, AuthorRepository, BookInstanceRepository,
    BookRepository, GenreRepository,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorInput},
        book::{Book, BookInput},
        book_instance::{BookInstance, BookInstanceInput, BookStatus},
        genre::{Genre, GenreInput},
    },
};

#[derive(Default)]
struct Tables {
    authors: HashMap<Uuid, Author>,
    books: HashMap<Uuid, Book>,
    genres: HashMap<Uuid, Genre>,
    book_instances: HashMap<Uuid, BookInstance>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

fn reference_violation(what: &str, id: Uuid) -> AppError {
    AppError::Internal(format!("reference to missing {} {}", what, id))
}

/// Sort by `key`. `String` keys compare bytewise, which matches the
/// `COLLATE "C"` ordering of the PostgreSQL queries.
fn sorted<T: Clone, K: Ord>(values: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = values.collect();
    out.sort_by_key(|v| key(v));
    out
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.authors.values().cloned(), |a| {
            (a.family_name.clone(), a.first_name.clone(), a.id)
        }))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        let tables = self.tables.read().await;
        tables
            .authors
            .get(&id)
            .cloned()
            .ok_or_else(|| authors::not_found(id))
    }

    async fn create(&self, data: &AuthorInput) -> AppResult<Author> {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        let mut tables = self.tables.write().await;
        tables.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update(&self, id: Uuid, data: &AuthorInput) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let author = tables
            .authors
            .get_mut(&id)
            .ok_or_else(|| authors::not_found(id))?;
        author.first_name = data.first_name.clone();
        author.family_name = data.family_name.clone();
        author.date_of_birth = data.date_of_birth;
        author.date_of_death = data.date_of_death;
        Ok(author.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&id) {
            return Err(authors::not_found(id));
        }
        if tables.books.values().any(|b| b.author_id == id) {
            return Err(AppError::Internal(format!("author {} is still referenced", id)));
        }
        tables.authors.remove(&id);
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }
}

#[async_trait]
impl GenreRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Genre>> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.genres.values().cloned(), |g| (g.name.clone(), g.id)))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Genre> {
        let tables = self.tables.read().await;
        tables
            .genres
            .get(&id)
            .cloned()
            .ok_or_else(|| genres::not_found(id))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables.genres.values().filter(|g| g.name == name).cloned(),
            |g| g.id,
        )
        .into_iter()
        .next())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let tables = self.tables.read().await;
        Ok(sorted(
            ids.iter().filter_map(|id| tables.genres.get(id)).cloned(),
            |g| (g.name.clone(), g.id),
        ))
    }

    async fn create(&self, data: &GenreInput) -> AppResult<Genre> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: data.name.clone(),
        };
        let mut tables = self.tables.write().await;
        tables.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update(&self, id: Uuid, data: &GenreInput) -> AppResult<Genre> {
        let mut tables = self.tables.write().await;
        let genre = tables
            .genres
            .get_mut(&id)
            .ok_or_else(|| genres::not_found(id))?;
        genre.name = data.name.clone();
        Ok(genre.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .genres
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| genres::not_found(id))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.genres.len() as i64)
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.books.values().cloned(), |b| (b.title.clone(), b.id)))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        let tables = self.tables.read().await;
        tables
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| books::not_found(id))
    }

    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables.books.values().filter(|b| b.author_id == author_id).cloned(),
            |b| (b.title.clone(), b.id),
        ))
    }

    async fn find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables
                .books
                .values()
                .filter(|b| b.genre_ids.contains(&genre_id))
                .cloned(),
            |b| (b.title.clone(), b.id),
        ))
    }

    async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&data.author_id) {
            return Err(reference_violation("author", data.author_id));
        }
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            author_id: data.author_id,
            genre_ids: data.genre_ids.clone(),
        };
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: Uuid, data: &BookInput) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Err(books::not_found(id));
        }
        if !tables.authors.contains_key(&data.author_id) {
            return Err(reference_violation("author", data.author_id));
        }
        let book = tables
            .books
            .get_mut(&id)
            .ok_or_else(|| books::not_found(id))?;
        book.title = data.title.clone();
        book.summary = data.summary.clone();
        book.isbn = data.isbn.clone();
        book.author_id = data.author_id;
        book.genre_ids = data.genre_ids.clone();
        Ok(book.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Err(books::not_found(id));
        }
        if tables.book_instances.values().any(|i| i.book_id == id) {
            return Err(AppError::Internal(format!("book {} is still referenced", id)));
        }
        tables.books.remove(&id);
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }
}

#[async_trait]
impl BookInstanceRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let tables = self.tables.read().await;
        Ok(sorted(tables.book_instances.values().cloned(), |i| {
            (i.imprint.clone(), i.id)
        }))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        let tables = self.tables.read().await;
        tables
            .book_instances
            .get(&id)
            .cloned()
            .ok_or_else(|| book_instances::not_found(id))
    }

    async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let tables = self.tables.read().await;
        Ok(sorted(
            tables
                .book_instances
                .values()
                .filter(|i| i.book_id == book_id)
                .cloned(),
            |i| (i.imprint.clone(), i.id),
        ))
    }

    async fn create(&self, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&data.book_id) {
            return Err(reference_violation("book", data.book_id));
        }
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        tables.book_instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update(&self, id: Uuid, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let mut tables = self.tables.write().await;
        if !tables.book_instances.contains_key(&id) {
            return Err(book_instances::not_found(id));
        }
        if !tables.books.contains_key(&data.book_id) {
            return Err(reference_violation("book", data.book_id));
        }
        let instance = tables
            .book_instances
            .get_mut(&id)
            .ok_or_else(|| book_instances::not_found(id))?;
        instance.book_id = data.book_id;
        instance.imprint = data.imprint.clone();
        instance.status = data.status;
        instance.due_back = data.due_back;
        Ok(instance.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .book_instances
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| book_instances::not_found(id))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.book_instances.len() as i64)
    }

    async fn count_by_status(&self, status: BookStatus) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .values()
            .filter(|i| i.status == status)
            .count() as i64)
    }
}
