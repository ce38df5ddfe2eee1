//! Book service

use std::collections::HashMap;

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppResult, OptionalExt},
    models::{
        author::Author,
        book::{Book, BookForm},
        book_instance::BookInstance,
        genre::{Genre, GenreOption},
    },
    repository::Repository,
};

/// A book with its references resolved
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Select-list contents for the book form
#[derive(Debug, Clone)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, each with its author
    pub async fn list(&self) -> AppResult<Vec<(Book, Option<Author>)>> {
        let (books, authors) = tokio::try_join!(
            self.repository.books.list(),
            self.repository.authors.list(),
        )?;

        let by_id: HashMap<Uuid, Author> = authors.into_iter().map(|a| (a.id, a)).collect();
        Ok(books
            .into_iter()
            .map(|book| {
                let author = by_id.get(&book.author_id).cloned();
                (book, author)
            })
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Book and its copies, fetched concurrently
    pub async fn with_instances(&self, id: Uuid) -> AppResult<(Book, Vec<BookInstance>)> {
        tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.book_instances.find_by_book(id),
        )
    }

    /// Book with author, genres and copies
    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, instances) = self.with_instances(id).await?;

        let (author, genres) = tokio::try_join!(
            async { self.repository.authors.get_by_id(book.author_id).await.optional() },
            self.repository.genres.find_by_ids(&book.genre_ids),
        )?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Authors and genres for the form, with `selected` genres checked
    pub async fn form_options(&self, selected: &[Uuid]) -> AppResult<BookFormOptions> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        Ok(BookFormOptions {
            authors,
            genres: GenreOption::mark(&genres, selected),
        })
    }

    /// Book to edit plus form options, all three fetched concurrently
    pub async fn edit(&self, id: Uuid) -> AppResult<(Book, BookFormOptions)> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        let genres = GenreOption::mark(&genres, &book.genre_ids);
        Ok((book, BookFormOptions { authors, genres }))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<Book, BookForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let book = self.repository.books.create(&input).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(FormOutcome::Saved(book))
    }

    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<FormOutcome<Book, BookForm>> {
        let form = form.normalized();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(errors) => return Ok(FormOutcome::Invalid { form, errors }),
        };

        let book = self.repository.books.update(id, &input).await?;
        tracing::info!("Updated book {}", book.id);
        Ok(FormOutcome::Saved(book))
    }

    /// Delete unless copies of the book still exist
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        let (book, instances) = self.with_instances(id).await?;
        if !instances.is_empty() {
            tracing::warn!("Book {} still has {} copies, not deleting", id, instances.len());
            return Ok(DeleteOutcome::Blocked {
                record: book,
                dependents: instances,
            });
        }

        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
