//! Book instances repository

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceInput, BookStatus},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// All copies by imprint
    async fn list(&self) -> AppResult<Vec<BookInstance>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance>;

    /// Copies of one book
    async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;

    /// Fails with a datastore error when `book_id` matches no book
    async fn create(&self, data: &BookInstanceInput) -> AppResult<BookInstance>;

    async fn update(&self, id: Uuid, data: &BookInstanceInput) -> AppResult<BookInstance>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<i64>;

    async fn count_by_status(&self, status: BookStatus) -> AppResult<i64>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book instance {} not found", id))
}

/// Status is stored as its display string
fn row_to_instance(row: &PgRow) -> AppResult<BookInstance> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<BookStatus>()
        .map_err(AppError::Internal)?;

    Ok(BookInstance {
        id: row.try_get("id")?,
        book_id: row.try_get("book_id")?,
        imprint: row.try_get("imprint")?,
        status,
        due_back: row.try_get("due_back")?,
    })
}

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookInstanceRepository for BookInstancesRepository {
    async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query("SELECT * FROM book_instances ORDER BY imprint COLLATE \"C\", id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_instance).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        let row = sqlx::query("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        row_to_instance(&row)
    }

    async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query("SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint COLLATE \"C\", id")
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_instance).collect()
    }

    async fn create(&self, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        row_to_instance(&row)
    }

    async fn update(&self, id: Uuid, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;
        row_to_instance(&row)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: BookStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
