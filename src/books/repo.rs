use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub isbn: i64,
    pub label: String,
    pub created_at: OffsetDateTime,
}

impl Book {
    pub async fn create(db: &PgPool, isbn: i64, label: &str) -> anyhow::Result<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, label)
            VALUES ($1, $2)
            RETURNING id, isbn, label, created_at
            "#,
        )
        .bind(isbn)
        .bind(label)
        .fetch_one(db)
        .await?;
        Ok(book)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, label, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(book)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, label, created_at
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Delete by id or by ISBN; returns the number of rows removed.
    pub async fn delete_by_id(db: &PgPool, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete_by_isbn(db: &PgPool, isbn: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
