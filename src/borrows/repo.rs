use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A single lending transaction linking one account to one book.
/// Never mutated after creation; due/return-date completion is a
/// separate workflow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Borrow {
    pub id: i64,
    pub transaction_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub borrow_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub return_date: Option<OffsetDateTime>,
    pub borrowed_by: i64,
    pub book_id: i64,
}

/// Fields set by the coordinator before persistence; due and return
/// dates start unset.
#[derive(Debug, Clone)]
pub struct NewBorrow {
    pub transaction_id: String,
    pub borrow_date: OffsetDateTime,
    pub borrowed_by: i64,
    pub book_id: i64,
}

impl Borrow {
    /// Insert exactly one borrow row and return its assigned id.
    pub async fn create(db: &PgPool, record: &NewBorrow) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO borrows (transaction_id, borrow_date, borrowed_by, book_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&record.transaction_id)
        .bind(record.borrow_date)
        .bind(record.borrowed_by)
        .bind(record.book_id)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Borrow>> {
        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            SELECT id, transaction_id, borrow_date, due_date, return_date, borrowed_by, book_id
            FROM borrows
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(borrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn borrow_serializes_unset_dates_as_null() {
        let borrow = Borrow {
            id: 7,
            transaction_id: "aZ09aZ09aZ09aZ09aZ09".into(),
            borrow_date: datetime!(2026-08-27 12:00 UTC),
            due_date: None,
            return_date: None,
            borrowed_by: 1,
            book_id: 2,
        };
        let json = serde_json::to_string(&borrow).unwrap();
        assert!(json.contains(r#""due_date":null"#));
        assert!(json.contains(r#""return_date":null"#));
        assert!(json.contains(r#""borrowed_by":1"#));
        assert!(json.contains(r#""book_id":2"#));
    }
}
