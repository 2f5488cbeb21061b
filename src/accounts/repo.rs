use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Account record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String, // argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime,
}

/// Key/value entry owned by an account. Lives and dies with its parent
/// (ON DELETE CASCADE); not independently addressable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meta {
    pub id: i64,
    pub account_id: i64,
    pub key: String,
    pub value: String,
}

impl Account {
    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Create an account plus its meta entries in one transaction.
    pub async fn create(
        db: &PgPool,
        username: &str,
        password_hash: &str,
        meta: &[(String, String)],
    ) -> anyhow::Result<(Account, Vec<Meta>)> {
        let mut tx = db.begin().await?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let mut entries = Vec::with_capacity(meta.len());
        for (key, value) in meta {
            let entry = sqlx::query_as::<_, Meta>(
                r#"
                INSERT INTO account_meta (account_id, key, value)
                VALUES ($1, $2, $3)
                RETURNING id, account_id, key, value
                "#,
            )
            .bind(account.id)
            .bind(key)
            .bind(value)
            .fetch_one(&mut *tx)
            .await?;
            entries.push(entry);
        }

        tx.commit().await?;
        Ok((account, entries))
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, created_at
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

impl Meta {
    pub async fn list_for_account(db: &PgPool, account_id: i64) -> anyhow::Result<Vec<Meta>> {
        let rows = sqlx::query_as::<_, Meta>(
            r#"
            SELECT id, account_id, key, value
            FROM account_meta
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
