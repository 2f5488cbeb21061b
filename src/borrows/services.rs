use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{error, info};

use crate::{
    accounts::{extractors::Credentials, services::is_authorized},
    borrows::repo::{Borrow, NewBorrow},
    error::AppError,
};

/// Length of a borrow transaction identifier.
pub const TRANSACTION_ID_LEN: usize = 20;

/// Random alphanumeric transaction identifier. Not cryptographically
/// unique; the collision bound is accepted at this scale.
pub fn new_transaction_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRANSACTION_ID_LEN)
        .map(char::from)
        .collect()
}

/// The borrow coordinator: authorize, construct the record, persist once.
///
/// Deliberately does not check that the book exists or is available;
/// concurrent borrows of the same book all persist. On failure no row is
/// written. Returns the new record's assigned id.
pub async fn borrow_book(
    db: &PgPool,
    book_id: i64,
    credentials: &Credentials,
) -> Result<i64, AppError> {
    if !is_authorized(db, &credentials.key, &credentials.token).await {
        return Err(AppError::unauthorized());
    }

    // The verifier only passes numeric keys, so this cannot fail here.
    let borrowed_by = credentials
        .key
        .parse::<i64>()
        .map_err(|_| AppError::unauthorized())?;

    let record = NewBorrow {
        transaction_id: new_transaction_id(),
        borrow_date: OffsetDateTime::now_utc(),
        borrowed_by,
        book_id,
    };

    let id = Borrow::create(db, &record).await.map_err(|e| {
        error!(error = %e, book_id, borrowed_by, "borrow create failed");
        AppError::Persistence("Something went wrong please retry again".into())
    })?;

    info!(
        borrow_id = id,
        book_id,
        borrowed_by,
        transaction_id = %record.transaction_id,
        "book borrowed"
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_id_is_twenty_alphanumeric_chars() {
        let id = new_transaction_id();
        assert_eq!(id.len(), TRANSACTION_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn transaction_ids_are_distinct_across_calls() {
        let a = new_transaction_id();
        let b = new_transaction_id();
        assert_ne!(a, b);
    }
}
