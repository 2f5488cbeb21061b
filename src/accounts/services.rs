use sqlx::PgPool;
use tracing::{debug, warn};

use crate::accounts::password::verify_password;
use crate::accounts::repo::Account;

/// Credential verifier shared by the borrow path and the
/// `/accounts/authorization` endpoint.
///
/// `key` is the account identifier as a string, `token` the plaintext
/// secret; it is checked against the stored argon2 hash. Returns the
/// matching account, or `None` on zero matches or any lookup error —
/// failures here never propagate, they only deny.
pub async fn verify_credentials(db: &PgPool, key: &str, token: &str) -> Option<Account> {
    let id = match key.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            warn!(key = %key, "non-numeric credential key");
            return None;
        }
    };

    let account = match Account::find_by_id(db, id).await {
        Ok(Some(account)) => account,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, account_id = id, "credential lookup failed");
            return None;
        }
    };

    match verify_password(token, &account.password) {
        Ok(true) => {
            debug!(account_id = id, "credentials verified");
            Some(account)
        }
        Ok(false) => None,
        Err(e) => {
            warn!(error = %e, account_id = id, "stored secret could not be checked");
            None
        }
    }
}

/// Boolean view of [`verify_credentials`] for callers that only gate.
pub async fn is_authorized(db: &PgPool, key: &str, token: &str) -> bool {
    verify_credentials(db, key, token).await.is_some()
}
