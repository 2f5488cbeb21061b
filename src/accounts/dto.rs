use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::accounts::repo::{Account, Meta};

/// Request body for account creation.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

/// Request body for the authorization endpoint. Field names are
/// capitalized on the wire, mirroring the `Key` / `Token` headers.
#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Token")]
    pub token: String,
}

/// Public part of an account returned to the client; the stored hash
/// never leaves the server.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub meta: HashMap<String, String>,
}

impl AccountResponse {
    pub fn from_parts(account: Account, meta: Vec<Meta>) -> Self {
        Self {
            id: account.id,
            username: account.username,
            meta: meta.into_iter().map(|m| (m.key, m.value)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn account_response_never_exposes_the_hash() {
        let account = Account {
            id: 1,
            username: "alice".into(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$fake$fake".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let meta = vec![Meta {
            id: 1,
            account_id: 1,
            key: "name".into(),
            value: "Alice".into(),
        }];
        let json =
            serde_json::to_string(&AccountResponse::from_parts(account, meta)).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains(r#""name":"Alice""#));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn authorize_request_uses_capitalized_fields() {
        let req: AuthorizeRequest =
            serde_json::from_str(r#"{"Key": "1", "Token": "secret"}"#).unwrap();
        assert_eq!(req.key, "1");
        assert_eq!(req.token, "secret");
    }

    #[test]
    fn create_account_meta_defaults_to_empty() {
        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"username": "bob", "password": "pw"}"#).unwrap();
        assert!(req.meta.is_empty());
    }
}
