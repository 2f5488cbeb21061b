use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    accounts::{
        dto::{AccountResponse, AuthorizeRequest, CreateAccountRequest},
        password::hash_password,
        repo::{Account, Meta},
        services::verify_credentials,
    },
    error::AppError,
    response::{ApiResponse, Json},
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/authorization", post(authorize))
        .route("/accounts/seed", post(seed_accounts))
}

#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse>, AppError> {
    let accounts = Account::list(&state.db).await.map_err(|e| {
        error!(error = %e, "list accounts failed");
        AppError::Persistence(e.to_string())
    })?;

    let mut payload = Vec::with_capacity(accounts.len());
    for account in accounts {
        let meta = Meta::list_for_account(&state.db, account.id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, account_id = account.id, "meta lookup failed, returning none");
                Vec::new()
            });
        payload.push(AccountResponse::from_parts(account, meta));
    }
    Ok(Json(ApiResponse::success(payload)))
}

#[instrument(skip(state, payload))]
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        warn!("account creation with empty username or password");
        return Err(AppError::Validation("Invalid Data Provided".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Persistence("trouble hashing the password provided".into())
    })?;

    let meta: Vec<(String, String)> = payload.meta.into_iter().collect();
    let (account, meta) = Account::create(&state.db, payload.username.trim(), &hash, &meta)
        .await
        .map_err(|e| {
            error!(error = %e, "create account failed");
            AppError::Persistence(e.to_string())
        })?;

    info!(account_id = account.id, username = %account.username, "account created");
    Ok(Json(ApiResponse::success(AccountResponse::from_parts(
        account, meta,
    ))))
}

/// POST /accounts/authorization — the externally visible face of the
/// credential verifier. The borrow path calls the same in-process check.
#[instrument(skip(state, payload))]
pub async fn authorize(
    State(state): State<AppState>,
    Json(payload): Json<AuthorizeRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let account = verify_credentials(&state.db, &payload.key, &payload.token)
        .await
        .ok_or_else(AppError::unauthorized)?;

    info!(account_id = account.id, "authorized");
    let meta = Meta::list_for_account(&state.db, account.id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, account_id = account.id, "meta lookup failed, returning none");
            Vec::new()
        });
    Ok(Json(ApiResponse::success(AccountResponse::from_parts(
        account, meta,
    ))))
}

/// POST /accounts/seed — inserts two demo accounts for manual testing.
/// Secrets are hashed like any other account, so `Token: password` works
/// against the seeded rows.
#[instrument(skip(state))]
pub async fn seed_accounts(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse>), AppError> {
    let demo: [(&str, &[(&str, &str)]); 2] = [
        ("alice", &[("name", "Alice Carver"), ("phone", "0645947757")]),
        ("bob", &[("name", "Bob Reyes"), ("phone", "0670964242")]),
    ];

    for (username, meta) in demo {
        let hash = hash_password("password").map_err(|e| {
            error!(error = %e, "hash_password failed");
            AppError::Persistence("trouble hashing the password provided".into())
        })?;
        let meta: Vec<(String, String)> = meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Account::create(&state.db, username, &hash, &meta)
            .await
            .map_err(|e| {
                error!(error = %e, username, "seed account failed");
                AppError::Persistence(e.to_string())
            })?;
    }

    info!("seed accounts created");
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Account Created ...")),
    ))
}
