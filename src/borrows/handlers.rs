use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use tracing::{error, instrument};

use crate::{
    accounts::extractors::Credentials,
    books::handlers::parse_book_id,
    borrows::{repo::Borrow, services::borrow_book},
    error::AppError,
    response::{ApiResponse, Json},
    state::AppState,
};

pub fn borrow_routes() -> Router<AppState> {
    Router::new()
        .route("/books/:id/borrow", post(borrow))
        .route("/borrows/:id", get(get_borrow))
}

/// POST /books/:id/borrow — headers `Key` / `Token` required. Responds
/// 200 with the new borrow record's id in the envelope; 401 before any
/// write when credentials are missing or rejected.
#[instrument(skip(state, credentials))]
pub async fn borrow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    credentials: Credentials,
) -> Result<Json<ApiResponse>, AppError> {
    let book_id = parse_book_id(&id)?;
    let borrow_id = borrow_book(&state.db, book_id, &credentials).await?;
    Ok(Json(ApiResponse::success(borrow_id)))
}

#[instrument(skip(state))]
pub async fn get_borrow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let id = id
        .parse::<i64>()
        .map_err(|_| AppError::Validation("no borrow id provided".into()))?;
    let borrow = Borrow::find_by_id(&state.db, id)
        .await
        .map_err(|e| {
            error!(error = %e, borrow_id = id, "get borrow failed");
            AppError::Persistence(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound("no such borrow".into()))?;
    Ok(Json(ApiResponse::success(borrow)))
}
