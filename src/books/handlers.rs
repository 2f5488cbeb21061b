use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    books::{dto::CreateBookRequest, repo::Book},
    error::AppError,
    response::{ApiResponse, Json},
    state::AppState,
};

pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", get(get_book).delete(delete_book_by_id))
        .route("/books/isbn/:isbn", delete(delete_book_by_isbn))
}

#[instrument(skip(state))]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<ApiResponse>, AppError> {
    let books = Book::list(&state.db).await.map_err(|e| {
        error!(error = %e, "list books failed");
        AppError::Persistence(e.to_string())
    })?;
    Ok(Json(ApiResponse::success(books)))
}

#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let id = parse_book_id(&id)?;
    let book = Book::find_by_id(&state.db, id)
        .await
        .map_err(|e| {
            error!(error = %e, book_id = id, "get book failed");
            AppError::Persistence(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound("no such book".into()))?;
    Ok(Json(ApiResponse::success(book)))
}

#[instrument(skip(state, payload))]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), AppError> {
    let label = payload.validated_label().ok_or_else(|| {
        warn!("book creation with blank label");
        AppError::Validation("Invalid Data Provided".into())
    })?;

    let book = Book::create(&state.db, payload.isbn, label)
        .await
        .map_err(|e| {
            error!(error = %e, isbn = payload.isbn, "create book failed");
            AppError::Persistence(e.to_string())
        })?;

    info!(book_id = book.id, isbn = book.isbn, "book created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(book))))
}

#[instrument(skip(state))]
pub async fn delete_book_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let id = parse_book_id(&id)?;
    let removed = Book::delete_by_id(&state.db, id).await.map_err(|e| {
        error!(error = %e, book_id = id, "delete book failed");
        AppError::Persistence(e.to_string())
    })?;
    if removed == 0 {
        return Err(AppError::NotFound("no such book".into()));
    }
    info!(book_id = id, "book deleted");
    Ok(Json(ApiResponse::success("Procedure Went Successfully")))
}

#[instrument(skip(state))]
pub async fn delete_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let isbn = isbn
        .parse::<i64>()
        .map_err(|_| AppError::Validation("invalid ISBN code provided".into()))?;
    let removed = Book::delete_by_isbn(&state.db, isbn).await.map_err(|e| {
        error!(error = %e, isbn, "delete book by isbn failed");
        AppError::Persistence(e.to_string())
    })?;
    if removed == 0 {
        return Err(AppError::NotFound("no such book".into()));
    }
    info!(isbn, "book deleted");
    Ok(Json(ApiResponse::success("Procedure Went Successfully")))
}

pub(crate) fn parse_book_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation("no book id provided".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_id_must_be_a_positive_integer() {
        assert_eq!(parse_book_id("2").unwrap(), 2);
        assert!(parse_book_id("abc").is_err());
        assert!(parse_book_id("0").is_err());
        assert!(parse_book_id("-3").is_err());
    }
}
