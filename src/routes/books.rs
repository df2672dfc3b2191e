use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::{AuthUser, RequestId},
    models::{Book, BulkBookCreate, NewBook, Pagination},
    routes::AppState,
};

fn book_not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

/// Handler for creating a single book (requires a bearer token)
pub async fn create_book(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AuthUser(username): AuthUser,
    Json(book): Json<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.books.create_book(book).await?;

    tracing::info!(
        request_id = %request_id,
        book_id = book.id,
        created_by = %username,
        "Created book"
    );

    Ok((StatusCode::CREATED, Json(book)))
}

/// Handler for creating up to 50 books at once
pub async fn create_books(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<BulkBookCreate>,
) -> AppResult<(StatusCode, Json<Vec<Book>>)> {
    request.validate().map_err(AppError::InvalidInput)?;

    let books = state.books.create_books(request.books).await?;

    tracing::info!(
        request_id = %request_id,
        count = books.len(),
        "Created books in bulk"
    );

    Ok((StatusCode::CREATED, Json(books)))
}

/// Handler for paginated book listing
pub async fn list_books(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<Book>>> {
    page.validate().map_err(AppError::InvalidInput)?;
    let books = state.books.list_books(page).await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.books.get_book(id).await?.ok_or_else(book_not_found)?;
    Ok(Json(book))
}

/// Handler for replacing every field of a book
pub async fn update_book(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i32>,
    Json(book): Json<NewBook>,
) -> AppResult<Json<Book>> {
    let book = state
        .books
        .update_book(id, book)
        .await?
        .ok_or_else(book_not_found)?;

    tracing::info!(request_id = %request_id, book_id = id, "Updated book");

    Ok(Json(book))
}

/// Handler for deleting a book and its reviews (requires a bearer token)
pub async fn delete_book(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AuthUser(username): AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Value>> {
    if !state.books.delete_book(id).await? {
        return Err(book_not_found());
    }

    tracing::info!(
        request_id = %request_id,
        book_id = id,
        deleted_by = %username,
        "Deleted book and its reviews"
    );

    Ok(Json(json!({
        "message": "Book and its reviews deleted successfully!"
    })))
}
