use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{NewReview, Pagination, Review},
    routes::AppState,
};

/// Handler for adding a review to an existing book
pub async fn add_review(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    Json(review): Json<NewReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state
        .books
        .add_review(book_id, review)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

    tracing::info!(book_id, review_id = review.id, "Added review");

    Ok((StatusCode::CREATED, Json(review)))
}

/// Handler for paginated reviews of one book
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<Review>>> {
    page.validate().map_err(AppError::InvalidInput)?;
    let reviews = state.books.list_reviews(book_id, page).await?;
    Ok(Json(reviews))
}
