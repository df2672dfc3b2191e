use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::CatalogEntry,
    routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub book_title: String,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    tracing::info!(
        request_id = %request_id,
        book_title = %query.book_title,
        "Processing recommendation request"
    );

    let recommendations =
        recommendations::get_recommendations(state.books.as_ref(), &query.book_title).await?;

    Ok(Json(recommendations))
}
