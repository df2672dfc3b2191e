use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::{
    error::AppResult,
    middleware::RequestId,
    routes::AppState,
    services::SummaryRequest,
};

/// Handler that proxies content to the summarization service
pub async fn generate_summary(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SummaryRequest>,
) -> AppResult<Json<Value>> {
    tracing::info!(
        request_id = %request_id,
        backend = state.summarizer.name(),
        content_len = request.content.len(),
        "Forwarding summary request"
    );

    let summary = state.summarizer.generate_summary(&request).await?;
    Ok(Json(summary))
}
