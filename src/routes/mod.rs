use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod auth;
pub mod books;
pub mod recommendations;
pub mod reviews;
pub mod state;
pub mod summary;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    let login = post(auth::login);
    let collection = get(books::list_books).post(books::create_book);
    let recommend = get(recommendations::recommend);
    let summarize = post(summary::generate_summary);

    // Trailing-slash forms stay routable for existing clients
    Router::new()
        .route("/login", login.clone())
        .route("/login/", login)
        .route("/books", collection.clone())
        .route("/books/", collection)
        .route("/books/bulk", post(books::create_books))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route(
            "/books/:id/reviews",
            get(reviews::list_reviews).post(reviews::add_review),
        )
        .route("/recommendations", recommend.clone())
        .route("/recommendations/", recommend)
        .route("/generate-summary", summarize.clone())
        .route("/generate-summary/", summarize)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
