use std::sync::Arc;

use crate::{
    db::{BookStore, UserStore},
    services::{SummaryClient, TokenIssuer},
};

/// Shared application state
///
/// Backends sit behind trait objects so the router runs unchanged against
/// PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
    pub summarizer: Arc<dyn SummaryClient>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
        summarizer: Arc<dyn SummaryClient>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            books,
            users,
            summarizer,
            tokens: Arc::new(tokens),
        }
    }
}
