pub mod auth;
pub mod recommendations;
pub mod summary;

pub use auth::TokenIssuer;
pub use summary::{HttpSummaryClient, SummaryClient, SummaryRequest};
