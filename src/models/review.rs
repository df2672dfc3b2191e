use serde::{Deserialize, Serialize};

/// A persisted review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub review_text: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewReview {
    pub user_id: i32,
    pub review_text: String,
    pub rating: i32,
}

impl NewReview {
    pub fn into_review(self, id: i32, book_id: i32) -> Review {
        Review {
            id,
            book_id,
            user_id: self.user_id,
            review_text: self.review_text,
            rating: self.rating,
        }
    }
}
