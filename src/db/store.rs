use crate::{
    error::AppResult,
    models::{Book, CatalogEntry, NewBook, NewReview, Pagination, Review, User},
};

/// Persistence for books and their reviews
///
/// Lookups by id return `Ok(None)` for missing rows so handlers decide how a
/// miss is reported.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    async fn create_book(&self, book: NewBook) -> AppResult<Book>;

    /// Inserts every book or none of them
    async fn create_books(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>>;

    async fn list_books(&self, page: Pagination) -> AppResult<Vec<Book>>;

    async fn get_book(&self, id: i32) -> AppResult<Option<Book>>;

    async fn update_book(&self, id: i32, book: NewBook) -> AppResult<Option<Book>>;

    /// Deletes the book and its reviews; `false` when the book did not exist
    async fn delete_book(&self, id: i32) -> AppResult<bool>;

    /// Point-in-time view of every book, in insertion order
    async fn catalog_snapshot(&self) -> AppResult<Vec<CatalogEntry>>;

    /// `Ok(None)` when the book does not exist
    async fn add_review(&self, book_id: i32, review: NewReview) -> AppResult<Option<Review>>;

    async fn list_reviews(&self, book_id: i32, page: Pagination) -> AppResult<Vec<Review>>;
}

/// Persistence for login accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User>;
}
