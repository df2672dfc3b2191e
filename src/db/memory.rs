use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    db::{BookStore, UserStore},
    error::{AppError, AppResult},
    models::{Book, CatalogEntry, NewBook, NewReview, Pagination, Review, User},
};

/// Store kept entirely in process memory
///
/// Ids are assigned sequentially from 1, mirroring a `SERIAL` column, and
/// iteration follows id order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    books: BTreeMap<i32, Book>,
    reviews: BTreeMap<i32, Review>,
    users: BTreeMap<i32, User>,
    last_book_id: i32,
    last_review_id: i32,
    last_user_id: i32,
}

impl MemoryStoreInner {
    fn insert_book(&mut self, book: NewBook) -> Book {
        self.last_book_id += 1;
        let book = book.into_book(self.last_book_id);
        self.books.insert(book.id, book.clone());
        book
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BookStore for MemoryStore {
    async fn create_book(&self, book: NewBook) -> AppResult<Book> {
        let mut inner = self.inner.write().await;
        Ok(inner.insert_book(book))
    }

    async fn create_books(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>> {
        let mut inner = self.inner.write().await;
        Ok(books.into_iter().map(|book| inner.insert_book(book)).collect())
    }

    async fn list_books(&self, page: Pagination) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(page.apply(inner.books.values().cloned()))
    }

    async fn get_book(&self, id: i32) -> AppResult<Option<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.get(&id).cloned())
    }

    async fn update_book(&self, id: i32, book: NewBook) -> AppResult<Option<Book>> {
        let mut inner = self.inner.write().await;
        Ok(inner.books.get_mut(&id).map(|existing| {
            *existing = book.into_book(id);
            existing.clone()
        }))
    }

    async fn delete_book(&self, id: i32) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        if inner.books.remove(&id).is_none() {
            return Ok(false);
        }
        inner.reviews.retain(|_, review| review.book_id != id);
        Ok(true)
    }

    async fn catalog_snapshot(&self) -> AppResult<Vec<CatalogEntry>> {
        let inner = self.inner.read().await;
        Ok(inner.books.values().map(CatalogEntry::from).collect())
    }

    async fn add_review(&self, book_id: i32, review: NewReview) -> AppResult<Option<Review>> {
        let mut inner = self.inner.write().await;
        if !inner.books.contains_key(&book_id) {
            return Ok(None);
        }

        inner.last_review_id += 1;
        let review = review.into_review(inner.last_review_id, book_id);
        inner.reviews.insert(review.id, review.clone());
        Ok(Some(review))
    }

    async fn list_reviews(&self, book_id: i32, page: Pagination) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(page.apply(
            inner
                .reviews
                .values()
                .filter(|review| review.book_id == book_id)
                .cloned(),
        ))
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == username) {
            return Err(AppError::InvalidInput(format!(
                "Username '{}' already exists",
                username
            )));
        }

        inner.last_user_id += 1;
        let user = User {
            id: inner.last_user_id,
            username: username.to_string(),
            password: password_hash.to_string(),
            active: 1,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

impl MemoryStore {
    /// Overrides the stored `active` code of an account
    pub async fn set_user_active(&self, username: &str, active: i32) -> bool {
        let mut inner = self.inner.write().await;
        match inner.users.values_mut().find(|u| u.username == username) {
            Some(user) => {
                user.active = active;
                true
            }
            None => false,
        }
    }
}
