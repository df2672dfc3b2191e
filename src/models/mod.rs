pub mod book;
pub mod pagination;
pub mod review;
pub mod user;

pub use book::{BulkBookCreate, Book, CatalogEntry, NewBook, MAX_BULK_BOOKS};
pub use pagination::Pagination;
pub use review::{NewReview, Review};
pub use user::{AccountStatus, User, UserLogin};
