use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{BookStore, UserStore},
    error::AppResult,
    models::{Book, CatalogEntry, NewBook, NewReview, Pagination, Review, User},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year_published, summary, average_rating";
const REVIEW_COLUMNS: &str = "id, book_id, user_id, review_text, rating";

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Books, reviews and users backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_book<'e, E>(executor: E, book: NewBook) -> AppResult<Book>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO books (title, author, genre, year_published, summary, average_rating) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            BOOK_COLUMNS
        );

        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book.title)
            .bind(book.author)
            .bind(book.genre)
            .bind(book.year_published)
            .bind(book.summary)
            .bind(book.average_rating)
            .fetch_one(executor)
            .await?;

        Ok(book)
    }
}

#[async_trait::async_trait]
impl BookStore for PgStore {
    async fn create_book(&self, book: NewBook) -> AppResult<Book> {
        Self::insert_book(&self.pool, book).await
    }

    async fn create_books(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(books.len());

        for book in books {
            created.push(Self::insert_book(&mut *tx, book).await?);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn list_books(&self, page: Pagination) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books ORDER BY id LIMIT $1 OFFSET $2",
            BOOK_COLUMNS
        );

        let books = sqlx::query_as::<_, Book>(&query)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn get_book(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);

        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    async fn update_book(&self, id: i32, book: NewBook) -> AppResult<Option<Book>> {
        let query = format!(
            "UPDATE books SET title = $1, author = $2, genre = $3, year_published = $4, \
             summary = $5, average_rating = $6 WHERE id = $7 RETURNING {}",
            BOOK_COLUMNS
        );

        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book.title)
            .bind(book.author)
            .bind(book.genre)
            .bind(book.year_published)
            .bind(book.summary)
            .bind(book.average_rating)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    async fn delete_book(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reviews WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn catalog_snapshot(&self) -> AppResult<Vec<CatalogEntry>> {
        let entries = sqlx::query_as::<_, CatalogEntry>(
            "SELECT title, genre, average_rating FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn add_review(&self, book_id: i32, review: NewReview) -> AppResult<Option<Review>> {
        let query = format!(
            "INSERT INTO reviews (book_id, user_id, review_text, rating) \
             SELECT $1, $2, $3, $4 WHERE EXISTS (SELECT 1 FROM books WHERE id = $1) \
             RETURNING {}",
            REVIEW_COLUMNS
        );

        let review = sqlx::query_as::<_, Review>(&query)
            .bind(book_id)
            .bind(review.user_id)
            .bind(review.review_text)
            .bind(review.rating)
            .fetch_optional(&self.pool)
            .await?;

        Ok(review)
    }

    async fn list_reviews(&self, book_id: i32, page: Pagination) -> AppResult<Vec<Review>> {
        let query = format!(
            "SELECT {} FROM reviews WHERE book_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            REVIEW_COLUMNS
        );

        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(book_id)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }
}

#[async_trait::async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, active FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, active) VALUES ($1, $2, 1) \
             RETURNING id, username, password, active",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
