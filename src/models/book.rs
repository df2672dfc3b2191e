use serde::{Deserialize, Serialize};

/// Upper bound on books accepted by a single bulk create
pub const MAX_BULK_BOOKS: usize = 50;

/// A persisted book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year_published: i32,
    pub summary: String,
    pub average_rating: f64,
}

/// Payload for creating or fully replacing a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year_published: i32,
    pub summary: String,
    #[serde(default)]
    pub average_rating: f64,
}

impl NewBook {
    /// Materializes the payload as a book with the given id
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            year_published: self.year_published,
            summary: self.summary,
            average_rating: self.average_rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkBookCreate {
    pub books: Vec<NewBook>,
}

impl BulkBookCreate {
    /// Rejects batches larger than [`MAX_BULK_BOOKS`]
    pub fn validate(&self) -> Result<(), String> {
        if self.books.len() > MAX_BULK_BOOKS {
            return Err(format!(
                "Cannot create more than {} books at once.",
                MAX_BULK_BOOKS
            ));
        }
        Ok(())
    }
}

/// The slice of a book the recommender works on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogEntry {
    pub title: String,
    pub genre: String,
    pub average_rating: f64,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, genre: impl Into<String>, average_rating: f64) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            average_rating,
        }
    }
}

impl From<&Book> for CatalogEntry {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            genre: book.genre.clone(),
            average_rating: book.average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_rating_defaults_to_zero() {
        let book: NewBook = serde_json::from_str(
            r#"{
                "title": "Test Book",
                "author": "Test Author",
                "genre": "Sci-Fi",
                "year_published": 2022,
                "summary": "Test summary"
            }"#,
        )
        .unwrap();

        assert_eq!(book.average_rating, 0.0);
        assert_eq!(book.into_book(7).id, 7);
    }

    #[test]
    fn test_bulk_create_limit() {
        let book = NewBook {
            title: "T".to_string(),
            author: "A".to_string(),
            genre: "G".to_string(),
            year_published: 2000,
            summary: "S".to_string(),
            average_rating: 1.0,
        };

        let at_limit = BulkBookCreate {
            books: vec![book.clone(); MAX_BULK_BOOKS],
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = BulkBookCreate {
            books: vec![book; MAX_BULK_BOOKS + 1],
        };
        assert_eq!(
            over_limit.validate().unwrap_err(),
            "Cannot create more than 50 books at once."
        );
    }

    #[test]
    fn test_catalog_entry_from_book() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Sci-Fi".to_string(),
            year_published: 1965,
            summary: "Spice".to_string(),
            average_rating: 4.5,
        };

        assert_eq!(CatalogEntry::from(&book), CatalogEntry::new("Dune", "Sci-Fi", 4.5));
    }
}
