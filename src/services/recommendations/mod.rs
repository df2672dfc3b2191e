//! Content-based book recommendations.
//!
//! Every request encodes the current catalog snapshot into a feature space
//! (one-hot genre plus standardized average rating), fits a brute-force
//! Euclidean index over it and returns the nearest other books. Nothing is
//! cached between requests, so results always reflect the live catalog.

pub mod encoder;
pub mod neighbors;

use std::time::Instant;

use crate::{db::BookStore, error::AppError, error::AppResult, models::CatalogEntry};

use encoder::encode;
use neighbors::NearestNeighbors;

/// Neighborhood size, the query row included; at most `NEIGHBOR_COUNT - 1`
/// books are recommended
pub const NEIGHBOR_COUNT: usize = 3;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Not enough books to compute {requested} neighbors (catalog has {rows})")]
    InsufficientData { rows: usize, requested: usize },

    #[error("No recommendations found for book: {0}")]
    NoRecommendations(String),

    #[error("Book '{title}' has a non-finite average rating")]
    InvalidRating { title: String },

    #[error("Row {index} is outside a catalog of {rows} books")]
    RowOutOfRange { index: usize, rows: usize },
}

impl RecommendError {
    /// Whether the failure means "nothing to recommend" rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecommendError::BookNotFound(_)
                | RecommendError::InsufficientData { .. }
                | RecommendError::NoRecommendations(_)
        )
    }
}

/// Recommends the books closest to `book_title` within `catalog`
///
/// The first entry whose title matches exactly is the query book. Results are
/// nearest first and never contain the query title. Every row is ranked
/// before rows sharing the query title are dropped, so duplicated titles do
/// not crowd other books out of the `NEIGHBOR_COUNT - 1` results.
pub fn recommend(
    book_title: &str,
    catalog: &[CatalogEntry],
) -> Result<Vec<CatalogEntry>, RecommendError> {
    let target = catalog
        .iter()
        .position(|entry| entry.title == book_title)
        .ok_or_else(|| RecommendError::BookNotFound(book_title.to_string()))?;

    if let Some(entry) = catalog.iter().find(|e| !e.average_rating.is_finite()) {
        return Err(RecommendError::InvalidRating {
            title: entry.title.clone(),
        });
    }

    if catalog.len() < 2 {
        return Err(RecommendError::NoRecommendations(book_title.to_string()));
    }

    let matrix = encode(catalog);
    tracing::debug!(
        rows = matrix.len(),
        dimensions = matrix.dimensions(),
        "Encoded catalog snapshot"
    );

    let ranked = NearestNeighbors::fit(&matrix).kneighbors(target, matrix.len())?;

    let recommendations: Vec<CatalogEntry> = ranked
        .into_iter()
        .map(|neighbor| &catalog[neighbor.index])
        .filter(|entry| entry.title != book_title)
        .take(NEIGHBOR_COUNT - 1)
        .cloned()
        .collect();

    if recommendations.is_empty() {
        return Err(RecommendError::NoRecommendations(book_title.to_string()));
    }

    Ok(recommendations)
}

/// Recommends books for `book_title` against a fresh snapshot of the store
pub async fn get_recommendations(
    store: &dyn BookStore,
    book_title: &str,
) -> AppResult<Vec<CatalogEntry>> {
    let start = Instant::now();

    let catalog = store.catalog_snapshot().await?;
    if catalog.is_empty() {
        return Err(AppError::NotFound(
            "No books available for recommendations".to_string(),
        ));
    }

    let recommendations = recommend(book_title, &catalog)?;

    tracing::info!(
        book_title = %book_title,
        catalog_size = catalog.len(),
        returned = recommendations.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Computed recommendations"
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockBookStore;

    fn sample_catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("Book A", "Sci-Fi", 4.5),
            CatalogEntry::new("Book B", "Sci-Fi", 4.0),
            CatalogEntry::new("Book C", "Fantasy", 3.5),
        ]
    }

    fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_nearest_first_ordering() {
        let result = recommend("Book A", &sample_catalog()).unwrap();

        assert_eq!(titles(&result), vec!["Book B", "Book C"]);
        assert_eq!(result[0], CatalogEntry::new("Book B", "Sci-Fi", 4.0));
    }

    #[test]
    fn test_deterministic_for_fixed_snapshot() {
        let catalog = sample_catalog();
        let first = recommend("Book C", &catalog).unwrap();

        for _ in 0..10 {
            assert_eq!(recommend("Book C", &catalog).unwrap(), first);
        }
    }

    #[test]
    fn test_excludes_self_and_bounds_size() {
        let catalog = vec![
            CatalogEntry::new("One", "Mystery", 4.1),
            CatalogEntry::new("Two", "Mystery", 3.9),
            CatalogEntry::new("Three", "Romance", 2.0),
            CatalogEntry::new("Four", "Mystery", 4.0),
            CatalogEntry::new("Five", "Horror", 5.0),
        ];

        for entry in &catalog {
            let result = recommend(&entry.title, &catalog).unwrap();
            assert!(result.len() <= NEIGHBOR_COUNT - 1);
            assert!(result.iter().all(|r| r.title != entry.title));
        }
    }

    #[test]
    fn test_self_excluded_when_an_earlier_row_is_identical() {
        let catalog = vec![
            CatalogEntry::new("Twin 1", "Sci-Fi", 4.0),
            CatalogEntry::new("Twin 2", "Sci-Fi", 4.0),
            CatalogEntry::new("Other", "Fantasy", 2.0),
        ];

        let result = recommend("Twin 2", &catalog).unwrap();
        assert_eq!(titles(&result), vec!["Twin 1", "Other"]);
    }

    #[test]
    fn test_duplicate_query_titles_do_not_hide_other_books() {
        let catalog = vec![
            CatalogEntry::new("X", "Sci-Fi", 4.0),
            CatalogEntry::new("X", "Sci-Fi", 4.0),
            CatalogEntry::new("X", "Sci-Fi", 4.0),
            CatalogEntry::new("Y", "Fantasy", 2.0),
        ];
        let result = recommend("X", &catalog).unwrap();
        assert_eq!(titles(&result), vec!["Y"]);

        let catalog = vec![
            CatalogEntry::new("X", "Sci-Fi", 4.0),
            CatalogEntry::new("X", "Sci-Fi", 4.0),
            CatalogEntry::new("Y", "Sci-Fi", 3.0),
            CatalogEntry::new("Z", "Fantasy", 2.0),
        ];
        let result = recommend("X", &catalog).unwrap();
        assert_eq!(titles(&result), vec!["Y", "Z"]);
    }

    #[test]
    fn test_only_duplicates_of_query_title() {
        let catalog = vec![
            CatalogEntry::new("X", "Sci-Fi", 4.0),
            CatalogEntry::new("X", "Fantasy", 1.0),
        ];
        let err = recommend("X", &catalog).unwrap_err();
        assert_eq!(err, RecommendError::NoRecommendations("X".to_string()));
    }

    #[test]
    fn test_missing_title() {
        let err = recommend("Nonexistent Title", &sample_catalog()).unwrap_err();
        assert_eq!(err, RecommendError::BookNotFound("Nonexistent Title".to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        let err = recommend("book a", &sample_catalog()).unwrap_err();
        assert!(matches!(err, RecommendError::BookNotFound(_)));
    }

    #[test]
    fn test_single_entry_catalog() {
        let catalog = vec![CatalogEntry::new("Solo", "Poetry", 4.0)];
        let err = recommend("Solo", &catalog).unwrap_err();
        assert_eq!(err, RecommendError::NoRecommendations("Solo".to_string()));
    }

    #[test]
    fn test_two_entry_catalog_returns_the_other_book() {
        let catalog = vec![
            CatalogEntry::new("Left", "Poetry", 4.0),
            CatalogEntry::new("Right", "Drama", 1.0),
        ];

        let result = recommend("Left", &catalog).unwrap();
        assert_eq!(titles(&result), vec!["Right"]);
    }

    #[test]
    fn test_zero_variance_ratings_fall_back_to_genre() {
        let catalog = vec![
            CatalogEntry::new("Target", "Sci-Fi", 3.0),
            CatalogEntry::new("Other Genre", "Fantasy", 3.0),
            CatalogEntry::new("Same Genre", "Sci-Fi", 3.0),
        ];

        let result = recommend("Target", &catalog).unwrap();
        assert_eq!(titles(&result), vec!["Same Genre", "Other Genre"]);
    }

    #[test]
    fn test_non_finite_rating_is_rejected() {
        let catalog = vec![
            CatalogEntry::new("Good", "Sci-Fi", 3.0),
            CatalogEntry::new("Bad", "Sci-Fi", f64::NAN),
        ];

        let err = recommend("Good", &catalog).unwrap_err();
        assert_eq!(
            err,
            RecommendError::InvalidRating {
                title: "Bad".to_string()
            }
        );
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_recommendations_reads_snapshot() {
        let mut store = MockBookStore::new();
        store
            .expect_catalog_snapshot()
            .times(1)
            .returning(|| Ok(sample_catalog()));

        let result = get_recommendations(&store, "Book A").await.unwrap();
        assert_eq!(titles(&result), vec!["Book B", "Book C"]);
    }

    #[tokio::test]
    async fn test_get_recommendations_on_empty_catalog() {
        let mut store = MockBookStore::new();
        store.expect_catalog_snapshot().returning(|| Ok(vec![]));

        let err = get_recommendations(&store, "Book A").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "No books available for recommendations"));
    }

    #[tokio::test]
    async fn test_get_recommendations_refreshes_per_call() {
        let mut store = MockBookStore::new();
        let mut calls = 0;
        store.expect_catalog_snapshot().times(2).returning(move || {
            calls += 1;
            let mut catalog = sample_catalog();
            if calls > 1 {
                catalog.push(CatalogEntry::new("Book D", "Sci-Fi", 4.4));
            }
            Ok(catalog)
        });

        let before = get_recommendations(&store, "Book A").await.unwrap();
        let after = get_recommendations(&store, "Book A").await.unwrap();

        assert_eq!(titles(&before), vec!["Book B", "Book C"]);
        assert_eq!(titles(&after)[0], "Book D");
    }
}
