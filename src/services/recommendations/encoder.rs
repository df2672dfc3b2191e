use crate::models::CatalogEntry;

/// Numeric representation of a catalog snapshot
///
/// Each row is the one-hot genre encoding (one column per distinct genre, in
/// first-seen order) followed by the standardized average rating.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    genres: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Genre vocabulary, in column order
    #[cfg(test)]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of every row: one column per genre plus the rating column
    pub fn dimensions(&self) -> usize {
        self.genres.len() + 1
    }
}

/// Encodes a catalog snapshot into a [`FeatureMatrix`]
///
/// Vocabulary and rating statistics come from `entries` alone, so the same
/// book can land at a different point when the catalog changes.
pub fn encode(entries: &[CatalogEntry]) -> FeatureMatrix {
    let mut genres: Vec<String> = Vec::new();
    let genre_columns: Vec<usize> = entries
        .iter()
        .map(|entry| match genres.iter().position(|g| *g == entry.genre) {
            Some(column) => column,
            None => {
                genres.push(entry.genre.clone());
                genres.len() - 1
            }
        })
        .collect();

    let ratings: Vec<f64> = entries.iter().map(|e| e.average_rating).collect();
    let scaled = standardize(&ratings);

    let rows = genre_columns
        .iter()
        .zip(scaled)
        .map(|(&column, rating)| {
            let mut row = vec![0.0; genres.len() + 1];
            row[column] = 1.0;
            row[genres.len()] = rating;
            row
        })
        .collect();

    FeatureMatrix { genres, rows }
}

/// Zero-mean, unit-variance scaling using the population standard deviation
///
/// A constant column has no spread to scale by; every value maps to 0.
/// Values are divided by the largest magnitude before the moments are taken,
/// so ratings near `f64::MAX` cannot overflow the sums.
fn standardize(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    if values.iter().all(|v| *v == first) {
        return vec![0.0; values.len()];
    }

    let magnitude = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let scaled: Vec<f64> = values.iter().map(|v| v / magnitude).collect();

    let n = scaled.len() as f64;
    let mean = scaled.iter().sum::<f64>() / n;
    let variance = scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if std > f64::EPSILON * mean.abs().max(1.0) {
        scaled.iter().map(|v| (v - mean) / std).collect()
    } else {
        vec![0.0; values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_one_hot_columns_follow_first_seen_order() {
        let entries = vec![
            CatalogEntry::new("A", "Sci-Fi", 4.0),
            CatalogEntry::new("B", "Fantasy", 3.0),
            CatalogEntry::new("C", "Sci-Fi", 5.0),
            CatalogEntry::new("D", "Horror", 2.0),
        ];

        let matrix = encode(&entries);

        assert_eq!(matrix.genres(), ["Sci-Fi", "Fantasy", "Horror"]);
        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix.dimensions(), 4);
        assert_eq!(&matrix.rows()[0][..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&matrix.rows()[1][..3], &[0.0, 1.0, 0.0]);
        assert_eq!(&matrix.rows()[2][..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&matrix.rows()[3][..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ratings_are_standardized() {
        let entries = vec![
            CatalogEntry::new("Book A", "Sci-Fi", 4.5),
            CatalogEntry::new("Book B", "Sci-Fi", 4.0),
            CatalogEntry::new("Book C", "Fantasy", 3.5),
        ];

        let matrix = encode(&entries);
        let ratings: Vec<f64> = matrix.rows().iter().map(|r| r[2]).collect();

        // mean 4.0, population std sqrt(1/6)
        let std = (1.0f64 / 6.0).sqrt();
        assert!(approx_eq(ratings[0], 0.5 / std));
        assert!(approx_eq(ratings[1], 0.0));
        assert!(approx_eq(ratings[2], -0.5 / std));

        let mean: f64 = ratings.iter().sum::<f64>() / 3.0;
        let variance: f64 = ratings.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 3.0;
        assert!(approx_eq(mean, 0.0));
        assert!(approx_eq(variance, 1.0));
    }

    #[test]
    fn test_zero_variance_ratings_scale_to_zero() {
        let entries = vec![
            CatalogEntry::new("A", "Sci-Fi", 3.0),
            CatalogEntry::new("B", "Fantasy", 3.0),
            CatalogEntry::new("C", "Sci-Fi", 3.0),
        ];

        let matrix = encode(&entries);

        for row in matrix.rows() {
            assert_eq!(row[2], 0.0);
            assert!(row.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_constant_inexact_ratings_scale_to_zero() {
        for rating in [0.1, 4.1, 3.7] {
            let entries = vec![
                CatalogEntry::new("A", "Sci-Fi", rating),
                CatalogEntry::new("B", "Fantasy", rating),
                CatalogEntry::new("C", "Sci-Fi", rating),
            ];

            let matrix = encode(&entries);
            let ratings: Vec<f64> = matrix.rows().iter().map(|r| r[2]).collect();
            assert_eq!(ratings, vec![0.0; 3], "rating {rating}");
        }
    }

    #[test]
    fn test_huge_ratings_stay_finite() {
        let constant = encode(&[
            CatalogEntry::new("A", "Sci-Fi", 1e308),
            CatalogEntry::new("B", "Sci-Fi", 1e308),
        ]);
        assert!(constant.rows().iter().all(|r| r[1] == 0.0));

        let spread = encode(&[
            CatalogEntry::new("A", "Sci-Fi", 1.5e308),
            CatalogEntry::new("B", "Sci-Fi", 1.7e308),
            CatalogEntry::new("C", "Sci-Fi", -1.7e308),
        ]);
        let ratings: Vec<f64> = spread.rows().iter().map(|r| r[1]).collect();
        assert!(ratings.iter().all(|v| v.is_finite()));
        assert!(ratings[2] < ratings[0] && ratings[0] < ratings[1]);
    }

    #[test]
    fn test_single_entry() {
        let matrix = encode(&[CatalogEntry::new("Solo", "Poetry", 4.2)]);

        assert_eq!(matrix.rows(), &[vec![1.0, 0.0]]);
        assert_eq!(matrix.row(0), Some(&[1.0, 0.0][..]));
        assert_eq!(matrix.row(1), None);
    }
}
