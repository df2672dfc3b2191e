use std::cmp::Ordering;

use super::encoder::FeatureMatrix;
use super::RecommendError;

/// A row of the fitted matrix and its distance from the query row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Brute-force Euclidean nearest-neighbor index
///
/// Catalog-sized inputs make a full scan cheaper than maintaining any tree
/// or graph structure.
#[derive(Debug)]
pub struct NearestNeighbors<'a> {
    matrix: &'a FeatureMatrix,
}

impl<'a> NearestNeighbors<'a> {
    pub fn fit(matrix: &'a FeatureMatrix) -> Self {
        Self { matrix }
    }

    /// Returns the `k` rows closest to row `index`, the row itself included
    ///
    /// Results are ordered by ascending distance; equal distances keep the
    /// original row order.
    pub fn kneighbors(&self, index: usize, k: usize) -> Result<Vec<Neighbor>, RecommendError> {
        let rows = self.matrix.len();
        if rows < 2 || k > rows {
            return Err(RecommendError::InsufficientData { rows, requested: k });
        }

        let query = self.matrix.row(index).ok_or(RecommendError::RowOutOfRange { index, rows })?;

        let mut neighbors: Vec<Neighbor> = self
            .matrix
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| Neighbor {
                index: i,
                distance: euclidean(query, row),
            })
            .collect();

        // sort_by is stable, which keeps ties in row order
        neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
