use serde::Deserialize;

/// `skip`/`limit` query parameters shared by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// Checks `skip >= 0` and `limit >= 1`
    pub fn validate(&self) -> Result<(), String> {
        if self.skip < 0 {
            return Err("skip must be greater than or equal to 0".to_string());
        }
        if self.limit < 1 {
            return Err("limit must be greater than or equal to 1".to_string());
        }
        Ok(())
    }

    /// Applies the window to an in-memory sequence
    pub fn apply<T, I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .skip(self.skip.max(0) as usize)
            .take(self.limit.max(0) as usize)
            .collect()
    }
}
