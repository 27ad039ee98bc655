pub type Result<T = (), E = CensyError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum CensyError {
    #[error("Invalid category pattern `{pattern}` for category `{category}`")]
    InvalidPattern {
        pattern: String,
        category: String,
        source: regex::Error,
    },

    #[error("Dataset entry at line {line} is empty after normalization: `{entry}`")]
    EmptyDatasetEntry { line: usize, entry: String },
}
