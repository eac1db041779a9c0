use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable input: {0}")]
    Unreadable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether this error means the input file could not be parsed into a table
    /// at all, as opposed to a failure on our side (writing output, etc).
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            Error::Csv(_) | Error::Excel(_) | Error::UnsupportedFormat(_) | Error::Unreadable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_classification() {
        assert!(Error::Unreadable("empty".to_string()).is_unreadable());
        assert!(Error::UnsupportedFormat(".xyz".to_string()).is_unreadable());
        assert!(!Error::InvalidInput("ragged".to_string()).is_unreadable());
        assert!(!Error::Io(std::io::Error::other("disk full")).is_unreadable());
    }
}
