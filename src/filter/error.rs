//! Filter construction and run errors.

/// Errors that can occur while building or running a [`super::LineFilter`].
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("I/O error while filtering: {0}")]
    Io(#[from] std::io::Error),
}

/// Compile `pattern`, attaching it to the error on failure.
pub(crate) fn compile(pattern: &str) -> Result<regex::Regex, FilterError> {
    regex::Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
