use thiserror::Error;

/// Errors surfaced to callers that hand the history malformed input.
///
/// The manager's own operations never fail: undoing an empty history or adding
/// during a replay are silent no-ops. These variants cover caller bugs that
/// would otherwise go unnoticed until much later.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("invalid command: {0}")]
    InvalidCommand(&'static str),
    #[error("history limit must be non-negative, got {0}")]
    InvalidLimit(i64),
    #[error("cannot parse history limit from {0:?}")]
    ParseLimit(String),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            HistoryError::InvalidCommand("missing undo operation").to_string(),
            "invalid command: missing undo operation"
        );
        assert_eq!(
            HistoryError::InvalidLimit(-3).to_string(),
            "history limit must be non-negative, got -3"
        );
        assert_eq!(
            HistoryError::ParseLimit("ten".into()).to_string(),
            "cannot parse history limit from \"ten\""
        );
    }
}
