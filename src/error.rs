use std::path::PathBuf;

/// Problems found while reading configuration or the city catalog.
/// All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("catalog file not found: {}", path.display())]
    MissingCatalog { path: PathBuf },

    #[error("failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog {origin} is empty or malformed, expected lines like `Name|Province|Fact|path/to/image`")]
    EmptyCatalog { origin: String },

    #[error("QUIZ_ROUNDS must be a whole number of at least 1, got {value:?}")]
    InvalidRounds { value: String },

    #[error("QUIZ_STORAGE must be `sqlite` or `memory`, got {value:?}")]
    InvalidStorage { value: String },
}

/// A quiz operation was called in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("the quiz is already complete after {rounds} rounds")]
    QuizComplete { rounds: usize },

    #[error("question refers to city #{index}, which is not in the catalog")]
    UnknownCity { index: usize },
}
