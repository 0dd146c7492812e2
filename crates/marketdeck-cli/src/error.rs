use marketdeck_core::{DeckError, FetchError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Deck(DeckError::Validation(_)) => 2,
            Self::Deck(_) | Self::Fetch(_) => 3,
            Self::Command(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        let validation = CliError::Validation(ValidationError::EmptySymbol);
        assert_eq!(validation.exit_code(), 2);

        let empty = CliError::Deck(DeckError::EmptySeries {
            symbol: String::from("GOOGL"),
        });
        assert_eq!(empty.exit_code(), 3);

        let command = CliError::Command(String::from("boom"));
        assert_eq!(command.exit_code(), 10);
    }
}
