use thiserror::Error;

use tickboard_core::{ConfigError, CoreError, IndicatorError, SourceError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(inner) => Self::Validation(inner),
            CoreError::Source(inner) => Self::Source(inner),
            CoreError::Indicator(inner) => Self::Indicator(inner),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Indicator(_) | Self::Config(_) => 5,
            Self::Io(_) => 10,
        }
    }

    /// Stable machine-readable code used in JSON error entries.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Source(error) => error.code(),
            Self::Indicator(_) => "indicator",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_exit_codes() {
        let validation: CliError = CoreError::from(ValidationError::EmptySymbol).into();
        assert_eq!(validation.exit_code(), 2);

        let source: CliError = CoreError::from(SourceError::http_status(404)).into();
        assert_eq!(source.exit_code(), 3);
        assert_eq!(source.code(), "source.http_status");

        let indicator: CliError = CoreError::from(IndicatorError::DegenerateReference {
            metric: "percent deviation",
        })
        .into();
        assert_eq!(indicator.exit_code(), 5);
    }
}
