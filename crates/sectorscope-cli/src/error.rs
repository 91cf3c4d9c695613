use sectorscope_core::{ConfigError, PipelineError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] sectorscope_core::ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("command error: {0}")]
    Command(String),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Config(_) | Self::Command(_) => 2,
            Self::Pipeline(PipelineError::Io { .. }) => 10,
            Self::Pipeline(PipelineError::Validation(_)) => 2,
            Self::Pipeline(_) => 3,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        let structural = CliError::from(PipelineError::StructurallyInvalid { found: "object" });
        assert_eq!(structural.exit_code(), 3);

        let io = CliError::from(PipelineError::Io {
            path: "missing.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(io.exit_code(), 10);

        let strict = CliError::StrictModeViolation {
            warning_count: 1,
            error_count: 0,
        };
        assert_eq!(strict.exit_code(), 5);

        let invalid = CliError::from(sectorscope_core::ValidationError::InvalidSector {
            value: String::from("tech"),
        });
        assert_eq!(invalid.exit_code(), 2);
    }
}
