use thiserror::Error;

/// Invalid condition pattern syntax.
#[derive(Debug, Error)]
#[error("invalid condition pattern: {0}")]
pub struct PatternError(#[from] regex::Error);

/// Configuration-time failures. These abort the whole build setup and are
/// never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no matching rule for '{target}' found; make sure there is at least one \
         root-level rule that uses '{target}' and that the graft plugin is \
         applied after the upstream loader plugin"
    )]
    NoTargetRule { target: String },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Failure of the import-generation capability on malformed input.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GenerateError {
    message: String,
}

impl GenerateError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-file stage failures. These fail one file's build, not the process.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("import generation failed for '{resource}': {message}")]
    Generate { resource: String, message: String },
}
