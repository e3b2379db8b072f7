use thiserror::Error;

use crate::types::{ConfigError, StageError};

/// Unified error type covering configuration rewriting and stage execution.
#[derive(Debug, Error)]
pub enum RulegraftError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stage(#[from] StageError),
}
