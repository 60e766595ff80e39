//! Error taxonomy for a generation run
//!
//! Every error is fatal to the run. Callers can still tell a malformed table
//! name apart from a configuration problem or a failing collaborator.

use std::error::Error as StdError;

/// Boxed cause carried by [`ScaffoldError::GenerationFailed`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// Table name lacks the `<domain>_<sign>_<name>` structure
    #[error("malformed table name '{0}': expected <domain>_<sign>_<name>, e.g. gen_test_demo")]
    MalformedTableName(String),

    /// Settings file missing, unreadable, or missing a required key
    #[error("failed to load generator configuration: {0}")]
    ConfigurationLoadFailed(String),

    /// A collaborator failed, or produced nothing, while generating `artifact`
    #[error("failed to generate {artifact}: {source}")]
    GenerationFailed {
        artifact: String,
        #[source]
        source: BoxError,
    },
}

impl ScaffoldError {
    pub fn generation_failed(artifact: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ScaffoldError::GenerationFailed {
            artifact: artifact.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
