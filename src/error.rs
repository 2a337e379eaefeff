//! Error types for class definition and composition

use thiserror::Error;

/// Errors raised while defining classes or composing templates
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("class name must be a non-empty string")]
    InvalidName,

    #[error("invalid version '{version}' for class '{class}': {source}")]
    InvalidVersion {
        class: String,
        version: String,
        source: semver::Error,
    },

    #[error("version conflict on class '{class}': candidate {candidate} is incompatible with already included {existing}")]
    VersionConflict {
        class: String,
        candidate: String,
        existing: String,
    },

    #[error("no method '{name}' on instance of '{class}'")]
    UnknownMethod { class: String, name: String },
}
