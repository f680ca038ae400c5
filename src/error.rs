//! Error types for the annotation model and render configuration
//!
//! Model errors are raised at the call that would break an invariant of
//! an `NlpInstance`; configuration errors come from loading styles.

use thiserror::Error;

/// Errors raised while building or combining annotation graphs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An edge referenced a token index that is not part of the instance
    #[error("couldn't add edge: no token at positions {start} and {end}")]
    MissingEndpoint { start: usize, end: usize },

    /// Two instances with different token counts were merged
    #[error("cannot merge instances of different lengths ({left} vs {right} tokens)")]
    LengthMismatch { left: usize, right: usize },

    /// A token index was too large to address
    #[error("token index {index} is out of range (must be below {limit})")]
    TokenIndexOutOfRange { index: usize, limit: usize },
}

/// Errors raised while loading a render configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A colour string was not of the form `#rrggbb`
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// The YAML text could not be parsed into a configuration
    #[error("invalid render configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file could not be read
    #[error("failed to read render configuration: {0}")]
    Io(#[from] std::io::Error),
}
