use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading or validating a [`GameConfig`].
///
/// [`GameConfig`]: crate::config::GameConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("sprite pool `{0}` is empty")]
    EmptySpritePool(&'static str),
}
