use thiserror::Error;

#[derive(Error, Debug)]
pub enum VqoError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Statistics read failed: {details}")]
    StatsRead { details: String },

    #[error("Parameter application failed: {details}")]
    ParameterApply { details: String },

    #[error("Track constraint application failed: {details}")]
    TrackConstraint { details: String },

    #[error("Optimizer not initialized: {details}")]
    NotInitialized { details: String },
}

impl VqoError {
    pub fn stats_read<S: Into<String>>(details: S) -> Self {
        Self::StatsRead {
            details: details.into(),
        }
    }

    pub fn parameter_apply<S: Into<String>>(details: S) -> Self {
        Self::ParameterApply {
            details: details.into(),
        }
    }

    pub fn track_constraint<S: Into<String>>(details: S) -> Self {
        Self::TrackConstraint {
            details: details.into(),
        }
    }

    pub fn not_initialized<S: Into<String>>(details: S) -> Self {
        Self::NotInitialized {
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VqoError>;
