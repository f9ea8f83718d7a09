use rr_core::RoadRemoteError;
use rr_core::error::SeedError;
use rr_core::types::IdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] RoadRemoteError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("invalid id: {0}")]
    Id(#[from] IdError),
    #[error("cannot open store: {message}")]
    Store { message: String },
    #[error("{message}")]
    Command { message: String },
    #[error("invalid {name}: {message}")]
    Config { name: &'static str, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}
