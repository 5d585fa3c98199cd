//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// CampusNet client error
    #[error("CampusNet error: {0}")]
    Client(#[from] campusnet_client::CampusNetError),

    /// The password was not accepted
    #[error("Authentication rejected for user {user}")]
    AuthenticationRejected { user: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
