use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the storage, configuration and collaborator layers.
///
/// Navigation, completion and progress code never produce these; they operate
/// on in-memory snapshots only.
#[derive(Error, Debug)]
pub enum VitalityError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Recommendation request failed: {0}")]
    RecommendationError(String),
    #[error("A recommendation request is already in flight")]
    RequestInFlight,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, VitalityError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] VitalityError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for VitalityError {
    fn from(err: std::io::Error) -> Self {
        VitalityError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for VitalityError {
    fn from(err: serde_json::Error) -> Self {
        VitalityError::StorageError(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_storage_errors() {
        let err: VitalityError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, VitalityError::StorageError(ref msg) if msg.contains("denied")));
    }

    #[test]
    fn cli_error_is_transparent_over_core() {
        let err = CliError::from(VitalityError::ProfileNotFound("p-1".into()));
        assert_eq!(err.to_string(), "Profile not found: p-1");
    }
}
