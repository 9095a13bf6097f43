//! Error types for the mission board.
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (blank or oversized text, unknown mission id, bad config)
//! - 4: Operation failed (I/O, serialization, save, terminal)

use thiserror::Error;

/// Exit codes for the `mb` binary.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for mission board operations.
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Mission text cannot be blank")]
    BlankText,

    #[error("Mission text is {len} characters, the limit is {limit}")]
    TooLong { len: usize, limit: usize },

    #[error("Mission not found: {0}")]
    NotFound(u64),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParse(toml::de::Error),

    // Operation failures (exit code 4)
    #[error("Failed to save missions: {0}")]
    SaveFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::TomlParse(e)
    }
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::BlankText
            | Error::TooLong { .. }
            | Error::NotFound(_)
            | Error::InvalidKey(_)
            | Error::InvalidConfig(_)
            | Error::TomlParse(_) => exit_codes::USER_ERROR,

            Error::SaveFailed(_) | Error::Io(_) | Error::Json(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for mission board operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_exit_code_two() {
        assert_eq!(Error::BlankText.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(Error::NotFound(7).exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            Error::TooLong { len: 151, limit: 150 }.exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn io_errors_map_to_operation_failed() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
        assert_eq!(
            Error::SaveFailed("nope".into()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn config_errors_are_user_errors() {
        let parse = toml::from_str::<toml::Table>("sound = = nope").unwrap_err();
        assert_eq!(Error::from(parse).exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            Error::InvalidConfig("missing".into()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn wrapped_io_error_is_not_repeated_in_chain() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        let chain = format!("{:#}", anyhow::Error::new(err).context("failed to load"));
        assert_eq!(chain.matches("gone").count(), 1);
    }

    #[test]
    fn too_long_message_names_both_lengths() {
        let msg = Error::TooLong { len: 90, limit: 80 }.to_string();
        assert!(msg.contains("90"));
        assert!(msg.contains("80"));
    }
}
