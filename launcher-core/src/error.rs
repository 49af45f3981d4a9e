//! Bridge error types.

use serde::Serialize;
use thiserror::Error;

/// Wire code reported to the caller alongside the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    PermissionDenied,
    InvalidType,
    UnexpectedError,
    RoleNotAvailable,
    UnsupportedPlatform,
    NotImplemented,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::UnexpectedError => "UNEXPECTED_ERROR",
            ErrorCode::RoleNotAvailable => "ROLE_NOT_AVAILABLE",
            ErrorCode::UnsupportedPlatform => "UNSUPPORTED_PLATFORM",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by the bridge.
///
/// Every variant carries the human-readable message that travels to the
/// caller; `Display` is that message alone so it can be forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A required runtime permission has not been granted.
    #[error("{0}")]
    PermissionDenied(String),

    /// The wallpaper exists but is not a static bitmap.
    #[error("{0}")]
    InvalidType(String),

    /// The host OS call failed or panicked.
    #[error("{0}")]
    Unexpected(String),

    /// The requested system role does not exist on this device.
    #[error("{0}")]
    RoleNotAvailable(String),

    /// The platform level is too old for the operation.
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// The method name is not one the bridge knows.
    #[error("{0}")]
    NotImplemented(String),
}

impl BridgeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            BridgeError::InvalidType(_) => ErrorCode::InvalidType,
            BridgeError::Unexpected(_) => ErrorCode::UnexpectedError,
            BridgeError::RoleNotAvailable(_) => ErrorCode::RoleNotAvailable,
            BridgeError::UnsupportedPlatform(_) => ErrorCode::UnsupportedPlatform,
            BridgeError::NotImplemented(_) => ErrorCode::NotImplemented,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_names() {
        let err = BridgeError::RoleNotAvailable("ROLE_HOME is not available".to_string());
        assert_eq!(err.code().as_str(), "ROLE_NOT_AVAILABLE");
        assert_eq!(err.to_string(), "ROLE_HOME is not available");
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::UnsupportedPlatform).unwrap();
        assert_eq!(json, "\"UNSUPPORTED_PLATFORM\"");
    }
}
