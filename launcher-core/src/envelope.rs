//! Uniform response returned for every bridge call.

use serde::Serialize;

use crate::error::{BridgeError, ErrorCode};

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Encoded image data.
    Bytes(Vec<u8>),
    /// Launch result of a fire-and-forget OS flow.
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Envelope {
    Success { payload: Payload },
    Failure { code: ErrorCode, message: String },
}

impl Envelope {
    pub fn success(payload: Payload) -> Self {
        Envelope::Success { payload }
    }

    pub fn failure(error: BridgeError) -> Self {
        Envelope::Failure {
            code: error.code(),
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Envelope::Success { payload } => Some(payload),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { code, .. } => Some(*code),
        }
    }
}

impl From<Result<Payload, BridgeError>> for Envelope {
    fn from(result: Result<Payload, BridgeError>) -> Self {
        match result {
            Ok(payload) => Envelope::success(payload),
            Err(error) => Envelope::failure(error),
        }
    }
}
