/*!
 * Error types for the lingofill library.
 *
 * This module contains custom error types for the transport client and the
 * orchestration layer, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::record::FieldKind;

/// Errors produced by the transport client when talking to the remote
/// translation API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API rejected our credentials. Never retried.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The API reported a rate-limit condition. Retried per the configured
    /// retry policy, then propagated.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The API answered but the payload was malformed or empty.
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),

    /// Any other transport or HTTP failure.
    #[error("API error: {0}")]
    Api(String),
}

/// Coarse classification of a [`ClientError`], carried inside per-field
/// `Failed` outcomes so callers can report without holding the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientErrorKind {
    Authentication,
    RateLimited,
    InvalidResponse,
    Api,
}

impl ClientError {
    /// Classification of this error
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            Self::Authentication(_) => ClientErrorKind::Authentication,
            Self::RateLimited(_) => ClientErrorKind::RateLimited,
            Self::InvalidResponse(_) => ClientErrorKind::InvalidResponse,
            Self::Api(_) => ClientErrorKind::Api,
        }
    }
}

impl std::fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::InvalidResponse => "invalid_response",
            Self::Api => "api",
        };
        write!(f, "{}", name)
    }
}

/// Errors that abort an entire orchestration invocation.
///
/// Per-field translation failures are not represented here: they are caught
/// inside the orchestrator loops and recorded as `Failed` outcomes instead.
#[derive(Error, Debug)]
pub enum OrchestrationError {
    /// The record type does not declare the field-translation capability the
    /// orchestrator needs.
    #[error("Record type does not expose {kind} field translation capability")]
    MissingCapability {
        /// The capability kind that was required
        kind: FieldKind,
    },
}
