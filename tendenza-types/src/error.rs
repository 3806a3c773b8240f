use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tendenza workspace.
///
/// This wraps capability mismatches, argument validation errors, the
/// warehouse failure taxonomy produced by executors, and the reference-data
/// condition reported by the selection pipeline.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TendenzaError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "top-terms").
        capability: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (missing columns, broken ranking, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// The warehouse yielded an empty reference country set; nothing can be selected.
    #[error("no reference data available")]
    NoReferenceData,

    /// The warehouse rejected the request for quota, billing, or access reasons.
    #[error("{connector} quota exhausted: {msg}")]
    QuotaExceeded {
        /// Connector name that classified the failure.
        connector: String,
        /// Service-supplied detail, kept for diagnosis.
        msg: String,
    },

    /// The warehouse rejected the request before execution (invalid query,
    /// cost ceiling exceeded). Indicates a configuration problem, not a
    /// transient condition.
    #[error("{connector} rejected request: {msg}")]
    MalformedRequest {
        /// Connector name that classified the failure.
        connector: String,
        /// Service-supplied detail, kept for diagnosis.
        msg: String,
    },

    /// The warehouse throttled the request.
    #[error("{connector} rate limited: {msg}")]
    RateLimited {
        /// Connector name that classified the failure.
        connector: String,
        /// Service-supplied detail, kept for diagnosis.
        msg: String,
    },

    /// An individual connector returned an unclassified error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

/// Projection of [`TendenzaError`] onto the four-way executor taxonomy.
///
/// Everything that is not a classified warehouse failure maps to `Unknown`;
/// the reporter treats those by passing the message through for diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Billing disabled, credits exhausted, or access denied.
    QuotaExceeded,
    /// Request rejected before execution (cost ceiling, invalid query).
    MalformedRequest,
    /// Throttled by the service.
    RateLimited,
    /// Anything else.
    Unknown,
}

impl TendenzaError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `QuotaExceeded` error.
    pub fn quota_exceeded(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MalformedRequest` error.
    pub fn malformed_request(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedRequest {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RateLimited {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Classify this error under the executor taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Self::MalformedRequest { .. } => ErrorKind::MalformedRequest,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            _ => ErrorKind::Unknown,
        }
    }

    /// Returns true if waiting and re-triggering the request may succeed.
    ///
    /// `MalformedRequest` is deliberately excluded: a rejected query or an
    /// exceeded cost ceiling points at configuration, not at load.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded { .. } | Self::RateLimited { .. }
        )
    }
}
