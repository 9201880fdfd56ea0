//! Error types for the user-posts service.
//!
//! Every upstream failure is an [`UpstreamError`]. None of them are retried:
//! they are threaded up to the aggregator, which decides which single error
//! (if any) survives the merge. A missing user is not an error at all.

use thiserror::Error;

/// Failures raised while talking to the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The request could not be built (e.g. malformed base URL). No I/O was attempted.
    #[error("Unexpected error creating client request for Cool Vendor's {api} API: error={reason}")]
    RequestConstruction { api: &'static str, reason: String },

    /// The transport failed to execute the request.
    #[error("Unexpected communication or client policy error occurred trying to fetch {resource} from Cool Vendor: {reason}")]
    Communication { resource: String, reason: String },

    /// A 200 body could not be decoded into the expected model.
    #[error("Unable to parse response body as '{model}' JSON for Cool Vendor's {api} API: error={reason}")]
    Decode {
        model: &'static str,
        api: &'static str,
        reason: String,
    },

    /// The body of an unexpected response could not be read.
    #[error("Unexpected error trying to read response body for server error trying to fetch {resource} from Cool Vendor: error={reason}")]
    BodyRead { resource: String, reason: String },

    /// Upstream answered with an unexpected status. Carries the raw body.
    #[error("Unexpected server error occurred trying to fetch {resource} from Cool Vendor: {body}")]
    Server { resource: String, body: String },
}

impl UpstreamError {
    /// Short, stable name of the error kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestConstruction { .. } => "request_construction",
            Self::Communication { .. } => "communication",
            Self::Decode { .. } => "decode",
            Self::BodyRead { .. } => "body_read",
            Self::Server { .. } => "server",
        }
    }
}

/// Failures surfaced by the aggregator.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A fetch task panicked or was aborted before producing a result.
    #[error("Fetch task for {fetch} did not complete: {reason}")]
    TaskFailed { fetch: &'static str, reason: String },
}

impl AggregateError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream(e) => e.kind(),
            Self::TaskFailed { .. } => "task_failed",
        }
    }
}

/// Raised by an [`HttpTransport`](crate::upstream::HttpTransport) when a
/// request cannot be executed or its body cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_embeds_body() {
        let err = UpstreamError::Server {
            resource: "userId=987654".to_string(),
            body: "world.execute (me);".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected server error occurred trying to fetch userId=987654 from Cool Vendor: world.execute (me);"
        );
        assert_eq!(err.kind(), "server");
    }

    #[test]
    fn test_decode_error_names_model() {
        let err = UpstreamError::Decode {
            model: "user",
            api: "Get User By ID",
            reason: "EOF".to_string(),
        };
        assert!(err.to_string().contains("'user'"));
        assert!(err.to_string().contains("Get User By ID"));
    }

    #[test]
    fn test_aggregate_error_is_transparent() {
        let inner = UpstreamError::Communication {
            resource: "posts for userId=1".to_string(),
            reason: "connection refused".to_string(),
        };
        let expected = inner.to_string();
        let err = AggregateError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
