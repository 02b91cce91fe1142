//! Error taxonomy for a provisioning run.
//!
//! Every variant is fatal: the run stops at the first failure, nothing is
//! retried, and nothing already created is rolled back (folder creation is
//! idempotent and safe to leave in place).

use thiserror::Error;

/// Errors that abort a provisioning run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Bad or missing input (job-spec fields, path segments, base URL).
    /// Raised before any network call is made.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection or timeout failure from the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] curl::Error),

    /// The server rejected our credentials.
    #[error("authorization rejected for {url} (HTTP {status})")]
    Authorization { url: String, status: u32 },

    /// A response code outside the explicitly handled set.
    #[error("unexpected HTTP {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u32,
        body: String,
    },

    /// An existence probe could not determine whether an item is present.
    /// Never coerced to "absent": creating over an item in unknown state
    /// could clobber it.
    #[error("could not determine state of {item} (HTTP {status}): {body}")]
    AmbiguousState {
        item: String,
        status: u32,
        body: String,
    },
}

impl ProvisionError {
    /// Classifies a non-success response from the crumb endpoint or a
    /// mutating call. 401/403 are credential failures, everything else is
    /// an unexpected status carrying the body for diagnostics.
    pub fn from_response(url: &str, status: u32, body: String) -> Self {
        match status {
            401 | 403 => ProvisionError::Authorization {
                url: url.to_string(),
                status,
            },
            _ => ProvisionError::UnexpectedStatus {
                url: url.to_string(),
                status,
                body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_classified() {
        assert!(matches!(
            ProvisionError::from_response("http://j/createItem", 401, String::new()),
            ProvisionError::Authorization { status: 401, .. }
        ));
        assert!(matches!(
            ProvisionError::from_response("http://j/createItem", 403, String::new()),
            ProvisionError::Authorization { status: 403, .. }
        ));
    }

    #[test]
    fn other_statuses_unexpected() {
        match ProvisionError::from_response("http://j/createItem", 500, "boom".to_string()) {
            ProvisionError::UnexpectedStatus { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }
}
