//! Error types shared by the fetch, aggregation and snapshot stages.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::ParentRef;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure talking to the upstream API.
    #[error("request to {endpoint} failed: {source}")]
    Upstream {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The envelope did not carry `status: "ok"` with a data payload.
    #[error("{endpoint} answered with status {status:?}")]
    Status { endpoint: String, status: String },

    /// Response body was not the JSON shape we expected.
    #[error("failed to parse response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        source: serde_json::Error,
    },

    /// POI fetch for a single parent failed. Recovered inside the collector.
    #[error("POI fetch for {parent} failed: {source}")]
    PartialFetch {
        parent: ParentRef,
        source: Box<Error>,
    },

    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid snapshot JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that originate in the upstream API (transport, envelope, body).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Upstream { .. } | Error::Status { .. } | Error::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParentKind;

    #[test]
    fn test_upstream_classification() {
        let status = Error::Status {
            endpoint: "planets".into(),
            status: "requests_limit_reached".into(),
        };
        assert!(status.is_upstream());

        let parse = Error::Parse {
            endpoint: "moons".into(),
            source: serde_json::from_str::<u8>("{").unwrap_err(),
        };
        assert!(parse.is_upstream());

        let write = Error::Write {
            path: PathBuf::from("destinations.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!write.is_upstream());
    }

    #[test]
    fn test_partial_fetch_message_names_parent() {
        let err = Error::PartialFetch {
            parent: ParentRef::new(ParentKind::Planet, 4, "Hurston"),
            source: Box::new(Error::Status {
                endpoint: "poi".into(),
                status: "error".into(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("planet 4 (Hurston)"));
        assert!(msg.contains("status \"error\""));
    }
}
