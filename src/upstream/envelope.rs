use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const STATUS_OK: &str = "ok";

/// Wrapper object every UEX response is delivered in
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Option<String>,
    data: Option<Vec<T>>,
}

/// Parse a response body and unwrap its data payload.
///
/// Anything other than `status: "ok"` with a present `data` array is a failure
/// for the whole call.
pub fn parse_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|source| Error::Parse {
        endpoint: endpoint.to_string(),
        source,
    })?;

    match (envelope.status.as_deref(), envelope.data) {
        (Some(STATUS_OK), Some(data)) => Ok(data),
        (Some(STATUS_OK), None) => Err(Error::Status {
            endpoint: endpoint.to_string(),
            status: "ok without data".to_string(),
        }),
        (status, _) => Err(Error::Status {
            endpoint: endpoint.to_string(),
            status: status.unwrap_or("missing").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StarSystem;

    #[test]
    fn test_ok_envelope() {
        let body = r#"{"status": "ok", "http_code": 200, "data": [{"id": 68, "name": "Stanton"}]}"#;
        let systems: Vec<StarSystem> = parse_envelope("star_systems", body).unwrap();
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].name, "Stanton");
    }

    #[test]
    fn test_error_status_rejected() {
        let body = r#"{"status": "requests_limit_reached", "data": []}"#;
        let err = parse_envelope::<StarSystem>("star_systems", body).unwrap_err();
        assert!(matches!(err, Error::Status { ref status, .. } if status == "requests_limit_reached"));
    }

    #[test]
    fn test_missing_data_rejected() {
        let err = parse_envelope::<StarSystem>("star_systems", r#"{"status": "ok"}"#).unwrap_err();
        assert!(matches!(err, Error::Status { .. }));

        let err = parse_envelope::<StarSystem>("star_systems", r#"{"status": "ok", "data": null}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Status { .. }));
    }

    #[test]
    fn test_malformed_body_is_upstream_parse_error() {
        let err = parse_envelope::<StarSystem>("star_systems", "<html>502</html>").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.is_upstream());
    }
}
