use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::envelope::STATUS_OK;
use super::transport::{Query, Transport};
use crate::error::{Error, Result};

/// In-memory transport for tests and offline runs.
///
/// Routes are keyed by endpoint plus query (`poi?id_planet=4`). Unknown routes
/// answer like a missing page.
#[derive(Default)]
pub struct MemoryTransport {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

#[derive(Default)]
struct Route {
    body: Option<String>,
    delay: Duration,
}

pub fn route_key(endpoint: &str, query: Query<'_>) -> String {
    if query.is_empty() {
        return endpoint.to_string();
    }
    let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{}?{}", endpoint, params.join("&"))
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a raw body for a route
    pub fn respond(mut self, endpoint: &str, query: Query<'_>, body: impl Into<String>) -> Self {
        self.routes
            .entry(route_key(endpoint, query))
            .or_default()
            .body = Some(body.into());
        self
    }

    /// Serve `data` wrapped in a successful envelope
    pub fn respond_data<S: Serialize + ?Sized>(self, endpoint: &str, query: Query<'_>, data: &S) -> Self {
        let body = serde_json::json!({ "status": STATUS_OK, "data": data }).to_string();
        self.respond(endpoint, query, body)
    }

    /// Delay the answer for a route
    pub fn delay(mut self, endpoint: &str, query: Query<'_>, delay: Duration) -> Self {
        self.routes
            .entry(route_key(endpoint, query))
            .or_default()
            .delay = delay;
        self
    }

    /// Every route requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, endpoint: &str, query: Query<'_>) -> Result<String> {
        let key = route_key(endpoint, query);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(key.clone());
        }

        let route = self.routes.get(&key);
        if let Some(delay) = route.map(|r| r.delay).filter(|d| !d.is_zero()) {
            tokio::time::sleep(delay).await;
        }

        route
            .and_then(|r| r.body.clone())
            .ok_or_else(|| Error::Status {
                endpoint: key,
                status: "HTTP 404 Not Found".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key() {
        assert_eq!(route_key("outposts", &[]), "outposts");
        assert_eq!(route_key("poi", &[("id_moon", 7)]), "poi?id_moon=7");
    }

    #[tokio::test]
    async fn test_unknown_route_fails() {
        let transport = MemoryTransport::new().respond("outposts", &[], "{}");
        assert_eq!(transport.get("outposts", &[]).await.unwrap(), "{}");
        assert!(transport.get("moons", &[("id_star_system", 1)]).await.is_err());
        assert_eq!(transport.requests(), vec!["outposts", "moons?id_star_system=1"]);
    }
}
