//! Blocking HTTP implementation of [`ApiClient`] backed by `ureq`.
use super::{ApiClient, Endpoint, Method, TransportError};
use serde_json::Value;
use std::time::{Duration, Instant};
use ureq::Agent;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: Agent,
    base_url: String,
    timeout_secs: u64,
}

impl UreqClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_error(&self, err: ureq::Error) -> TransportError {
        match err {
            ureq::Error::StatusCode(code) => TransportError::Status(code),
            ureq::Error::Timeout(_) => TransportError::Timeout(self.timeout_secs),
            other => TransportError::Connection(other.to_string()),
        }
    }
}

impl ApiClient for UreqClient {
    fn invoke(
        &self,
        endpoint: Endpoint,
        payload: &Value,
        method: Method,
    ) -> Result<Value, TransportError> {
        let url = endpoint.url(&self.base_url);
        let start = Instant::now();
        let sent = match method {
            Method::Post => self.agent.post(&url).send_json(payload),
            Method::Get => {
                let mut request = self.agent.get(&url);
                for (key, value) in query_pairs(payload) {
                    request = request.query(key, value);
                }
                request.call()
            }
        };
        let elapsed_ms = start.elapsed().as_millis();

        let mut response = match sent {
            Ok(response) => response,
            Err(err) => {
                let err = self.map_error(err);
                tracing::warn!(%endpoint, elapsed_ms, error = %err, "api call failed");
                return Err(err);
            }
        };
        tracing::info!(
            %endpoint,
            elapsed_ms,
            status = response.status().as_u16(),
            "api call complete"
        );

        response
            .body_mut()
            .read_json::<Value>()
            .map_err(|err| TransportError::InvalidBody {
                endpoint: endpoint.path(),
                detail: err.to_string(),
            })
    }
}

/// Flatten a JSON object into query parameters. Arrays repeat their key;
/// nulls are dropped.
pub(super) fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let Some(object) = payload.as_object() else {
        return Vec::new();
    };
    let mut pairs = Vec::new();
    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_text(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
