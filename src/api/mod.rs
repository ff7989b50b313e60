//! Onboarding API contract.
//!
//! The orchestrator talks to the remote service only through [`ApiClient`].
//! Every failure to obtain a well-formed 2xx JSON body collapses into a
//! [`TransportError`]; callers only ever look at its message. No retries are
//! performed here.
mod http;
mod types;

pub use http::UreqClient;
pub use types::{
    IdentityOnboardRequest, IdentityOnboardResponse, IdentityOutcome, OnboardUserRequest,
    OnboardUserResponse, OrgCreateRequest, OrgCreateResponse, OrgMappingRequest,
    OrgMappingResponse,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Default per-call network timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote endpoints used by a deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    OrgCreate,
    OrgMappings,
    OnboardUser,
    IdentityOnboard,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::OrgCreate => "org/",
            Endpoint::OrgMappings => "create-org-mappings/",
            Endpoint::OnboardUser => "onboard-user/",
            Endpoint::IdentityOnboard => "cognito/onboard",
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// JSON body.
    Post,
    /// Top-level payload fields become query parameters.
    Get,
}

/// Any failure to get a usable response from the API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Connection(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("http status {0}")]
    Status(u16),
    #[error("invalid {endpoint} response: {detail}")]
    InvalidBody {
        endpoint: &'static str,
        detail: String,
    },
}

/// Synchronous call abstraction over the onboarding API.
pub trait ApiClient {
    fn invoke(
        &self,
        endpoint: Endpoint,
        payload: &Value,
        method: Method,
    ) -> Result<Value, TransportError>;
}

/// POST a typed request and decode the typed response.
///
/// A body that does not match the expected shape is reported the same way as
/// a transport failure.
pub fn call<Req, Resp>(
    client: &dyn ApiClient,
    endpoint: Endpoint,
    request: &Req,
) -> Result<Resp, TransportError>
where
    Req: serde::Serialize,
    Resp: DeserializeOwned,
{
    let payload = serde_json::to_value(request).map_err(|err| TransportError::InvalidBody {
        endpoint: endpoint.path(),
        detail: format!("encode request: {err}"),
    })?;
    let value = client.invoke(endpoint, &payload, Method::Post)?;
    serde_json::from_value(value).map_err(|err| TransportError::InvalidBody {
        endpoint: endpoint.path(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
