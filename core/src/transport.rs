//! The transport seam between request building and the network.
//!
//! # Design
//! `Transport` is the only place real I/O happens. `RequestSpec` builds a
//! `PreparedRequest` and hands it over; whatever comes back is returned
//! as-is. Tests swap in their own implementors to count calls or serve canned
//! responses without touching a socket.
//!
//! `UreqTransport` is the standard implementation. It keeps ureq's
//! status-code-as-error behavior switched off so 4xx/5xx responses stay data.

use std::io::Read;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Deserialize;

/// A request ready to send: method, URL, headers, and body bytes.
pub type PreparedRequest = http::Request<Vec<u8>>;

/// A readable response body. Dropping it closes the underlying stream.
pub type ResponseBody = Box<dyn Read>;

/// A response as returned by a transport, with its body not yet read.
pub type RawResponse = http::Response<ResponseBody>;

/// Opaque failure reported by a transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Anything that can execute a `PreparedRequest`.
pub trait Transport {
    fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// Settings for the ureq agent behind `UreqTransport`.
///
/// Deserializes from JSON with every field optional, e.g.
/// `{"timeout_ms": 5000, "max_redirects": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Overall deadline for a single call, covering connect through body.
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Option<Duration>,
    pub max_redirects: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_redirects: 10,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Agents built by `from_config` send any valid method token, not just the
/// standard verbs.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Wrap an existing agent. The agent's own settings are used unchanged,
    /// including whether it treats error statuses as failures.
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .timeout_global(config.timeout)
            .max_redirects(config.max_redirects)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        // An empty body goes out as no body, so GET/HEAD carry no payload framing.
        let (parts, body) = request.into_parts();
        let response = if body.is_empty() {
            self.agent.run(http::Request::from_parts(parts, ()))?
        } else {
            self.agent.run(http::Request::from_parts(parts, body))?
        };
        Ok(response.map(|body| Box::new(body.into_reader()) as ResponseBody))
    }
}

/// The process-wide transport used when a `RequestSpec` is given none.
///
/// Created on first use; every call returns a handle to the same agent.
pub fn default_transport() -> Arc<UreqTransport> {
    static DEFAULT: OnceLock<Arc<UreqTransport>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(UreqTransport::default())).clone()
}
