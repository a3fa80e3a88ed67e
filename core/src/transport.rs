//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. The default `UreqTransport`
//! is blocking and performs exactly one attempt per call. Statuses of 400 and
//! above come back as data so the response normalizer can read the remote
//! error envelope; only failures to complete the exchange become
//! `Error::Transport`.

use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs a single HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a caller-configured agent (timeouts, proxies, TLS).
    ///
    /// The agent must be built with `http_status_as_error(false)`, otherwise
    /// remote error envelopes surface as transport failures.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => without_body(self.agent.get(url), request),
            HttpMethod::Delete => without_body(self.agent.delete(url), request),
            HttpMethod::Post => with_body(self.agent.post(url), request),
            HttpMethod::Put => with_body(self.agent.put(url), request),
            HttpMethod::Patch => with_body(self.agent.patch(url), request),
        };
        let mut response = result.map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn without_body(
    mut builder: RequestBuilder<WithoutBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<Body>, ureq::Error> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.call()
}

fn with_body(
    mut builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<Body>, ureq::Error> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
