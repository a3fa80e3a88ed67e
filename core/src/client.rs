//! The Pipedrive API client.
//!
//! # Design
//! `Pipedrive` holds a validated, read-only `ClientConfig` and a `Transport`.
//! Every operation runs the same pipeline: validate input, compose an
//! `Endpoint`, render it into an `HttpRequest`, execute it once, and
//! normalize the result into an `ApiResponse`. Resource operations live in
//! `crate::resources` as further `impl` blocks on this type.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::{normalize, ApiResponse};
use crate::transport::{Transport, UreqTransport};

/// Synchronous client for the Pipedrive REST API.
///
/// Nothing is mutated during a call, so a shared reference can be used from
/// several threads when the transport allows it.
#[derive(Debug, Clone)]
pub struct Pipedrive<T = UreqTransport> {
    config: ClientConfig,
    base_path: String,
    transport: T,
}

impl Pipedrive<UreqTransport> {
    /// Client over a default blocking `ureq` agent.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Client configured from `PIPEDRIVE_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> Pipedrive<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, Error> {
        config.validate()?;
        let base_path = config.base_path();
        Ok(Self {
            config,
            base_path,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A fresh endpoint for `path` carrying the token.
    pub fn endpoint(&self, path: &str) -> Endpoint {
        Endpoint::new(&self.base_path, path, &self.config.api_token)
    }

    pub(crate) fn get(&self, endpoint: &Endpoint) -> Result<ApiResponse, Error> {
        self.dispatch(HttpMethod::Get, endpoint, None)
    }

    pub(crate) fn delete(&self, endpoint: &Endpoint) -> Result<ApiResponse, Error> {
        self.dispatch(HttpMethod::Delete, endpoint, None)
    }

    pub(crate) fn send_json<B>(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<ApiResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body)?;
        self.dispatch(method, endpoint, Some(body))
    }

    fn dispatch(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        body: Option<String>,
    ) -> Result<ApiResponse, Error> {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        let request = HttpRequest {
            method,
            url: endpoint.render()?,
            headers,
            body,
        };

        tracing::debug!(method = method.as_str(), path = endpoint.path(), "dispatching request");
        let response = self.transport.execute(&request).inspect_err(|e| {
            tracing::debug!(path = endpoint.path(), error = %e, "transport failed");
        })?;
        Ok(normalize(response))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::http::HttpResponse;

    #[derive(Debug)]
    struct FailingTransport;

    impl Transport for FailingTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, Error> {
            Err(Error::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn construction_validates_config() {
        let err = Pipedrive::with_transport(ClientConfig::new(""), FailingTransport).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn every_request_carries_the_token() {
        let client = client();
        client.get(&client.endpoint("users")).unwrap();
        let req = client.transport().last();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, format!("{BASE}/users?api_token={TOKEN}"));
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn json_requests_set_content_type() {
        let client = client();
        let body = serde_json::json!({"name": "Acme"});
        client
            .send_json(HttpMethod::Post, &client.endpoint("organizations"), &body)
            .unwrap();
        let req = client.transport().last();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(sent_body(&client), body);
    }

    #[test]
    fn responses_are_normalized() {
        let client = client_replying(404, r#"{"success":false,"error":"not found","errorCode":404}"#);
        let resp = client.get(&client.endpoint("persons/9")).unwrap();
        assert_eq!(resp.status, 404);
        assert_eq!(resp.remaining_hits, 100);
        assert_eq!(resp.data_as_record().unwrap_err().to_string(), "not found");
    }

    #[test]
    fn transport_failure_is_returned_as_error() {
        let client =
            Pipedrive::with_transport(ClientConfig::new("t"), FailingTransport).unwrap();
        let err = client.get(&client.endpoint("users")).unwrap_err();
        assert_eq!(err, Error::Transport("connection refused".to_string()));
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipedrive<UreqTransport>>();
        assert_send_sync::<ClientConfig>();
        assert_send_sync::<Endpoint>();
    }

    #[test]
    fn debug_output_hides_the_token() {
        let client = Pipedrive::with_transport(
            ClientConfig::new("very-secret-token"),
            FailingTransport,
        )
        .unwrap();
        assert!(!format!("{client:?}").contains("very-secret-token"));
    }

    #[test]
    fn base_url_override_is_used() {
        let client = Pipedrive::with_transport(
            ClientConfig::new("t").with_base_url("http://localhost:3000/v1/"),
            RecordingTransport::replying(200, "{}"),
        )
        .unwrap();
        client.get(&client.endpoint("users")).unwrap();
        assert_eq!(
            client.transport().last().url,
            "http://localhost:3000/v1/users?api_token=t"
        );
    }
}
