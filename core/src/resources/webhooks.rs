//! Webhook subscriptions.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::client::Pipedrive;
use crate::config::REDACTED;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{EventAction, EventObject};

/// Body for [`Pipedrive::add_webhook`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewWebhook {
    /// Where Pipedrive POSTs the notifications.
    pub subscription_url: String,
    pub event_action: EventAction,
    pub event_object: EventObject,
    /// Permissions of this user are applied to the notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth_password: Option<String>,
}

impl fmt::Debug for NewWebhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewWebhook")
            .field("subscription_url", &self.subscription_url)
            .field("event_action", &self.event_action)
            .field("event_object", &self.event_object)
            .field("user_id", &self.user_id)
            .field("http_auth_user", &self.http_auth_user)
            .field(
                "http_auth_password",
                &self.http_auth_password.as_ref().map(|_| REDACTED),
            )
            .finish()
    }
}

impl NewWebhook {
    pub fn new(
        subscription_url: impl Into<String>,
        event_action: EventAction,
        event_object: EventObject,
    ) -> Self {
        Self {
            subscription_url: subscription_url.into(),
            event_action,
            event_object,
            user_id: None,
            http_auth_user: None,
            http_auth_password: None,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.subscription_url.trim().is_empty() {
            return Err(Error::required("subscription_url"));
        }
        match Url::parse(&self.subscription_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(Error::Validation(format!(
                "subscription_url '{}' is not an http(s) address",
                self.subscription_url
            ))),
        }
    }
}

impl<T: Transport> Pipedrive<T> {
    /// `GET /webhooks`
    pub fn list_webhooks(&self) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint("webhooks"))
    }

    /// `POST /webhooks`
    pub fn add_webhook(&self, webhook: &NewWebhook) -> Result<ApiResponse, Error> {
        webhook.validate()?;
        self.send_json(HttpMethod::Post, &self.endpoint("webhooks"), webhook)
    }

    /// `DELETE /webhooks/{id}`
    pub fn delete_webhook(&self, id: u64) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoint(&format!("webhooks/{id}")))
    }
}
