//! Synchronous client for the Pipedrive REST API.
//!
//! # Overview
//! Builds authenticated requests for deals, leads, lead labels,
//! organizations, organization and person fields, persons, users and
//! webhooks; executes them once; and normalizes every reply into an
//! [`ApiResponse`] envelope.
//!
//! # Design
//! - `Pipedrive` holds only a read-only `ClientConfig` and a `Transport`.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   the `Transport` trait is the single I/O seam, `UreqTransport` the
//!   default.
//! - Local validation runs before anything is sent. Transport failures are
//!   `Err`; remote errors travel inside the envelope.
//! - No retries, pagination loops or caching.
//!
//! ```no_run
//! use pipedrive_core::{ClientConfig, DealStatus, DealsFilter, Pipedrive};
//!
//! let client = Pipedrive::new(ClientConfig::new("my-token"))?;
//! let filter = DealsFilter {
//!     status: Some(DealStatus::Open),
//!     limit: Some(50),
//!     ..Default::default()
//! };
//! let deals = client.list_deals(&filter)?.data_as_list()?;
//! println!("{} open deals", deals.len());
//! # Ok::<(), pipedrive_core::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod resources;
pub mod response;
pub mod transport;
pub mod types;

pub use client::Pipedrive;
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::Error;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resources::*;
pub use response::{normalize, ApiResponse, Record};
pub use transport::{Transport, UreqTransport};
pub use types::{
    ArchivedStatus, DealStatus, DoneStatus, EventAction, EventObject, FieldOption, FieldType,
    Fields, PageFilter, SearchField,
};
