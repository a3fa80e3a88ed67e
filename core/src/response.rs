//! Response normalization and payload accessors.
//!
//! # Design
//! Every operation funnels its `HttpResponse` through [`normalize`], which
//! never fails: an undecodable body becomes a status-500 envelope carrying the
//! decode error. The payload stays an untyped `serde_json::Value` because its
//! shape (single record or list) varies per endpoint; the accessors turn it
//! into records on demand.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::http::HttpResponse;
use crate::Error;

/// Header carrying the number of calls left in the daily quota.
pub const REMAINING_HITS_HEADER: &str = "x-daily-requests-left";

/// Status assigned to envelopes whose body could not be decoded.
pub const DECODE_FAILURE_STATUS: u16 = 500;

/// A generic key/value record as returned by the remote API.
pub type Record = Map<String, Value>;

/// The uniform result of every operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    /// HTTP status, or the body's `errorCode` when present.
    pub status: u16,
    pub error: Option<String>,
    pub error_info: Option<String>,
    pub data: Option<Value>,
    pub remaining_hits: u32,
}

/// Wire shape of the envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(rename = "errorCode")]
    error_code: Option<u16>,
    error: Option<String>,
    error_info: Option<String>,
    data: Option<Value>,
}

/// Convert a completed exchange into an `ApiResponse`.
pub fn normalize(response: HttpResponse) -> ApiResponse {
    let remaining_hits = response
        .header(REMAINING_HITS_HEADER)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0);

    let normalized = match serde_json::from_str::<Envelope>(&response.body) {
        Ok(envelope) => ApiResponse {
            success: envelope.success,
            status: envelope.error_code.unwrap_or(response.status),
            error: envelope.error,
            error_info: envelope.error_info,
            data: envelope.data,
            remaining_hits,
        },
        Err(e) => {
            tracing::warn!(
                http_status = response.status,
                error = %e,
                "response body is not a valid envelope"
            );
            ApiResponse {
                status: DECODE_FAILURE_STATUS,
                error: Some(e.to_string()),
                remaining_hits,
                ..Default::default()
            }
        }
    };

    tracing::debug!(
        status = normalized.status,
        remaining_hits = normalized.remaining_hits,
        "response normalized"
    );
    normalized
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// The payload as a list of records. A single record is wrapped.
    pub fn data_as_list(&self) -> Result<Vec<Record>, Error> {
        match self.payload()? {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record.clone()),
                    _ => Err(Error::UnexpectedDataType),
                })
                .collect(),
            Value::Object(record) => Ok(vec![record.clone()]),
            _ => Err(Error::UnexpectedDataType),
        }
    }

    /// The payload as one record. For a list, its first element (or an empty
    /// record when the list is empty).
    pub fn data_as_record(&self) -> Result<Record, Error> {
        match self.payload()? {
            Value::Array(items) => match items.first() {
                Some(Value::Object(record)) => Ok(record.clone()),
                Some(_) => Err(Error::UnexpectedDataType),
                None => Ok(Record::new()),
            },
            Value::Object(record) => Ok(record.clone()),
            _ => Err(Error::UnexpectedDataType),
        }
    }

    fn payload(&self) -> Result<&Value, Error> {
        if self.is_error() {
            return Err(Error::Api {
                status: self.status,
                message: self.error.clone().unwrap_or_default(),
            });
        }
        self.data.as_ref().ok_or(Error::NoData)
    }
}
