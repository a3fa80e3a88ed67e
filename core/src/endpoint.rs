//! Composable request targets.
//!
//! An `Endpoint` is base URL + resource path + caller-supplied path
//! segments + ordered query pairs. The `api_token` pair is always first.
//! Nothing is validated until `render`, which either returns a fully encoded
//! address or fails on a malformed base.

use std::fmt::{self, Display};

use url::Url;

use crate::config::REDACTED;
use crate::error::Error;

#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
    path: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| match k.as_str() {
                "api_token" => (k.as_str(), REDACTED),
                _ => (k.as_str(), v.as_str()),
            })
            .collect();
        f.debug_struct("Endpoint")
            .field("base", &self.base)
            .field("path", &self.path)
            .field("segments", &self.segments)
            .field("query", &query)
            .finish()
    }
}

impl Endpoint {
    pub fn new(base: &str, path: &str, token: &str) -> Self {
        Self {
            base: base.to_string(),
            path: path.trim_start_matches('/').to_string(),
            segments: Vec::new(),
            query: vec![("api_token".to_string(), token.to_string())],
        }
    }

    /// Resource path relative to the base, e.g. `organizations/42/deals`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Appends one path segment. Reserved characters (`/`, `?`, `#`, `%`)
    /// are percent-encoded at render time, so the value never leaves its
    /// segment.
    pub fn segment(&mut self, value: impl Display) -> &mut Self {
        self.segments.push(value.to_string());
        self
    }

    /// Query pairs in insertion order, token included.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Value of the first pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn param(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds `key` only when `value` is set and renders non-empty.
    pub fn param_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.query.push((key.to_string(), value));
            }
        }
        self
    }

    /// Adds a numeric id or limit. Zero is never a valid id or page size.
    pub fn param_id<N>(&mut self, key: &str, value: Option<N>) -> &mut Self
    where
        N: Display + Default + PartialEq,
    {
        self.param_opt(key, value.filter(|v| *v != N::default()))
    }

    pub fn param_flag(&mut self, key: &str, flag: bool, value: &str) -> &mut Self {
        if flag {
            self.param(key, value);
        }
        self
    }

    /// Joins `values` with commas into a single pair; omitted when empty.
    pub fn param_list<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        if !joined.is_empty() {
            self.query.push((key.to_string(), joined));
        }
        self
    }

    /// Fully qualified, percent-encoded address.
    pub fn render(&self) -> Result<String, Error> {
        let raw = format!("{}/{}", self.base.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::InvalidConfig(format!("malformed base url '{}': {e}", self.base)))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "base url '{}' is not an http(s) address",
                self.base
            )));
        }

        if !self.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| Error::InvalidConfig(format!("base url '{}' has no path", self.base)))?
                .extend(&self.segments);
        }
        url.query_pairs_mut().extend_pairs(&self.query);
        Ok(url.into())
    }
}
