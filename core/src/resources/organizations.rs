//! Organizations, organization search and the organization's related
//! activities and deals.

use crate::client::Pipedrive;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{DealStatus, DoneStatus, Fields, SearchField};

/// Filter for [`Pipedrive::list_organizations`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationsFilter {
    /// Only organizations owned by this user. `filter_id` takes precedence
    /// on the server when both are set.
    pub user_id: Option<u64>,
    pub filter_id: Option<u64>,
    /// Only names starting with this letter (case insensitive).
    pub first_char: Option<char>,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl OrganizationsFilter {
    fn apply(&self, ep: &mut Endpoint) {
        ep.param_id("user_id", self.user_id)
            .param_id("filter_id", self.filter_id)
            .param_opt("first_char", self.first_char)
            .param_opt("start", self.start)
            .param_id("limit", self.limit)
            .param_opt("sort", self.sort.as_deref());
    }
}

/// Options for [`Pipedrive::search_organizations`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOrganizationOptions {
    /// At least 2 characters, or 1 with `exact_match`.
    pub term: String,
    /// Fields to search in. Empty means all of them.
    pub fields: Vec<SearchField>,
    /// Only full, case-insensitive matches.
    pub exact_match: bool,
    pub start: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchOrganizationOptions {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }
}

/// Options for [`Pipedrive::list_organization_activities`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitiesOptions {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    /// `None` returns done and not-done activities alike.
    pub done: Option<DoneStatus>,
    /// Activity ids to leave out.
    pub exclude: Vec<u64>,
}

/// Options for [`Pipedrive::list_organization_deals`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDealsOptions {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<DealStatus>,
    pub sort: Option<String>,
    /// Only deals where the organization is the primary association.
    pub only_primary_association: Option<bool>,
}

/// Body for [`Pipedrive::add_organization`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrganization {
    pub name: String,
    pub fields: Fields,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Fields::new(),
        }
    }

    fn into_body(self) -> Result<Fields, Error> {
        if self.name.trim().is_empty() {
            return Err(Error::required("name"));
        }
        let mut body = self.fields;
        body.insert("name".to_string(), self.name.into());
        Ok(body)
    }
}

impl<T: Transport> Pipedrive<T> {
    /// `GET /organizations`
    pub fn list_organizations(&self, filter: &OrganizationsFilter) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint("organizations");
        filter.apply(&mut ep);
        self.get(&ep)
    }

    /// `GET /organizations/{id}`
    ///
    /// The single-item view includes fields the listing leaves out. Custom
    /// fields appear under hash keys, resolvable through
    /// [`Pipedrive::list_organization_fields`].
    pub fn get_organization(&self, id: u64) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint(&format!("organizations/{id}")))
    }

    /// `POST /organizations`
    pub fn add_organization(&self, organization: NewOrganization) -> Result<ApiResponse, Error> {
        let body = organization.into_body()?;
        self.send_json(HttpMethod::Post, &self.endpoint("organizations"), &body)
    }

    /// `PUT /organizations/{id}`
    pub fn update_organization(&self, id: u64, fields: &Fields) -> Result<ApiResponse, Error> {
        let ep = self.endpoint(&format!("organizations/{id}"));
        self.send_json(HttpMethod::Put, &ep, fields)
    }

    /// `DELETE /organizations/{id}`. Marks the organization as deleted.
    pub fn delete_organization(&self, id: u64) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoint(&format!("organizations/{id}")))
    }

    /// `GET /organizations/search`
    pub fn search_organizations(
        &self,
        options: &SearchOrganizationOptions,
    ) -> Result<ApiResponse, Error> {
        let term = options.term.trim();
        if term.is_empty() {
            return Err(Error::Validation("search term cannot be empty".to_string()));
        }

        let mut ep = self.endpoint("organizations/search");
        ep.param("term", term)
            .param_list("fields", &options.fields)
            .param_flag("exact_match", options.exact_match, "true")
            .param_opt("start", options.start)
            .param_id("limit", options.limit);
        self.get(&ep)
    }

    /// `GET /organizations/{id}/activities`
    pub fn list_organization_activities(
        &self,
        id: u64,
        options: &ActivitiesOptions,
    ) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint(&format!("organizations/{id}/activities"));
        ep.param_opt("start", options.start)
            .param_id("limit", options.limit)
            .param_opt("done", options.done)
            .param_list("exclude", &options.exclude);
        self.get(&ep)
    }

    /// `GET /organizations/{id}/deals`
    pub fn list_organization_deals(
        &self,
        id: u64,
        options: &OrganizationDealsOptions,
    ) -> Result<ApiResponse, Error> {
        let primary = options
            .only_primary_association
            .map(|only| if only { "1" } else { "0" });

        let mut ep = self.endpoint(&format!("organizations/{id}/deals"));
        ep.param_opt("start", options.start)
            .param_id("limit", options.limit)
            .param_opt("status", options.status)
            .param_opt("sort", options.sort.as_deref())
            .param_opt("only_primary_association", primary);
        self.get(&ep)
    }
}
