//! Custom field definitions for organizations and persons.
//!
//! # Design
//! A field's type is fixed at creation: `update_organization_field` refuses a
//! body that tries to change `field_type` instead of letting the server
//! reject it.

use serde::Serialize;
use serde_json::Value;

use crate::client::Pipedrive;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{FieldOption, FieldType, Fields, PageFilter};

/// Body for [`Pipedrive::add_organization_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewField {
    pub name: String,
    pub field_type: FieldType,
    /// Required for `enum` and `set` fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Show the field in the "add new" dialog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_visible_flag: Option<bool>,
}

impl NewField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            options: Vec::new(),
            add_visible_flag: None,
        }
    }

    #[must_use]
    pub fn with_option(mut self, label: impl Into<String>) -> Self {
        self.options.push(FieldOption::new(label));
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::required("name"));
        }
        if self.field_type.requires_options() && self.options.is_empty() {
            return Err(Error::Validation(format!(
                "field type '{}' requires at least one option",
                self.field_type
            )));
        }
        Ok(())
    }
}

impl PageFilter {
    fn apply(&self, ep: &mut crate::endpoint::Endpoint) {
        ep.param_opt("start", self.start).param_id("limit", self.limit);
    }
}

impl<T: Transport> Pipedrive<T> {
    /// `GET /organizationFields`
    pub fn list_organization_fields(&self, filter: &PageFilter) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint("organizationFields");
        filter.apply(&mut ep);
        self.get(&ep)
    }

    /// `GET /organizationFields/{id}`
    pub fn get_organization_field(&self, id: u64) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint(&format!("organizationFields/{id}")))
    }

    /// `POST /organizationFields`
    pub fn add_organization_field(&self, field: &NewField) -> Result<ApiResponse, Error> {
        field.validate()?;
        self.send_json(HttpMethod::Post, &self.endpoint("organizationFields"), field)
    }

    /// `PUT /organizationFields/{id}`. Accepts `name`, `options` and
    /// `add_visible_flag`; the field type cannot be changed.
    pub fn update_organization_field(&self, id: u64, fields: &Fields) -> Result<ApiResponse, Error> {
        if fields.contains_key("field_type") {
            return Err(Error::Validation(
                "the type of an existing field cannot be changed".to_string(),
            ));
        }
        if let Some(name) = fields.get("name") {
            if !matches!(name, Value::String(s) if !s.trim().is_empty()) {
                return Err(Error::Validation(
                    "field 'name' must be a non-empty string".to_string(),
                ));
            }
        }
        let ep = self.endpoint(&format!("organizationFields/{id}"));
        self.send_json(HttpMethod::Put, &ep, fields)
    }

    /// `DELETE /organizationFields/{id}`
    pub fn delete_organization_field(&self, id: u64) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoint(&format!("organizationFields/{id}")))
    }

    /// `GET /personFields`
    pub fn list_person_fields(&self, filter: &PageFilter) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint("personFields");
        filter.apply(&mut ep);
        self.get(&ep)
    }

    /// `GET /personFields/{id}`
    pub fn get_person_field(&self, id: u64) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint(&format!("personFields/{id}")))
    }
}
