//! Leads and lead labels.
//!
//! Lead ids are UUID strings and updates go through `PATCH`, unlike every
//! other resource.

use serde_json::Value;

use crate::client::Pipedrive;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{ArchivedStatus, Fields};

const LINK_REQUIRED: &str =
    "a lead always has to be linked to a person or an organization or both";

/// Filter for [`Pipedrive::list_leads`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadsFilter {
    pub limit: Option<u32>,
    pub start: Option<u32>,
    pub archived_status: Option<ArchivedStatus>,
    pub owner_id: Option<u64>,
    pub person_id: Option<u64>,
    pub organization_id: Option<u64>,
    pub filter_id: Option<u64>,
    pub sort: Option<String>,
}

impl LeadsFilter {
    fn apply(&self, ep: &mut Endpoint) {
        ep.param_id("limit", self.limit)
            .param_opt("start", self.start)
            .param_opt("archived_status", self.archived_status)
            .param_id("owner_id", self.owner_id)
            .param_id("person_id", self.person_id)
            .param_id("organization_id", self.organization_id)
            .param_id("filter_id", self.filter_id)
            .param_opt("sort", self.sort.as_deref());
    }
}

/// Body for [`Pipedrive::add_lead`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLead {
    pub title: String,
    pub person_id: Option<u64>,
    pub organization_id: Option<u64>,
    /// Remaining attributes (owner, value, label ids, custom fields). A
    /// `person_id` or `organization_id` given here counts as a link; the
    /// typed fields above take precedence when both are set.
    pub fields: Fields,
}

impl NewLead {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_person(mut self, person_id: u64) -> Self {
        self.person_id = Some(person_id);
        self
    }

    #[must_use]
    pub fn with_organization(mut self, organization_id: u64) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::required("title"));
        }
        let linked = |typed: Option<u64>, key: &str| {
            typed.is_some() || self.fields.get(key).is_some_and(|v| !v.is_null())
        };
        if !linked(self.person_id, "person_id") && !linked(self.organization_id, "organization_id")
        {
            return Err(Error::Validation(LINK_REQUIRED.to_string()));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Fields, Error> {
        self.validate()?;
        let mut body = self.fields;
        body.insert("title".to_string(), self.title.into());
        if let Some(id) = self.person_id {
            body.insert("person_id".to_string(), id.into());
        }
        if let Some(id) = self.organization_id {
            body.insert("organization_id".to_string(), id.into());
        }
        Ok(body)
    }
}

impl<T: Transport> Pipedrive<T> {
    /// `GET /leads`
    pub fn list_leads(&self, filter: &LeadsFilter) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint("leads");
        filter.apply(&mut ep);
        self.get(&ep)
    }

    /// `GET /leads/{id}`
    pub fn get_lead(&self, id: &str) -> Result<ApiResponse, Error> {
        self.get(&self.lead_endpoint(id)?)
    }

    /// `POST /leads`
    pub fn add_lead(&self, lead: NewLead) -> Result<ApiResponse, Error> {
        let body = lead.into_body()?;
        self.send_json(HttpMethod::Post, &self.endpoint("leads"), &body)
    }

    /// `PATCH /leads/{id}`. Unlinking both the person and the organization
    /// in one update is rejected.
    pub fn update_lead(&self, id: &str, fields: &Fields) -> Result<ApiResponse, Error> {
        let ep = self.lead_endpoint(id)?;
        let unlinks = |key: &str| matches!(fields.get(key), Some(Value::Null));
        if unlinks("person_id") && unlinks("organization_id") {
            return Err(Error::Validation(LINK_REQUIRED.to_string()));
        }
        self.send_json(HttpMethod::Patch, &ep, fields)
    }

    /// `DELETE /leads/{id}`
    pub fn delete_lead(&self, id: &str) -> Result<ApiResponse, Error> {
        self.delete(&self.lead_endpoint(id)?)
    }

    /// `GET /leadLabels`
    pub fn list_lead_labels(&self) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint("leadLabels"))
    }

    /// `leads/{id}` with the id encoded as a single path segment.
    fn lead_endpoint(&self, id: &str) -> Result<Endpoint, Error> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::required("id"));
        }
        let mut ep = self.endpoint("leads");
        ep.segment(id);
        Ok(ep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::*;
    use serde_json::json;

    const LEAD_ID: &str = "adf21080-0e10-11eb-879b-05d71fb426ec";

    #[test]
    fn filter_boundaries() {
        let client = client();
        let filter = LeadsFilter {
            limit: Some(1),
            start: Some(0),
            archived_status: Some(ArchivedStatus::NotArchived),
            owner_id: Some(2),
            person_id: Some(3),
            organization_id: Some(4),
            filter_id: Some(5),
            sort: Some("id DESC".to_string()),
        };
        client.list_leads(&filter).unwrap();
        assert_eq!(sent_path(&client), "leads");
        assert_eq!(
            sent_query(&client),
            pairs(&[
                ("limit", "1"),
                ("start", "0"),
                ("archived_status", "not_archived"),
                ("owner_id", "2"),
                ("person_id", "3"),
                ("organization_id", "4"),
                ("filter_id", "5"),
                ("sort", "id DESC"),
            ])
        );

        client.list_leads(&LeadsFilter::default()).unwrap();
        assert!(sent_query(&client).is_empty());
    }

    #[test]
    fn add_lead_without_person_or_organization_is_rejected() {
        let client = client();
        let err = client.add_lead(NewLead::new("Inbound")).unwrap_err();
        assert_eq!(err, Error::Validation(LINK_REQUIRED.to_string()));
        assert_eq!(client.transport().count(), 0);
    }

    #[test]
    fn add_lead_with_only_person_is_sent() {
        let client = client();
        client.add_lead(NewLead::new("Inbound").with_person(12)).unwrap();
        let req = client.transport().last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(sent_body(&client), json!({"title": "Inbound", "person_id": 12}));
    }

    #[test]
    fn add_lead_accepts_link_from_fields() {
        let client = client();
        let mut lead = NewLead::new("Inbound");
        lead.fields.insert("person_id".to_string(), json!(12));
        client.add_lead(lead).unwrap();
        assert_eq!(sent_body(&client), json!({"title": "Inbound", "person_id": 12}));

        let mut lead = NewLead::new("Inbound");
        lead.fields.insert("organization_id".to_string(), Value::Null);
        assert_eq!(
            lead.validate().unwrap_err(),
            Error::Validation(LINK_REQUIRED.to_string())
        );
    }

    #[test]
    fn add_lead_requires_title() {
        let lead = NewLead::new("").with_organization(4);
        assert_eq!(lead.validate().unwrap_err(), Error::required("title"));
    }

    #[test]
    fn add_lead_keeps_custom_fields() {
        let client = client();
        let mut lead = NewLead::new("Referral").with_organization(9);
        lead.fields
            .insert("label_ids".to_string(), json!(["f08b42a0-4e75-11ea-9643-03698ef1cfd6"]));
        client.add_lead(lead).unwrap();
        let body = sent_body(&client);
        assert_eq!(body["organization_id"], json!(9));
        assert!(body.get("person_id").is_none());
        assert_eq!(body["label_ids"][0], json!("f08b42a0-4e75-11ea-9643-03698ef1cfd6"));
    }

    #[test]
    fn update_lead_patches() {
        let client = client();
        let mut fields = Fields::new();
        fields.insert("title".to_string(), json!("Renamed"));
        client.update_lead(LEAD_ID, &fields).unwrap();
        assert_eq!(client.transport().last().method, HttpMethod::Patch);
        assert_eq!(sent_path(&client), format!("leads/{LEAD_ID}"));
    }

    #[test]
    fn update_lead_cannot_unlink_everything() {
        let client = client();
        let mut fields = Fields::new();
        fields.insert("person_id".to_string(), Value::Null);
        fields.insert("organization_id".to_string(), Value::Null);
        assert!(client.update_lead(LEAD_ID, &fields).is_err());
        assert_eq!(client.transport().count(), 0);
    }

    #[test]
    fn lead_ids_are_checked() {
        let client = client();
        assert_eq!(client.get_lead(" ").unwrap_err(), Error::required("id"));
        assert_eq!(client.transport().count(), 0);
        client.delete_lead(LEAD_ID).unwrap();
        assert_eq!(client.transport().last().method, HttpMethod::Delete);
        assert_eq!(sent_path(&client), format!("leads/{LEAD_ID}"));
    }

    #[test]
    fn lead_ids_cannot_escape_their_path_segment() {
        let client = client();

        client.get_lead("abc?owner_id=7").unwrap();
        assert_eq!(sent_path(&client), "leads/abc%3Fowner_id=7");
        assert!(sent_query(&client).is_empty());

        client.update_lead("abc#frag", &Fields::new()).unwrap();
        assert_eq!(sent_path(&client), "leads/abc%23frag");
        assert!(!client.transport().last().url.contains('#'));

        client.delete_lead("100%/x").unwrap();
        assert_eq!(sent_path(&client), "leads/100%25%2Fx");
    }

    #[test]
    fn lead_labels_path() {
        let client = client();
        client.list_lead_labels().unwrap();
        assert_eq!(sent_path(&client), "leadLabels");
    }
}
