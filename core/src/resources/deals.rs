//! Deals.

use crate::client::Pipedrive;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{DealStatus, Fields};

/// Filter for [`Pipedrive::list_deals`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealsFilter {
    /// Only deals owned by this user. Ignored by the server when `filter_id`
    /// is also set.
    pub user_id: Option<u64>,
    pub filter_id: Option<u64>,
    pub stage_id: Option<u64>,
    pub status: Option<DealStatus>,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    /// `field_name ASC, other_field DESC`
    pub sort: Option<String>,
    pub owned_by_you: bool,
}

impl DealsFilter {
    fn apply(&self, ep: &mut Endpoint) {
        ep.param_id("user_id", self.user_id)
            .param_id("filter_id", self.filter_id)
            .param_id("stage_id", self.stage_id)
            .param_opt("status", self.status)
            .param_opt("start", self.start)
            .param_id("limit", self.limit)
            .param_opt("sort", self.sort.as_deref())
            .param_flag("owned_by_you", self.owned_by_you, "1");
    }
}

/// Body for [`Pipedrive::add_deal`]. `fields` carries everything besides the
/// title, custom fields included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDeal {
    pub title: String,
    pub fields: Fields,
}

impl NewDeal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Fields::new(),
        }
    }

    fn into_body(self) -> Result<Fields, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::required("title"));
        }
        let mut body = self.fields;
        body.insert("title".to_string(), self.title.into());
        Ok(body)
    }
}

impl<T: Transport> Pipedrive<T> {
    /// `GET /deals`
    pub fn list_deals(&self, filter: &DealsFilter) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint("deals");
        filter.apply(&mut ep);
        self.get(&ep)
    }

    /// `GET /deals/{id}`
    pub fn get_deal(&self, id: u64) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint(&format!("deals/{id}")))
    }

    /// `POST /deals`
    pub fn add_deal(&self, deal: NewDeal) -> Result<ApiResponse, Error> {
        let body = deal.into_body()?;
        self.send_json(HttpMethod::Post, &self.endpoint("deals"), &body)
    }

    /// `PUT /deals/{id}`
    pub fn update_deal(&self, id: u64, fields: &Fields) -> Result<ApiResponse, Error> {
        self.send_json(HttpMethod::Put, &self.endpoint(&format!("deals/{id}")), fields)
    }

    /// `DELETE /deals/{id}`
    pub fn delete_deal(&self, id: u64) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoint(&format!("deals/{id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::*;
    use serde_json::json;

    #[test]
    fn default_filter_sends_only_the_token() {
        let client = client();
        client.list_deals(&DealsFilter::default()).unwrap();
        assert_eq!(sent_path(&client), "deals");
        assert!(sent_query(&client).is_empty());
    }

    #[test]
    fn populated_filter_sends_every_field() {
        let client = client();
        let filter = DealsFilter {
            user_id: Some(3),
            filter_id: Some(4),
            stage_id: Some(5),
            status: Some(DealStatus::AllNotDeleted),
            start: Some(0),
            limit: Some(1),
            sort: Some("title ASC".to_string()),
            owned_by_you: true,
        };
        client.list_deals(&filter).unwrap();
        assert_eq!(
            sent_query(&client),
            pairs(&[
                ("user_id", "3"),
                ("filter_id", "4"),
                ("stage_id", "5"),
                ("status", "all_not_deleted"),
                ("start", "0"),
                ("limit", "1"),
                ("sort", "title ASC"),
                ("owned_by_you", "1"),
            ])
        );
    }

    #[test]
    fn zero_limit_and_ids_are_omitted() {
        let client = client();
        let filter = DealsFilter {
            user_id: Some(0),
            limit: Some(0),
            ..Default::default()
        };
        client.list_deals(&filter).unwrap();
        assert!(sent_query(&client).is_empty());
    }

    #[test]
    fn get_and_delete_use_the_id_path() {
        let client = client();
        client.get_deal(17).unwrap();
        assert_eq!(client.transport().last().method, HttpMethod::Get);
        assert_eq!(sent_path(&client), "deals/17");

        client.delete_deal(17).unwrap();
        let req = client.transport().last();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn add_deal_merges_title_into_fields() {
        let client = client();
        let mut deal = NewDeal::new("Big contract");
        deal.fields.insert("value".to_string(), json!(5000));
        deal.fields.insert("title".to_string(), json!("overwritten"));
        client.add_deal(deal).unwrap();

        assert_eq!(client.transport().last().method, HttpMethod::Post);
        assert_eq!(sent_body(&client), json!({"title": "Big contract", "value": 5000}));
    }

    #[test]
    fn add_deal_requires_title() {
        let client = client();
        let err = client.add_deal(NewDeal::new(" ")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(client.transport().count(), 0);
    }

    #[test]
    fn update_deal_puts_fields() {
        let client = client();
        let mut fields = Fields::new();
        fields.insert("status".to_string(), json!("won"));
        client.update_deal(8, &fields).unwrap();
        assert_eq!(client.transport().last().method, HttpMethod::Put);
        assert_eq!(sent_path(&client), "deals/8");
        assert_eq!(sent_body(&client), json!({"status": "won"}));
    }
}
