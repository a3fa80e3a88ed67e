//! Persons.

use crate::client::Pipedrive;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::Fields;

/// Filter for [`Pipedrive::list_persons`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonsFilter {
    pub user_id: Option<u64>,
    pub filter_id: Option<u64>,
    pub first_char: Option<char>,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl PersonsFilter {
    fn apply(&self, ep: &mut Endpoint) {
        ep.param_id("user_id", self.user_id)
            .param_id("filter_id", self.filter_id)
            .param_opt("first_char", self.first_char)
            .param_opt("start", self.start)
            .param_id("limit", self.limit)
            .param_opt("sort", self.sort.as_deref());
    }
}

/// Body for [`Pipedrive::add_person`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPerson {
    pub name: String,
    /// `email`, `phone`, `org_id`, custom field hashes, ...
    pub fields: Fields,
}

impl NewPerson {
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
    /// `GET /persons`
    pub fn list_persons(&self, filter: &PersonsFilter) -> Result<ApiResponse, Error> {
        let mut ep = self.endpoint("persons");
        filter.apply(&mut ep);
        self.get(&ep)
    }

    /// `GET /persons/{id}`
    pub fn get_person(&self, id: u64) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint(&format!("persons/{id}")))
    }

    /// `POST /persons`
    pub fn add_person(&self, person: NewPerson) -> Result<ApiResponse, Error> {
        let body = person.into_body()?;
        self.send_json(HttpMethod::Post, &self.endpoint("persons"), &body)
    }

    /// `PUT /persons/{id}`
    pub fn update_person(&self, id: u64, fields: &Fields) -> Result<ApiResponse, Error> {
        self.send_json(HttpMethod::Put, &self.endpoint(&format!("persons/{id}")), fields)
    }

    /// `DELETE /persons/{id}`
    pub fn delete_person(&self, id: u64) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoint(&format!("persons/{id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::*;
    use serde_json::json;

    #[test]
    fn filter_boundaries() {
        let client = client();
        let filter = PersonsFilter {
            filter_id: Some(1),
            first_char: Some('j'),
            limit: Some(1),
            sort: Some(String::new()),
            ..Default::default()
        };
        client.list_persons(&filter).unwrap();
        assert_eq!(sent_path(&client), "persons");
        assert_eq!(
            sent_query(&client),
            pairs(&[("filter_id", "1"), ("first_char", "j"), ("limit", "1")])
        );
    }

    #[test]
    fn add_person_body() {
        let client = client();
        let mut person = NewPerson::new("Jane Doe");
        person.fields.insert("email".to_string(), json!(["jane@example.com"]));
        client.add_person(person).unwrap();
        assert_eq!(
            sent_body(&client),
            json!({"name": "Jane Doe", "email": ["jane@example.com"]})
        );
    }

    #[test]
    fn add_person_requires_name() {
        let client = client();
        assert_eq!(
            client.add_person(NewPerson::new("")).unwrap_err(),
            Error::required("name")
        );
    }

    #[test]
    fn update_and_delete() {
        let client = client();
        let mut fields = Fields::new();
        fields.insert("phone".to_string(), json!("555-0100"));
        client.update_person(2, &fields).unwrap();
        assert_eq!(client.transport().last().method, HttpMethod::Put);
        assert_eq!(sent_path(&client), "persons/2");

        client.delete_person(2).unwrap();
        let req = client.transport().last();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }
}
