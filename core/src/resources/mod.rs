//! Per-resource operations, each an `impl` block on [`crate::Pipedrive`].

pub mod deals;
pub mod fields;
pub mod leads;
pub mod organizations;
pub mod persons;
pub mod users;
pub mod webhooks;

pub use deals::{DealsFilter, NewDeal};
pub use fields::NewField;
pub use leads::{LeadsFilter, NewLead};
pub use organizations::{
    ActivitiesOptions, NewOrganization, OrganizationDealsOptions, OrganizationsFilter,
    SearchOrganizationOptions,
};
pub use persons::{NewPerson, PersonsFilter};
pub use webhooks::NewWebhook;
