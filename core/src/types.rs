//! Closed enumerations and shared payload types.
//!
//! # Design
//! Every enumerated filter or body value maps to its wire string through an
//! explicit `match` in `as_str`, so variant order never matters. The same
//! string renames the variant for `Serialize`, so query parameters
//! (`Display`) and JSON bodies agree.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form field map for add/update bodies. Custom fields are keyed by the
/// account-specific hashes listed by the `*Fields` endpoints.
pub type Fields = Map<String, Value>;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Deal status filter.
    pub enum DealStatus {
        Open => "open",
        Won => "won",
        Lost => "lost",
        Deleted => "deleted",
        AllNotDeleted => "all_not_deleted",
    }
}

wire_enum! {
    /// Lead archive filter.
    pub enum ArchivedStatus {
        Archived => "archived",
        NotArchived => "not_archived",
        All => "all",
    }
}

wire_enum! {
    /// Organization fields an organization search can be restricted to.
    pub enum SearchField {
        Address => "address",
        CustomFields => "custom_fields",
        Notes => "notes",
        Name => "name",
    }
}

wire_enum! {
    /// Activity completion filter.
    pub enum DoneStatus {
        NotDone => "0",
        Done => "1",
    }
}

wire_enum! {
    /// Data type of a custom field definition.
    pub enum FieldType {
        Address => "address",
        Date => "date",
        DateRange => "daterange",
        Double => "double",
        Enum => "enum",
        Monetary => "monetary",
        Org => "org",
        People => "people",
        Phone => "phone",
        Set => "set",
        Text => "text",
        Time => "time",
        TimeRange => "timerange",
        User => "user",
        Varchar => "varchar",
        VarcharAuto => "varchar_auto",
        VisibleTo => "visible_to",
    }
}

impl FieldType {
    /// `enum` and `set` fields are defined by their option list.
    pub fn requires_options(self) -> bool {
        matches!(self, FieldType::Enum | FieldType::Set)
    }
}

wire_enum! {
    /// Webhook trigger action.
    pub enum EventAction {
        Added => "added",
        Updated => "updated",
        Merged => "merged",
        Deleted => "deleted",
        Any => "*",
    }
}

wire_enum! {
    /// Webhook trigger object.
    pub enum EventObject {
        Activity => "activity",
        ActivityType => "activityType",
        Deal => "deal",
        Note => "note",
        Organization => "organization",
        Person => "person",
        Pipeline => "pipeline",
        Product => "product",
        Stage => "stage",
        User => "user",
        Any => "*",
    }
}

/// One selectable value of an `enum` or `set` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Pagination for the field-definition listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFilter {
    pub start: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_status_wire_strings_in_order() {
        let rendered: Vec<&str> = DealStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            rendered,
            vec!["open", "won", "lost", "deleted", "all_not_deleted"]
        );
    }

    #[test]
    fn archived_status_wire_strings() {
        let rendered: Vec<String> = ArchivedStatus::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["archived", "not_archived", "all"]);
    }

    #[test]
    fn search_field_and_done_status() {
        assert_eq!(SearchField::CustomFields.as_str(), "custom_fields");
        assert_eq!(DoneStatus::NotDone.as_str(), "0");
        assert_eq!(DoneStatus::Done.as_str(), "1");
    }

    #[test]
    fn field_type_serializes_as_wire_string() {
        assert_eq!(
            serde_json::to_value(FieldType::VarcharAuto).unwrap(),
            serde_json::json!("varchar_auto")
        );
        assert_eq!(FieldType::ALL.len(), 17);
        assert!(FieldType::Set.requires_options());
        assert!(!FieldType::Text.requires_options());
    }

    #[test]
    fn serialized_form_matches_display() {
        fn check<E: Serialize + fmt::Display>(all: &[E]) {
            for value in all {
                assert_eq!(
                    serde_json::to_value(value).unwrap(),
                    Value::String(value.to_string())
                );
            }
        }
        check(DealStatus::ALL);
        check(ArchivedStatus::ALL);
        check(SearchField::ALL);
        check(DoneStatus::ALL);
        check(FieldType::ALL);
        check(EventAction::ALL);
        check(EventObject::ALL);
    }

    #[test]
    fn webhook_enums() {
        assert_eq!(EventAction::Any.to_string(), "*");
        assert_eq!(EventObject::ActivityType.to_string(), "activityType");
    }
}
