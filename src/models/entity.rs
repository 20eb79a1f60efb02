use serde::de::DeserializeOwned;
use crate::fields::{FieldKind, FieldSpec};
use super::row::{Column, Row};

/// A record kind served by the REST API and shown on one dashboard page.
pub trait Entity: DeserializeOwned + Send + 'static {
    const KIND: EntityKind;

    fn to_row(&self) -> Row;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Users,
    Tasks,
    Billings,
}

/// How a get-by-id endpoint shapes its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleShape {
    Bare,
    Wrapped(&'static str),
}

/// How records owned by a user are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerLookup {
    /// `GET /{resource}/{segment}/{user_id}`
    PathSegment(&'static str),
    /// `GET /{resource}/list?{param}={user_id}`
    ListQuery(&'static str),
}

const USER_COLUMNS: &[Column] = &[
    Column { key: "id", label: "user id", numeric: false },
    Column { key: "username", label: "username", numeric: false },
    Column { key: "email", label: "email", numeric: false },
    Column { key: "role", label: "role", numeric: false },
];

const TASK_COLUMNS: &[Column] = &[
    Column { key: "title", label: "title", numeric: false },
    Column { key: "description", label: "description", numeric: false },
    Column { key: "assigned_to", label: "assigned to", numeric: false },
    Column { key: "status", label: "status", numeric: false },
    Column { key: "hours", label: "hours (h)", numeric: true },
    Column { key: "start_date", label: "start date", numeric: false },
    Column { key: "end_date", label: "end date", numeric: false },
];

const BILLING_COLUMNS: &[Column] = &[
    Column { key: "user_id", label: "user id", numeric: false },
    Column { key: "task_id", label: "task id", numeric: false },
    Column { key: "hours", label: "hours (h)", numeric: true },
    Column { key: "hourly_rate", label: "hourly rate", numeric: true },
    Column { key: "amount", label: "amount", numeric: true },
];

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("username", "User Name", FieldKind::Text),
    FieldSpec::required("email", "Email Address", FieldKind::Email),
    FieldSpec::required("password", "Password", FieldKind::Password),
    FieldSpec::required("role", "Role (admin or regular)", FieldKind::Role),
];

const TASK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::optional("description", "Description", FieldKind::Text),
    FieldSpec::required("assigned_to", "Assigned To", FieldKind::Reference),
    FieldSpec::required("status", "Status", FieldKind::Text),
    FieldSpec::required("hours", "Hours", FieldKind::Integer),
    FieldSpec::required("start_date", "Start Date", FieldKind::Date),
    FieldSpec::required("end_date", "End Date", FieldKind::Date),
    FieldSpec::optional("parent_task", "Parent Task", FieldKind::Reference),
];

const BILLING_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("user_id", "User ID", FieldKind::Reference),
    FieldSpec::required("task_id", "Task ID", FieldKind::Reference),
    FieldSpec::required("hours", "Hours", FieldKind::Integer),
    FieldSpec::required("hourly_rate", "Hourly Rate", FieldKind::Integer),
    FieldSpec::required("amount", "Amount", FieldKind::Integer),
];

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Tasks, EntityKind::Users, EntityKind::Billings];

    pub fn from_page(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.page_segment() == segment)
    }

    pub fn page_segment(&self) -> &'static str {
        match self {
            EntityKind::Users => "member",
            EntityKind::Tasks => "tasks",
            EntityKind::Billings => "billing",
        }
    }

    pub fn page_path(&self) -> String {
        format!("/dashboard/{}", self.page_segment())
    }

    /// Path prefix of the REST resource.
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Tasks => "tasks",
            EntityKind::Billings => "billings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Users => "Members",
            EntityKind::Tasks => "Tasks",
            EntityKind::Billings => "Billing",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Users => "user",
            EntityKind::Tasks => "task",
            EntityKind::Billings => "billing",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            EntityKind::Users => USER_COLUMNS,
            EntityKind::Tasks => TASK_COLUMNS,
            EntityKind::Billings => BILLING_COLUMNS,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Users => USER_FIELDS,
            EntityKind::Tasks => TASK_FIELDS,
            EntityKind::Billings => BILLING_FIELDS,
        }
    }

    pub fn default_sort(&self) -> &'static str {
        match self {
            EntityKind::Users => "username",
            EntityKind::Tasks => "end_date",
            EntityKind::Billings => "amount",
        }
    }

    pub fn single_shape(&self) -> SingleShape {
        match self {
            EntityKind::Tasks => SingleShape::Wrapped("task"),
            EntityKind::Users | EntityKind::Billings => SingleShape::Bare,
        }
    }

    pub fn owner_lookup(&self) -> Option<OwnerLookup> {
        match self {
            EntityKind::Tasks => Some(OwnerLookup::PathSegment("listByUser")),
            EntityKind::Billings => Some(OwnerLookup::ListQuery("user_id")),
            EntityKind::Users => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_segments_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_page(kind.page_segment()), Some(kind));
        }
        assert_eq!(EntityKind::from_page("Billing"), None);
        assert_eq!(EntityKind::Users.page_path(), "/dashboard/member");
    }

    #[test]
    fn test_default_sort_is_a_column() {
        for kind in EntityKind::ALL {
            let sort = kind.default_sort();
            assert!(kind.columns().iter().any(|c| c.key == sort), "{:?}", kind);
        }
    }

    #[test]
    fn test_numeric_fields_are_integers() {
        let billing_ints: Vec<_> = EntityKind::Billings
            .fields()
            .iter()
            .filter(|f| f.kind == FieldKind::Integer)
            .map(|f| f.name)
            .collect();
        assert_eq!(billing_ints, vec!["hours", "hourly_rate", "amount"]);
    }
}
