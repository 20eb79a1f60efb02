use serde::{Deserialize, Serialize};
use super::de::flexible_string;
use super::row::Row;
use super::entity::{Entity, EntityKind};

// The password is write-only: it goes out in create/update bodies and is never read back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(default, deserialize_with = "flexible_string")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::Users;

    fn to_row(&self) -> Row {
        Row::new(self.id.clone())
            .cell("id", self.id.as_str())
            .cell("username", self.username.as_str())
            .cell("email", self.email.as_str())
            .cell("role", self.role.as_str())
    }
}
