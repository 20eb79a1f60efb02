use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::de::{flexible_int, flexible_string};
use super::row::Row;
use super::entity::{Entity, EntityKind};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    #[serde(default, deserialize_with = "flexible_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub assigned_to: String,
    #[serde(default)]
    pub status: String,
    #[serde(deserialize_with = "flexible_int")]
    pub hours: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Tasks;

    fn to_row(&self) -> Row {
        Row::new(self.id.clone())
            .cell("id", self.id.as_str())
            .cell("title", self.title.as_str())
            .cell("description", self.description.as_str())
            .cell("assigned_to", self.assigned_to.as_str())
            .cell("status", self.status.as_str())
            .cell("hours", self.hours)
            .cell("start_date", self.start_date)
            .cell("end_date", self.end_date)
            .cell("parent_task", self.parent_task.as_deref())
    }
}
