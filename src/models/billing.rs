use serde::{Deserialize, Serialize};
use super::de::{flexible_int, flexible_string};
use super::row::Row;
use super::entity::{Entity, EntityKind};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Billing {
    #[serde(default, deserialize_with = "flexible_string")]
    pub id: String,
    #[serde(deserialize_with = "flexible_string")]
    pub user_id: String,
    #[serde(deserialize_with = "flexible_string")]
    pub task_id: String,
    #[serde(deserialize_with = "flexible_int")]
    pub hours: i64,
    #[serde(default, deserialize_with = "flexible_int")]
    pub hourly_rate: i64,
    #[serde(deserialize_with = "flexible_int")]
    pub amount: i64,
}

impl Entity for Billing {
    const KIND: EntityKind = EntityKind::Billings;

    // Listings do not always carry the record id; the task id is unique per bill.
    fn to_row(&self) -> Row {
        let key = if self.id.is_empty() { &self.task_id } else { &self.id };
        Row::new(key.clone())
            .cell("user_id", self.user_id.as_str())
            .cell("task_id", self.task_id.as_str())
            .cell("hours", self.hours)
            .cell("hourly_rate", self.hourly_rate)
            .cell("amount", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    #[test]
    fn test_listing_without_id() {
        let bills: Vec<Billing> = serde_json::from_str(
            r#"[{"user_id":"u1","task_id":7,"hours":5,"hourly_rate":20,"amount":100}]"#,
        )
        .unwrap();
        let row = bills[0].to_row();
        assert_eq!(row.key, "7");
        assert_eq!(row.get("amount"), &CellValue::Int(100));
        assert_eq!(row.get("task_id").display(), "7");
    }

    #[test]
    fn test_string_amounts_from_billing_service() {
        let bill: Billing = serde_json::from_str(
            r#"{"id":"b1","user_id":"u1","task_id":"t1","hours":"5","amount":"100"}"#,
        )
        .unwrap();
        assert_eq!(bill.hours, 5);
        assert_eq!(bill.hourly_rate, 0);
        assert_eq!(bill.to_row().key, "b1");
    }
}
