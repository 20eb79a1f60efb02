use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One table cell. Ordering is by instant for dates, numeric for integers
/// and lexicographic for text; a missing value sorts before anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Text(String),
    Int(i64),
    Date(DateTime<Utc>),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Missing => 0,
            CellValue::Int(_) => 1,
            CellValue::Date(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => {
                a.timestamp_millis().cmp(&b.timestamp_millis())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub numeric: bool,
}

static MISSING: CellValue = CellValue::Missing;

/// Display-ready projection of one fetched record, keyed by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: String,
    cells: BTreeMap<&'static str, CellValue>,
}

impl Row {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn cell(mut self, column: &'static str, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column, value.into());
        self
    }

    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }
}
