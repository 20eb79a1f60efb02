use crate::errors::{ApiError, ApiResult};
use crate::models::{Entity, Row};

/// Outcome of one panel fetch. Which variant a call can produce is decided by
/// the endpoint it hit, never by sniffing the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Single(Row),
    Collection(Vec<Row>),
    Empty,
    Error(String),
}

impl Fetched {
    pub fn single<E: Entity>(result: ApiResult<E>) -> Self {
        match result {
            Ok(record) => Fetched::Single(record.to_row()),
            Err(e) => Self::failed(e),
        }
    }

    pub fn collection<E: Entity>(result: ApiResult<Vec<E>>) -> Self {
        match result {
            Ok(records) if records.is_empty() => Fetched::Empty,
            Ok(records) => Fetched::Collection(records.iter().map(Entity::to_row).collect()),
            Err(e) => Self::failed(e),
        }
    }

    fn failed(err: ApiError) -> Self {
        tracing::error!("Fetch failed: {}", err);
        // Only a generic message reaches the page; details stay in the log
        let message = match err {
            ApiError::Status { status, .. } => format!("HTTP error! status: {}", status),
            ApiError::Transport(_) => "Could not reach the API".to_string(),
            ApiError::Malformed(_) => "Unexpected response from the API".to_string(),
            ApiError::Unsupported(msg) => msg,
        };
        Fetched::Error(message)
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            Fetched::Single(row) => std::slice::from_ref(row),
            Fetched::Collection(rows) => rows,
            Fetched::Empty | Fetched::Error(_) => &[],
        }
    }
}
