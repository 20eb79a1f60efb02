use thiserror::Error;

// Every REST failure collapses into one of these before it reaches a panel.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The API refused the session itself (expired token or missing rights),
    /// not just the one request.
    pub fn rejects_session(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_401_and_403_reject_the_session() {
        let status = |status| ApiError::Status { status, body: String::new() };
        assert!(status(401).rejects_session());
        assert!(status(403).rejects_session());
        assert!(!status(404).rejects_session());
        assert!(!status(500).rejects_session());
        assert!(!ApiError::Malformed("eof".into()).rejects_session());
    }
}
