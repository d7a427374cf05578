#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("invalid report JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("malformed signed batch: expected at least 2 segments, got {segments}")]
    MalformedToken { segments: usize },
    #[error("invalid base64url payload segment: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

pub type MockResult<T> = std::result::Result<T, MockError>;
