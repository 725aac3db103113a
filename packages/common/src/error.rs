use thiserror::Error;

/// Common error type shared by the pagecraft crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Generic error: {0}")]
    Generic(String),
}

impl CommonError {
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        CommonError::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
