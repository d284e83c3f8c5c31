use thiserror::Error;

/// Why a single subtitle source produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,

    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::EmptyBody => "empty_body",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(FetchError::Transport("refused".into()).code(), "transport");
        assert_eq!(FetchError::Status(404).code(), "status");
        assert_eq!(FetchError::EmptyBody.code(), "empty_body");
        assert_eq!(FetchError::Decode("eof".into()).code(), "decode");
    }

    #[test]
    fn display_includes_detail() {
        assert_eq!(FetchError::Status(503).to_string(), "unexpected status: 503");
        let err: FetchError = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err().into();
        assert!(err.to_string().starts_with("decode error: "));
    }
}
