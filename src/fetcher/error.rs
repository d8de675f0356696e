use thiserror::Error;

/// Reasons a single electricity query produced no reading
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unknown campus: {0}")]
    UnknownCampus(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Stable name of the error class, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::UnknownCampus(_) => "UnknownCampus",
            FetchError::Transport(_) => "TransportError",
            FetchError::Decode(_) => "DecodeError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FetchError::UnknownCampus("岳麓山".to_string()).kind(),
            "UnknownCampus"
        );
        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(FetchError::from(decode).kind(), "DecodeError");
    }

    #[test]
    fn test_error_display() {
        let error = FetchError::UnknownCampus("岳麓山".to_string());
        assert_eq!(error.to_string(), "Unknown campus: 岳麓山");
    }
}
