use std::path::PathBuf;
use thiserror::Error;

/// Faults that end a run.
///
/// Recoverable conditions (a missing credential, an undecodable response body,
/// a non-200 status) never surface here.
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("Failed to reach token endpoint: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read {field} from console: {source}")]
    Prompt {
        field: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write token file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize token response: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write console output: {0}")]
    Console(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = OAuthError::Io {
            path: PathBuf::from("acme_refresh_token_20250101_0930.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("acme_refresh_token_20250101_0930.json"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_prompt_error_names_field() {
        let err = OAuthError::Prompt {
            field: "ACME Auth Code".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "end of input"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read ACME Auth Code from console: end of input"
        );
    }
}
