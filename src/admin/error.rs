//! Error types for Firebase Admin bootstrap

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Failed to load service account credentials from '{}': {source}", .path.display())]
    CredentialLoad {
        path: PathBuf,
        #[source]
        source: CredentialLoadCause,
    },

    #[error("Failed to initialize Firebase app: {0}")]
    ClientInit(String),

    #[error("Failed to obtain access token: {0}")]
    Token(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Underlying reason a credential file could not be loaded.
#[derive(Error, Debug)]
pub enum CredentialLoadCause {
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AdminError {
    pub(crate) fn credential_load(
        path: impl Into<PathBuf>,
        source: impl Into<CredentialLoadCause>,
    ) -> Self {
        AdminError::CredentialLoad {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Whether this error came from reading or parsing the credential file.
    pub fn is_credential_load(&self) -> bool {
        matches!(self, AdminError::CredentialLoad { .. })
    }

    pub fn is_client_init(&self) -> bool {
        matches!(self, AdminError::ClientInit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_load_display_names_path_and_cause() {
        let err = AdminError::credential_load(
            "./firebase_config.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("./firebase_config.json"));
        assert!(msg.contains("read failed"));
        assert!(err.is_credential_load());
        assert!(!err.is_client_init());
    }

    #[test]
    fn parse_cause_is_reported_as_parse() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not valid json").unwrap_err();
        let err = AdminError::credential_load("creds.json", parse_err);
        match err {
            AdminError::CredentialLoad {
                source: CredentialLoadCause::Parse(_),
                ..
            } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
