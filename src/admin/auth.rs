//! Service account authentication and the client construction seam

use crate::admin::app::FirebaseApp;
use crate::admin::config::AppOptions;
use crate::admin::credential::ServiceAccountCredential;
use crate::admin::error::AdminError;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

pub type ServiceAccountAuth = Authenticator<HttpsConnector<HttpConnector>>;

/// Scopes requested for admin access tokens.
pub const FIREBASE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/firebase.database",
    "https://www.googleapis.com/auth/firebase.messaging",
    "https://www.googleapis.com/auth/identitytoolkit",
    "https://www.googleapis.com/auth/userinfo.email",
];

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Builds an authenticated client from a parsed credential.
///
/// This is where the vendor SDK plugs in. Tests substitute their own
/// implementation to observe construction without touching the network.
pub trait ClientFactory: Send + Sync {
    type Client: Send + Sync;

    fn construct(
        &self,
        name: &str,
        credential: &ServiceAccountCredential,
        options: &AppOptions,
    ) -> Result<Self::Client, AdminError>;
}

/// Production factory producing [`FirebaseApp`] handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceAccountFactory;

impl ClientFactory for ServiceAccountFactory {
    type Client = FirebaseApp;

    fn construct(
        &self,
        name: &str,
        credential: &ServiceAccountCredential,
        options: &AppOptions,
    ) -> Result<FirebaseApp, AdminError> {
        let key = service_account_key(credential)?;
        Ok(FirebaseApp::new(name, key, options.clone()))
    }
}

/// Convert a parsed credential into a key the authenticator accepts.
pub fn service_account_key(
    credential: &ServiceAccountCredential,
) -> Result<ServiceAccountKey, AdminError> {
    if credential.as_map().is_none() {
        return Err(AdminError::ClientInit(format!(
            "Service account must be a JSON object, found {}",
            credential.kind()
        )));
    }

    if let Some(kind) = credential.get("type") {
        if kind.as_str() != Some(SERVICE_ACCOUNT_TYPE) {
            return Err(AdminError::ClientInit(format!(
                "Service account object must have \"type\" \"{}\", found {}",
                SERVICE_ACCOUNT_TYPE, kind
            )));
        }
    }

    let key: ServiceAccountKey = serde_json::from_value(credential.clone().into_value())
        .map_err(|e| {
            AdminError::ClientInit(format!("Failed to parse service account key: {}", e))
        })?;

    if key.client_email.trim().is_empty() {
        return Err(AdminError::ClientInit(
            "Service account object must contain a non-empty \"client_email\" property"
                .to_string(),
        ));
    }
    if key.private_key.trim().is_empty() {
        return Err(AdminError::ClientInit(
            "Service account object must contain a non-empty \"private_key\" property"
                .to_string(),
        ));
    }
    if !is_pem_private_key(&key.private_key) {
        return Err(AdminError::ClientInit(
            "Failed to parse private key: expected a PEM encoded PRIVATE KEY block".to_string(),
        ));
    }

    Ok(key)
}

fn is_pem_private_key(pem: &str) -> bool {
    let pem = pem.trim();
    pem.starts_with("-----BEGIN")
        && pem.ends_with("-----")
        && pem.contains("PRIVATE KEY-----")
        && pem.contains("-----END")
}

/// Build the OAuth2 authenticator for a service account key.
pub async fn build_authenticator(key: ServiceAccountKey) -> Result<ServiceAccountAuth, AdminError> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AdminError::Token(format!("Failed to build authenticator: {}", e)))
}
