//! Initialized Firebase app handle

use crate::admin::auth::{build_authenticator, ServiceAccountAuth, FIREBASE_SCOPES};
use crate::admin::config::AppOptions;
use crate::admin::error::AdminError;
use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;
use yup_oauth2::ServiceAccountKey;

pub struct FirebaseApp {
    name: String,
    instance_id: Uuid,
    initialized_at: DateTime<Utc>,
    project_id: Option<String>,
    options: AppOptions,
    key: ServiceAccountKey,
    authenticator: OnceCell<ServiceAccountAuth>,
}

impl FirebaseApp {
    pub(crate) fn new(name: &str, key: ServiceAccountKey, options: AppOptions) -> Self {
        let project_id = options.project_id.clone().or_else(|| key.project_id.clone());
        Self {
            name: name.to_string(),
            instance_id: Uuid::new_v4(),
            initialized_at: Utc::now(),
            project_id,
            options,
            key,
            authenticator: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique per constructed app; two handles with the same id are the same app.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn initialized_at(&self) -> DateTime<Utc> {
        self.initialized_at
    }

    /// Project id from the options, else from the credential.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn service_account_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    /// Fetch an OAuth2 access token for the service account.
    ///
    /// The authenticator is built on first use and cached for the lifetime of
    /// the app; it refreshes tokens on its own.
    pub async fn access_token(&self) -> Result<String, AdminError> {
        let auth = self
            .authenticator
            .get_or_try_init(|| build_authenticator(self.key.clone()))
            .await?;

        debug!("Requesting access token for app '{}'", self.name);
        let token = auth
            .token(FIREBASE_SCOPES)
            .await
            .map_err(|e| AdminError::Token(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| AdminError::Token("token response had no access token".to_string()))
    }
}

impl fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.name)
            .field("instance_id", &self.instance_id)
            .field("initialized_at", &self.initialized_at)
            .field("project_id", &self.project_id)
            .field("service_account_email", &self.key.client_email)
            .field("options", &self.options)
            .field("authenticated", &self.authenticator.initialized())
            .finish_non_exhaustive()
    }
}
