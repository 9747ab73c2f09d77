//! Firebase Admin app bootstrap from a service account file

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod credential;
pub mod error;
pub mod registry;

pub use app::FirebaseApp;
pub use auth::{ClientFactory, ServiceAccountFactory};
pub use bootstrap::Bootstrapper;
pub use config::{AdminConfig, AppOptions, DEFAULT_APP_NAME, DEFAULT_CREDENTIALS_PATH};
pub use credential::ServiceAccountCredential;
pub use error::{AdminError, CredentialLoadCause};
pub use registry::AppRegistry;

use once_cell::sync::Lazy;
use std::sync::Arc;

static DEFAULT_REGISTRY: Lazy<Arc<AppRegistry<FirebaseApp>>> =
    Lazy::new(|| Arc::new(AppRegistry::new()));

/// The process-wide default app, initialized from [`DEFAULT_CREDENTIALS_PATH`] on first call.
///
/// Every later call returns the same handle.
pub fn admin() -> Result<Arc<FirebaseApp>, AdminError> {
    initialize_app(&AdminConfig::default())
}

/// Initialize (or fetch) the app named in `config` in the process-wide registry.
///
/// If an app with that name already exists it is returned as is and `config`
/// is otherwise ignored.
pub fn initialize_app(config: &AdminConfig) -> Result<Arc<FirebaseApp>, AdminError> {
    config.validate()?;
    Bootstrapper::with_registry(
        config.clone(),
        ServiceAccountFactory,
        Arc::clone(&DEFAULT_REGISTRY),
    )
    .get_or_init()
}

/// Apps initialized so far in this process.
pub fn apps() -> Vec<Arc<FirebaseApp>> {
    DEFAULT_REGISTRY.apps()
}

pub fn get_app(name: &str) -> Option<Arc<FirebaseApp>> {
    DEFAULT_REGISTRY.get(name)
}
