//! Process-wide Firebase Admin client initialized from a service account JSON file.
//!
//! ```no_run
//! let app = firebase_admin_bootstrap::admin()?;
//! println!("project: {:?}", app.project_id());
//! # Ok::<(), firebase_admin_bootstrap::AdminError>(())
//! ```

pub mod admin;
pub mod logging;

pub use admin::{
    admin, apps, get_app, initialize_app, AdminConfig, AdminError, AppOptions, AppRegistry,
    Bootstrapper, ClientFactory, CredentialLoadCause, FirebaseApp, ServiceAccountCredential,
    ServiceAccountFactory, DEFAULT_APP_NAME, DEFAULT_CREDENTIALS_PATH,
};
