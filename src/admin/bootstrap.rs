//! Checked-once initialization of an authenticated client

use crate::admin::auth::ClientFactory;
use crate::admin::config::AdminConfig;
use crate::admin::credential::ServiceAccountCredential;
use crate::admin::error::AdminError;
use crate::admin::registry::AppRegistry;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Loads a credential file and registers the client built from it, once.
pub struct Bootstrapper<F: ClientFactory> {
    config: AdminConfig,
    factory: F,
    registry: Arc<AppRegistry<F::Client>>,
}

impl<F: ClientFactory> Bootstrapper<F> {
    /// A bootstrapper with its own, empty registry.
    pub fn new(config: AdminConfig, factory: F) -> Self {
        Self::with_registry(config, factory, Arc::new(AppRegistry::new()))
    }

    pub fn with_registry(
        config: AdminConfig,
        factory: F,
        registry: Arc<AppRegistry<F::Client>>,
    ) -> Self {
        Self {
            config,
            factory,
            registry,
        }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn registry(&self) -> &Arc<AppRegistry<F::Client>> {
        &self.registry
    }

    /// Return the registered client, loading credentials and constructing it on first use.
    ///
    /// Once an app is registered the credential file is not read again.
    pub fn get_or_init(&self) -> Result<Arc<F::Client>, AdminError> {
        let name = self.config.app_name.as_str();

        if let Some(app) = self.registry.get(name) {
            debug!("Reusing initialized app '{}'", name);
            return Ok(app);
        }

        let credential = ServiceAccountCredential::load(&self.config.credentials_path)?;

        let (app, created) = self
            .registry
            .get_or_try_init(name, || {
                self.factory
                    .construct(name, &credential, &self.config.options)
            })
            .map_err(|e| {
                error!("Failed to initialize app '{}': {}", name, e);
                e
            })?;

        if created {
            info!(
                "Initialized app '{}' (project: {})",
                name,
                credential.project_id().unwrap_or("<none>")
            );
        } else {
            debug!("App '{}' was initialized concurrently, reusing it", name);
        }

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::config::AppOptions;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    #[derive(Default)]
    struct RecordingFactory {
        calls: AtomicUsize,
        seen: Mutex<Vec<ServiceAccountCredential>>,
    }

    impl ClientFactory for RecordingFactory {
        type Client = String;

        fn construct(
            &self,
            name: &str,
            credential: &ServiceAccountCredential,
            _options: &AppOptions,
        ) -> Result<String, AdminError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(credential.clone());
            Ok(format!("{}:{}", name, credential.project_id().unwrap_or("")))
        }
    }

    fn credential_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn second_call_does_not_reread_file() {
        let file = credential_file(r#"{"type": "service_account", "project_id": "test-proj"}"#);
        let path = file.path().to_path_buf();
        let bootstrapper =
            Bootstrapper::new(AdminConfig::new(&path), RecordingFactory::default());

        let first = bootstrapper.get_or_init().unwrap();
        drop(file);
        assert!(!path.exists());

        let second = bootstrapper.get_or_init().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(bootstrapper.factory().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn named_apps_are_constructed_separately() {
        let file = credential_file(r#"{"project_id": "test-proj"}"#);
        let registry = Arc::new(AppRegistry::new());

        let default = Bootstrapper::with_registry(
            AdminConfig::new(file.path()),
            RecordingFactory::default(),
            Arc::clone(&registry),
        );
        let named = Bootstrapper::with_registry(
            AdminConfig::new(file.path()).with_app_name("reports"),
            RecordingFactory::default(),
            Arc::clone(&registry),
        );

        assert_eq!(*default.get_or_init().unwrap(), "[DEFAULT]:test-proj");
        assert_eq!(*named.get_or_init().unwrap(), "reports:test-proj");
        assert_eq!(registry.names(), vec!["[DEFAULT]", "reports"]);
    }
}
