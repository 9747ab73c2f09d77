//! Process-wide registry of initialized apps, keyed by app name

use crate::admin::error::AdminError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct AppRegistry<C> {
    apps: Mutex<HashMap<String, Arc<C>>>,
}

impl<C> AppRegistry<C> {
    pub fn new() -> Self {
        Self {
            apps: Mutex::new(HashMap::new()),
        }
    }

    // Only fully constructed apps are ever inserted, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<C>>> {
        self.apps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, name: &str) -> Option<Arc<C>> {
        self.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Registered app names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn apps(&self) -> Vec<Arc<C>> {
        self.lock().values().cloned().collect()
    }

    /// Return the app registered under `name`, constructing it with `init` if absent.
    ///
    /// The lookup and the construction happen under one lock, so `init` runs at
    /// most once per name even when callers race. A failed `init` registers
    /// nothing and a later call may try again. The flag is `true` when this
    /// call constructed the app.
    pub fn get_or_try_init<F>(&self, name: &str, init: F) -> Result<(Arc<C>, bool), AdminError>
    where
        F: FnOnce() -> Result<C, AdminError>,
    {
        let mut apps = self.lock();
        if let Some(existing) = apps.get(name) {
            return Ok((Arc::clone(existing), false));
        }

        let app = Arc::new(init()?);
        apps.insert(name.to_string(), Arc::clone(&app));
        Ok((app, true))
    }
}

impl<C> Default for AppRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
