use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::OnceCell;

use crate::{Result, TestkitError};

/// Names of the recognized configuration keys.
pub mod keys {
    /// Base URL the page objects navigate against.
    pub const BASE_URL: &str = "BASE_URL";
    /// Base URL for the API helper.
    pub const API_URL: &str = "API_URL";
    /// Environment name (dev, staging, prod, ...).
    pub const ENV: &str = "ENV";
    /// Whether the suite is running under CI.
    pub const CI: &str = "CI";
    /// Navigation/launch timeout in milliseconds.
    pub const DEFAULT_TIMEOUT: &str = "DEFAULT_TIMEOUT";
    /// Per-element-action timeout in milliseconds.
    pub const ACTION_TIMEOUT: &str = "ACTION_TIMEOUT";
    /// Whether Chrome runs headless.
    pub const HEADLESS: &str = "HEADLESS";
    /// Browser engine name. Only "chromium" is supported.
    pub const BROWSER: &str = "BROWSER";
    /// Default test account username.
    pub const TEST_USERNAME: &str = "TEST_USERNAME";
    /// Default test account password.
    pub const TEST_PASSWORD: &str = "TEST_PASSWORD";
    /// Whether protocol tracing is enabled.
    pub const ENABLE_TRACING: &str = "ENABLE_TRACING";
    /// Whether video capture is enabled (stored only, not acted on).
    pub const ENABLE_VIDEO: &str = "ENABLE_VIDEO";
    /// Whether the screenshot helper captures artifacts.
    pub const ENABLE_SCREENSHOTS: &str = "ENABLE_SCREENSHOTS";
    /// Report flavor emitted by the outer runner.
    pub const REPORT_TYPE: &str = "REPORT_TYPE";
}

/// Recognized keys and their literal defaults. Every entry has a non-empty
/// default so `get` cannot fail for a registered key.
const RECOGNIZED: &[(&str, &str)] = &[
    (keys::BASE_URL, "https://playwright.dev"),
    (keys::API_URL, "https://api.example.com"),
    (keys::ENV, "dev"),
    (keys::CI, "false"),
    (keys::DEFAULT_TIMEOUT, "30000"),
    (keys::ACTION_TIMEOUT, "15000"),
    (keys::HEADLESS, "true"),
    (keys::BROWSER, "chromium"),
    (keys::TEST_USERNAME, "test@example.com"),
    (keys::TEST_PASSWORD, "password123"),
    (keys::ENABLE_TRACING, "true"),
    (keys::ENABLE_VIDEO, "false"),
    (keys::ENABLE_SCREENSHOTS, "true"),
    (keys::REPORT_TYPE, "html"),
];

static SHARED: OnceCell<ConfigStore> = OnceCell::new();

/// Environment-driven key/value settings with typed accessors and explicit
/// defaults.
///
/// Reads the fixed set of recognized keys ([`keys`]) from the process
/// environment once at construction, falling back to a documented default for
/// each key the environment does not supply. Values can be overridden later
/// with [`ConfigStore::set`]; writes are last-write-wins under an `RwLock`.
///
/// Components take `&ConfigStore` so tests can construct isolated stores, and
/// [`ConfigStore::shared`] provides the process-wide instance for callers
/// that want one.
#[derive(Debug)]
pub struct ConfigStore {
    values: RwLock<HashMap<String, String>>,
}

impl ConfigStore {
    /// Creates a store from the process environment.
    ///
    /// An environment variable that is set but blank counts as unset — a
    /// registered key never holds an empty value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = HashMap::with_capacity(RECOGNIZED.len());
        for (key, default) in RECOGNIZED {
            let value = lookup(key)
                .filter(|supplied| !supplied.trim().is_empty())
                .unwrap_or_else(|| (*default).to_owned());
            values.insert((*key).to_owned(), value);
        }
        Self {
            values: RwLock::new(values),
        }
    }

    /// Returns the process-wide store, building it from the environment on
    /// first access. Concurrent first calls initialize at most once.
    pub fn shared() -> &'static ConfigStore {
        SHARED.get_or_init(ConfigStore::from_env)
    }

    /// Returns the stored value for `key`.
    ///
    /// Fails with [`TestkitError::KeyNotFound`] for a key that was never
    /// registered or inserted.
    pub fn get(&self, key: &str) -> Result<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values
            .get(key)
            .cloned()
            .ok_or_else(|| TestkitError::KeyNotFound(key.to_owned()))
    }

    /// Returns the stored value for `key` parsed as a base-10 integer.
    ///
    /// Fails with [`TestkitError::InvalidFormat`] on non-numeric text.
    /// Recognized numeric keys are all timeouts, so negative text is rejected
    /// rather than coerced.
    pub fn get_number(&self, key: &str) -> Result<u64> {
        let value = self.get(key)?;
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| TestkitError::InvalidFormat {
                key: key.to_owned(),
                value,
            })
    }

    /// Returns `true` iff the stored value case-insensitively equals
    /// `"true"`. Every other value, empty included, is `false`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.eq_ignore_ascii_case("true"))
    }

    /// Inserts or overwrites the value for `key`, effective immediately for
    /// subsequent `get` calls from any caller.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.into(), value.into());
    }

    /// Returns a copy of every stored entry, sorted by key.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        let mut entries: Vec<_> = values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::from_env()
    }
}
