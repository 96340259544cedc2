// src/util/testing.rs

use anyhow::Result;
use std::collections::HashMap;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::KeyValueStore;
use crate::domain::DomainError;

/// In-memory key-value store for exercising the repository without touching
/// the filesystem.
///
/// # Examples
///
/// ```
/// use linkcards::application::KeyValueStore;
/// use linkcards::util::testing::MockKeyValueStore;
///
/// let storage = MockKeyValueStore::builder()
///     .with_entry("bookmarkGroups.v1", r#"{"groups":{}}"#)
///     .build();
/// assert!(storage.get("bookmarkGroups.v1").unwrap().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockKeyValueStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MockKeyValueStore {
    pub fn builder() -> MockKeyValueStoreBuilder {
        MockKeyValueStoreBuilder::new()
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::StorageError(format!("quota exceeded writing {key}")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DomainError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Builder for MockKeyValueStore
pub struct MockKeyValueStoreBuilder {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MockKeyValueStoreBuilder {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: false,
        }
    }

    /// Pre-populate a key
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every `set` fail with a storage error
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn build(self) -> MockKeyValueStore {
        MockKeyValueStore {
            entries: self.entries,
            fail_writes: self.fail_writes,
            writes: 0,
        }
    }
}

impl Default for MockKeyValueStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    let noisy_modules = ["assert_cmd", "predicates"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
