// src/application/storage.rs
use crate::domain::DomainError;

/// Persistence port: a string key-value store in the manner of browser
/// local storage. Values are whole JSON blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), DomainError>;

    fn contains(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), DomainError> {
        (**self).remove(key)
    }
}
