use crate::errors::CoreError;

/// Durable string key-value store provided by the host platform.
///
/// `set` must replace the previous value as a whole: a reader never sees a
/// half-written value.
pub trait KeyValueStore: Send + Sync {
    /// Last value written under `key`, or `None` if nothing was written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}
