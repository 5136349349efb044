//! Request-scoped key/value context.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock},
};

use mockhttp_core::Request;

/// Arbitrary values attached to a request under string keys.
///
/// The context lives in the request's extensions, so a handler reads it back with
/// [`Context::from_request`] and asks for the type it expects:
///
/// ```
/// # use mockhttp::{Context, MockRequest};
/// let mock = MockRequest::get("/").value("id", 123_i64).build().unwrap();
/// let context = Context::from_request(mock.request());
/// assert_eq!(context.get::<i64>("id"), Some(&123));
/// assert_eq!(context.get::<String>("id"), None);
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

static EMPTY: LazyLock<Context> = LazyLock::new(Context::new);

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The context attached to `request`, or an empty one.
    #[must_use]
    pub fn from_request<B>(request: &Request<B>) -> &Self {
        request.extensions().get::<Self>().unwrap_or(&EMPTY)
    }

    /// Insert a value, replacing whatever was stored under `key`.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Arc::new(value));
    }

    /// Chainable form of [`insert`](Self::insert).
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// The value under `key`, if present and of type `T`.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref()
    }

    /// Whether anything is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookup() {
        let context = Context::new().with("id", 123_i32).with("city", "Dallas");

        assert_eq!(context.get::<i32>("id"), Some(&123));
        assert_eq!(context.get::<&str>("city"), Some(&"Dallas"));
        assert_eq!(context.get::<i64>("id"), None);
        assert_eq!(context.get::<i32>("missing"), None);
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn later_insert_replaces() {
        let mut context = Context::new();
        context.insert("id", 1_u8);
        context.insert("id", "one");

        assert_eq!(context.get::<u8>("id"), None);
        assert_eq!(context.get::<&str>("id"), Some(&"one"));
    }

    #[test]
    fn missing_extension_reads_as_empty() {
        let request = Request::new(());
        assert!(Context::from_request(&request).is_empty());
    }
}
