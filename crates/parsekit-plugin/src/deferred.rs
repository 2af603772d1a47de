//! Eager or lazily constructed plugin capabilities.

use std::fmt;
use std::sync::Arc;

use parsekit_core::AppResult;

/// Factory producing a capability instance on demand.
pub type Factory<T> = Arc<dyn Fn() -> AppResult<Arc<T>> + Send + Sync>;

/// A plugin capability that is either ready to use or built on first use.
///
/// Resolution is not memoized here: the registry resolves each capability
/// at most once per pipeline invocation, and the next invocation runs the
/// factory again.
pub enum Deferred<T: ?Sized> {
    /// An already constructed instance.
    Eager(Arc<T>),
    /// A factory invoked when the capability is resolved.
    Lazy(Factory<T>),
}

impl<T: ?Sized> Deferred<T> {
    /// Wraps an existing instance.
    pub fn eager(value: Arc<T>) -> Self {
        Self::Eager(value)
    }

    /// Wraps a factory.
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> AppResult<Arc<T>> + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(factory))
    }

    /// Returns the instance, running the factory if needed.
    pub fn resolve(&self) -> AppResult<Arc<T>> {
        match self {
            Self::Eager(value) => Ok(Arc::clone(value)),
            Self::Lazy(factory) => factory(),
        }
    }

    /// Returns whether this capability is built by a factory.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl<T: ?Sized> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Eager(value) => Self::Eager(Arc::clone(value)),
            Self::Lazy(factory) => Self::Lazy(Arc::clone(factory)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(_) => f.write_str("Deferred::Eager(..)"),
            Self::Lazy(_) => f.write_str("Deferred::Lazy(<factory>)"),
        }
    }
}
