//! Shared handles to arbitrary inspectable errors

use crate::capability::Inspect;
use crate::record::Fault;
use std::error::Error;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Cheaply clonable, shared handle to any inspectable error
///
/// This is the element type of cause and associated-error lists. Cloning an
/// `AnyError` shares the underlying error; it never copies it.
#[derive(Clone)]
pub struct AnyError(Arc<dyn Inspect>);

impl AnyError {
    /// Wrap an error that implements [`Inspect`]
    pub fn new<E: Inspect>(err: E) -> Self {
        Self(Arc::new(err))
    }

    /// Wrap any standard error
    ///
    /// A [`Fault`] or an `AnyError` passed here keeps its capabilities;
    /// every other error is adapted through [`Foreign`] and exposes none.
    /// Types implementing [`Inspect`] belong in [`AnyError::new`] or `into()`.
    pub fn foreign<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(err);
        let boxed = match boxed.downcast::<Fault>() {
            Ok(fault) => return Self::new(*fault),
            Err(other) => other,
        };
        match boxed.downcast::<AnyError>() {
            Ok(any) => *any,
            Err(other) => Self::new(Foreign::from_boxed(other)),
        }
    }

    /// Borrow as an inspectable error, for the [`facet`](crate::facet) functions
    pub fn inspect(&self) -> &dyn Inspect {
        &*self.0
    }

    /// Downcast to the concrete error type behind the handle
    pub fn downcast_ref<T: Error + 'static>(&self) -> Option<&T> {
        self.0.as_error().downcast_ref::<T>()
    }

    /// Whether both handles share the same underlying error
    pub fn ptr_eq(&self, other: &AnyError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for AnyError {
    type Target = dyn Inspect;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl<E: Inspect> From<E> for AnyError {
    fn from(err: E) -> Self {
        Self::new(err)
    }
}

impl fmt::Debug for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Error for AnyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

/// Adapter for errors that know nothing about capabilities
///
/// A foreign error satisfies no facet capability. Its `source()` chain is
/// still walked as a single-error cause chain.
pub struct Foreign(Box<dyn Error + Send + Sync>);

impl Foreign {
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    pub fn from_boxed(err: Box<dyn Error + Send + Sync>) -> Self {
        Self(err)
    }

    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync> {
        self.0
    }
}

impl fmt::Debug for Foreign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Foreign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Error for Foreign {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

crate::impl_inspect!(Foreign);

/// Owned copy of an error chain that is only reachable by reference
#[derive(Debug)]
struct Detached {
    message: String,
    source: Option<Box<Detached>>,
}

impl Detached {
    fn capture(err: &(dyn Error + 'static)) -> Self {
        Self {
            message: err.to_string(),
            source: err.source().map(|source| Box::new(Self::capture(source))),
        }
    }
}

impl fmt::Display for Detached {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Detached {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|s| s as &(dyn Error + 'static))
    }
}

/// Turn a borrowed `source()` into an owned cause
///
/// Records and handles found in the chain are shared as-is; anything else is
/// captured as text together with its own source chain.
pub(crate) fn promote(err: &(dyn Error + 'static)) -> AnyError {
    if let Some(fault) = err.downcast_ref::<Fault>() {
        return AnyError::new(fault.clone());
    }
    if let Some(any) = err.downcast_ref::<AnyError>() {
        return any.clone();
    }
    AnyError::new(Foreign::new(Detached::capture(err)))
}
