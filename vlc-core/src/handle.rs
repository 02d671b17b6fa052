//! Native handle identity and the shared-ownership token.

use std::ffi::c_void;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::traits::engine::Engine;

/// Opaque identifier of a live engine-side object.
///
/// For the native backend this is the object's address. The wrappers never
/// interpret it; they only hand it back to the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(NonZeroUsize);

impl RawHandle {
    /// Wrap a non-null native pointer. Returns `None` for null.
    pub fn from_ptr<T>(ptr: *mut T) -> Option<Self> {
        NonZeroUsize::new(ptr as usize).map(Self)
    }

    pub fn from_id(id: NonZeroUsize) -> Self {
        Self(id)
    }

    pub fn as_ptr<T>(self) -> *mut T {
        self.0.get() as *mut T
    }

    pub fn as_void(self) -> *mut c_void {
        self.as_ptr()
    }

    pub fn id(self) -> usize {
        self.0.get()
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:#x})", self.0.get())
    }
}

/// Family of reference-counted engine objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Instance,
    Media,
    MediaPlayer,
}

/// One counted reference to an engine object.
///
/// Cloning retains, dropping releases. The engine frees the object when the
/// last reference goes away.
pub(crate) struct SharedHandle {
    engine: Arc<dyn Engine>,
    raw: RawHandle,
    kind: ObjectKind,
}

impl SharedHandle {
    /// Take over a reference the engine just handed out (count already 1).
    pub(crate) fn adopt(engine: Arc<dyn Engine>, raw: RawHandle, kind: ObjectKind) -> Self {
        log::debug!("adopted {:?} {:?}", kind, raw);
        Self { engine, raw, kind }
    }

    /// Add a reference to an object owned elsewhere.
    pub(crate) fn retain(engine: Arc<dyn Engine>, raw: RawHandle, kind: ObjectKind) -> Self {
        engine.retain(kind, raw);
        Self { engine, raw, kind }
    }

    pub(crate) fn engine(&self) -> &Arc<dyn Engine> {
        &self.engine
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.raw
    }
}

impl Clone for SharedHandle {
    fn clone(&self) -> Self {
        Self::retain(Arc::clone(&self.engine), self.raw, self.kind)
    }

    fn clone_from(&mut self, source: &Self) {
        // Release the old reference before taking the new one; the old
        // object may be freed here.
        self.engine.release(self.kind, self.raw);
        source.engine.retain(source.kind, source.raw);
        self.engine = Arc::clone(&source.engine);
        self.raw = source.raw;
        self.kind = source.kind;
    }
}

impl PartialEq for SharedHandle {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw == other.raw
    }
}

impl Eq for SharedHandle {}

impl Drop for SharedHandle {
    fn drop(&mut self) {
        log::debug!("releasing {:?} {:?}", self.kind, self.raw);
        self.engine.release(self.kind, self.raw);
    }
}

impl fmt::Debug for SharedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedHandle")
            .field("kind", &self.kind)
            .field("raw", &self.raw)
            .finish()
    }
}
