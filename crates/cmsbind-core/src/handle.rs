//! Lifetime-managed capsules around engine handles
//!
//! The engine hands out raw, non-garbage-collected pointers for profiles and
//! transforms. [`ManagedResource`] owns exactly one of them together with
//! the engine that produced it, and runs the destructor paired with its
//! [`ResourceKind`] exactly once: either through [`ManagedResource::release`]
//! or when the capsule is dropped.

use crate::engine::Engine;
use crate::format::PixelFormat;
use crate::{Error, Result};
use log::debug;
use std::cell::Cell;
use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

/// Opaque pointer-sized handle produced by the engine
///
/// Never dereferenced by this crate. Being a raw pointer it is neither
/// `Send` nor `Sync`, which keeps capsules on the thread that created them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(NonNull<c_void>);

impl NativeHandle {
    /// Wrap a raw engine pointer; `None` for NULL
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({:p})", self.0)
    }
}

/// Resource kind of a capsule, which also selects its destructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Closed with the engine's profile destructor
    Profile,
    /// Closed with the engine's transform destructor
    Transform,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Profile => write!(f, "profile"),
            ResourceKind::Transform => write!(f, "transform"),
        }
    }
}

/// Pixel formats a transform was created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformFormats {
    pub input: PixelFormat,
    pub output: PixelFormat,
}

/// Capsule owning one engine handle
pub struct ManagedResource {
    kind: ResourceKind,
    handle: Cell<Option<NativeHandle>>,
    engine: Arc<dyn Engine>,
    formats: Option<TransformFormats>,
}

impl ManagedResource {
    /// Take ownership of a handle returned by an engine creation call
    ///
    /// A `None` handle means the engine could not satisfy the request and is
    /// reported as [`Error::EngineResourceFailure`] naming `operation`.
    pub fn wrap(
        engine: Arc<dyn Engine>,
        raw: Option<NativeHandle>,
        kind: ResourceKind,
        operation: &'static str,
    ) -> Result<Self> {
        let handle = raw.ok_or(Error::EngineResourceFailure(operation))?;
        debug!("wrapped {} {:?} from {}", kind, handle, operation);
        Ok(Self {
            kind,
            handle: Cell::new(Some(handle)),
            engine,
            formats: None,
        })
    }

    pub(crate) fn with_formats(mut self, formats: TransformFormats) -> Self {
        self.formats = Some(formats);
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Formats recorded at creation time (transforms only)
    pub fn formats(&self) -> Option<TransformFormats> {
        self.formats
    }

    pub fn is_released(&self) -> bool {
        self.handle.get().is_none()
    }

    /// Raw handle for a call site expecting `expected`
    pub fn unwrap(&self, expected: ResourceKind) -> Result<NativeHandle> {
        if self.kind != expected {
            return Err(Error::HandleKindMismatch {
                expected,
                actual: self.kind,
            });
        }
        self.handle.get().ok_or(Error::UseAfterRelease(self.kind))
    }

    /// Like [`unwrap`](Self::unwrap), additionally checking that the capsule
    /// was produced by `engine`
    pub(crate) fn unwrap_for(
        &self,
        engine: &Arc<dyn Engine>,
        expected: ResourceKind,
    ) -> Result<NativeHandle> {
        let handle = self.unwrap(expected)?;
        if !std::ptr::addr_eq(Arc::as_ptr(&self.engine), Arc::as_ptr(engine)) {
            return Err(Error::invalid(format!(
                "{} handle belongs to a different engine",
                self.kind
            )));
        }
        Ok(handle)
    }

    /// Run the paired destructor; later calls do nothing
    pub fn release(&self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        debug!("releasing {} {:?}", self.kind, handle);
        // The handle left the cell above, so no other path can reach it.
        unsafe {
            match self.kind {
                ResourceKind::Profile => self.engine.close_profile(handle),
                ResourceKind::Transform => self.engine.delete_transform(handle),
            }
        }
    }
}

impl Drop for ManagedResource {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ManagedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedResource")
            .field("kind", &self.kind)
            .field("handle", &self.handle.get())
            .field("formats", &self.formats)
            .finish()
    }
}
