//! Counting mock engine
//!
//! Hands out fake handles and counts every call, so tests can assert that
//! each capsule runs its destructor exactly once.

use cmsbind_core::{Engine, NativeHandle, ProfileField, StandardProfile, TransformRequest};
use std::ffi::{CStr, c_void};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Size of the pixel areas the binding passes to `do_transform`
const PIXEL_AREA: usize = 32;

/// Text every profile reports for every field
pub const MOCK_TEXT: &str = "Mock profile";

#[derive(Debug, Default)]
pub struct CountingEngine {
    next_handle: AtomicUsize,
    fail_creation: AtomicBool,
    pub opened: AtomicUsize,
    pub created: AtomicUsize,
    pub transforms: AtomicUsize,
    pub closed: AtomicUsize,
    pub deleted: AtomicUsize,
    pub pixels: AtomicUsize,
}

impl CountingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every creation call returns NULL while set
    pub fn set_failing(&self, failing: bool) {
        self.fail_creation.store(failing, Ordering::SeqCst);
    }

    /// Profiles created or opened and not yet closed
    pub fn live_profiles(&self) -> usize {
        self.opened.load(Ordering::SeqCst) + self.created.load(Ordering::SeqCst)
            - self.closed.load(Ordering::SeqCst)
    }

    /// Transforms created and not yet deleted
    pub fn live_transforms(&self) -> usize {
        self.transforms.load(Ordering::SeqCst) - self.deleted.load(Ordering::SeqCst)
    }

    fn issue(&self, counter: &AtomicUsize) -> Option<NativeHandle> {
        if self.fail_creation.load(Ordering::SeqCst) {
            return None;
        }
        counter.fetch_add(1, Ordering::SeqCst);
        let n = self.next_handle.fetch_add(1, Ordering::SeqCst);
        NativeHandle::new((0x1000 + n * 0x10) as *mut c_void)
    }
}

impl Engine for CountingEngine {
    fn open_profile(&self, _path: &CStr) -> Option<NativeHandle> {
        self.issue(&self.opened)
    }

    fn create_standard_profile(&self, _profile: StandardProfile) -> Option<NativeHandle> {
        self.issue(&self.created)
    }

    unsafe fn create_transform(&self, _request: &TransformRequest) -> Option<NativeHandle> {
        self.issue(&self.transforms)
    }

    /// Identity: copies the whole input area to the output area
    unsafe fn do_transform(&self, _transform: NativeHandle, input: *const c_void, output: *mut c_void) {
        self.pixels.fetch_add(1, Ordering::SeqCst);
        unsafe {
            std::ptr::copy_nonoverlapping(input.cast::<u8>(), output.cast::<u8>(), PIXEL_AREA);
        }
    }

    unsafe fn close_profile(&self, _profile: NativeHandle) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    unsafe fn delete_transform(&self, _transform: NativeHandle) {
        self.deleted.fetch_add(1, Ordering::SeqCst);
    }

    unsafe fn profile_info(&self, _profile: NativeHandle, _field: ProfileField, buffer: &mut [u8]) {
        if buffer.is_empty() {
            return;
        }
        let text = MOCK_TEXT.as_bytes();
        let n = text.len().min(buffer.len() - 1);
        buffer[..n].copy_from_slice(&text[..n]);
        buffer[n] = 0;
    }

    fn version(&self) -> i32 {
        2160
    }
}
