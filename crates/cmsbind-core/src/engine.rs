//! The color-management engine seam
//!
//! [`Engine`] lists every call the binding makes into the engine. The
//! production implementation, [`LittleCms`], forwards each one to Little CMS 2;
//! tests substitute counting mocks.

use crate::handle::NativeHandle;
use littlecms_ffi as ffi;
use log::trace;
use std::ffi::{CStr, c_void};
use std::ptr::{self, NonNull};

/// Built-in profiles the engine can construct without a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StandardProfile {
    /// IEC 61966-2-1 sRGB
    Srgb,
    /// CIE L*a*b* v4, D50
    Lab,
    /// Gray with a pure gamma tone curve
    Gray { gamma: f64 },
    /// CIE XYZ
    Xyz,
}

/// Text fields of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Description,
    Manufacturer,
    Model,
    Copyright,
}

impl ProfileField {
    /// Engine info selector
    pub fn code(self) -> u32 {
        match self {
            ProfileField::Description => ffi::cmsInfoDescription,
            ProfileField::Manufacturer => ffi::cmsInfoManufacturer,
            ProfileField::Model => ffi::cmsInfoModel,
            ProfileField::Copyright => ffi::cmsInfoCopyright,
        }
    }
}

/// Proofing half of a transform request
#[derive(Debug, Clone, Copy)]
pub struct ProofingRequest {
    pub profile: NativeHandle,
    pub intent: u32,
}

/// Arguments of a transform creation call, forwarded verbatim
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest {
    pub input: NativeHandle,
    pub input_format: u32,
    pub output: NativeHandle,
    pub output_format: u32,
    pub intent: u32,
    pub flags: u32,
    pub proofing: Option<ProofingRequest>,
}

/// Calls the binding makes into a color-management engine
///
/// Creation calls return `None` when the engine fails. Methods that take a
/// handle are `unsafe`: the caller guarantees the handle came from this
/// engine, has the matching kind and has not been released.
pub trait Engine: Send + Sync {
    fn open_profile(&self, path: &CStr) -> Option<NativeHandle>;

    fn create_standard_profile(&self, profile: StandardProfile) -> Option<NativeHandle>;

    /// # Safety
    ///
    /// All profile handles in `request` must be live.
    unsafe fn create_transform(&self, request: &TransformRequest) -> Option<NativeHandle>;

    /// Transform one pixel
    ///
    /// # Safety
    ///
    /// `transform` must be live, `input` must be readable and `output`
    /// writable for one pixel of the formats the transform was created with.
    unsafe fn do_transform(&self, transform: NativeHandle, input: *const c_void, output: *mut c_void);

    /// # Safety
    ///
    /// `profile` must be live; it is dead afterwards.
    unsafe fn close_profile(&self, profile: NativeHandle);

    /// # Safety
    ///
    /// `transform` must be live; it is dead afterwards.
    unsafe fn delete_transform(&self, transform: NativeHandle);

    /// Fill `buffer` with a NUL-terminated text field, truncating as needed
    ///
    /// # Safety
    ///
    /// `profile` must be live.
    unsafe fn profile_info(&self, profile: NativeHandle, field: ProfileField, buffer: &mut [u8]);

    /// Encoded engine version
    fn version(&self) -> i32;
}

/// Little CMS 2
#[derive(Debug, Default, Clone, Copy)]
pub struct LittleCms;

/// Tone curve freed as soon as it goes out of scope
struct ToneCurve(NonNull<ffi::cmsToneCurve>);

impl ToneCurve {
    fn gamma(gamma: f64) -> Option<Self> {
        NonNull::new(unsafe { ffi::cmsBuildGamma(ptr::null_mut(), gamma) }).map(Self)
    }
}

impl Drop for ToneCurve {
    fn drop(&mut self) {
        unsafe { ffi::cmsFreeToneCurve(self.0.as_ptr()) }
    }
}

impl Engine for LittleCms {
    fn open_profile(&self, path: &CStr) -> Option<NativeHandle> {
        trace!("cmsOpenProfileFromFile({:?})", path);
        NativeHandle::new(unsafe { ffi::cmsOpenProfileFromFile(path.as_ptr(), c"r".as_ptr()) })
    }

    fn create_standard_profile(&self, profile: StandardProfile) -> Option<NativeHandle> {
        trace!("create standard profile {:?}", profile);
        let raw = match profile {
            StandardProfile::Srgb => unsafe { ffi::cmsCreate_sRGBProfile() },
            StandardProfile::Lab => unsafe { ffi::cmsCreateLab4Profile(ptr::null()) },
            StandardProfile::Xyz => unsafe { ffi::cmsCreateXYZProfile() },
            StandardProfile::Gray { gamma } => {
                let curve = ToneCurve::gamma(gamma)?;
                // The profile keeps its own copy of the curve.
                unsafe { ffi::cmsCreateGrayProfile(ptr::null(), curve.0.as_ptr()) }
            }
        };
        NativeHandle::new(raw)
    }

    unsafe fn create_transform(&self, request: &TransformRequest) -> Option<NativeHandle> {
        trace!("create transform {:?}", request);
        let raw = match request.proofing {
            None => unsafe {
                ffi::cmsCreateTransform(
                    request.input.as_ptr(),
                    request.input_format,
                    request.output.as_ptr(),
                    request.output_format,
                    request.intent,
                    request.flags,
                )
            },
            Some(proofing) => unsafe {
                ffi::cmsCreateProofingTransform(
                    request.input.as_ptr(),
                    request.input_format,
                    request.output.as_ptr(),
                    request.output_format,
                    proofing.profile.as_ptr(),
                    request.intent,
                    proofing.intent,
                    request.flags,
                )
            },
        };
        NativeHandle::new(raw)
    }

    unsafe fn do_transform(&self, transform: NativeHandle, input: *const c_void, output: *mut c_void) {
        trace!("cmsDoTransform({:?})", transform);
        unsafe { ffi::cmsDoTransform(transform.as_ptr(), input, output, 1) }
    }

    unsafe fn close_profile(&self, profile: NativeHandle) {
        trace!("cmsCloseProfile({:?})", profile);
        unsafe {
            ffi::cmsCloseProfile(profile.as_ptr());
        }
    }

    unsafe fn delete_transform(&self, transform: NativeHandle) {
        trace!("cmsDeleteTransform({:?})", transform);
        unsafe { ffi::cmsDeleteTransform(transform.as_ptr()) }
    }

    unsafe fn profile_info(&self, profile: NativeHandle, field: ProfileField, buffer: &mut [u8]) {
        trace!("cmsGetProfileInfoASCII({:?}, {:?})", profile, field);
        let size = u32::try_from(buffer.len()).unwrap_or(u32::MAX);
        unsafe {
            ffi::cmsGetProfileInfoASCII(
                profile.as_ptr(),
                field.code(),
                ffi::cmsNoLanguage.as_ptr().cast(),
                ffi::cmsNoCountry.as_ptr().cast(),
                buffer.as_mut_ptr().cast(),
                size,
            );
        }
    }

    fn version(&self) -> i32 {
        ffi::encoded_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_profiles_close_cleanly() {
        let engine = LittleCms;
        for profile in [
            StandardProfile::Srgb,
            StandardProfile::Lab,
            StandardProfile::Xyz,
            StandardProfile::Gray { gamma: 2.2 },
        ] {
            let handle = engine
                .create_standard_profile(profile)
                .unwrap_or_else(|| panic!("{:?} should be constructible", profile));
            unsafe { engine.close_profile(handle) };
        }
    }

    #[test]
    fn test_open_missing_file() {
        assert!(LittleCms.open_profile(c"/nonexistent/cmsbind.icc").is_none());
    }

    #[test]
    fn test_description_is_terminated() {
        let engine = LittleCms;
        let srgb = engine.create_standard_profile(StandardProfile::Srgb).unwrap();
        let mut buffer = [0xFFu8; 8];
        unsafe {
            engine.profile_info(srgb, ProfileField::Description, &mut buffer);
            engine.close_profile(srgb);
        }
        assert!(buffer.contains(&0), "engine must terminate within the buffer");
    }
}
