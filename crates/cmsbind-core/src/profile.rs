//! Profile operations
//!
//! Opening, constructing and querying profiles. Every successful engine
//! call is wrapped in a [`ManagedResource`] of kind
//! [`ResourceKind::Profile`] before it is returned.

use crate::cms::Cms;
use crate::engine::{ProfileField, StandardProfile};
use crate::handle::{ManagedResource, ResourceKind};
use crate::{Error, Result};
use log::error;
use std::ffi::CString;
use std::path::Path;

impl Cms {
    /// Load a profile from an ICC file
    ///
    /// A missing, unreadable or malformed file is reported as
    /// [`Error::EngineResourceFailure`].
    pub fn open_profile(&self, path: impl AsRef<Path>) -> Result<ManagedResource> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;
        let raw = self.engine().open_profile(&c_path);
        self.wrap(raw, ResourceKind::Profile, "open profile")
    }

    /// Construct a built-in profile
    pub fn create_profile(&self, profile: StandardProfile) -> Result<ManagedResource> {
        if let StandardProfile::Gray { gamma } = profile {
            if !(gamma.is_finite() && gamma > 0.0) {
                return Err(Error::invalid(format!(
                    "gray gamma must be a positive finite number, got {}",
                    gamma
                )));
            }
        }
        let raw = self.engine().create_standard_profile(profile);
        if raw.is_none() {
            error!("engine could not construct built-in {:?} profile", profile);
        }
        self.wrap(raw, ResourceKind::Profile, "create standard profile")
    }

    pub fn create_srgb_profile(&self) -> Result<ManagedResource> {
        self.create_profile(StandardProfile::Srgb)
    }

    pub fn create_lab_profile(&self) -> Result<ManagedResource> {
        self.create_profile(StandardProfile::Lab)
    }

    pub fn create_xyz_profile(&self) -> Result<ManagedResource> {
        self.create_profile(StandardProfile::Xyz)
    }

    /// Gray profile; `None` uses the configured default gamma
    pub fn create_gray_profile(&self, gamma: Option<f64>) -> Result<ManagedResource> {
        let gamma = gamma.unwrap_or(self.config().default_gray_gamma);
        self.create_profile(StandardProfile::Gray { gamma })
    }

    /// Read a text field of a profile
    ///
    /// The engine fills a buffer of `info_buffer_capacity` bytes; longer
    /// texts are truncated. Bytes are decoded as Latin-1.
    pub fn profile_field(&self, profile: &ManagedResource, field: ProfileField) -> Result<String> {
        let handle = self.handle_of(profile, ResourceKind::Profile)?;
        let mut buffer = vec![0u8; self.config().info_buffer_capacity];
        unsafe { self.engine().profile_info(handle, field, &mut buffer) };
        Ok(decode_text(&buffer))
    }
}

/// Text up to the first NUL, or the whole buffer when none is present
fn decode_text(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    buffer[..end].iter().map(|&b| char::from(b)).collect()
}

fn path_to_cstring(path: &Path) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path
        .to_str()
        .ok_or_else(|| Error::invalid(format!("profile path is not valid UTF-8: {}", path.display())))?
        .as_bytes()
        .to_vec();

    CString::new(bytes)
        .map_err(|_| Error::invalid(format!("profile path contains a NUL byte: {}", path.display())))
}
