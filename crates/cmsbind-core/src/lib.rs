//! # cmsbind - lifetime-managed bindings to Little CMS 2
//!
//! Profiles and transforms created by the engine are raw pointers with a
//! matching destructor. This crate wraps each of them in a capsule that
//! knows its kind, refuses to be used after release, and closes the
//! underlying resource exactly once.
//!
//! ## Layers
//!
//! - [`Cms`]: typed operations (open/create profiles, build transforms,
//!   transform single pixels, read profile text fields)
//! - [`Host`]: a dynamic, method-name based surface for embedding runtimes
//! - [`Compat`]: python-lcms style facade with its defaults and messages
//!
//! ## Quick Start
//!
//! ```no_run
//! use cmsbind_core::{Cms, PixelFormat, SampleKind, INTENT_PERCEPTUAL};
//!
//! let cms = Cms::new();
//! let srgb = cms.create_srgb_profile().unwrap();
//! let lab = cms.create_lab_profile().unwrap();
//!
//! let transform = cms.build_transform(
//!     &srgb,
//!     PixelFormat::Rgba8,
//!     &lab,
//!     PixelFormat::LabDouble,
//!     INTENT_PERCEPTUAL as i32,
//!     0,
//! ).unwrap();
//!
//! let lab_pixel = cms
//!     .apply_transform8(&transform, [255, 128, 64, 0], SampleKind::Double)
//!     .unwrap();
//! println!("{:?}", lab_pixel.to_f64_array());
//! ```

pub mod cms;
pub mod compat;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod handle;
pub mod host;
mod pixel;
mod profile;
mod transform;

pub use cms::{Cms, Version};
pub use compat::{CmsError, ColorBuffer, Compat, ProofingOptions, TransformOptions};
pub use config::Config;
pub use engine::{Engine, LittleCms, ProfileField, ProofingRequest, StandardProfile, TransformRequest};
pub use error::{Error, ErrorCategory, Result};
pub use format::{
    INTENT_ABSOLUTE_COLORIMETRIC, INTENT_PERCEPTUAL, INTENT_RELATIVE_COLORIMETRIC,
    INTENT_SATURATION, PixelBuffer, PixelFormat, SampleKind, flags,
};
pub use handle::{ManagedResource, NativeHandle, ResourceKind, TransformFormats};
pub use host::{Host, HostValue, Request};

/// Version of cmsbind
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
