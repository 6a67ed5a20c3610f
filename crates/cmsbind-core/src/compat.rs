//! python-lcms style facade
//!
//! Mirrors the defaults, buffer conventions and error messages of the
//! python-lcms API so that code written against it ports mechanically.
//! A colour value is a five-member list: four channels followed by a
//! sample-kind code ([`COLOR_BYTE`], [`COLOR_WORD`] or [`COLOR_DBL`]).

use crate::error::Error;
use crate::format::{INTENT_PERCEPTUAL, INTENT_RELATIVE_COLORIMETRIC, SampleKind, flags};
use crate::handle::ManagedResource;
use crate::host::{Host, HostValue};
use crate::{Cms, ProfileField};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error as ThisError;

pub const COLOR_BYTE: i64 = 0;
pub const COLOR_WORD: i64 = 1;
pub const COLOR_DBL: i64 = 2;

/// Format tags under their python-lcms names
#[allow(non_upper_case_globals)]
pub mod types {
    pub const TYPE_RGB_8: &str = "RGBA";
    pub const TYPE_RGB_16: &str = "RGBA;16";
    pub const TYPE_RGBA_8: &str = "RGBA";
    pub const TYPE_RGBA_16: &str = "RGBA;16";
    pub const TYPE_CMYK_8: &str = "CMYK";
    pub const TYPE_CMYK_16: &str = "CMYK;16";
    pub const TYPE_GRAY_8: &str = "L";
    pub const TYPE_GRAY_16: &str = "L;16";
    pub const TYPE_Lab_8: &str = "LAB";
    pub const TYPE_Lab_DBL: &str = "LAB;float";
    pub const TYPE_XYZ_DBL: &str = "XYZ;float";
}

/// Single error type of the facade; the message is all there is
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{0}")]
pub struct CmsError(pub String);

impl From<Error> for CmsError {
    fn from(err: Error) -> Self {
        CmsError(err.to_string())
    }
}

pub type CmsResult<T> = std::result::Result<T, CmsError>;

const BUFFER_SHAPE: &str = "inputBuffer and outputBuffer must be Python 5-member list objects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub intent: i32,
    pub flags: u32,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            intent: INTENT_PERCEPTUAL as i32,
            flags: flags::NOTPRECALC,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofingOptions {
    pub intent: i32,
    pub proofing_intent: i32,
    pub flags: u32,
}

impl Default for ProofingOptions {
    fn default() -> Self {
        Self {
            intent: INTENT_PERCEPTUAL as i32,
            proofing_intent: INTENT_RELATIVE_COLORIMETRIC as i32,
            flags: flags::SOFTPROOFING,
        }
    }
}

/// Typed five-member colour list
///
/// Channels are kept as `f64` whatever the kind; byte and word channels are
/// cast to integers when the pixel is handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBuffer {
    pub channels: [f64; 4],
    pub kind: SampleKind,
}

impl ColorBuffer {
    pub fn colorb(c0: u8, c1: u8, c2: u8, c3: u8) -> Self {
        Self {
            channels: [c0, c1, c2, c3].map(f64::from),
            kind: SampleKind::Byte,
        }
    }

    pub fn colorw(c0: u16, c1: u16, c2: u16, c3: u16) -> Self {
        Self {
            channels: [c0, c1, c2, c3].map(f64::from),
            kind: SampleKind::Word,
        }
    }

    pub fn cie_xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            channels: [x, y, z, 0.0],
            kind: SampleKind::Double,
        }
    }

    pub fn cie_lab(l: f64, a: f64, b: f64) -> Self {
        Self {
            channels: [l, a, b, 0.0],
            kind: SampleKind::Double,
        }
    }

    /// The dynamic five-member list form
    pub fn to_value(&self) -> HostValue {
        let mut items: Vec<HostValue> = match self.kind {
            SampleKind::Double => self.channels.iter().map(|&c| HostValue::Float(c)).collect(),
            _ => self.channels.iter().map(|&c| HostValue::Int(c as i64)).collect(),
        };
        items.push(HostValue::Int(self.kind.code()));
        HostValue::List(items)
    }
}

/// python-lcms flavoured API over a [`Host`]
#[derive(Debug, Clone, Default)]
pub struct Compat {
    host: Host,
}

impl Compat {
    pub fn new(cms: Cms) -> Self {
        Self {
            host: Host::new(cms),
        }
    }

    fn cms(&self) -> &Cms {
        self.host.cms()
    }

    /// Engine version as `"major.minor"`
    pub fn get_version(&self) -> String {
        self.cms().version().to_string()
    }

    pub fn open_profile_from_file(&self, path: impl AsRef<Path>) -> CmsResult<Rc<ManagedResource>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CmsError(format!(
                "Invalid profile path provided: {}",
                path.display()
            )));
        }
        match self.cms().open_profile(path) {
            Ok(profile) => Ok(Rc::new(profile)),
            Err(Error::EngineResourceFailure(_)) => Err(CmsError(format!(
                "It seems provided profile is invalid: {}",
                path.display()
            ))),
            Err(err) => Err(err.into()),
        }
    }

    pub fn create_srgb_profile(&self) -> CmsResult<Rc<ManagedResource>> {
        Ok(Rc::new(self.cms().create_srgb_profile()?))
    }

    pub fn create_lab_profile(&self) -> CmsResult<Rc<ManagedResource>> {
        Ok(Rc::new(self.cms().create_lab_profile()?))
    }

    pub fn create_gray_profile(&self) -> CmsResult<Rc<ManagedResource>> {
        Ok(Rc::new(self.cms().create_gray_profile(None)?))
    }

    pub fn create_xyz_profile(&self) -> CmsResult<Rc<ManagedResource>> {
        Ok(Rc::new(self.cms().create_xyz_profile()?))
    }

    pub fn create_transform(
        &self,
        input: &ManagedResource,
        in_mode: &str,
        output: &ManagedResource,
        out_mode: &str,
        options: TransformOptions,
    ) -> CmsResult<Rc<ManagedResource>> {
        check_intent("renderingIntent", options.intent)?;
        let cms = self.cms();
        let result = cms.build_transform(
            input,
            cms.resolve_format(in_mode)?,
            output,
            cms.resolve_format(out_mode)?,
            options.intent,
            options.flags,
        );
        match result {
            Ok(transform) => Ok(Rc::new(transform)),
            Err(Error::EngineResourceFailure(_)) => Err(CmsError(format!(
                "Cannot create requested transform: {} {}",
                in_mode, out_mode
            ))),
            Err(err) => Err(err.into()),
        }
    }

    pub fn create_proofing_transform(
        &self,
        input: &ManagedResource,
        in_mode: &str,
        output: &ManagedResource,
        out_mode: &str,
        proofing: &ManagedResource,
        options: ProofingOptions,
    ) -> CmsResult<Rc<ManagedResource>> {
        check_intent("renderingIntent", options.intent)?;
        check_intent("proofingIntent", options.proofing_intent)?;
        let cms = self.cms();
        let result = cms.build_proofing_transform(
            input,
            cms.resolve_format(in_mode)?,
            output,
            cms.resolve_format(out_mode)?,
            proofing,
            options.intent,
            options.proofing_intent,
            options.flags,
        );
        match result {
            Ok(transform) => Ok(Rc::new(transform)),
            Err(Error::EngineResourceFailure(_)) => Err(CmsError(format!(
                "Cannot create requested proofing transform: {} {}",
                in_mode, out_mode
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Transform `input` into the channels of `output`
    ///
    /// The entry point follows the input's kind; the result width follows
    /// the output's kind.
    pub fn do_transform(
        &self,
        transform: &Rc<ManagedResource>,
        input: &ColorBuffer,
        output: &mut ColorBuffer,
    ) -> CmsResult<()> {
        let mut out_value = output.to_value();
        self.do_transform_values(transform, &input.to_value(), &mut out_value)?;
        if let Some(items) = out_value.as_list() {
            for (channel, item) in output.channels.iter_mut().zip(items) {
                if let Some(v) = item.as_float() {
                    *channel = v;
                }
            }
        }
        Ok(())
    }

    /// Transform over dynamic five-member lists
    ///
    /// Only the first four members of `output` are written.
    pub fn do_transform_values(
        &self,
        transform: &Rc<ManagedResource>,
        input: &HostValue,
        output: &mut HostValue,
    ) -> CmsResult<()> {
        let (input, output) = match (input, output) {
            (HostValue::List(i), HostValue::List(o)) if i.len() == 5 && o.len() == 5 => (i, o),
            _ => return Err(CmsError(BUFFER_SHAPE.to_owned())),
        };

        // Kind codes compare by value, so 1.0 selects words like 1 does.
        let kind = input[4].as_float();
        let method = if kind == Some(COLOR_WORD as f64) {
            "transformPixel16b"
        } else if kind == Some(COLOR_DBL as f64) {
            "transformPixelDbl"
        } else {
            "transformPixel"
        };
        let mut args = Vec::with_capacity(6);
        args.push(HostValue::Resource(transform.clone()));
        args.extend_from_slice(&input[..4]);
        args.push(output[4].clone());

        let result = self.host.call(method, &args)?;
        if let Some(channels) = result.as_list() {
            output[..4].clone_from_slice(&channels[..4]);
        }
        Ok(())
    }

    pub fn profile_name(&self, profile: &ManagedResource) -> CmsResult<String> {
        self.field(profile, ProfileField::Description)
    }

    pub fn profile_info(&self, profile: &ManagedResource) -> CmsResult<String> {
        self.field(profile, ProfileField::Model)
    }

    pub fn profile_copyright(&self, profile: &ManagedResource) -> CmsResult<String> {
        self.field(profile, ProfileField::Copyright)
    }

    fn field(&self, profile: &ManagedResource, field: ProfileField) -> CmsResult<String> {
        Ok(self.cms().profile_field(profile, field)?.trim().to_owned())
    }

    /// No-op; profiles close when their last reference is dropped
    pub fn close_profile(&self, _profile: &ManagedResource) {}

    /// No-op; transforms are deleted when their last reference is dropped
    pub fn delete_transform(&self, _transform: &ManagedResource) {}
}

fn check_intent(name: &str, intent: i32) -> CmsResult<()> {
    if (0..=3).contains(&intent) {
        Ok(())
    } else {
        Err(CmsError(format!("{} must be an integer between 0 and 3", name)))
    }
}
