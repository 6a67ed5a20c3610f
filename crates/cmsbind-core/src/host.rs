//! Dynamic call surface for embedding hosts
//!
//! A host runtime speaks in loosely typed values and method names. Each call
//! is parsed into a typed [`Request`] first, so every arity and type problem
//! is reported as [`Error::InvalidArguments`] before the engine is touched.
//! Capsules travel as `Rc<ManagedResource>`; when the host drops its last
//! reference the engine resource is released.

use crate::cms::Cms;
use crate::engine::{ProfileField, StandardProfile};
use crate::format::{PixelBuffer, SampleKind};
use crate::handle::ManagedResource;
use crate::{Error, Result};
use log::trace;
use std::rc::Rc;

/// Value exchanged with the host
#[derive(Debug, Clone)]
pub enum HostValue {
    None,
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<HostValue>),
    Resource(Rc<ManagedResource>),
}

impl HostValue {
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            HostValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value; integers widen to floats
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            HostValue::Float(v) => Some(v),
            HostValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Rc<ManagedResource>> {
        match self {
            HostValue::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, HostValue::None)
    }
}

impl From<PixelBuffer> for HostValue {
    fn from(pixel: PixelBuffer) -> Self {
        let items = match pixel {
            PixelBuffer::Bytes(v) => v.iter().map(|&c| HostValue::Int(c.into())).collect(),
            PixelBuffer::Words(v) => v.iter().map(|&c| HostValue::Int(c.into())).collect(),
            PixelBuffer::Doubles(v) => v.iter().map(|&c| HostValue::Float(c)).collect(),
        };
        HostValue::List(items)
    }
}

impl From<Rc<ManagedResource>> for HostValue {
    fn from(resource: Rc<ManagedResource>) -> Self {
        HostValue::Resource(resource)
    }
}

/// One parsed host call
#[derive(Debug, Clone)]
pub enum Request {
    GetVersion,
    OpenProfile {
        path: String,
    },
    CreateProfile(StandardProfile),
    /// `None` uses the configured default gamma
    CreateGrayProfile {
        gamma: Option<f64>,
    },
    BuildTransform {
        input: Rc<ManagedResource>,
        input_format: String,
        output: Rc<ManagedResource>,
        output_format: String,
        intent: i32,
        flags: i32,
    },
    BuildProofingTransform {
        input: Rc<ManagedResource>,
        input_format: String,
        output: Rc<ManagedResource>,
        output_format: String,
        proofing: Rc<ManagedResource>,
        intent: i32,
        proofing_intent: i32,
        flags: i32,
    },
    TransformPixel8 {
        transform: Rc<ManagedResource>,
        input: [u8; 4],
        output: SampleKind,
    },
    TransformPixel16 {
        transform: Rc<ManagedResource>,
        input: [u16; 4],
        output: SampleKind,
    },
    TransformPixelDouble {
        transform: Rc<ManagedResource>,
        input: [f64; 4],
        output: SampleKind,
    },
    GetProfileField {
        profile: Rc<ManagedResource>,
        field: ProfileField,
    },
}

/// Method names accepted by [`Request::parse`]
pub const METHODS: &[&str] = &[
    "getVersion",
    "openProfile",
    "createRGBProfile",
    "createLabProfile",
    "createGrayProfile",
    "createXYZProfile",
    "buildTransform",
    "buildProofingTransform",
    "transformPixel",
    "transformPixel16b",
    "transformPixelDbl",
    "getProfileName",
    "getProfileInfo",
    "getProfileInfoCopyright",
];

/// Positional argument reader bound to one method
struct Args<'a> {
    method: &'a str,
    values: &'a [HostValue],
}

impl<'a> Args<'a> {
    fn expect_len(&self, expected: usize) -> Result<()> {
        if self.values.len() != expected {
            return Err(Error::invalid(format!(
                "{}() takes exactly {} argument(s) ({} given)",
                self.method,
                expected,
                self.values.len()
            )));
        }
        Ok(())
    }

    fn mismatch(&self, index: usize, wanted: &str) -> Error {
        Error::invalid(format!(
            "{}() argument {} must be {}, not {:?}",
            self.method,
            index + 1,
            wanted,
            self.values[index]
        ))
    }

    fn resource(&self, index: usize) -> Result<Rc<ManagedResource>> {
        self.values[index]
            .as_resource()
            .cloned()
            .ok_or_else(|| self.mismatch(index, "a resource"))
    }

    fn string(&self, index: usize) -> Result<String> {
        self.values[index]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.mismatch(index, "a string"))
    }

    /// Integer that fits a C `int`
    fn int(&self, index: usize) -> Result<i32> {
        let value = self.values[index]
            .as_int()
            .ok_or_else(|| self.mismatch(index, "an integer"))?;
        i32::try_from(value).map_err(|_| {
            Error::invalid(format!(
                "{}() argument {} is out of range for a C int: {}",
                self.method,
                index + 1,
                value
            ))
        })
    }

    fn float(&self, index: usize) -> Result<f64> {
        self.values[index]
            .as_float()
            .ok_or_else(|| self.mismatch(index, "a number"))
    }

    fn ints4(&self, start: usize) -> Result<[i32; 4]> {
        Ok([
            self.int(start)?,
            self.int(start + 1)?,
            self.int(start + 2)?,
            self.int(start + 3)?,
        ])
    }

    fn floats4(&self, start: usize) -> Result<[f64; 4]> {
        Ok([
            self.float(start)?,
            self.float(start + 1)?,
            self.float(start + 2)?,
            self.float(start + 3)?,
        ])
    }
}

impl Request {
    /// Parse a method call from the host
    pub fn parse(method: &str, values: &[HostValue]) -> Result<Request> {
        let args = Args { method, values };
        let request = match method {
            "getVersion" => {
                args.expect_len(0)?;
                Request::GetVersion
            }
            "openProfile" => {
                args.expect_len(1)?;
                Request::OpenProfile {
                    path: args.string(0)?,
                }
            }
            "createRGBProfile" => {
                args.expect_len(0)?;
                Request::CreateProfile(StandardProfile::Srgb)
            }
            "createLabProfile" => {
                args.expect_len(0)?;
                Request::CreateProfile(StandardProfile::Lab)
            }
            "createXYZProfile" => {
                args.expect_len(0)?;
                Request::CreateProfile(StandardProfile::Xyz)
            }
            "createGrayProfile" => {
                let gamma = match values.len() {
                    0 => None,
                    _ => {
                        args.expect_len(1)?;
                        Some(args.float(0)?)
                    }
                };
                Request::CreateGrayProfile { gamma }
            }
            "buildTransform" => {
                args.expect_len(6)?;
                Request::BuildTransform {
                    input: args.resource(0)?,
                    input_format: args.string(1)?,
                    output: args.resource(2)?,
                    output_format: args.string(3)?,
                    intent: args.int(4)?,
                    flags: args.int(5)?,
                }
            }
            "buildProofingTransform" => {
                args.expect_len(8)?;
                Request::BuildProofingTransform {
                    input: args.resource(0)?,
                    input_format: args.string(1)?,
                    output: args.resource(2)?,
                    output_format: args.string(3)?,
                    proofing: args.resource(4)?,
                    intent: args.int(5)?,
                    proofing_intent: args.int(6)?,
                    flags: args.int(7)?,
                }
            }
            "transformPixel" => {
                args.expect_len(6)?;
                Request::TransformPixel8 {
                    transform: args.resource(0)?,
                    input: args.ints4(1)?.map(|c| c as u8),
                    output: SampleKind::from_code_or(args.int(5)?.into(), SampleKind::Byte),
                }
            }
            "transformPixel16b" => {
                args.expect_len(6)?;
                Request::TransformPixel16 {
                    transform: args.resource(0)?,
                    input: args.ints4(1)?.map(|c| c as u16),
                    output: SampleKind::from_code_or(args.int(5)?.into(), SampleKind::Word),
                }
            }
            "transformPixelDbl" => {
                args.expect_len(6)?;
                Request::TransformPixelDouble {
                    transform: args.resource(0)?,
                    input: args.floats4(1)?,
                    output: SampleKind::from_code_or(args.int(5)?.into(), SampleKind::Double),
                }
            }
            "getProfileName" | "getProfileInfo" | "getProfileInfoCopyright" => {
                args.expect_len(1)?;
                let field = match method {
                    "getProfileName" => ProfileField::Description,
                    "getProfileInfo" => ProfileField::Model,
                    _ => ProfileField::Copyright,
                };
                Request::GetProfileField {
                    profile: args.resource(0)?,
                    field,
                }
            }
            other => return Err(Error::invalid(format!("unknown method {:?}", other))),
        };
        Ok(request)
    }
}

/// Executes host calls against a [`Cms`]
#[derive(Debug, Clone, Default)]
pub struct Host {
    cms: Cms,
}

impl Host {
    pub fn new(cms: Cms) -> Self {
        Self { cms }
    }

    pub fn cms(&self) -> &Cms {
        &self.cms
    }

    pub fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    /// Parse and execute one call
    pub fn call(&self, method: &str, args: &[HostValue]) -> Result<HostValue> {
        trace!("host call {}({} args)", method, args.len());
        let request = Request::parse(method, args)?;
        self.execute(request)
    }

    pub fn execute(&self, request: Request) -> Result<HostValue> {
        let cms = &self.cms;
        let value = match request {
            Request::GetVersion => HostValue::Int(cms.engine_version().into()),
            Request::OpenProfile { path } => resource(cms.open_profile(path)?),
            Request::CreateGrayProfile { gamma } => resource(cms.create_gray_profile(gamma)?),
            Request::CreateProfile(profile) => resource(cms.create_profile(profile)?),
            Request::BuildTransform {
                input,
                input_format,
                output,
                output_format,
                intent,
                flags,
            } => resource(cms.build_transform(
                &input,
                cms.resolve_format(&input_format)?,
                &output,
                cms.resolve_format(&output_format)?,
                intent,
                flags as u32,
            )?),
            Request::BuildProofingTransform {
                input,
                input_format,
                output,
                output_format,
                proofing,
                intent,
                proofing_intent,
                flags,
            } => resource(cms.build_proofing_transform(
                &input,
                cms.resolve_format(&input_format)?,
                &output,
                cms.resolve_format(&output_format)?,
                &proofing,
                intent,
                proofing_intent,
                flags as u32,
            )?),
            Request::TransformPixel8 {
                transform,
                input,
                output,
            } => cms.apply_transform8(&transform, input, output)?.into(),
            Request::TransformPixel16 {
                transform,
                input,
                output,
            } => cms.apply_transform16(&transform, input, output)?.into(),
            Request::TransformPixelDouble {
                transform,
                input,
                output,
            } => cms.apply_transform_double(&transform, input, output)?.into(),
            Request::GetProfileField { profile, field } => {
                HostValue::Str(cms.profile_field(&profile, field)?)
            }
        };
        Ok(value)
    }
}

fn resource(resource: ManagedResource) -> HostValue {
    HostValue::Resource(Rc::new(resource))
}
