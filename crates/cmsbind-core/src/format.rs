//! Pixel format tags, sample widths and single-pixel buffers

use crate::{Error, Result};
use littlecms_ffi as ffi;
use log::warn;

pub use ffi::{
    INTENT_ABSOLUTE_COLORIMETRIC, INTENT_PERCEPTUAL, INTENT_RELATIVE_COLORIMETRIC,
    INTENT_SATURATION,
};

/// Transform creation flags, passed to the engine uninterpreted
pub mod flags {
    pub use littlecms_ffi::{
        cmsFLAGS_BLACKPOINTCOMPENSATION as BLACKPOINTCOMPENSATION,
        cmsFLAGS_GAMUTCHECK as GAMUTCHECK, cmsFLAGS_HIGHRESPRECALC as HIGHRESPRECALC,
        cmsFLAGS_LOWRESPRECALC as LOWRESPRECALC, cmsFLAGS_NOTPRECALC as NOTPRECALC,
        cmsFLAGS_NULLTRANSFORM as NULLTRANSFORM, cmsFLAGS_PRESERVEBLACK as PRESERVEBLACK,
        cmsFLAGS_SOFTPROOFING as SOFTPROOFING,
    };
}

/// Width of one channel sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// 8-bit unsigned
    Byte,
    /// 16-bit unsigned
    Word,
    /// 64-bit float
    Double,
}

impl SampleKind {
    /// Numeric code used by hosts (`COLOR_BYTE`, `COLOR_WORD`, `COLOR_DBL`)
    pub fn code(self) -> i64 {
        match self {
            SampleKind::Byte => 0,
            SampleKind::Word => 1,
            SampleKind::Double => 2,
        }
    }

    /// Decode a host code, using `fallback` for anything unknown
    pub fn from_code_or(code: i64, fallback: SampleKind) -> SampleKind {
        match code {
            0 => SampleKind::Byte,
            1 => SampleKind::Word,
            2 => SampleKind::Double,
            _ => fallback,
        }
    }
}

/// Pixel formats reachable through format tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba8,
    Rgba16,
    Cmyk8,
    Cmyk16,
    Gray8,
    Gray16,
    Lab8,
    LabDouble,
    XyzDouble,
}

/// Recognized tags; lookups are exact and case-sensitive
const TAGS: &[(&str, PixelFormat)] = &[
    ("RGB", PixelFormat::Rgba8),
    ("RGBA", PixelFormat::Rgba8),
    ("RGBX", PixelFormat::Rgba8),
    ("RGBA;16", PixelFormat::Rgba16),
    ("CMYK", PixelFormat::Cmyk8),
    ("CMYK;16", PixelFormat::Cmyk16),
    ("L", PixelFormat::Gray8),
    ("L;16", PixelFormat::Gray16),
    ("LAB", PixelFormat::Lab8),
    ("LAB;float", PixelFormat::LabDouble),
    ("XYZ;float", PixelFormat::XyzDouble),
];

impl PixelFormat {
    /// Resolve a format tag, falling back to 8-bit gray for unknown tags
    pub fn from_tag(tag: &str) -> PixelFormat {
        Self::try_from_tag(tag).unwrap_or_else(|_| {
            warn!("unknown format tag {:?}, using 8-bit gray", tag);
            PixelFormat::Gray8
        })
    }

    /// Resolve a format tag, rejecting unknown tags
    pub fn try_from_tag(tag: &str) -> Result<PixelFormat> {
        TAGS.iter()
            .find(|(name, _)| *name == tag)
            .map(|&(_, format)| format)
            .ok_or_else(|| Error::invalid(format!("unknown format tag {:?}", tag)))
    }

    /// Canonical tag for this format
    pub fn tag(self) -> &'static str {
        match self {
            PixelFormat::Rgba8 => "RGBA",
            PixelFormat::Rgba16 => "RGBA;16",
            PixelFormat::Cmyk8 => "CMYK",
            PixelFormat::Cmyk16 => "CMYK;16",
            PixelFormat::Gray8 => "L",
            PixelFormat::Gray16 => "L;16",
            PixelFormat::Lab8 => "LAB",
            PixelFormat::LabDouble => "LAB;float",
            PixelFormat::XyzDouble => "XYZ;float",
        }
    }

    /// Engine format code
    pub fn code(self) -> u32 {
        match self {
            PixelFormat::Rgba8 => ffi::TYPE_RGBA_8,
            PixelFormat::Rgba16 => ffi::TYPE_RGBA_16,
            PixelFormat::Cmyk8 => ffi::TYPE_CMYK_8,
            PixelFormat::Cmyk16 => ffi::TYPE_CMYK_16,
            PixelFormat::Gray8 => ffi::TYPE_GRAY_8,
            PixelFormat::Gray16 => ffi::TYPE_GRAY_16,
            PixelFormat::Lab8 => ffi::TYPE_Lab_8,
            PixelFormat::LabDouble => ffi::TYPE_Lab_DBL,
            PixelFormat::XyzDouble => ffi::TYPE_XYZ_DBL,
        }
    }

    pub fn sample_kind(self) -> SampleKind {
        match self {
            PixelFormat::Rgba8 | PixelFormat::Cmyk8 | PixelFormat::Gray8 | PixelFormat::Lab8 => {
                SampleKind::Byte
            }
            PixelFormat::Rgba16 | PixelFormat::Cmyk16 | PixelFormat::Gray16 => SampleKind::Word,
            PixelFormat::LabDouble | PixelFormat::XyzDouble => SampleKind::Double,
        }
    }

    /// Samples per pixel, including the padding channel of RGBA
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray8 | PixelFormat::Gray16 => 1,
            PixelFormat::Lab8 | PixelFormat::LabDouble | PixelFormat::XyzDouble => 3,
            PixelFormat::Rgba8 | PixelFormat::Rgba16 | PixelFormat::Cmyk8 | PixelFormat::Cmyk16 => 4,
        }
    }
}

/// One pixel of four samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelBuffer {
    Bytes([u8; 4]),
    Words([u16; 4]),
    Doubles([f64; 4]),
}

impl PixelBuffer {
    pub fn kind(&self) -> SampleKind {
        match self {
            PixelBuffer::Bytes(_) => SampleKind::Byte,
            PixelBuffer::Words(_) => SampleKind::Word,
            PixelBuffer::Doubles(_) => SampleKind::Double,
        }
    }

    pub fn to_f64_array(&self) -> [f64; 4] {
        match *self {
            PixelBuffer::Bytes(v) => v.map(f64::from),
            PixelBuffer::Words(v) => v.map(f64::from),
            PixelBuffer::Doubles(v) => v,
        }
    }
}
