//! FFI declarations for the Little CMS 2 color management engine
//!
//! Only the slice of the C API the binding layer needs is declared here.
//! Enum-typed parameters (intents, info selectors) are declared as plain
//! `u32` so arbitrary host-supplied codes can be forwarded to the engine
//! without materializing invalid Rust enum values.
//!
//! The native library itself is built or located by `lcms2-sys`.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

extern crate lcms2_sys as _;

use std::os::raw::{c_char, c_int, c_void};

pub type cmsHPROFILE = *mut c_void;
pub type cmsHTRANSFORM = *mut c_void;
pub type cmsContext = *mut c_void;
pub type cmsBool = c_int;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct cmsCIExyY {
    pub x: f64,
    pub y: f64,
    pub Y: f64,
}

/// Opaque tone curve owned by the engine
#[repr(C)]
pub struct cmsToneCurve {
    _private: [u8; 0],
}

// Pixel type (colorspace) codes from lcms2.h
pub const PT_GRAY: u32 = 3;
pub const PT_RGB: u32 = 4;
pub const PT_CMY: u32 = 5;
pub const PT_CMYK: u32 = 6;
pub const PT_XYZ: u32 = 9;
pub const PT_Lab: u32 = 10;

// Format-word field shifts, mirroring the lcms2.h *_SH macros
pub const fn FLOAT_SH(a: u32) -> u32 {
    a << 22
}
pub const fn COLORSPACE_SH(s: u32) -> u32 {
    s << 16
}
pub const fn EXTRA_SH(e: u32) -> u32 {
    e << 7
}
pub const fn CHANNELS_SH(c: u32) -> u32 {
    c << 3
}
pub const fn BYTES_SH(b: u32) -> u32 {
    b
}

pub const TYPE_GRAY_8: u32 = COLORSPACE_SH(PT_GRAY) | CHANNELS_SH(1) | BYTES_SH(1);
pub const TYPE_GRAY_16: u32 = COLORSPACE_SH(PT_GRAY) | CHANNELS_SH(1) | BYTES_SH(2);
pub const TYPE_RGB_8: u32 = COLORSPACE_SH(PT_RGB) | CHANNELS_SH(3) | BYTES_SH(1);
pub const TYPE_RGBA_8: u32 = COLORSPACE_SH(PT_RGB) | EXTRA_SH(1) | CHANNELS_SH(3) | BYTES_SH(1);
pub const TYPE_RGBA_16: u32 = COLORSPACE_SH(PT_RGB) | EXTRA_SH(1) | CHANNELS_SH(3) | BYTES_SH(2);
pub const TYPE_CMYK_8: u32 = COLORSPACE_SH(PT_CMYK) | CHANNELS_SH(4) | BYTES_SH(1);
pub const TYPE_CMYK_16: u32 = COLORSPACE_SH(PT_CMYK) | CHANNELS_SH(4) | BYTES_SH(2);
pub const TYPE_Lab_8: u32 = COLORSPACE_SH(PT_Lab) | CHANNELS_SH(3) | BYTES_SH(1);
pub const TYPE_Lab_DBL: u32 = FLOAT_SH(1) | COLORSPACE_SH(PT_Lab) | CHANNELS_SH(3) | BYTES_SH(0);
pub const TYPE_XYZ_DBL: u32 = FLOAT_SH(1) | COLORSPACE_SH(PT_XYZ) | CHANNELS_SH(3) | BYTES_SH(0);

// ICC rendering intents
pub const INTENT_PERCEPTUAL: u32 = 0;
pub const INTENT_RELATIVE_COLORIMETRIC: u32 = 1;
pub const INTENT_SATURATION: u32 = 2;
pub const INTENT_ABSOLUTE_COLORIMETRIC: u32 = 3;

// dwFlags bits for transform creation
pub const cmsFLAGS_NOTPRECALC: u32 = 0x0100;
pub const cmsFLAGS_NULLTRANSFORM: u32 = 0x0200;
pub const cmsFLAGS_HIGHRESPRECALC: u32 = 0x0400;
pub const cmsFLAGS_LOWRESPRECALC: u32 = 0x0800;
pub const cmsFLAGS_GAMUTCHECK: u32 = 0x1000;
pub const cmsFLAGS_BLACKPOINTCOMPENSATION: u32 = 0x2000;
pub const cmsFLAGS_SOFTPROOFING: u32 = 0x4000;
pub const cmsFLAGS_PRESERVEBLACK: u32 = 0x8000;

// cmsInfoType
pub const cmsInfoDescription: u32 = 0;
pub const cmsInfoManufacturer: u32 = 1;
pub const cmsInfoModel: u32 = 2;
pub const cmsInfoCopyright: u32 = 3;

/// `cmsNoLanguage` / `cmsNoCountry`
pub const cmsNoLanguage: &[u8; 3] = b"\0\0\0";
pub const cmsNoCountry: &[u8; 3] = b"\0\0\0";

extern "C" {
    // Library information
    pub fn cmsGetEncodedCMMversion() -> c_int;

    // Tone curves
    pub fn cmsBuildGamma(ContextID: cmsContext, Gamma: f64) -> *mut cmsToneCurve;
    pub fn cmsFreeToneCurve(Curve: *mut cmsToneCurve);

    // Profiles
    pub fn cmsOpenProfileFromFile(ICCProfile: *const c_char, sAccess: *const c_char) -> cmsHPROFILE;
    pub fn cmsCreate_sRGBProfile() -> cmsHPROFILE;
    pub fn cmsCreateLab4Profile(WhitePoint: *const cmsCIExyY) -> cmsHPROFILE;
    pub fn cmsCreateXYZProfile() -> cmsHPROFILE;
    pub fn cmsCreateGrayProfile(
        WhitePoint: *const cmsCIExyY,
        TransferFunction: *const cmsToneCurve,
    ) -> cmsHPROFILE;
    pub fn cmsCloseProfile(hProfile: cmsHPROFILE) -> cmsBool;

    pub fn cmsGetProfileInfoASCII(
        hProfile: cmsHPROFILE,
        Info: u32,
        LanguageCode: *const c_char,
        CountryCode: *const c_char,
        Buffer: *mut c_char,
        BufferSize: u32,
    ) -> u32;

    // Transforms
    pub fn cmsCreateTransform(
        Input: cmsHPROFILE,
        InputFormat: u32,
        Output: cmsHPROFILE,
        OutputFormat: u32,
        Intent: u32,
        dwFlags: u32,
    ) -> cmsHTRANSFORM;
    pub fn cmsCreateProofingTransform(
        Input: cmsHPROFILE,
        InputFormat: u32,
        Output: cmsHPROFILE,
        OutputFormat: u32,
        Proofing: cmsHPROFILE,
        Intent: u32,
        ProofingIntent: u32,
        dwFlags: u32,
    ) -> cmsHTRANSFORM;
    pub fn cmsDoTransform(
        Transform: cmsHTRANSFORM,
        InputBuffer: *const c_void,
        OutputBuffer: *mut c_void,
        Size: u32,
    );
    pub fn cmsDeleteTransform(hTransform: cmsHTRANSFORM);
}

/// Encoded engine version, e.g. `2160` for 2.16
pub fn encoded_version() -> i32 {
    unsafe { cmsGetEncodedCMMversion() }
}
