//! Reference pixels from the `lcms2` crate
//!
//! `lcms2` links the same native library as the binding, so for the same
//! profiles, formats and intent the results must agree bit for bit.

use anyhow::{Context, Result};
use lcms2::{Intent, PixelFormat, Profile, Transform};

/// sRGB to sRGB, RGBA 8-bit, relative colorimetric
pub fn srgb_identity_rgba8(pixels: &[[u8; 4]]) -> Result<Vec<[u8; 4]>> {
    let srgb = Profile::new_srgb();
    let transform = Transform::<[u8; 4], [u8; 4]>::new(
        &srgb,
        PixelFormat::RGBA_8,
        &srgb,
        PixelFormat::RGBA_8,
        Intent::RelativeColorimetric,
    )
    .context("lcms2 sRGB identity transform")?;

    let mut out = vec![[0u8; 4]; pixels.len()];
    transform.transform_pixels(pixels, &mut out);
    Ok(out)
}

/// sRGB RGBA 8-bit to XYZ doubles, perceptual
pub fn srgb_to_xyz(pixels: &[[u8; 4]]) -> Result<Vec<[f64; 3]>> {
    let srgb = Profile::new_srgb();
    let xyz = Profile::new_xyz();
    let transform = Transform::<[u8; 4], [f64; 3]>::new(
        &srgb,
        PixelFormat::RGBA_8,
        &xyz,
        PixelFormat::XYZ_DBL,
        Intent::Perceptual,
    )
    .context("lcms2 sRGB to XYZ transform")?;

    let mut out = vec![[0f64; 3]; pixels.len()];
    transform.transform_pixels(pixels, &mut out);
    Ok(out)
}

/// Byte channels the legacy normalized path feeds the engine
pub fn normalized_to_bytes(input: [f64; 4]) -> [u8; 4] {
    input.map(|v| (v * 255.0) as u8)
}
