//! Single-pixel transform execution
//!
//! Input and output each live in a zeroed `[f64; 4]` scratch area: 32 bytes,
//! 8-byte aligned, wide enough for four samples of any width. Whatever the
//! transform's real output format is, the engine cannot write past it.
//! Every entry point handles exactly one pixel.

use crate::cms::Cms;
use crate::format::{PixelBuffer, SampleKind};
use crate::handle::{ManagedResource, ResourceKind};
use crate::Result;
use bytemuck::Pod;
use log::debug;

type Scratch = [f64; 4];

fn pack<T: Pod>(samples: [T; 4]) -> Scratch {
    let mut scratch = Scratch::default();
    let view: &mut [T] = bytemuck::cast_slice_mut(&mut scratch);
    view[..4].copy_from_slice(&samples);
    scratch
}

fn unpack(scratch: &Scratch, kind: SampleKind) -> PixelBuffer {
    match kind {
        SampleKind::Byte => {
            let v: &[u8] = bytemuck::cast_slice(scratch);
            PixelBuffer::Bytes([v[0], v[1], v[2], v[3]])
        }
        SampleKind::Word => {
            let v: &[u16] = bytemuck::cast_slice(scratch);
            PixelBuffer::Words([v[0], v[1], v[2], v[3]])
        }
        SampleKind::Double => PixelBuffer::Doubles(*scratch),
    }
}

impl Cms {
    /// Transform one pixel of 8-bit samples
    pub fn apply_transform8(
        &self,
        transform: &ManagedResource,
        input: [u8; 4],
        output: SampleKind,
    ) -> Result<PixelBuffer> {
        self.apply(transform, &pack(input), SampleKind::Byte, output)
    }

    /// Transform one pixel of 16-bit samples
    pub fn apply_transform16(
        &self,
        transform: &ManagedResource,
        input: [u16; 4],
        output: SampleKind,
    ) -> Result<PixelBuffer> {
        self.apply(transform, &pack(input), SampleKind::Word, output)
    }

    /// Transform one pixel of double samples
    pub fn apply_transform_double(
        &self,
        transform: &ManagedResource,
        input: [f64; 4],
        output: SampleKind,
    ) -> Result<PixelBuffer> {
        self.apply(transform, &input, SampleKind::Double, output)
    }

    /// Dispatch on the width of `input`
    pub fn apply_pixel(
        &self,
        transform: &ManagedResource,
        input: PixelBuffer,
        output: SampleKind,
    ) -> Result<PixelBuffer> {
        match input {
            PixelBuffer::Bytes(v) => self.apply_transform8(transform, v, output),
            PixelBuffer::Words(v) => self.apply_transform16(transform, v, output),
            PixelBuffer::Doubles(v) => self.apply_transform_double(transform, v, output),
        }
    }

    /// Legacy whole-pixel path over normalized doubles
    ///
    /// Channels in `[0.0, 1.0]` are scaled by 255 and truncated toward zero
    /// into bytes, run through an 8-bit transform, and divided by 255 on the
    /// way out. The truncation is lossy on purpose: `0.5` comes back as
    /// `127.0 / 255.0`, matching what existing callers of this path expect.
    pub fn apply_normalized(&self, transform: &ManagedResource, input: [f64; 4]) -> Result<[f64; 4]> {
        let bytes = input.map(|v| (v * 255.0) as u8);
        let out = self.apply_transform8(transform, bytes, SampleKind::Byte)?;
        Ok(out.to_f64_array().map(|v| v / 255.0))
    }

    fn apply(
        &self,
        transform: &ManagedResource,
        input: &Scratch,
        input_kind: SampleKind,
        output_kind: SampleKind,
    ) -> Result<PixelBuffer> {
        let handle = self.handle_of(transform, ResourceKind::Transform)?;
        if let Some(formats) = transform.formats() {
            if formats.input.sample_kind() != input_kind {
                debug!(
                    "{:?} samples passed to a transform declared with {}",
                    input_kind,
                    formats.input.tag()
                );
            }
        }

        let mut output = Scratch::default();
        unsafe {
            self.engine()
                .do_transform(handle, input.as_ptr().cast(), output.as_mut_ptr().cast());
        }
        Ok(unpack(&output, output_kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{INTENT_PERCEPTUAL, INTENT_RELATIVE_COLORIMETRIC, PixelFormat, flags};
    use crate::Error;

    #[test]
    fn test_pack_unpack_widths() {
        let scratch = pack([1u8, 2, 3, 4]);
        assert_eq!(unpack(&scratch, SampleKind::Byte), PixelBuffer::Bytes([1, 2, 3, 4]));

        let scratch = pack([1000u16, 2, 65535, 4]);
        assert_eq!(
            unpack(&scratch, SampleKind::Word),
            PixelBuffer::Words([1000, 2, 65535, 4])
        );

        let scratch = pack([0.25f64, -1.0, 3.5, 0.0]);
        assert_eq!(
            unpack(&scratch, SampleKind::Double),
            PixelBuffer::Doubles([0.25, -1.0, 3.5, 0.0])
        );
    }

    #[test]
    fn test_unused_scratch_is_zeroed() {
        let scratch = pack([0xFFu8; 4]);
        let bytes: &[u8] = bytemuck::cast_slice(&scratch);
        assert!(bytes[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_identity_white_8bit() {
        let cms = Cms::new();
        let srgb = cms.create_srgb_profile().unwrap();
        let transform = cms
            .build_transform(
                &srgb,
                PixelFormat::Rgba8,
                &srgb,
                PixelFormat::Rgba8,
                INTENT_RELATIVE_COLORIMETRIC as i32,
                0,
            )
            .unwrap();

        let out = cms
            .apply_transform8(&transform, [255, 255, 255, 255], SampleKind::Byte)
            .unwrap();
        match out {
            PixelBuffer::Bytes(v) => assert_eq!(&v[..3], &[255, 255, 255]),
            other => panic!("expected bytes, got {:?}", other),
        }

        let normalized = cms.apply_normalized(&transform, [1.0; 4]).unwrap();
        assert_eq!(&normalized[..3], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_srgb_to_lab_double_output() {
        let cms = Cms::new();
        let srgb = cms.create_srgb_profile().unwrap();
        let lab = cms.create_lab_profile().unwrap();
        let transform = cms
            .build_transform(
                &srgb,
                PixelFormat::Rgba16,
                &lab,
                PixelFormat::LabDouble,
                INTENT_PERCEPTUAL as i32,
                flags::NOTPRECALC,
            )
            .unwrap();

        let white = cms
            .apply_transform16(&transform, [65535, 65535, 65535, 0], SampleKind::Double)
            .unwrap()
            .to_f64_array();
        assert!((white[0] - 100.0).abs() < 0.5, "L* of white was {}", white[0]);
        assert!(white[1].abs() < 0.5);
        assert!(white[2].abs() < 0.5);
    }

    #[test]
    fn test_released_transform_is_rejected() {
        let cms = Cms::new();
        let srgb = cms.create_srgb_profile().unwrap();
        let transform = cms
            .build_transform(&srgb, PixelFormat::Rgba8, &srgb, PixelFormat::Rgba8, 0, 0)
            .unwrap();
        transform.release();

        assert!(matches!(
            cms.apply_transform8(&transform, [0; 4], SampleKind::Byte),
            Err(Error::UseAfterRelease(ResourceKind::Transform))
        ));
    }

    #[test]
    fn test_profile_passed_as_transform() {
        let cms = Cms::new();
        let srgb = cms.create_srgb_profile().unwrap();
        assert!(matches!(
            cms.apply_transform8(&srgb, [0; 4], SampleKind::Byte),
            Err(Error::HandleKindMismatch {
                expected: ResourceKind::Transform,
                actual: ResourceKind::Profile,
            })
        ));
    }
}
