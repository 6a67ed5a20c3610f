//! Transform construction
//!
//! Intents and flags are forwarded to the engine as-is; an intent the
//! engine does not know makes creation fail there, not here.

use crate::cms::Cms;
use crate::engine::{ProofingRequest, TransformRequest};
use crate::format::PixelFormat;
use crate::handle::{ManagedResource, ResourceKind, TransformFormats};
use crate::Result;

impl Cms {
    /// Resolve a format tag under the configured tag policy
    pub fn resolve_format(&self, tag: &str) -> Result<PixelFormat> {
        if self.config().strict_format_tags {
            PixelFormat::try_from_tag(tag)
        } else {
            Ok(PixelFormat::from_tag(tag))
        }
    }

    /// Build a transform from `input` to `output`
    pub fn build_transform(
        &self,
        input: &ManagedResource,
        input_format: PixelFormat,
        output: &ManagedResource,
        output_format: PixelFormat,
        intent: i32,
        flags: u32,
    ) -> Result<ManagedResource> {
        let request = TransformRequest {
            input: self.handle_of(input, ResourceKind::Profile)?,
            input_format: input_format.code(),
            output: self.handle_of(output, ResourceKind::Profile)?,
            output_format: output_format.code(),
            intent: intent as u32,
            flags,
            proofing: None,
        };
        let raw = unsafe { self.engine().create_transform(&request) };
        Ok(self
            .wrap(raw, ResourceKind::Transform, "create transform")?
            .with_formats(TransformFormats {
                input: input_format,
                output: output_format,
            }))
    }

    /// Build a transform from `input` to `output` simulating `proofing`
    #[allow(clippy::too_many_arguments)]
    pub fn build_proofing_transform(
        &self,
        input: &ManagedResource,
        input_format: PixelFormat,
        output: &ManagedResource,
        output_format: PixelFormat,
        proofing: &ManagedResource,
        intent: i32,
        proofing_intent: i32,
        flags: u32,
    ) -> Result<ManagedResource> {
        let request = TransformRequest {
            input: self.handle_of(input, ResourceKind::Profile)?,
            input_format: input_format.code(),
            output: self.handle_of(output, ResourceKind::Profile)?,
            output_format: output_format.code(),
            intent: intent as u32,
            flags,
            proofing: Some(ProofingRequest {
                profile: self.handle_of(proofing, ResourceKind::Profile)?,
                intent: proofing_intent as u32,
            }),
        };
        let raw = unsafe { self.engine().create_transform(&request) };
        Ok(self
            .wrap(raw, ResourceKind::Transform, "create proofing transform")?
            .with_formats(TransformFormats {
                input: input_format,
                output: output_format,
            }))
    }
}
