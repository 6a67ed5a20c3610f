//! Format tag resolution

use cmsbind_core::{Cms, Config, Error, Host, HostValue, LittleCms, PixelFormat, SampleKind};
use std::sync::Arc;

#[test]
fn test_rgb_aliases_resolve_to_one_code() {
    let codes: Vec<u32> = ["RGB", "RGBA", "RGBX"]
        .iter()
        .map(|tag| PixelFormat::from_tag(tag).code())
        .collect();
    assert!(codes.iter().all(|&c| c == codes[0]));
    assert_eq!(PixelFormat::from_tag("RGB"), PixelFormat::Rgba8);
}

#[test]
fn test_unknown_tags_fall_back_to_gray8() {
    for tag in ["FOO", "rgb", "RGB;16", "lab;float", " RGB", ""] {
        assert_eq!(PixelFormat::from_tag(tag), PixelFormat::Gray8, "tag {:?}", tag);
    }
}

#[test]
fn test_tag_widths() {
    let expected = [
        ("RGBA;16", SampleKind::Word),
        ("CMYK", SampleKind::Byte),
        ("CMYK;16", SampleKind::Word),
        ("L", SampleKind::Byte),
        ("L;16", SampleKind::Word),
        ("LAB", SampleKind::Byte),
        ("LAB;float", SampleKind::Double),
        ("XYZ;float", SampleKind::Double),
    ];
    for (tag, kind) in expected {
        assert_eq!(PixelFormat::from_tag(tag).sample_kind(), kind, "tag {}", tag);
    }
}

#[test]
fn test_unknown_tag_still_builds_transform() {
    // Gray8 output from an sRGB input is a valid engine combination.
    let host = Host::default();
    let srgb = host.call("createRGBProfile", &[]).unwrap();
    let gray = host.call("createGrayProfile", &[]).unwrap();
    let transform = host.call(
        "buildTransform",
        &[
            srgb,
            HostValue::Str("RGB".into()),
            gray,
            HostValue::Str("NOT-A-TAG".into()),
            HostValue::Int(0),
            HostValue::Int(0),
        ],
    );
    let transform = transform.unwrap();
    let formats = transform.as_resource().unwrap().formats().unwrap();
    assert_eq!(formats.output, PixelFormat::Gray8);
}

#[test]
fn test_strict_config_rejects_unknown_tags() {
    let config = Config::from_json_str(r#"{ "strict_format_tags": true }"#).unwrap();
    let cms = Cms::with_engine(Arc::new(LittleCms), config).unwrap();

    assert!(matches!(
        cms.resolve_format("FOO"),
        Err(Error::InvalidArguments(_))
    ));
    assert_eq!(cms.resolve_format("RGBX").unwrap(), PixelFormat::Rgba8);
}
