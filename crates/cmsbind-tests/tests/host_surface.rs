//! Dynamic host calls end to end

use anyhow::Result;
use cmsbind_core::host::METHODS;
use cmsbind_core::{Error, Host, HostValue, INTENT_PERCEPTUAL, flags};
use cmsbind_tests::Fixtures;

fn s(v: &str) -> HostValue {
    HostValue::Str(v.to_owned())
}

fn i(v: i64) -> HostValue {
    HostValue::Int(v)
}

fn channels(value: &HostValue) -> Vec<f64> {
    value
        .as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(HostValue::as_float)
        .collect()
}

#[test]
fn test_method_table() {
    let host = Host::default();
    assert_eq!(host.methods().len(), 14);
    assert_eq!(host.methods(), METHODS);
}

#[test]
fn test_open_profile_from_fixture() -> Result<()> {
    let fixtures = Fixtures::new()?;
    let path = fixtures.srgb()?;
    let host = Host::default();

    let profile = host.call("openProfile", &[s(path.to_str().unwrap())])?;
    assert!(profile.as_resource().is_some());

    let name = host.call("getProfileName", &[profile])?;
    assert!(name.as_str().is_some_and(|n| !n.is_empty()));
    Ok(())
}

#[test]
fn test_open_profile_failures() {
    let host = Host::default();
    assert!(matches!(
        host.call("openProfile", &[s("/nonexistent/dir/xxx.icm")]),
        Err(Error::EngineResourceFailure(_))
    ));
    assert!(matches!(
        host.call("openProfile", &[]),
        Err(Error::InvalidArguments(_))
    ));
    assert!(matches!(
        host.call("openProfile", &[HostValue::None]),
        Err(Error::InvalidArguments(_))
    ));
}

#[test]
fn test_rgb_to_lab_pixel() -> Result<()> {
    let host = Host::default();
    let srgb = host.call("createRGBProfile", &[])?;
    let lab = host.call("createLabProfile", &[])?;
    let transform = host.call(
        "buildTransform",
        &[
            srgb,
            s("RGB"),
            lab,
            s("LAB;float"),
            i(INTENT_PERCEPTUAL.into()),
            i(flags::NOTPRECALC.into()),
        ],
    )?;

    let white = host.call(
        "transformPixel",
        &[transform.clone(), i(255), i(255), i(255), i(0), i(2)],
    )?;
    let white = channels(&white);
    assert!((white[0] - 100.0).abs() < 0.5, "{:?}", white);

    let black = host.call("transformPixel", &[transform, i(0), i(0), i(0), i(0), i(2)])?;
    let black = channels(&black);
    assert!(black[0].abs() < 0.5, "{:?}", black);
    Ok(())
}

#[test]
fn test_lab_doubles_in() -> Result<()> {
    let host = Host::default();
    let lab = host.call("createLabProfile", &[])?;
    let srgb = host.call("createRGBProfile", &[])?;
    let transform = host.call(
        "buildTransform",
        &[lab, s("LAB;float"), srgb, s("RGB"), i(0), i(0)],
    )?;

    let out = host.call(
        "transformPixelDbl",
        &[
            transform,
            HostValue::Float(100.0),
            HostValue::Float(0.0),
            HostValue::Float(0.0),
            HostValue::Float(0.0),
            i(0),
        ],
    )?;
    let out = out.as_list().unwrap_or_default();
    assert!(out.iter().all(|v| v.as_int().is_some()));
    assert!(out[..3].iter().all(|v| v.as_int() >= Some(250)), "{:?}", out);
    Ok(())
}

#[test]
fn test_word_pixels() -> Result<()> {
    let host = Host::default();
    let srgb = host.call("createRGBProfile", &[])?;
    let transform = host.call(
        "buildTransform",
        &[srgb.clone(), s("RGBA;16"), srgb, s("RGBA;16"), i(1), i(0)],
    )?;
    let out = host.call(
        "transformPixel16b",
        &[transform, i(65535), i(65535), i(65535), i(0), i(1)],
    )?;
    let out = channels(&out);
    assert!(out[..3].iter().all(|&c| c >= 65500.0), "{:?}", out);
    Ok(())
}

#[test]
fn test_info_fields() -> Result<()> {
    let host = Host::default();
    let srgb = host.call("createRGBProfile", &[])?;
    for method in ["getProfileName", "getProfileInfo", "getProfileInfoCopyright"] {
        let text = host.call(method, &[srgb.clone()])?;
        assert!(text.as_str().is_some(), "{} returned {:?}", method, text);
    }

    let transform = host.call(
        "buildTransform",
        &[srgb.clone(), s("RGB"), srgb, s("RGB"), i(0), i(0)],
    )?;
    assert!(matches!(
        host.call("getProfileName", &[transform]),
        Err(Error::HandleKindMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_pixel_argument_validation() -> Result<()> {
    let host = Host::default();
    let srgb = host.call("createRGBProfile", &[])?;
    let transform = host.call(
        "buildTransform",
        &[srgb.clone(), s("RGB"), srgb.clone(), s("RGB"), i(0), i(0)],
    )?;

    // Too few channels
    assert!(host
        .call("transformPixel", &[transform.clone(), i(1), i(2), i(3), i(0)])
        .is_err());
    // Float where the byte entry point wants an integer
    assert!(host
        .call(
            "transformPixel",
            &[transform.clone(), HostValue::Float(1.0), i(2), i(3), i(4), i(0)],
        )
        .is_err());
    // A profile is not a transform
    assert!(matches!(
        host.call("transformPixel", &[srgb, i(1), i(2), i(3), i(4), i(0)]),
        Err(Error::HandleKindMismatch { .. })
    ));
    Ok(())
}
