//! Loading validator defaults from TOML files.

#![cfg(feature = "serde")]

use std::io::Write;

use formatcheck::{validate, Error, Format, ValidatorConfig};

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "allowed_formats = [\"svg\", \"png\"]").unwrap();
    writeln!(file, "max_file_size = 2048").unwrap();
    writeln!(file, "enable_security_checks = false").unwrap();

    let config = ValidatorConfig::load(file.path()).unwrap();
    assert!(config.allowed_formats.contains(Format::Svg));
    assert!(!config.allowed_formats.contains(Format::Pdf));
    assert_eq!(config.max_file_size, 2048);

    let options = config.to_options();
    let svg = b"<svg onload=\"go()\"></svg>";
    assert!(validate(svg, &options).is_valid);

    let big_svg = format!("<svg>{}</svg>", " ".repeat(4096));
    assert!(!validate(big_svg.as_bytes(), &options).is_valid);
}

#[test]
fn defaults_keep_security_checks() {
    let options = ValidatorConfig::default().to_options();
    let svg = b"<svg onload=\"go()\"></svg>";
    assert!(!validate(svg, &options).is_valid);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ValidatorConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn empty_allow_list_rejected() {
    let err = ValidatorConfig::from_toml_str("allowed_formats = []").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
