//! # Configuration Tests
//!
//! Tests for configuration defaults, partial JSON documents and file loading.

use pretty_assertions::assert_eq;
use rv32hls_core::common::error::ConfigError;
use rv32hls_core::config::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.general.reset_pc, 0xFFFF_FFFC);
    assert_eq!(config.memory.size_bytes, 64 * 1024);
    assert_eq!(config.isa.m_extension, cfg!(feature = "m-extension"));
    assert_eq!(config.isa.zicsr, cfg!(feature = "zicsr"));
}

#[test]
fn test_reset_pc_precedes_first_fetch() {
    let config = Config::default();
    assert_eq!(
        config.general.reset_pc.wrapping_add(4),
        0,
        "the first fetched PC 0 must continue the stream from the reset PC"
    );
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_section_keeps_other_fields() {
    let config = Config::from_json(r#"{ "isa": { "zicsr": false } }"#).unwrap();
    assert!(!config.isa.zicsr);
    assert_eq!(config.isa.m_extension, IsaConfig::default().m_extension);
    assert_eq!(config.general, GeneralConfig::default());
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = Config::from_json("{ \"general\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn test_wrong_type_is_parse_error() {
    let err = Config::from_json(r#"{ "memory": { "size_bytes": "big" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "general": { "reset_pc": 124 }, "memory": { "size_bytes": 1024 } }"#)
        .unwrap();
    file.flush().unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.general.reset_pc, 124);
    assert_eq!(config.memory.size_bytes, 1024);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
