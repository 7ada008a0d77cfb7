//! Configuration Tests.

use crate::common::builder::instruction::NOP;
use crate::common::harness::{PROGRAM_BASE, TestContext};
use i860_core::Config;
use i860_core::common::{ConfigError, RESET_VECTOR};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn empty_document_matches_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.start_pc, None);
    assert_eq!(config.interrupts.poll_interval, 1);
}

#[test]
fn full_document() {
    let json = r#"{
        "general": { "trace_instructions": true, "start_pc": 4096 },
        "interrupts": { "poll_interval": 16 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.start_pc, Some(0x1000));
    assert_eq!(config.interrupts.poll_interval, 16);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = Config::from_json(r#"{"interrupts": {}}"#).unwrap();
    assert_eq!(config.interrupts.poll_interval, 1);
}

#[rstest]
#[case::unknown_section(r#"{"cache": {}}"#)]
#[case::unknown_field(r#"{"general": {"speed": 3}}"#)]
#[case::wrong_type(r#"{"interrupts": {"poll_interval": "often"}}"#)]
#[case::not_json("general = 1")]
fn malformed_documents_are_parse_errors(#[case] json: &str) {
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn misaligned_start_pc_is_rejected() {
    let err = Config::from_json(r#"{"general": {"start_pc": 4098}}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid value for `general.start_pc`: 0x00001002 is not word aligned"
    );
}

#[test]
fn core_starts_at_reset_vector_without_start_pc() {
    let ctx = TestContext::with_config(&Config::default());
    assert_eq!(ctx.cpu.pc, RESET_VECTOR);
}

#[test]
fn reset_returns_to_configured_start() {
    let mut ctx = TestContext::new().program(&[NOP, NOP]);
    ctx.step_n(2);
    ctx.cpu.reset();
    assert_eq!(ctx.cpu.pc, PROGRAM_BASE);
}
