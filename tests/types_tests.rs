//! Types Module Tests
//!
//! Tests for domain types (RawSample, ProximityMode, EnableState, etc.)
//! Run with: cargo test --test types_tests

use reverse_alert::types::{EnableState, IndicatorLine, LineLevel, ProximityMode, RawSample};

// =============================================================================
// RawSample Tests
// =============================================================================

#[test]
fn test_raw_sample_in_range() {
    assert_eq!(RawSample::from_raw(0).raw(), 0);
    assert_eq!(RawSample::from_raw(3000).raw(), 3000);
    assert_eq!(RawSample::from_raw(4095).raw(), 4095);
}

#[test]
fn test_raw_sample_clamped() {
    assert_eq!(RawSample::from_raw(4096).raw(), RawSample::MAX);
    assert_eq!(RawSample::from_raw(u16::MAX).raw(), RawSample::MAX);
}

#[test]
fn test_raw_sample_display() {
    assert_eq!(RawSample::from_raw(1500).to_string(), "1500");
    assert_eq!(format!("{:?}", RawSample::from_raw(7)), "RawSample(7)");
}

// =============================================================================
// ProximityMode Tests
// =============================================================================

#[test]
fn test_mode_default_near() {
    assert_eq!(ProximityMode::default(), ProximityMode::Near);
}

#[test]
fn test_mode_encoding() {
    for mode in [ProximityMode::Near, ProximityMode::Far] {
        assert_eq!(ProximityMode::from_u8(mode.as_u8()), Some(mode));
    }
    assert_eq!(ProximityMode::from_u8(2), None);
    assert_eq!(ProximityMode::from_u8(0xFF), None);
}

#[test]
fn test_mode_indicator() {
    assert_eq!(ProximityMode::Near.indicator(), IndicatorLine::Near);
    assert_eq!(ProximityMode::Far.indicator(), IndicatorLine::Far);
}

#[test]
fn test_mode_display() {
    assert_eq!(ProximityMode::Near.to_string(), "NEAR");
    assert_eq!(ProximityMode::Far.to_string(), "FAR");
    assert!(ProximityMode::Near.is_near());
    assert!(!ProximityMode::Far.is_near());
}

// =============================================================================
// EnableState Tests
// =============================================================================

#[test]
fn test_enable_default_enabled() {
    assert_eq!(EnableState::default(), EnableState::Enabled);
    assert!(EnableState::default().is_enabled());
}

#[test]
fn test_enable_toggle_involution() {
    let state = EnableState::Enabled;
    assert_eq!(state.toggle(), EnableState::Disabled);
    assert_eq!(state.toggle().toggle(), state);
}

#[test]
fn test_enable_from_bool() {
    assert_eq!(EnableState::from_bool(true), EnableState::Enabled);
    assert_eq!(EnableState::from_bool(false), EnableState::Disabled);
}

// =============================================================================
// Indicator Types Tests
// =============================================================================

#[test]
fn test_line_level_toggle() {
    assert_eq!(LineLevel::default(), LineLevel::Off);
    assert_eq!(LineLevel::Off.toggle(), LineLevel::On);
    assert!(LineLevel::On.is_on());
    assert!(!LineLevel::On.toggle().is_on());
}

#[test]
fn test_indicator_line_other() {
    assert_eq!(IndicatorLine::Near.other(), IndicatorLine::Far);
    assert_eq!(IndicatorLine::Far.other(), IndicatorLine::Near);
}
