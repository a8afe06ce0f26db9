//! Waveform Engine Tests
//!
//! Tests for tone patterns, the armed buffer and the engine that rewrites it.
//! Run with: cargo test --test waveform_tests

mod common;

use common::{leak_buffer, MockTone, ToneEvent};
use reverse_alert::config::{DAC_CLOCK_HZ, DAC_MAX_LEVEL, WAVE_FREQUENCY_HZ};
use reverse_alert::output::waveform::{WaveBuffer, WaveformEngine, WaveformPattern};
use reverse_alert::types::ProximityMode;

// =============================================================================
// Pattern Tests
// =============================================================================

#[test]
fn near_and_far_patterns() {
    assert_eq!(WaveformPattern::NEAR.levels(), [1000, 700, 400, 0]);
    assert_eq!(WaveformPattern::FAR.levels(), [800, 800, 800, 800]);
    assert_ne!(WaveformPattern::NEAR, WaveformPattern::FAR);
}

#[test]
fn pattern_for_mode() {
    assert_eq!(WaveformPattern::for_mode(ProximityMode::Near), WaveformPattern::NEAR);
    assert_eq!(WaveformPattern::for_mode(ProximityMode::Far), WaveformPattern::FAR);
}

#[test]
fn pattern_levels_clamped() {
    let pattern = WaveformPattern::from_levels([5000, 4095, 0, u16::MAX]);
    assert_eq!(pattern.levels(), [DAC_MAX_LEVEL, DAC_MAX_LEVEL, 0, DAC_MAX_LEVEL]);
}

// =============================================================================
// Buffer Tests
// =============================================================================

#[test]
fn buffer_holds_initial_pattern() {
    let buffer = WaveBuffer::new(WaveformPattern::FAR);
    assert_eq!(buffer.len(), 4);
    assert!(!buffer.is_empty());
    assert!(buffer.holds(&WaveformPattern::FAR));
    assert_eq!(buffer.level(0), Some(800));
    assert_eq!(buffer.level(4), None);
}

#[test]
fn buffer_load_in_place() {
    let buffer = leak_buffer(WaveformPattern::NEAR);
    let mut tone = MockTone::default();
    WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    buffer.load(&WaveformPattern::FAR);

    // The armed output sees the new levels without being re-armed
    assert!(buffer.holds(&WaveformPattern::FAR));
    assert!(std::ptr::eq(tone.buffer.unwrap(), buffer));
    assert_eq!(tone.output_level(1), Some(800));
    assert_eq!(tone.events, vec![ToneEvent::Arm(tone.interval.unwrap())]);
}

#[test]
fn buffer_debug_lists_levels() {
    let buffer = WaveBuffer::new(WaveformPattern::NEAR);
    let text = format!("{buffer:?}");

    assert!(text.starts_with("WaveBuffer"));
    assert!(text.contains("1000"));
    assert!(text.contains("700"));
}

// =============================================================================
// Engine Tests
// =============================================================================

#[test]
fn arm_binds_buffer_at_tone_rate() {
    let buffer = leak_buffer(WaveformPattern::NEAR);
    let mut tone = MockTone::default();

    let engine = WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    assert_eq!(engine.interval(), 104_166);
    assert_eq!(engine.active(), ProximityMode::Near);
    assert_eq!(engine.updates(), 0);
    assert_eq!(tone.events, [ToneEvent::Arm(104_166)]);
    assert!(std::ptr::eq(tone.buffer.unwrap(), buffer));
}

#[test]
fn arm_normalizes_foreign_contents_to_near() {
    let buffer = leak_buffer(WaveformPattern::from_levels([1, 2, 3, 4]));
    let mut tone = MockTone::default();

    let engine = WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    assert!(buffer.holds(&WaveformPattern::NEAR));
    assert_eq!(engine.active(), ProximityMode::Near);
}

#[test]
fn arm_keeps_far_contents() {
    let buffer = leak_buffer(WaveformPattern::FAR);
    let mut tone = MockTone::default();

    let engine = WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    assert!(buffer.holds(&WaveformPattern::FAR));
    assert_eq!(engine.active(), ProximityMode::Far);
}

#[test]
fn arm_rejects_bad_tone() {
    let buffer = leak_buffer(WaveformPattern::NEAR);
    let mut tone = MockTone::default();

    assert!(WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, 0).is_err());
    assert!(tone.events.is_empty());
}

#[test]
fn update_rewrites_armed_buffer() {
    let buffer = leak_buffer(WaveformPattern::NEAR);
    let mut tone = MockTone::default();
    let mut engine = WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    assert!(engine.update(ProximityMode::Far));
    assert!(buffer.holds(&WaveformPattern::FAR));
    assert!(std::ptr::eq(engine.buffer(), buffer));

    assert!(!engine.update(ProximityMode::Far));
    assert!(engine.update(ProximityMode::Near));
    assert!(buffer.holds(&WaveformPattern::NEAR));
    assert_eq!(engine.updates(), 3);
}

#[test]
fn buffer_only_ever_holds_a_known_pattern() {
    let buffer = leak_buffer(WaveformPattern::NEAR);
    let mut tone = MockTone::default();
    let mut engine = WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    for mode in [ProximityMode::Far, ProximityMode::Near, ProximityMode::Near, ProximityMode::Far] {
        engine.update(mode);
        assert!(buffer.holds(&WaveformPattern::NEAR) || buffer.holds(&WaveformPattern::FAR));
    }
}

#[test]
fn silence_halts_before_zeroing() {
    let mut tone = MockTone::default();

    WaveformEngine::silence(&mut tone);

    assert_eq!(tone.events, [ToneEvent::Halt, ToneEvent::Write(0)]);
    assert_eq!(tone.output_level(0), Some(0));
}

#[test]
fn restart_resumes_playback() {
    let buffer = leak_buffer(WaveformPattern::NEAR);
    let mut tone = MockTone::default();
    WaveformEngine::arm(buffer, &mut tone, DAC_CLOCK_HZ, WAVE_FREQUENCY_HZ).unwrap();

    WaveformEngine::silence(&mut tone);
    WaveformEngine::restart(&mut tone);

    assert!(!tone.halted);
    assert_eq!(tone.output_level(0), Some(1000));
}
