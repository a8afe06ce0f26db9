//! Host-side mocks for the collaborator traits
//!
//! Each mock records what the handlers asked of it so tests can assert on
//! the hardware-visible effects.

#![allow(dead_code)]

use core::convert::Infallible;

use reverse_alert::config::{DAC_CLOCK_HZ, FAR_HOLD_TICKS, NEAR_HOLD_TICKS, WAVE_FREQUENCY_HZ};
use reverse_alert::output::indicator::{BlinkChannel, IndicatorMachine};
use reverse_alert::output::waveform::{WaveBuffer, WaveformEngine, WaveformPattern};
use reverse_alert::ports::{AnalogInput, ConversionTrigger, EdgeSignal, TickControl, WaveformOutput};
use reverse_alert::types::RawSample;

// =============================================================================
// Indicator Pins
// =============================================================================

/// Output pin that remembers its level
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub writes: u32,
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

// =============================================================================
// Analog Converter
// =============================================================================

/// Converter returning a preset value
#[derive(Debug, Default)]
pub struct MockAdc {
    pub value: u16,
    pub reads: u32,
    pub masked: bool,
    /// Mask state seen at each read
    pub masked_during_read: Vec<bool>,
    pub unmasks: u32,
}

impl MockAdc {
    pub fn with_value(value: u16) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }
}

impl AnalogInput for MockAdc {
    fn read_last_conversion(&mut self) -> RawSample {
        self.reads += 1;
        self.masked_during_read.push(self.masked);
        RawSample::from_raw(self.value)
    }

    fn mask_completion(&mut self) {
        self.masked = true;
    }

    fn unmask_completion(&mut self) {
        self.masked = false;
        self.unmasks += 1;
    }
}

/// Trigger that counts requests
#[derive(Debug, Default)]
pub struct MockTrigger {
    pub requests: u32,
}

impl ConversionTrigger for MockTrigger {
    fn trigger_conversion(&mut self) {
        self.requests += 1;
    }
}

/// Converter whose request line latches like a pending interrupt
///
/// Requests set one flag, so any number of them raised before the flag is
/// taken are served by a single conversion.
#[derive(Debug, Default)]
pub struct LatchedConverter {
    pub value: u16,
    pub pending: bool,
    pub requests: u32,
    pub reads: u32,
    /// Requests raised from inside the next read
    pub raise_during_read: u32,
}

impl LatchedConverter {
    /// Take the latched request, as the conversion task does before running
    pub fn take_pending(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }
}

impl ConversionTrigger for LatchedConverter {
    fn trigger_conversion(&mut self) {
        self.requests += 1;
        self.pending = true;
    }
}

impl AnalogInput for LatchedConverter {
    fn read_last_conversion(&mut self) -> RawSample {
        self.reads += 1;
        for _ in 0..core::mem::take(&mut self.raise_during_read) {
            self.trigger_conversion();
        }
        RawSample::from_raw(self.value)
    }

    fn mask_completion(&mut self) {}

    fn unmask_completion(&mut self) {}
}

// =============================================================================
// Tone Output
// =============================================================================

/// Calls made on the tone output, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneEvent {
    Arm(u32),
    Write(u16),
    Halt,
    Resume,
}

/// Tone output that records its calls
#[derive(Debug, Default)]
pub struct MockTone {
    pub buffer: Option<&'static WaveBuffer>,
    pub interval: Option<u32>,
    pub halted: bool,
    pub level: Option<u16>,
    pub events: Vec<ToneEvent>,
}

impl MockTone {
    /// Level the output would present right now
    pub fn output_level(&self, index: usize) -> Option<u16> {
        if self.halted {
            self.level
        } else {
            self.buffer.and_then(|b| b.level(index))
        }
    }
}

impl WaveformOutput for MockTone {
    fn arm(&mut self, buffer: &'static WaveBuffer, interval: u32) {
        self.buffer = Some(buffer);
        self.interval = Some(interval);
        self.events.push(ToneEvent::Arm(interval));
    }

    fn write_level(&mut self, level: u16) {
        self.level = Some(level);
        self.events.push(ToneEvent::Write(level));
    }

    fn halt(&mut self) {
        self.halted = true;
        self.events.push(ToneEvent::Halt);
    }

    fn resume(&mut self) {
        self.halted = false;
        self.events.push(ToneEvent::Resume);
    }
}

// =============================================================================
// Enable Gate Collaborators
// =============================================================================

/// Edge input that counts acknowledgements
#[derive(Debug, Default)]
pub struct MockSignal {
    pub acks: u32,
}

impl EdgeSignal for MockSignal {
    fn acknowledge(&mut self) {
        self.acks += 1;
    }
}

/// Tick switch that remembers whether ticks are delivered
#[derive(Debug)]
pub struct MockTick {
    pub enabled: bool,
    pub enables: u32,
    pub disables: u32,
}

impl Default for MockTick {
    fn default() -> Self {
        Self {
            enabled: true,
            enables: 0,
            disables: 0,
        }
    }
}

impl TickControl for MockTick {
    fn enable_tick(&mut self) {
        self.enabled = true;
        self.enables += 1;
    }

    fn disable_tick(&mut self) {
        self.enabled = false;
        self.disables += 1;
    }
}

// =============================================================================
// Serial Link
// =============================================================================

/// Serial sink collecting bytes, optionally failing every write
#[derive(Debug, Default)]
pub struct MockSerial {
    pub bytes: Vec<u8>,
    pub fail: bool,
}

impl MockSerial {
    pub fn failing() -> Self {
        Self {
            bytes: Vec::new(),
            fail: true,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail {
            return Err(embedded_io::ErrorKind::Other);
        }
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// Builders
// =============================================================================

/// A fresh tone buffer with a static lifetime, as the firmware's would have
pub fn leak_buffer(initial: WaveformPattern) -> &'static WaveBuffer {
    Box::leak(Box::new(WaveBuffer::new(initial)))
}

/// Indicator machine with the default holds, plus the tone output its
/// engine was armed on
pub fn indicator_machine() -> (IndicatorMachine<MockPin>, MockTone) {
    let mut tone = MockTone::default();
    let engine = WaveformEngine::arm(
        leak_buffer(WaveformPattern::NEAR),
        &mut tone,
        DAC_CLOCK_HZ,
        WAVE_FREQUENCY_HZ,
    )
    .expect("default tone arms");
    let near = BlinkChannel::new(NEAR_HOLD_TICKS).expect("non-zero hold");
    let far = BlinkChannel::new(FAR_HOLD_TICKS).expect("non-zero hold");
    let machine = IndicatorMachine::new(MockPin::default(), MockPin::default(), near, far, engine)
        .expect("mock pins never fail");
    (machine, tone)
}
