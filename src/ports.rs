//! Collaborator interfaces
//!
//! The control core never touches a peripheral directly. It talks to the
//! hardware through these traits, which the `hal` module implements for the
//! target and the test suite implements with mocks.
//!
//! Indicator lines use [`embedded_hal::digital::OutputPin`] and the serial
//! link uses [`embedded_io::Write`]; only the pieces with no standard trait
//! are defined here.

use crate::output::waveform::WaveBuffer;
use crate::types::RawSample;

/// Starts an analog conversion
///
/// Called from the sample-trigger handler. Must return immediately; the
/// result arrives later through the conversion-complete handler.
pub trait ConversionTrigger {
    /// Request one conversion of the distance sensor
    fn trigger_conversion(&mut self);
}

/// Result side of the analog converter
pub trait AnalogInput {
    /// Read the value of the most recent completed conversion
    fn read_last_conversion(&mut self) -> RawSample;

    /// Stop further conversion-complete signals
    fn mask_completion(&mut self);

    /// Allow conversion-complete signals again
    fn unmask_completion(&mut self);
}

/// Autonomous waveform output (DAC fed from a circular buffer)
pub trait WaveformOutput {
    /// Bind playback to `buffer` and start streaming one level every
    /// `interval` output-clock ticks. The buffer stays bound for the life
    /// of the program; it is never re-armed.
    fn arm(&mut self, buffer: &'static WaveBuffer, interval: u32);

    /// Write a level straight to the output, bypassing the buffer
    fn write_level(&mut self, level: u16);

    /// Stop streaming; the output keeps its last written level
    fn halt(&mut self);

    /// Resume streaming from the bound buffer
    fn resume(&mut self);
}

/// Edge-triggered external signal
pub trait EdgeSignal {
    /// Clear the pending edge condition
    fn acknowledge(&mut self);
}

/// Switch for the periodic indicator tick
pub trait TickControl {
    /// Deliver tick events again
    fn enable_tick(&mut self);

    /// Withhold tick events
    fn disable_tick(&mut self);
}
