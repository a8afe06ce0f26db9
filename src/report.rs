//! Status Reporting
//!
//! Diagnostic text lines sent over the serial link. A fixed table of four
//! report operations is walked in order, one line per step, wrapping back to
//! the first. Each step invokes the operation on a snapshot of the shared
//! state and then transmits the line it produced.
//!
//! Line formats (each terminated by `\n`):
//!
//! ```text
//! ADC: 3000
//! Reverse mode: Disabled
//! Switch: Enable
//! System: Moving forward
//! ```

use core::fmt::{self, Write as _};

use heapless::String;

use crate::config::STATUS_LINE_CAPACITY;
use crate::types::{EnableState, ProximityMode, RawSample};

/// One formatted status line
pub type StatusLine = String<STATUS_LINE_CAPACITY>;

/// A report operation: render one line from a snapshot
pub type StatusOperation = fn(&StatusSnapshot) -> Result<StatusLine, fmt::Error>;

/// Number of report operations in the rotation
pub const STATUS_OPERATION_COUNT: usize = 4;

/// The report operations, in rotation order
pub const STATUS_OPERATIONS: [StatusOperation; STATUS_OPERATION_COUNT] = [
    format_sample,
    format_reverse_mode,
    format_switch,
    format_system,
];

/// Values a status line is rendered from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Latest converter reading
    pub sample: RawSample,
    /// Latest classification
    pub mode: ProximityMode,
    /// Master enable state
    pub enable: EnableState,
}

impl StatusSnapshot {
    /// Create a snapshot
    #[must_use]
    pub const fn new(sample: RawSample, mode: ProximityMode, enable: EnableState) -> Self {
        Self {
            sample,
            mode,
            enable,
        }
    }
}

/// `ADC: <sample>`
///
/// # Errors
///
/// Returns an error if the line does not fit.
pub fn format_sample(snapshot: &StatusSnapshot) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    writeln!(line, "ADC: {}", snapshot.sample.raw())?;
    Ok(line)
}

/// `Reverse mode: Enable|Disabled`
///
/// # Errors
///
/// Returns an error if the line does not fit.
pub fn format_reverse_mode(snapshot: &StatusSnapshot) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    let text = if snapshot.mode.is_near() { "Enable" } else { "Disabled" };
    writeln!(line, "Reverse mode: {text}")?;
    Ok(line)
}

/// `Switch: Enable|Disabled`
///
/// # Errors
///
/// Returns an error if the line does not fit.
pub fn format_switch(snapshot: &StatusSnapshot) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    let text = if snapshot.enable.is_enabled() { "Enable" } else { "Disabled" };
    writeln!(line, "Switch: {text}")?;
    Ok(line)
}

/// `System: Reverse|Moving forward`
///
/// # Errors
///
/// Returns an error if the line does not fit.
pub fn format_system(snapshot: &StatusSnapshot) -> Result<StatusLine, fmt::Error> {
    let mut line = StatusLine::new();
    let text = if snapshot.mode.is_near() { "Reverse" } else { "Moving forward" };
    writeln!(line, "System: {text}")?;
    Ok(line)
}

/// Status reporting error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportError<E> {
    /// Line did not fit its buffer
    Format,
    /// Serial link rejected the bytes
    Transmit(E),
}

impl<E: fmt::Debug> fmt::Display for ReportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => f.write_str("status line overflow"),
            Self::Transmit(e) => write!(f, "serial transmit failed: {e:?}"),
        }
    }
}

#[cfg(feature = "embedded")]
impl<E> defmt::Format for ReportError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Format => defmt::write!(f, "Format"),
            Self::Transmit(_) => defmt::write!(f, "Transmit"),
        }
    }
}

/// Walks the operation table, one line per step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusRotation {
    /// Next operation to invoke
    next: usize,
    /// Lines sent successfully
    sent: u32,
}

impl StatusRotation {
    /// Start at the first operation
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0, sent: 0 }
    }

    /// Index of the operation the next step invokes
    #[must_use]
    pub const fn position(&self) -> usize {
        self.next
    }

    /// Lines sent successfully
    #[must_use]
    pub const fn sent(&self) -> u32 {
        self.sent
    }

    /// Invoke the current operation and transmit its line
    ///
    /// The rotation advances whether or not the step succeeds, so a failed
    /// line is never retried with stale data.
    ///
    /// # Errors
    ///
    /// Returns an error if the line overflows or the serial write fails.
    pub fn step<W: embedded_io::Write>(
        &mut self,
        snapshot: &StatusSnapshot,
        tx: &mut W,
    ) -> Result<usize, ReportError<W::Error>> {
        let operation = STATUS_OPERATIONS[self.next];
        self.next = (self.next + 1) % STATUS_OPERATION_COUNT;

        let line = operation(snapshot).map_err(|_| ReportError::Format)?;
        tx.write_all(line.as_bytes()).map_err(ReportError::Transmit)?;

        self.sent = self.sent.wrapping_add(1);
        Ok(line.len())
    }

    /// Run a full rotation from the current position
    ///
    /// Stops at the first failing step.
    ///
    /// # Errors
    ///
    /// Returns the first step error.
    pub fn run_cycle<W: embedded_io::Write>(
        &mut self,
        snapshot: &StatusSnapshot,
        tx: &mut W,
    ) -> Result<usize, ReportError<W::Error>> {
        let mut total = 0;
        for _ in 0..STATUS_OPERATION_COUNT {
            total += self.step(snapshot, tx)?;
        }
        Ok(total)
    }
}

impl Default for StatusRotation {
    fn default() -> Self {
        Self::new()
    }
}
