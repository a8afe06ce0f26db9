//! Shared Control State
//!
//! Process-lifetime state exchanged between interrupt contexts.
//!
//! Every field has exactly one writer, and every value is a whole word
//! stored with a single atomic store, so a reader at any priority sees either
//! the previous or the new value, never a mix. No field is read-modify-write
//! except the diagnostic counters, which are only touched by their owner.
//!
//! | Field | Writer | Readers |
//! |---|---|---|
//! | raw sample | conversion complete | status reporting |
//! | proximity mode | conversion complete | indicator tick, status reporting |
//! | enable state | enable gate | indicator tick, status reporting |

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, AtomicU8, Ordering};

use crate::report::StatusSnapshot;
use crate::types::{EnableState, ProximityMode, RawSample};

/// Shared state of the alert pipeline
///
/// Created once as a `static` and handed by reference to every handler.
pub struct ControlContext {
    /// Latest converter reading
    raw_sample: AtomicU16,
    /// Latest classification
    mode: AtomicU8,
    /// Master enable flag
    enabled: AtomicBool,
    /// Completed conversions since boot
    conversions: AtomicU32,
    /// Enable gate edges since boot
    gate_edges: AtomicU32,
}

impl ControlContext {
    /// Create the initial state: no conversion yet, `Near`, enabled
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw_sample: AtomicU16::new(0),
            mode: AtomicU8::new(ProximityMode::Near.as_u8()),
            enabled: AtomicBool::new(true),
            conversions: AtomicU32::new(0),
            gate_edges: AtomicU32::new(0),
        }
    }

    /// Store a new converter reading. Conversion-complete context only.
    pub fn store_sample(&self, sample: RawSample) {
        self.raw_sample.store(sample.raw(), Ordering::Release);
        let count = self.conversions.load(Ordering::Relaxed);
        self.conversions.store(count.wrapping_add(1), Ordering::Relaxed);
    }

    /// Latest converter reading
    ///
    /// Reads zero before the first conversion completes; callers cannot tell
    /// a stale reading from a fresh one.
    #[must_use]
    pub fn sample(&self) -> RawSample {
        RawSample::from_raw(self.raw_sample.load(Ordering::Acquire))
    }

    /// Publish a new classification. Conversion-complete context only.
    pub fn set_mode(&self, mode: ProximityMode) {
        self.mode.store(mode.as_u8(), Ordering::Release);
    }

    /// Most recent classification
    #[must_use]
    pub fn mode(&self) -> ProximityMode {
        ProximityMode::from_u8(self.mode.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Publish the enable state. Enable gate context only.
    pub fn set_enable_state(&self, state: EnableState) {
        self.enabled.store(state.is_enabled(), Ordering::Release);
    }

    /// Current enable state
    #[must_use]
    pub fn enable_state(&self) -> EnableState {
        EnableState::from_bool(self.enabled.load(Ordering::Acquire))
    }

    /// Check if outputs are allowed to run
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Count an enable gate edge. Enable gate context only.
    pub fn record_gate_edge(&self) {
        let count = self.gate_edges.load(Ordering::Relaxed);
        self.gate_edges.store(count.wrapping_add(1), Ordering::Relaxed);
    }

    /// Completed conversions since boot
    #[must_use]
    pub fn conversions(&self) -> u32 {
        self.conversions.load(Ordering::Relaxed)
    }

    /// Enable gate edges since boot
    #[must_use]
    pub fn gate_edges(&self) -> u32 {
        self.gate_edges.load(Ordering::Relaxed)
    }

    /// Capture the fields the status report needs
    ///
    /// Each field is read atomically on its own; the three together may come
    /// from different moments if a higher-priority handler runs in between.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::new(self.sample(), self.mode(), self.enable_state())
    }
}

impl Default for ControlContext {
    fn default() -> Self {
        Self::new()
    }
}
