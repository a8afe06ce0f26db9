//! Waveform Engine
//!
//! Streams a short table of levels to the analog output over and over to
//! produce the alert tone. Once armed, the hardware reads the table on its
//! own; the CPU only touches it to switch between the near and far tones.
//!
//! The playback engine is bound to the buffer's address when it is armed, so
//! switching tones rewrites the armed buffer element by element. It is never
//! swapped for another buffer.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::{
    refresh_interval, ConfigError, DAC_MAX_LEVEL, DAC_ZERO_LEVEL, FAR_WAVE_LEVELS,
    NEAR_WAVE_LEVELS, WAVE_LEN,
};
use crate::ports::WaveformOutput;
use crate::types::ProximityMode;

// `WaveBuffer::new` spells out one atomic per level
const _: () = assert!(WAVE_LEN == 4);

/// One period of the alert tone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformPattern([u16; WAVE_LEN]);

impl WaveformPattern {
    /// Tone played while an obstacle is near
    pub const NEAR: Self = Self::from_levels(NEAR_WAVE_LEVELS);

    /// Tone played while nothing is near
    pub const FAR: Self = Self::from_levels(FAR_WAVE_LEVELS);

    /// Build a pattern, clamping each level to the output range
    #[must_use]
    pub const fn from_levels(levels: [u16; WAVE_LEN]) -> Self {
        let mut clamped = levels;
        let mut i = 0;
        while i < WAVE_LEN {
            if clamped[i] > DAC_MAX_LEVEL {
                clamped[i] = DAC_MAX_LEVEL;
            }
            i += 1;
        }
        Self(clamped)
    }

    /// Pattern for a proximity mode
    #[must_use]
    pub const fn for_mode(mode: ProximityMode) -> Self {
        match mode {
            ProximityMode::Near => Self::NEAR,
            ProximityMode::Far => Self::FAR,
        }
    }

    /// The levels in playback order
    #[must_use]
    pub const fn levels(&self) -> [u16; WAVE_LEN] {
        self.0
    }
}

/// Buffer the playback hardware reads from
///
/// Lives in a `static` so its address never changes. Each element is an
/// atomic half-word: the playback engine can observe a stale element while
/// an update is in progress, but never half of one.
#[derive(Debug)]
pub struct WaveBuffer {
    levels: [AtomicU16; WAVE_LEN],
}

impl WaveBuffer {
    /// Create a buffer holding `initial`
    #[must_use]
    pub const fn new(initial: WaveformPattern) -> Self {
        let l = initial.0;
        Self {
            levels: [
                AtomicU16::new(l[0]),
                AtomicU16::new(l[1]),
                AtomicU16::new(l[2]),
                AtomicU16::new(l[3]),
            ],
        }
    }

    /// Number of levels
    #[must_use]
    pub const fn len(&self) -> usize {
        WAVE_LEN
    }

    /// Always false; the buffer has a fixed non-zero length
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Level at `index` as the playback engine would read it
    #[must_use]
    pub fn level(&self, index: usize) -> Option<u16> {
        self.levels.get(index).map(|l| l.load(Ordering::Relaxed))
    }

    /// Copy of all levels
    #[must_use]
    pub fn levels(&self) -> [u16; WAVE_LEN] {
        let mut out = [0; WAVE_LEN];
        for (dst, src) in out.iter_mut().zip(self.levels.iter()) {
            *dst = src.load(Ordering::Relaxed);
        }
        out
    }

    /// Check if the buffer currently holds exactly `pattern`
    #[must_use]
    pub fn holds(&self, pattern: &WaveformPattern) -> bool {
        self.levels() == pattern.levels()
    }

    /// Overwrite the buffer in place with `pattern`
    ///
    /// Element stores happen in playback order. Unchanged elements are
    /// rewritten too; the cost is four stores.
    pub fn load(&self, pattern: &WaveformPattern) {
        for (slot, level) in self.levels.iter().zip(pattern.0.iter()) {
            slot.store(*level, Ordering::Relaxed);
        }
    }
}

/// Owner of the armed tone buffer
///
/// Only the indicator tick writes through the engine, so the buffer has a
/// single writer and the playback hardware as its only reader.
pub struct WaveformEngine {
    buffer: &'static WaveBuffer,
    interval: u32,
    active: ProximityMode,
    updates: u32,
}

impl WaveformEngine {
    /// Arm playback of `buffer` on `output` at the rate that yields `tone_hz`
    ///
    /// # Errors
    ///
    /// Returns an error if the tone cannot be produced from `clock_hz`.
    pub fn arm<O: WaveformOutput>(
        buffer: &'static WaveBuffer,
        output: &mut O,
        clock_hz: u32,
        tone_hz: u32,
    ) -> Result<Self, ConfigError> {
        let interval = refresh_interval(clock_hz, tone_hz, buffer.len())?;
        let active = if buffer.holds(&WaveformPattern::FAR) {
            ProximityMode::Far
        } else {
            buffer.load(&WaveformPattern::NEAR);
            ProximityMode::Near
        };

        output.arm(buffer, interval);
        info!("tone armed: {} Hz, {} clocks per level", tone_hz, interval);

        Ok(Self {
            buffer,
            interval,
            active,
            updates: 0,
        })
    }

    /// Load the pattern for `mode` into the armed buffer
    ///
    /// Returns true if the pattern changed. Callers log the change; this
    /// runs under the indicator lock.
    pub fn update(&mut self, mode: ProximityMode) -> bool {
        let pattern = WaveformPattern::for_mode(mode);
        self.buffer.load(&pattern);
        self.updates = self.updates.wrapping_add(1);

        let changed = mode != self.active;
        self.active = mode;
        changed
    }

    /// Stop playback and force the output to zero
    ///
    /// Playback is halted first so the next refresh cannot overwrite the
    /// zero level.
    pub fn silence<O: WaveformOutput>(output: &mut O) {
        output.halt();
        output.write_level(DAC_ZERO_LEVEL);
    }

    /// Restart playback of the armed buffer
    pub fn restart<O: WaveformOutput>(output: &mut O) {
        output.resume();
    }

    /// Mode whose pattern is in the buffer
    #[must_use]
    pub const fn active(&self) -> ProximityMode {
        self.active
    }

    /// Output clock ticks per level
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Buffer updates applied since arming
    #[must_use]
    pub const fn updates(&self) -> u32 {
        self.updates
    }

    /// The armed buffer
    #[must_use]
    pub const fn buffer(&self) -> &'static WaveBuffer {
        self.buffer
    }
}
