//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the alert hardware.
//! Thresholds, periods, waveform tables, interrupt priorities and pin
//! mappings are centralized here. Nothing here is adjustable at runtime.

use core::fmt;

/// Converter reading below which an obstacle counts as near
pub const PROXIMITY_THRESHOLD: u16 = 2048;

/// Period of the sample-trigger timer in milliseconds
pub const SAMPLE_PERIOD_MS: u32 = 1_000;

/// Period of the indicator tick in milliseconds
pub const TICK_PERIOD_MS: u32 = 50;

/// Ticks each half-period of the near indicator lasts
pub const NEAR_HOLD_TICKS: u16 = 10;

/// Ticks each half-period of the far indicator lasts
pub const FAR_HOLD_TICKS: u16 = 10;

/// Reload value of the auxiliary toggle counter
pub const TOGGLE_COUNTER_MAX: u8 = 1;

/// Number of levels in one period of the alert tone
pub const WAVE_LEN: usize = 4;

/// Tone levels played while an obstacle is near (falling ramp)
pub const NEAR_WAVE_LEVELS: [u16; WAVE_LEN] = [1000, 700, 400, 0];

/// Tone levels played while nothing is near (flat)
pub const FAR_WAVE_LEVELS: [u16; WAVE_LEN] = [800, 800, 800, 800];

/// Highest level the 12-bit analog output accepts
pub const DAC_MAX_LEVEL: u16 = 4095;

/// Analog output level forced while the system is disabled
pub const DAC_ZERO_LEVEL: u16 = 0;

/// Clock feeding the analog output update counter
pub const DAC_CLOCK_HZ: u32 = 25_000_000;

/// Target frequency of the alert tone
pub const WAVE_FREQUENCY_HZ: u32 = 60;

/// Serial link speed for status reports
pub const STATUS_BAUD_RATE: u32 = 9_600;

/// Delay between consecutive status lines in milliseconds
pub const STATUS_PERIOD_MS: u32 = 250;

/// Capacity of one formatted status line in bytes
pub const STATUS_LINE_CAPACITY: usize = 32;

/// Configuration error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Tone frequency of zero
    ZeroFrequency,
    /// Waveform with no levels
    EmptyWaveform,
    /// Requested tone is too fast for the output clock
    IntervalTooShort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrequency => f.write_str("tone frequency is zero"),
            Self::EmptyWaveform => f.write_str("waveform has no levels"),
            Self::IntervalTooShort => f.write_str("tone too fast for output clock"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ZeroFrequency => defmt::write!(f, "ZeroFrequency"),
            Self::EmptyWaveform => defmt::write!(f, "EmptyWaveform"),
            Self::IntervalTooShort => defmt::write!(f, "IntervalTooShort"),
        }
    }
}

/// Output clock ticks between two consecutive waveform levels
///
/// `clock_hz / (tone_hz * levels)`, so one pass over the table lasts one
/// period of the tone.
///
/// # Errors
///
/// Returns an error if the frequency or length is zero, or if the tone is so
/// fast that the interval truncates to zero.
pub const fn refresh_interval(clock_hz: u32, tone_hz: u32, levels: usize) -> Result<u32, ConfigError> {
    if tone_hz == 0 {
        return Err(ConfigError::ZeroFrequency);
    }
    if levels == 0 {
        return Err(ConfigError::EmptyWaveform);
    }
    let per_period = tone_hz as u64 * levels as u64;
    let interval = clock_hz as u64 / per_period;
    if interval == 0 {
        return Err(ConfigError::IntervalTooShort);
    }
    Ok(interval as u32)
}

/// Time between two waveform levels in microseconds
///
/// Used by hardware layers that pace playback from a timer rather than the
/// output clock.
#[must_use]
pub const fn refresh_period_us(interval: u32, clock_hz: u32) -> u32 {
    if clock_hz == 0 {
        return 0;
    }
    ((interval as u64 * 1_000_000) / clock_hz as u64) as u32
}

/// Interrupt priority ladder
pub mod priorities {
    //! Priority of each interrupt context, highest first.
    //!
    //! Values follow the Cortex-M NVIC convention: a lower number preempts
    //! a higher one. Shared state is only safe because of this order.

    /// Enable gate edge (and tone playback pacing)
    pub const ENABLE_GATE: u8 = 1;

    /// Sample-trigger timer
    pub const SAMPLE_TRIGGER: u8 = 2;

    /// Conversion complete (sampling and classification)
    pub const CONVERSION: u8 = 3;

    /// Indicator tick
    pub const INDICATOR_TICK: u8 = 4;
}

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Enable switch input (rising edge, pull-down)
    pub const ENABLE_SWITCH: &str = "PC13";

    /// Distance sensor analog input
    pub const DISTANCE_SENSOR: &str = "PA0";

    /// Near indicator (green lamp)
    pub const NEAR_LED: &str = "PB4";

    /// Far indicator (red lamp)
    pub const FAR_LED: &str = "PB5";

    /// Buzzer analog output
    pub const BUZZER_DAC: &str = "PA4";

    /// Status serial transmit
    pub const STATUS_TX: &str = "PA2";
}

/// Executor interrupt assignments
pub mod timers {
    //! Spare interrupt vectors that host each priority level's executor

    /// Enable gate executor vector
    pub const GATE_VECTOR: &str = "UART4";

    /// Sample trigger executor vector
    pub const TRIGGER_VECTOR: &str = "UART5";

    /// Conversion executor vector
    pub const CONVERSION_VECTOR: &str = "USART3";

    /// Indicator tick executor vector
    pub const TICK_VECTOR: &str = "SPI3";
}
