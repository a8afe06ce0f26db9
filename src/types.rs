//! Shared types used across the alert firmware
//!
//! This module defines the domain values that flow between the sampling,
//! control and output stages. Each one is a small `Copy` value that fits in
//! a single atomic word, so handlers at different interrupt priorities can
//! exchange them without locks.

use core::fmt;

/// Raw reading from the distance-proxy converter
///
/// Stored in converter units (12-bit, 0-4095). Values above the converter
/// range are clamped on construction.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawSample(u16);

impl RawSample {
    /// Largest value the 12-bit converter can produce
    pub const MAX: u16 = 4095;

    /// Create a sample from a raw converter value (clamped to 12 bits)
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(if raw > Self::MAX { Self::MAX } else { raw })
    }

    /// Get the raw converter value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for RawSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSample({})", self.0)
    }
}

impl fmt::Display for RawSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RawSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.0);
    }
}

/// Binary proximity classification of the latest sample
///
/// `Near` is what the vehicle display calls "reverse mode": an obstacle is
/// close behind the car.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ProximityMode {
    /// Obstacle close (sample below the threshold)
    #[default]
    Near = 0,
    /// Nothing close (sample at or above the threshold)
    Far = 1,
}

impl ProximityMode {
    /// Encode for atomic storage
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode from atomic storage
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Near),
            1 => Some(Self::Far),
            _ => None,
        }
    }

    /// Indicator line that blinks while this mode is current
    #[must_use]
    pub const fn indicator(self) -> IndicatorLine {
        match self {
            Self::Near => IndicatorLine::Near,
            Self::Far => IndicatorLine::Far,
        }
    }

    /// Check if an obstacle is close
    #[must_use]
    pub const fn is_near(self) -> bool {
        matches!(self, Self::Near)
    }
}

impl fmt::Display for ProximityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Near => f.write_str("NEAR"),
            Self::Far => f.write_str("FAR"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ProximityMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Near => defmt::write!(f, "NEAR"),
            Self::Far => defmt::write!(f, "FAR"),
        }
    }
}

/// Master enable switch for the alert outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EnableState {
    /// Indicators and tone run normally
    #[default]
    Enabled,
    /// Indicators and tone are forced off
    Disabled,
}

impl EnableState {
    /// State after one edge of the enable signal
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Enabled => Self::Disabled,
            Self::Disabled => Self::Enabled,
        }
    }

    /// Check if outputs are allowed to run
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Build from a boolean flag
    #[must_use]
    pub const fn from_bool(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl fmt::Display for EnableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("ENABLED"),
            Self::Disabled => f.write_str("DISABLED"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EnableState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Enabled => defmt::write!(f, "ENABLED"),
            Self::Disabled => defmt::write!(f, "DISABLED"),
        }
    }
}

/// Output level of an indicator line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineLevel {
    /// Line is off
    #[default]
    Off,
    /// Line is on
    On,
}

impl LineLevel {
    /// Toggle the level
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Check if the line is lit
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LineLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// One of the two physical indicator lines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorLine {
    /// Blinks while an obstacle is close (green lamp)
    Near,
    /// Blinks while nothing is close (red lamp)
    Far,
}

impl IndicatorLine {
    /// The line that is held off while this one is active
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Near => Self::Far,
            Self::Far => Self::Near,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for IndicatorLine {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Near => defmt::write!(f, "near"),
            Self::Far => defmt::write!(f, "far"),
        }
    }
}
