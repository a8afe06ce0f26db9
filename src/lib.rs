//! Reverse Alert Firmware Library
//!
//! This library provides the control core of a vehicle reverse-proximity
//! alert. A distance-proxy signal is sampled once a second and classified as
//! near or far; two indicator lamps blink and a buzzer plays a tone whose
//! shape follows the classification. A switch gates the whole alert and a
//! serial link reports status.
//!
//! # Architecture
//!
//! Control runs from interrupt executors; thread mode only reports status
//! and idles.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Enable Gate (P1)     edge -> EnableState, force outputs off │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Sample Trigger (P2)  timer -> start conversion              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Conversion (P3)      RawSample -> classify -> ProximityMode │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Indicator Tick (P4)  blink lines, refresh tone buffer       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Thread mode          status rotation, then wait for event   │
//! └──────────────────────────────────────────────────────────────┘
//!          tone buffer ──► DAC playback (autonomous)
//! ```
//!
//! Shared state lives in [`control::state::ControlContext`]: single-writer
//! atomics whose safety rests on the priority order above.
//!
//! # Design Principles
//!
//! - **Functional core, imperative shell**: handlers are plain functions over
//!   collaborator traits; the `hal` module supplies the hardware
//! - **No allocation, no blocking in handlers**: fixed-size buffers only
//! - **No unsafe in application code**: all unsafe isolated in the HAL layer
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_sync;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// embassy-stm32 implementations of the collaborator interfaces.
#[cfg(feature = "embedded")]
pub mod hal;

/// Collaborator interfaces
///
/// Traits the control core uses to reach the hardware.
pub mod ports;

/// Control Logic
///
/// Sampling, classification, shared state and the enable gate.
pub mod control;

/// Alert Outputs
///
/// Indicator state machine and tone waveform engine.
pub mod output;

/// Status Reporting
///
/// Rotating diagnostic lines for the serial link.
pub mod report;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::control::gate::EnableGate;
    pub use crate::control::sampler::SampleSource;
    pub use crate::control::state::ControlContext;
    pub use crate::output::indicator::{BlinkChannel, IndicatorMachine, TickOutcome};
    pub use crate::output::waveform::{WaveBuffer, WaveformEngine, WaveformPattern};
    pub use crate::report::{StatusRotation, StatusSnapshot};

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Duration, Instant, Ticker, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
