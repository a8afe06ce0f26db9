//! Hardware Abstraction Layer
//!
//! Implements the collaborator traits from [`crate::ports`] over STM32G474
//! peripherals. This module isolates hardware-specific code; nothing outside
//! it names an embassy peripheral type.

pub mod adc;
pub mod dac;
pub mod gpio;
pub mod timer;
pub mod uart;
