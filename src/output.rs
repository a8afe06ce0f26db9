//! Alert Outputs
//!
//! The two consumers of the proximity mode: the indicator blinker and the
//! tone waveform it refreshes.

pub mod indicator;
pub mod waveform;
