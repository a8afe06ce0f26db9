//! Control Logic
//!
//! Sampling, classification and the enable gate.
//! Everything here is hardware-independent and runs in interrupt context.

pub mod classifier;
pub mod gate;
pub mod sampler;
pub mod state;
