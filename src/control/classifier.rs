//! Proximity Classifier
//!
//! Maps a converter reading to a [`ProximityMode`]. A lower reading means
//! a closer obstacle. There is no hysteresis: a reading that hovers on the
//! threshold flips the mode on every sample.

use crate::config::PROXIMITY_THRESHOLD;
use crate::types::{ProximityMode, RawSample};

/// Classify a sample against the configured threshold
#[must_use]
pub const fn classify(sample: RawSample) -> ProximityMode {
    classify_with(sample, PROXIMITY_THRESHOLD)
}

/// Classify a sample against an explicit threshold
///
/// `Near` iff `sample < threshold`; a sample equal to the threshold is `Far`.
#[must_use]
pub const fn classify_with(sample: RawSample, threshold: u16) -> ProximityMode {
    if sample.raw() < threshold {
        ProximityMode::Near
    } else {
        ProximityMode::Far
    }
}
