//! Gain curve lookup
//!
//! A step function from movement distance to velocity multiplier. The gain
//! for a distance is the value at the largest threshold strictly below it,
//! or the baseline at 0.0 when no threshold is exceeded.

use serde::{Deserialize, Serialize};

use crate::shaper::error::{Result, ShaperError};

/// Sorted threshold → gain table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct GainCurve {
    /// (threshold, gain), strictly increasing thresholds, first is 0.0
    entries: Vec<(f64, f64)>,
}

impl GainCurve {
    /// Build a curve from (threshold, gain) pairs in any order
    ///
    /// Fails when the 0.0 baseline is missing, a threshold repeats, or any
    /// value is negative or non-finite.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut entries: Vec<(f64, f64)> = entries.into_iter().collect();

        for &(threshold, gain) in &entries {
            if !threshold.is_finite() || threshold < 0.0 || !gain.is_finite() {
                return Err(ShaperError::InvalidCurveEntry(threshold, gain));
            }
        }

        entries.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(pair) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ShaperError::DuplicateThreshold(pair[0].0));
        }

        // -0.0 sorts first and compares equal to 0.0
        match entries.first() {
            Some(&(first, _)) if first == 0.0 => {}
            _ => return Err(ShaperError::MissingBaseline),
        }

        Ok(Self { entries })
    }

    /// Gain applied when movement does not exceed any threshold
    pub fn baseline(&self) -> f64 {
        self.entries[0].1
    }

    /// Gain for a movement of `distance`
    pub fn gain(&self, distance: f64) -> f64 {
        let mut gain = self.baseline();
        for &(threshold, value) in &self.entries {
            if distance > threshold {
                gain = value;
            } else {
                break;
            }
        }
        gain
    }

    /// (threshold, gain) pairs in ascending threshold order
    pub fn entries(&self) -> &[(f64, f64)] {
        &self.entries
    }
}

impl Default for GainCurve {
    /// Gentle below 20 units, ramping to 3x above 80
    fn default() -> Self {
        Self {
            entries: vec![(0.0, 0.5), (20.0, 1.5), (50.0, 2.0), (80.0, 3.0)],
        }
    }
}

impl TryFrom<Vec<(f64, f64)>> for GainCurve {
    type Error = ShaperError;

    fn try_from(entries: Vec<(f64, f64)>) -> Result<Self> {
        GainCurve::new(entries)
    }
}

impl From<GainCurve> for Vec<(f64, f64)> {
    fn from(curve: GainCurve) -> Self {
        curve.entries
    }
}
