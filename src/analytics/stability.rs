use std::fmt;

use serde::{Deserialize, Serialize};

use super::{clamp, SCORE_MAX, SCORE_MIN};

// ---------------------------------------------------------------------------
// Simulation inputs
// ---------------------------------------------------------------------------

/// The four sub-indicators fed into the stability composite.
///
/// Each is nominally on a 0–100 scale; nothing here enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInputs {
    pub infrastructure: f64,
    pub governance: f64,
    pub transparency: f64,
    pub emergency_response: f64,
}

/// Starting value for every simulation slider.
pub const SIMULATION_DEFAULT_VALUE: f64 = 50.0;

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            infrastructure: SIMULATION_DEFAULT_VALUE,
            governance: SIMULATION_DEFAULT_VALUE,
            transparency: SIMULATION_DEFAULT_VALUE,
            emergency_response: SIMULATION_DEFAULT_VALUE,
        }
    }
}

// ---------------------------------------------------------------------------
// Composite model
// ---------------------------------------------------------------------------

/// Fixed model weights: infrastructure, governance, transparency, emergency response.
pub const STABILITY_WEIGHTS: [(&str, f64); 4] = [
    ("Infrastructure", 0.35),
    ("Governance", 0.25),
    ("Transparency", 0.20),
    ("Emergency Response", 0.20),
];

/// Linear composite of the four indicators, clamped to `[0, 100]`.
///
/// Out-of-range inputs are only bounded at the final step.
pub fn compute_stability(inputs: &SimulationInputs) -> f64 {
    let components = [
        inputs.infrastructure,
        inputs.governance,
        inputs.transparency,
        inputs.emergency_response,
    ];
    let raw: f64 = components
        .iter()
        .zip(STABILITY_WEIGHTS.iter())
        .map(|(value, (_, weight))| value * weight)
        .sum();
    clamp(raw, SCORE_MIN, SCORE_MAX)
}

// ---------------------------------------------------------------------------
// Bands for score cards and reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StabilityBand {
    Critical,
    Fragile,
    Stable,
    Resilient,
}

impl fmt::Display for StabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StabilityBand::Critical => "Critical",
            StabilityBand::Fragile => "Fragile",
            StabilityBand::Stable => "Stable",
            StabilityBand::Resilient => "Resilient",
        };
        write!(f, "{label}")
    }
}

/// Bucket a 0–100 score: `<40` critical, `<60` fragile, `<80` stable, else resilient.
pub fn stability_band(score: f64) -> StabilityBand {
    if score < 40.0 {
        StabilityBand::Critical
    } else if score < 60.0 {
        StabilityBand::Fragile
    } else if score < 80.0 {
        StabilityBand::Stable
    } else {
        StabilityBand::Resilient
    }
}
