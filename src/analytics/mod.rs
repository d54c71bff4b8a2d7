/// Analytics core: pure scoring functions over plain numeric input.
///
/// Architecture:
/// ```text
///   spending / incident series        SimulationInputs
///        │                                  │
///        ▼                                  ▼
///   ┌───────────┐  ┌──────────┐     ┌────────────┐
///   │ aggregate  │  │ anomaly   │     │ stability   │ → forecast
///   └───────────┘  └──────────┘     └────────────┘
///        │               │                  │
///        └───────────────┴──────────────────┘
///                        ▼
///              AppState / ui / report
/// ```
///
/// Nothing in here does I/O or keeps state between calls.

pub mod aggregate;
pub mod anomaly;
pub mod forecast;
pub mod stability;

/// Lower bound of every 0–100 score.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of every 0–100 score.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a value into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
