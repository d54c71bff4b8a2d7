//! Ten-year outlook for a composite stability score.

use super::clamp;

/// Baseline score the projection starts from.
const BASELINE_START: f64 = 70.0;
/// Yearly drift of the do-nothing baseline.
const BASELINE_SLOPE: f64 = -0.5;
/// Uncertainty band growth per projected year.
const BAND_GROWTH: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub year: i32,
    pub baseline: f64,
    pub simulated: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Project `horizon` years ahead from `start_year` (inclusive of year 0).
///
/// The simulated line bends away from the baseline by `(stability - 50) / 20`
/// points per year.
pub fn project(stability: f64, start_year: i32, horizon: u32) -> Vec<ForecastPoint> {
    let impact = (stability - 50.0) / 20.0;
    (0..=horizon)
        .map(|i| {
            let step = i as f64;
            let drift = BASELINE_START + BASELINE_SLOPE * step;
            let simulated = clamp(drift + impact * step, 10.0, 95.0);
            let band = step * BAND_GROWTH;
            ForecastPoint {
                year: start_year + i as i32,
                baseline: clamp(drift, 20.0, 90.0),
                simulated,
                upper: simulated + band,
                lower: (simulated - band).max(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::approx_eq;

    #[test]
    fn test_year_zero_matches_baseline() {
        let points = project(90.0, 2026, 10);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].year, 2026);
        assert!(approx_eq(points[0].baseline, 70.0));
        assert!(approx_eq(points[0].simulated, 70.0));
        assert!(approx_eq(points[0].upper, points[0].lower));
    }

    #[test]
    fn test_neutral_score_tracks_baseline() {
        for p in project(50.0, 2026, 10) {
            assert!(approx_eq(p.simulated, p.baseline));
        }
    }

    #[test]
    fn test_simulated_line_is_clamped() {
        let high = project(100.0, 2026, 10);
        // 70 - 5 + 2.5*10 = 90, still inside the clamp
        assert!(approx_eq(high[10].simulated, 90.0));
        let low = project(0.0, 2026, 30);
        assert!(low.iter().all(|p| p.simulated >= 10.0 && p.lower >= 0.0));
        assert!(approx_eq(low[30].baseline, 55.0));
    }

    #[test]
    fn test_band_widens() {
        let points = project(65.0, 2026, 10);
        assert!(approx_eq(points[4].upper - points[4].simulated, 6.0));
        assert!(points.windows(2).all(|w| {
            (w[1].upper - w[1].lower) >= (w[0].upper - w[0].lower)
        }));
    }
}
