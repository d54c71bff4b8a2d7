// ---------------------------------------------------------------------------
// Weighted aggregation over a numeric series
// ---------------------------------------------------------------------------

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weighted mean of `values`.
///
/// * Empty series → `0.0`.
/// * No weights, or weights of a different length → plain mean.
/// * Weights summing to exactly zero → `0.0`.
///
/// Weights are not checked for sign.
pub fn weighted_score(values: &[f64], weights: Option<&[f64]>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let weights = match weights {
        Some(w) if w.len() == values.len() => w,
        Some(w) => {
            log::debug!(
                "weight set has {} entries for {} values, falling back to equal weights",
                w.len(),
                values.len()
            );
            return mean(values);
        }
        None => return mean(values),
    };

    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted_sum: f64 = values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum();
    weighted_sum / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::approx_eq;

    #[test]
    fn test_empty_series_is_zero() {
        assert_eq!(weighted_score(&[], None), 0.0);
        assert_eq!(weighted_score(&[], Some(&[])), 0.0);
    }

    #[test]
    fn test_unweighted_mean() {
        assert!(approx_eq(weighted_score(&[10.0, 20.0, 30.0], None), 20.0));
    }

    #[test]
    fn test_weighted_mean() {
        let score = weighted_score(&[10.0, 20.0, 30.0], Some(&[1.0, 1.0, 2.0]));
        assert!(approx_eq(score, 22.5));
    }

    #[test]
    fn test_length_mismatch_falls_back_to_mean() {
        let score = weighted_score(&[10.0, 20.0, 30.0], Some(&[5.0, 1.0]));
        assert!(approx_eq(score, 20.0));
    }

    #[test]
    fn test_zero_total_weight_is_zero() {
        assert_eq!(weighted_score(&[10.0, 20.0], Some(&[0.0, 0.0])), 0.0);
        // Cancelling weights also sum to zero.
        assert_eq!(weighted_score(&[10.0, 20.0], Some(&[1.0, -1.0])), 0.0);
    }

    #[test]
    fn test_negative_weights_pass_through() {
        // (10*3 + 20*-1) / 2 = 5
        let score = weighted_score(&[10.0, 20.0], Some(&[3.0, -1.0]));
        assert!(approx_eq(score, 5.0));
    }

    #[test]
    fn test_matches_formula_on_spending_series() {
        let values = [120000.0, 150000.0, 110000.0, 180000.0, 140000.0, 130000.0, 160000.0];
        let weights = [5.0, 3.0, 8.0, 6.0, 4.0, 7.0, 2.0];
        let expected = values.iter().zip(&weights).map(|(v, w)| v * w).sum::<f64>()
            / weights.iter().sum::<f64>();
        assert!(approx_eq(weighted_score(&values, Some(&weights)), expected));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let values = [3.5, 1.25, 9.0];
        let weights = [0.2, 0.3, 0.5];
        let first = weighted_score(&values, Some(&weights));
        let second = weighted_score(&values, Some(&weights));
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
