//! Statistical helpers shared by the analyzers

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Phase imbalance as a percentage of the mean (NEMA MG-1 definition)
///
/// Formula: max |x_i - mean| / mean × 100
///
/// ## Returns
/// Imbalance in percent. Returns 0.0 when the mean is zero or negative
/// (de-energized motor), so an idle motor never reports an imbalance.
pub fn imbalance_percent(phases: &[f64; 3]) -> f64 {
    let avg = mean(phases);
    if avg <= 0.0 {
        return 0.0;
    }

    let max_deviation = phases
        .iter()
        .map(|x| (x - avg).abs())
        .fold(0.0_f64, f64::max);

    max_deviation / avg * 100.0
}

/// Round to a fixed number of decimals (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[390.0, 380.0, 370.0]), 380.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_imbalance_of_balanced_phases_is_zero() {
        assert_eq!(imbalance_percent(&[400.0, 400.0, 400.0]), 0.0);
    }

    #[test]
    fn test_imbalance_matches_definition() {
        // Mean 380, max deviation 10 → 2.6316 %
        let pct = imbalance_percent(&[390.0, 380.0, 370.0]);
        assert!((pct - 100.0 * 10.0 / 380.0).abs() < 1e-9, "got {}", pct);
        assert_eq!(round2(pct), 2.63);
    }

    #[test]
    fn test_imbalance_of_dead_motor_is_zero() {
        assert_eq!(imbalance_percent(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(99.96), 100.0);
        assert_eq!(round2(4.499), 4.5);
        assert_eq!(round2(-0.504), -0.5);
    }
}
