/// Normalizes an angle in degrees to the range [0, 360).
pub(crate) fn normalize_degrees_360(degrees: f64) -> f64 {
    let turns = degrees / 360.0;
    let mut limited = 360.0 * (turns - turns.floor());
    if limited < 0.0 {
        limited += 360.0;
    }
    limited
}

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

/// Snaps a cosine value to exactly ±1 when within `atol` of either bound.
///
/// Floating-point round-ups can carry the argument of an arccos just past
/// the [-1, 1] domain; snapping avoids the resulting NaN.
pub(crate) fn snap_unit(x: f64, atol: f64) -> f64 {
    if (x - 1.0).abs() <= atol {
        1.0
    } else if (x + 1.0).abs() <= atol {
        -1.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative_angles() {
        assert!((normalize_degrees_360(-30.0) - 330.0).abs() < 1e-12);
        assert!((normalize_degrees_360(725.0) - 5.0).abs() < 1e-12);
        assert_eq!(normalize_degrees_360(0.0), 0.0);
    }

    #[test]
    fn polynomial_matches_direct_evaluation() {
        // 1 + 2x + 3x² at x = 2 → 17
        assert_eq!(polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(polynomial(&[], 5.0), 0.0);
    }

    #[test]
    fn snap_clamps_overshoot_only() {
        assert_eq!(snap_unit(1.0 + 1e-12, 1e-8), 1.0);
        assert_eq!(snap_unit(-1.0 - 1e-12, 1e-8), -1.0);
        assert_eq!(snap_unit(0.5, 1e-8), 0.5);
    }
}
