use crate::PcError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PcError::NonFinite { what, value: v })
    }
}

/// `|actual - target| / |target|`, falling back to the absolute error for a zero target.
pub fn relative_error(actual: Real, target: Real) -> Real {
    let diff = (actual - target).abs();
    if target == 0.0 {
        diff
    } else {
        diff / target.abs()
    }
}

/// Normalize non-negative weights so they sum to one.
///
/// Rejects empty input, negative or non-finite weights and a zero sum.
pub fn normalize_weights(weights: &[Real]) -> Result<Vec<Real>, PcError> {
    if weights.is_empty() {
        return Err(PcError::InvalidArg {
            what: "empty weight vector",
        });
    }

    let mut sum = 0.0;
    for &w in weights {
        ensure_finite(w, "weight")?;
        if w < 0.0 {
            return Err(PcError::InvalidArg {
                what: "negative weight",
            });
        }
        sum += w;
    }

    if sum <= 0.0 || !sum.is_finite() {
        return Err(PcError::InvalidArg {
            what: "weights sum to zero or non-finite",
        });
    }

    Ok(weights.iter().map(|w| w / sum).collect())
}

/// Σ w_i·v_i over paired slices (weights assumed normalized).
pub fn weighted_mean(weights: &[Real], values: &[Real]) -> Real {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn relative_error_handles_zero_target() {
        assert_eq!(relative_error(0.5, 0.0), 0.5);
        assert!((relative_error(101.0, 100.0) - 0.01).abs() < 1e-15);
    }

    #[test]
    fn normalize_rejects_bad_input() {
        assert!(normalize_weights(&[]).is_err());
        assert!(normalize_weights(&[1.0, -0.5]).is_err());
        assert!(normalize_weights(&[0.0, 0.0]).is_err());
        assert!(normalize_weights(&[Real::NAN]).is_err());
    }

    #[test]
    fn weighted_mean_of_uniform_weights() {
        let w = normalize_weights(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert!((weighted_mean(&w, &[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }
}
