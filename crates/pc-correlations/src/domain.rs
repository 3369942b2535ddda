//! Validated input domains.

use crate::error::{CorrelationError, CorrelationResult};
use crate::method::MethodId;
use crate::properties::PropertyTriple;

/// Closed input ranges a method set has been validated on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    /// Molar weight [kg/kmol]
    pub mw: (f64, f64),
    /// Specific gravity 60/60 °F
    pub sg: (f64, f64),
    /// Normal boiling point [K]
    pub tb_k: (f64, f64),
}

impl Domain {
    /// Reject a triple with any coordinate outside the domain.
    pub fn check(&self, method: MethodId, triple: &PropertyTriple) -> CorrelationResult<()> {
        check_range(method, "molar weight", triple.mw, self.mw)?;
        check_range(method, "specific gravity", triple.sg, self.sg)?;
        check_range(method, "normal boiling point [K]", triple.nbp_k, self.tb_k)?;
        Ok(())
    }

    pub fn contains(&self, triple: &PropertyTriple) -> bool {
        let inside = |v: f64, (lo, hi): (f64, f64)| v.is_finite() && v >= lo && v <= hi;
        inside(triple.mw, self.mw) && inside(triple.sg, self.sg) && inside(triple.nbp_k, self.tb_k)
    }
}

/// Reject `value` unless it is finite and inside `[min, max]`.
pub fn check_range(
    method: MethodId,
    quantity: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> CorrelationResult<f64> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(CorrelationError::Domain {
            method: method.to_string(),
            quantity,
            value,
            min,
            max,
        })
    }
}

/// Reject non-finite or non-positive outputs.
pub fn check_physical(
    method: MethodId,
    quantity: &'static str,
    value: f64,
) -> CorrelationResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CorrelationError::NonPhysical {
            method: method.to_string(),
            quantity,
            value,
        })
    }
}
