//! Error types for the diorama core.

use thiserror::Error;

/// Errors raised while configuring or assembling diorama components.
///
/// Every variant is a construction-time failure. Once a height field, mesh or
/// particle system has been built, stepping it cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DioramaError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("malformed mesh fragment: {0}")]
    MalformedFragment(String),

    #[error("unknown particle system handle {0}")]
    UnknownSystem(usize),
}

pub type Result<T> = std::result::Result<T, DioramaError>;

/// Shorthand for building an [`DioramaError::InvalidConfiguration`].
pub(crate) fn invalid(msg: impl Into<String>) -> DioramaError {
    DioramaError::InvalidConfiguration(msg.into())
}

/// Checks that a `[lo, hi)` range is finite and not inverted.
pub(crate) fn check_range(name: &str, range: [f32; 2]) -> Result<()> {
    let [lo, hi] = range;
    if !lo.is_finite() || !hi.is_finite() {
        return Err(invalid(format!("{name} must be finite, got [{lo}, {hi}]")));
    }
    if lo > hi {
        return Err(invalid(format!("{name} is inverted: [{lo}, {hi}]")));
    }
    if !(hi - lo).is_finite() {
        return Err(invalid(format!("{name} spans too wide a range: [{lo}, {hi}]")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = invalid("segments must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: segments must be positive"
        );
        assert_eq!(
            DioramaError::UnknownSystem(3).to_string(),
            "unknown particle system handle 3"
        );
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("speed", [0.1, 0.2]).is_ok());
        assert!(check_range("speed", [0.2, 0.2]).is_ok());
        assert!(check_range("speed", [0.3, 0.2]).is_err());
        assert!(check_range("speed", [f32::NAN, 0.2]).is_err());
        assert!(check_range("speed", [0.0, f32::INFINITY]).is_err());
        assert!(check_range("speed", [-3.0e38, 3.0e38]).is_err());
        assert!(check_range("speed", [f32::MAX, f32::MAX]).is_ok());
    }
}
