use thiserror::Error;

/// Rejection raised before any score is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidMetricError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} exceeds the supported range")]
    Overflow { field: &'static str },
}

impl InvalidMetricError {
    pub fn field(&self) -> &'static str {
        match self {
            InvalidMetricError::Negative { field, .. }
            | InvalidMetricError::NonFinite { field }
            | InvalidMetricError::OutOfRange { field, .. }
            | InvalidMetricError::Overflow { field } => field,
        }
    }
}

pub(crate) fn require_count(field: &'static str, value: i64) -> Result<u64, InvalidMetricError> {
    u64::try_from(value).map_err(|_| InvalidMetricError::Negative {
        field,
        value: value as f64,
    })
}

pub(crate) fn checked_total(
    field: &'static str,
    counts: &[u64],
) -> Result<u64, InvalidMetricError> {
    counts.iter().try_fold(0u64, |total, count| {
        total
            .checked_add(*count)
            .ok_or(InvalidMetricError::Overflow { field })
    })
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, InvalidMetricError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidMetricError::NonFinite { field })
    }
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: f64,
) -> Result<f64, InvalidMetricError> {
    let value = require_finite(field, value)?;
    if value < 0.0 {
        return Err(InvalidMetricError::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn require_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, InvalidMetricError> {
    let value = require_finite(field, value)?;
    if value < min || value > max {
        return Err(InvalidMetricError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Durations divide other metrics, so zero is rejected along with negatives.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, InvalidMetricError> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(InvalidMetricError::OutOfRange {
            field,
            value,
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
        });
    }
    Ok(value)
}
