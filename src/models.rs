use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One day of a time series (downloads per day, contributions per day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: u64,
}

impl Sample {
    pub fn new(date: NaiveDate, value: u64) -> Self {
        Self { date, value }
    }
}

/// Absolute size of one category before normalization (e.g. bytes of code per language).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySize {
    pub name: String,
    pub size: u64,
}

/// Label/value pair shown on a profile card. Icon path data is opaque pass-through content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatPair {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub icon: Vec<String>,
}

impl StatPair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon: Vec::new(),
        }
    }

    /// Attach icon path data (one entry per `<path>`).
    pub fn with_icon(mut self, paths: &[&str]) -> Self {
        self.icon = paths.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Validation failures for raw input rows handed to the layout engine.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("invalid calendar day {date:?} (expected YYYY-MM-DD)")]
    BadDate { date: String },

    #[error("invalid count {value:?} for {date}: expected a non-negative integer")]
    BadValue { date: String, value: String },

    #[error("samples out of order: {later} comes after {earlier}")]
    OutOfOrder { earlier: NaiveDate, later: NaiveDate },
}

/// Parse one `(day, count)` row as delivered by upstream APIs.
///
/// Counts may arrive as `"12"` or `"12.0"`; anything negative, fractional or non-numeric is
/// rejected rather than silently coerced, since a corrupt series is a fetch problem.
pub fn parse_sample(date: &str, value: &str) -> Result<Sample, InputError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        InputError::BadDate {
            date: date.to_string(),
        }
    })?;
    let bad_value = || InputError::BadValue {
        date: date.to_string(),
        value: value.to_string(),
    };
    let v: f64 = value.trim().parse().map_err(|_| bad_value())?;
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
        return Err(bad_value());
    }
    Ok(Sample::new(day, v as u64))
}

/// Check that a series is in ascending date order (one row per day is not enforced).
pub fn ensure_ascending(samples: &[Sample]) -> Result<(), InputError> {
    for pair in samples.windows(2) {
        if pair[1].date < pair[0].date {
            return Err(InputError::OutOfOrder {
                earlier: pair[0].date,
                later: pair[1].date,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_integral_floats() {
        let s = parse_sample("2024-03-01", "12.0").unwrap();
        assert_eq!(s.value, 12);
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_sample("2024-13-01", "1"),
            Err(InputError::BadDate { .. })
        ));
        assert!(matches!(
            parse_sample("2024-01-01", "-3"),
            Err(InputError::BadValue { .. })
        ));
        assert!(matches!(
            parse_sample("2024-01-01", "1.5"),
            Err(InputError::BadValue { .. })
        ));
    }

    #[test]
    fn ascending_check_reports_first_inversion() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let rows = [Sample::new(d(2), 1), Sample::new(d(1), 1)];
        assert_eq!(
            ensure_ascending(&rows),
            Err(InputError::OutOfOrder {
                earlier: d(2),
                later: d(1)
            })
        );
    }
}
