//! The "N/A" sentinel.
//!
//! Dashboards show "N/A" whenever a statistic has nothing to work on
//! (empty view, column entirely blank). `Metric<T>` makes that case explicit
//! instead of hiding it behind `0` or `NaN`.

use serde::{Serialize, Serializer};
use std::fmt;

/// Text shown for a statistic that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric<T> {
    Value(T),
    NotAvailable,
}

impl<T> Metric<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::NotAvailable => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Value(v) => Metric::Value(f(v)),
            Metric::NotAvailable => Metric::NotAvailable,
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Metric::Value(v),
            None => Metric::NotAvailable,
        }
    }
}

/// Forwards the formatter, so `{:.1}` applies to the inner value.
impl<T: fmt::Display> fmt::Display for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => v.fmt(f),
            Metric::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl<T: Serialize> Serialize for Metric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Value(v) => v.serialize(serializer),
            Metric::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Arithmetic mean, `NotAvailable` for an empty input.
pub fn mean<I>(values: I) -> Metric<f64>
where
    I: IntoIterator,
    I::Item: Into<f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v.into(), count + 1));
    if count == 0 {
        Metric::NotAvailable
    } else {
        Metric::Value(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forwards_precision() {
        assert_eq!(format!("{:.1}", Metric::Value(2.345_f64)), "2.3");
        assert_eq!(format!("{:.1}", Metric::<f64>::NotAvailable), "N/A");
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([1u32, 2, 3]), Metric::Value(2.0));
        assert_eq!(mean(Vec::<u32>::new()), Metric::NotAvailable);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Metric::from(Some(3)), Metric::Value(3));
        assert_eq!(Metric::<i32>::from(None), Metric::NotAvailable);
    }
}
