//! Time-bucketed counts over `date_added`.
//!
//! Rust concepts:
//! - Deriving `Ord` so buckets sort chronologically for free
//! - `BTreeMap` as an ordered accumulator
//! - Fixed-size arrays for the month-of-year histogram

use crate::metric::Metric;
use chrono::Datelike;
use data_loader::TitleLike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Bucket width for addition timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Granularity {
    Year,
    Quarter,
    Month,
}

impl Granularity {
    fn periods_per_year(&self) -> u32 {
        match self {
            Granularity::Year => 1,
            Granularity::Quarter => 4,
            Granularity::Month => 12,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Year => "year",
            Granularity::Quarter => "quarter",
            Granularity::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" | "y" => Ok(Granularity::Year),
            "quarter" | "quarterly" | "q" => Ok(Granularity::Quarter),
            "month" | "monthly" | "m" => Ok(Granularity::Month),
            other => Err(format!("unknown granularity '{}'", other)),
        }
    }
}

/// One calendar period. `period` is 1-based within the year (always 1 for
/// yearly buckets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Bucket {
    pub year: i32,
    pub period: u32,
    pub granularity: Granularity,
}

impl Bucket {
    pub fn containing<D: Datelike>(date: &D, granularity: Granularity) -> Self {
        let period = match granularity {
            Granularity::Year => 1,
            Granularity::Quarter => date.month0() / 3 + 1,
            Granularity::Month => date.month(),
        };
        Self {
            year: date.year(),
            period,
            granularity,
        }
    }

    /// The period right after this one.
    pub fn next(&self) -> Self {
        if self.period >= self.granularity.periods_per_year() {
            Self {
                year: self.year + 1,
                period: 1,
                ..*self
            }
        } else {
            Self {
                period: self.period + 1,
                ..*self
            }
        }
    }

    /// Example: "2021", "2021-Q3", "2021-07"
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Year => format!("{}", self.year),
            Granularity::Quarter => format!("{}-Q{}", self.year, self.period),
            Granularity::Month => format!("{}-{:02}", self.year, self.period),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: Bucket,
    pub count: usize,
}

/// Chronologically ordered additions per period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub granularity: Granularity,
    pub buckets: Vec<BucketCount>,
}

impl BucketCounts {
    /// Equals the number of titles with a parseable `date_added`.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Insert zero-count buckets for every empty period between the first
    /// and last bucket, the way a calendar resample would show them.
    pub fn fill_gaps(&self) -> BucketCounts {
        let (Some(first), Some(last)) = (self.buckets.first(), self.buckets.last()) else {
            return self.clone();
        };

        let mut filled = Vec::with_capacity(self.buckets.len());
        let mut existing = self.buckets.iter().peekable();
        let mut cursor = first.bucket;
        while cursor <= last.bucket {
            match existing.peek() {
                Some(b) if b.bucket == cursor => {
                    filled.push(**b);
                    existing.next();
                }
                _ => filled.push(BucketCount {
                    bucket: cursor,
                    count: 0,
                }),
            }
            cursor = cursor.next();
        }

        BucketCounts {
            granularity: self.granularity,
            buckets: filled,
        }
    }
}

/// Count additions per period
///
/// Only titles with a parseable `date_added` are counted; buckets are
/// ordered oldest first and empty periods are not emitted (see
/// [`BucketCounts::fill_gaps`]).
pub fn bucket_counts<I>(titles: I, granularity: Granularity) -> BucketCounts
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut counts: BTreeMap<Bucket, usize> = BTreeMap::new();
    for title in titles {
        if let Some(date) = title.added_on() {
            *counts
                .entry(Bucket::containing(&date, granularity))
                .or_insert(0) += 1;
        }
    }

    BucketCounts {
        granularity,
        buckets: counts
            .into_iter()
            .map(|(bucket, count)| BucketCount { bucket, count })
            .collect(),
    }
}

/// Additions per calendar month across all years, January first.
pub fn month_of_year_counts<I>(titles: I) -> [usize; 12]
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut months = [0usize; 12];
    for date in titles.into_iter().filter_map(|t| t.added_on()) {
        months[date.month0() as usize] += 1;
    }
    months
}

/// Year of the most recent addition.
pub fn latest_addition_year<I>(titles: I) -> Metric<i32>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    titles
        .into_iter()
        .filter_map(|t| t.added_on())
        .map(|d| d.year())
        .max()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::TitleRecord;

    fn added(raw: Option<&str>) -> TitleRecord {
        TitleRecord {
            date_added: raw.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_quarter_buckets_skip_unparseable_dates() {
        let titles = vec![
            added(Some("January 5, 2020")),
            added(Some("March 30, 2020")),
            added(Some("2020-04-01")),
            added(None),
            added(Some("someday")),
            added(Some("December 1, 2019")),
        ];

        let buckets = bucket_counts(&titles, Granularity::Quarter);
        let labels: Vec<String> = buckets.buckets.iter().map(|b| b.bucket.label()).collect();
        assert_eq!(labels, vec!["2019-Q4", "2020-Q1", "2020-Q2"]);
        assert_eq!(buckets.total(), 4);
    }

    #[test]
    fn test_fill_gaps_inserts_zero_months() {
        let titles = vec![added(Some("2021-11-02")), added(Some("2022-02-10"))];
        let filled = bucket_counts(&titles, Granularity::Month).fill_gaps();

        let labels: Vec<String> = filled.buckets.iter().map(|b| b.bucket.label()).collect();
        assert_eq!(labels, vec!["2021-11", "2021-12", "2022-01", "2022-02"]);
        let counts: Vec<usize> = filled.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1]);
        assert_eq!(filled.total(), 2);
    }

    #[test]
    fn test_fill_gaps_on_empty() {
        let none: Vec<TitleRecord> = Vec::new();
        assert!(bucket_counts(&none, Granularity::Year).fill_gaps().is_empty());
    }

    #[test]
    fn test_month_of_year() {
        let titles = vec![
            added(Some("July 1, 2019")),
            added(Some("July 9, 2021")),
            added(Some("January 1, 2020")),
            added(None),
        ];
        let months = month_of_year_counts(&titles);
        assert_eq!(months[0], 1);
        assert_eq!(months[6], 2);
        assert_eq!(months.iter().sum::<usize>(), 3);
        assert_eq!(MONTH_NAMES[6], "July");
    }

    #[test]
    fn test_latest_addition_year() {
        let titles = vec![added(Some("2018-01-01")), added(Some("June 2, 2021")), added(None)];
        assert_eq!(latest_addition_year(&titles), Metric::Value(2021));
        assert_eq!(latest_addition_year(&[added(None)]), Metric::NotAvailable);
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("Quarter".parse::<Granularity>(), Ok(Granularity::Quarter));
        assert!("weekly".parse::<Granularity>().is_err());
    }
}
