//! Frequency aggregations: category counts, multi-value top-N, mode.
//!
//! Every function here is pure and takes any iterable of `TitleLike`
//! items, so it works on a whole catalog, a combined catalog, or a
//! filtered `Vec<&T>` view.

use crate::metric::Metric;
use data_loader::{Field, TitleLike, split_multi_value};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// One bar of a frequency chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Sum of the counts of a frequency list.
pub fn total(counts: &[CategoryCount]) -> usize {
    counts.iter().map(|c| c.count).sum()
}

/// Count rows per distinct value of a field
///
/// Cells are taken whole (a multi-value cell counts as one category; use
/// [`token_counts`] to count its parts). Missing cells are not counted.
///
/// Ordering: count descending, then label ascending, so charts render the
/// same way on every run.
pub fn category_counts<I>(titles: I, field: Field) -> Vec<CategoryCount>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for title in titles {
        if let Some(value) = title.field_value(field) {
            *counts.entry(value.trim().to_string()).or_insert(0) += 1;
        }
    }

    let mut result: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    result
}

/// Count occurrences of each token of a field
///
/// ## Algorithm
/// 1. For multi-value fields, split each cell on `,` and trim; otherwise
///    the whole cell is the single token
/// 2. Drop empty tokens and missing cells
/// 3. Tally tokens, remembering the order each was first seen
/// 4. Stable sort by count descending, so ties keep first-seen order
pub fn token_counts<I>(titles: I, field: Field) -> Vec<CategoryCount>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<CategoryCount> = Vec::new();

    let mut tally = |token: &str| match positions.get(token) {
        Some(&idx) => tallies[idx].count += 1,
        None => {
            positions.insert(token.to_string(), tallies.len());
            tallies.push(CategoryCount::new(token, 1));
        }
    };

    for title in titles {
        let Some(value) = title.field_value(field) else {
            continue;
        };
        if field.is_multi_value() {
            split_multi_value(value.as_ref()).for_each(&mut tally);
        } else {
            let token = value.trim();
            if !token.is_empty() {
                tally(token);
            }
        }
    }

    // sort_by is stable: equal counts stay in first-seen order
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

/// The `n` most frequent tokens of a field
///
/// Example: two rows "Drama, Comedy" and "Drama" with n = 1 -> [("Drama", 2)]
pub fn top_n_tokens<I>(titles: I, field: Field, n: usize) -> Vec<CategoryCount>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut counts = token_counts(titles, field);
    counts.truncate(n);
    counts
}

/// Most frequent value of a field
///
/// Multi-value fields are tokenized first, the same way as [`token_counts`].
/// Ties go to the alphabetically first label. An entirely empty column gives
/// `NotAvailable`.
pub fn top_value<I>(titles: I, field: Field) -> Metric<String>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    token_counts(titles, field)
        .into_iter()
        .min_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)))
        .map(|c| c.label)
        .into()
}

/// Titles per release year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Titles per original release year, oldest first. Rows without a year are skipped.
pub fn release_year_distribution<I>(titles: I) -> Vec<YearCount>
where
    I: IntoIterator,
    I::Item: TitleLike,
{
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for title in titles {
        if let Some(year) = title.record().release_year {
            *years.entry(year).or_insert(0) += 1;
        }
    }
    years
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}
