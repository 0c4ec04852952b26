//! Aggregation stage: summary tiles over the unfiltered record list.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A dashboard stat tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTile {
    pub label: String,
    pub count: usize,
    /// Share of the total with one decimal place, e.g. `"50.0"`.
    pub percentage: String,
}

/// `count / total * 100` with one decimal place. `"0.0"` when `total` is zero.
#[must_use]
pub fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    let share = (Decimal::from(count) * Decimal::ONE_HUNDRED)
        .checked_div(Decimal::from(total))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{share:.1}")
}

/// One tile per label, counting the records the categorizer assigns to it.
///
/// Tiles come back in `labels` order. Records whose category is not listed
/// are still part of the total.
pub fn aggregate<R, F>(records: &[R], labels: &[&str], categorizer: F) -> Vec<SummaryTile>
where
    F: Fn(&R) -> String,
{
    let categories: Vec<String> = records.iter().map(&categorizer).collect();
    labels
        .iter()
        .map(|label| {
            let count = categories.iter().filter(|c| c.as_str() == *label).count();
            SummaryTile {
                label: (*label).to_string(),
                count,
                percentage: percentage(count, records.len()),
            }
        })
        .collect()
}

/// A single tile counting the records matching `predicate`.
pub fn tile<R, P>(records: &[R], label: &str, predicate: P) -> SummaryTile
where
    P: Fn(&R) -> bool,
{
    let count = records.iter().filter(|r| predicate(r)).count();
    SummaryTile {
        label: label.to_string(),
        count,
        percentage: percentage(count, records.len()),
    }
}

/// Distinct categories in order of first appearance, skipping empty ones.
pub fn distinct_labels<R, F>(records: &[R], categorizer: F) -> Vec<String>
where
    F: Fn(&R) -> String,
{
    let mut labels: Vec<String> = Vec::new();
    for label in records.iter().map(categorizer) {
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), "0.0");
        assert_eq!(percentage(3, 0), "0.0");
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), "33.3");
        assert_eq!(percentage(2, 3), "66.7");
        assert_eq!(percentage(1, 8), "12.5");
        assert_eq!(percentage(1, 16), "6.3");
        assert_eq!(percentage(4, 4), "100.0");
    }

    #[test]
    fn test_aggregate_empty_list() {
        let records: Vec<&str> = Vec::new();
        let tiles = aggregate(&records, &["a", "b"], |r| (*r).to_string());
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.count == 0 && t.percentage == "0.0"));
    }

    #[test]
    fn test_unlisted_categories_count_towards_total() {
        let records = vec!["a", "a", "b", "z"];
        let tiles = aggregate(&records, &["a", "b"], |r| (*r).to_string());
        assert_eq!(tiles[0].percentage, "50.0");
        assert_eq!(tiles[1].percentage, "25.0");
    }

    #[test]
    fn test_distinct_labels_keeps_first_seen_order() {
        let records = vec!["seo", "web", "", "seo", "mobile"];
        let labels = distinct_labels(&records, |r| (*r).to_string());
        assert_eq!(labels, vec!["seo", "web", "mobile"]);
    }
}
