//! Sort stage.
//!
//! Comparison is dispatched through [`Comparable`]: every sort key resolves
//! to a text, numeric, or date operand. Sorting is stable and applies no
//! secondary tie-break, so ties keep their input order.

use std::borrow::Cow;
use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ListRecord;

/// A sort operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparable<'a> {
    /// Compared with [`collate`]. Missing values are `""`.
    Text(Cow<'a, str>),
    /// Compared numerically. Missing values are zero.
    Numeric(Decimal),
    /// Epoch milliseconds. Missing timestamps are epoch 0, the oldest.
    Date(i64),
}

impl Comparable<'_> {
    const fn rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Numeric(_) => 1,
            Self::Date(_) => 2,
        }
    }

    /// Ascending comparison.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => collate(a, b),
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<i64> for Comparable<'_> {
    fn from(value: i64) -> Self {
        Self::Numeric(Decimal::from(value))
    }
}

impl From<Option<Decimal>> for Comparable<'_> {
    fn from(value: Option<Decimal>) -> Self {
        Self::Numeric(value.unwrap_or(Decimal::ZERO))
    }
}

impl From<Option<chrono::DateTime<chrono::Utc>>> for Comparable<'_> {
    fn from(value: Option<chrono::DateTime<chrono::Utc>>) -> Self {
        Self::Date(value.map_or(0, |ts| ts.timestamp_millis()))
    }
}

impl<'a> From<&'a str> for Comparable<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<Option<&'a str>> for Comparable<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Self::Text(Cow::Borrowed(value.unwrap_or("")))
    }
}

impl From<String> for Comparable<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a direction from a URL parameter string.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Get the URL parameter string for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Sort borrowed records in place by `key`.
pub fn sort_records<R: ListRecord>(items: &mut [&R], key: R::SortKey, order: SortOrder) {
    items.sort_by(|a, b| order.apply(a.sort_value(key).compare(&b.sort_value(key))));
}

/// Return an owned, sorted copy of `records`.
#[must_use]
pub fn sorted<R: ListRecord>(records: &[R], key: R::SortKey, order: SortOrder) -> Vec<R> {
    let mut items: Vec<&R> = records.iter().collect();
    sort_records(&mut items, key, order);
    items.into_iter().cloned().collect()
}

// =============================================================================
// Collation
// =============================================================================

/// Character class, in collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Digit,
    Letter,
}

/// Primary weight of a lower-cased character plus its accent weight.
///
/// Accented Latin letters share the primary weight of their base letter and
/// carry a non-zero secondary weight, so `"é"` sorts right after `"e"`.
fn weigh(c: char) -> ((CharClass, char), u8) {
    let (base, accent) = fold(c);
    let class = if base.is_whitespace() {
        CharClass::Space
    } else if base.is_alphabetic() {
        CharClass::Letter
    } else if base.is_numeric() {
        CharClass::Digit
    } else {
        CharClass::Punctuation
    };
    ((class, base), accent)
}

const fn fold(c: char) -> (char, u8) {
    match c {
        'à' => ('a', 1),
        'á' => ('a', 2),
        'â' => ('a', 3),
        'ã' => ('a', 4),
        'ä' => ('a', 5),
        'å' => ('a', 6),
        'ç' => ('c', 1),
        'è' => ('e', 1),
        'é' => ('e', 2),
        'ê' => ('e', 3),
        'ë' => ('e', 4),
        'ì' => ('i', 1),
        'í' => ('i', 2),
        'î' => ('i', 3),
        'ï' => ('i', 4),
        'ñ' => ('n', 1),
        'ò' => ('o', 1),
        'ó' => ('o', 2),
        'ô' => ('o', 3),
        'õ' => ('o', 4),
        'ö' => ('o', 5),
        'ø' => ('o', 6),
        'ù' => ('u', 1),
        'ú' => ('u', 2),
        'û' => ('u', 3),
        'ü' => ('u', 4),
        'ý' => ('y', 1),
        'ÿ' => ('y', 2),
        _ => (c, 0),
    }
}

/// Locale-style string comparison.
///
/// Both sides are lower-cased. Strings are compared first on base letters
/// (whitespace < punctuation < digits < letters), then on accents, then on
/// the raw lower-cased text so that distinct strings never compare equal.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let primary = a
        .chars()
        .map(|c| weigh(c).0)
        .cmp(b.chars().map(|c| weigh(c).0));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .chars()
        .map(|c| weigh(c).1)
        .cmp(b.chars().map(|c| weigh(c).1));
    if secondary != Ordering::Equal {
        return secondary;
    }

    a.cmp(&b)
}
