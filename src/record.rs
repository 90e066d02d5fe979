//! Labeled records: named-field access over trip-like rows.
//!
//! A [`LabeledRecord`] maps field names to numeric or text values, the
//! shape the surrounding application hands to the engine when sorting or
//! searching by a named column ("total_amount", "trip_distance", ...).
//! Typed access goes through the [`FieldAccess`] trait, so callers with
//! their own row structs can implement it directly instead of converting.
//!
//! # Missing fields
//!
//! A record may legitimately lack the requested field, or hold text where
//! a number is expected. How such records compare is governed by
//! [`MissingPolicy`]. The default, [`MissingPolicy::Zero`], treats a
//! missing value as numeric 0 — the engine's long-standing comparison
//! rule, kept as an explicit, documented default. A record with a missing
//! field is then indistinguishable from one whose field is really 0;
//! callers who need to tell them apart should pick
//! [`MissingPolicy::SortsFirst`] or [`MissingPolicy::SortsLast`] instead.

use crate::sort::{binary_search_by, merge_sort_by, quick_select_by};
use crate::table::HashTable;

/// A single field value: numeric or text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Returns the numeric value, or `None` for text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Returns the text value, or `None` for numbers.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(t) => Some(t.as_str()),
        }
    }
}

/// Named-field lookup for record types.
///
/// The engine's field-based operations are generic over this trait rather
/// than over dynamic maps; `numeric_field` returns `None` when the field
/// is absent or non-numeric, and the caller-chosen [`MissingPolicy`]
/// decides how that compares.
pub trait FieldAccess {
    /// Returns the numeric value of `name`, if present and numeric.
    fn numeric_field(&self, name: &str) -> Option<f64>;
}

/// A field-name → value mapping, backed by the crate's own [`HashTable`].
///
/// # Examples
/// ```
/// use trip_analytics::record::{FieldAccess, LabeledRecord};
///
/// let trip = LabeledRecord::new()
///     .with_number("total_amount", 23.5)
///     .with_text("pickup_zone", "Midtown");
/// assert_eq!(trip.numeric_field("total_amount"), Some(23.5));
/// assert_eq!(trip.numeric_field("pickup_zone"), None); // text
/// assert_eq!(trip.numeric_field("tip_amount"), None); // absent
/// ```
#[derive(Debug, Clone, Default)]
pub struct LabeledRecord {
    fields: HashTable<FieldValue>,
}

impl LabeledRecord {
    /// Creates a record with no fields.
    pub fn new() -> Self {
        Self {
            fields: HashTable::new(),
        }
    }

    /// Builder-style numeric field.
    pub fn with_number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.set(name, FieldValue::Number(value));
        self
    }

    /// Builder-style text field.
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.set(name, FieldValue::Text(value.into()));
        self
    }

    /// Sets or overwrites a field.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.set(name, value);
    }

    /// Returns the raw field value, if present.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl FieldAccess for LabeledRecord {
    fn numeric_field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(FieldValue::as_number)
    }
}

/// How records missing the comparison field are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Missing compares as numeric 0 (the documented legacy rule).
    #[default]
    Zero,
    /// Missing compares as −∞: first ascending, last descending.
    SortsFirst,
    /// Missing compares as +∞: last ascending, first descending.
    SortsLast,
}

impl MissingPolicy {
    /// Resolves an optional field value to a comparison key.
    fn resolve(self, value: Option<f64>) -> f64 {
        match (value, self) {
            (Some(v), _) => v,
            (None, MissingPolicy::Zero) => 0.0,
            (None, MissingPolicy::SortsFirst) => f64::NEG_INFINITY,
            (None, MissingPolicy::SortsLast) => f64::INFINITY,
        }
    }
}

/// Stable sort of records by a named numeric field, missing-as-zero.
///
/// Records with equal (or equally missing) field values keep their
/// original relative order.
///
/// # Examples
/// ```
/// use trip_analytics::record::{sort_by_field, FieldAccess, LabeledRecord};
///
/// let trips = vec![
///     LabeledRecord::new().with_number("fare", 9.0),
///     LabeledRecord::new().with_number("fare", 4.5),
/// ];
/// let sorted = sort_by_field(&trips, "fare", true);
/// assert_eq!(sorted[0].numeric_field("fare"), Some(4.5));
/// ```
pub fn sort_by_field<T: FieldAccess + Clone>(
    records: &[T],
    field: &str,
    ascending: bool,
) -> Vec<T> {
    sort_by_field_with(records, field, ascending, MissingPolicy::default())
}

/// Stable sort of records by a named numeric field under an explicit
/// [`MissingPolicy`].
pub fn sort_by_field_with<T: FieldAccess + Clone>(
    records: &[T],
    field: &str,
    ascending: bool,
    policy: MissingPolicy,
) -> Vec<T> {
    merge_sort_by(records, |r| policy.resolve(r.numeric_field(field)), ascending)
}

/// Selects the record with the k-th smallest field value (0-based),
/// missing-as-zero.
///
/// # Returns
/// - `None` if `k >= records.len()`.
pub fn select_by_field<T: FieldAccess + Clone>(
    records: &[T],
    field: &str,
    k: usize,
) -> Option<T> {
    let policy = MissingPolicy::default();
    quick_select_by(records, |r| policy.resolve(r.numeric_field(field)), k)
}

/// Binary search for an exact field value over records already sorted
/// ascending by that field (missing-as-zero).
///
/// Behavior on unsorted input is undefined.
pub fn binary_search_by_field<T: FieldAccess>(
    sorted: &[T],
    field: &str,
    target: f64,
) -> Option<usize> {
    let policy = MissingPolicy::default();
    binary_search_by(sorted, |r| policy.resolve(r.numeric_field(field)), target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
