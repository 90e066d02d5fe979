//! Descriptive statistics: central tendency, spread, percentiles, and
//! IQR outlier detection.
//!
//! Every function here is total over well-formed numeric input. An empty
//! sequence yields the documented sentinel `0.0` rather than an error —
//! the calling analytics layer always gets a displayable number back.
//! Inputs are expected to be finite; NaN propagates into the result
//! (rank-based functions stay total because the underlying sorts use
//! IEEE-754 total ordering).
//!
//! # Algorithms
//!
//! - **Percentile**: linear interpolation between floor and ceiling ranks
//!   on the sorted sequence, `index = (p/100)(n−1)` — the R-7 method.
//!   Reference: Hyndman & Fan (1996), "Sample Quantiles in Statistical
//!   Packages", *The American Statistician* 50(4).
//! - **Outliers**: Tukey's 1.5×IQR fences. Reference: Tukey (1977),
//!   *Exploratory Data Analysis*, ch. 2.
//! - **Variance**: population form (denominator n), two-pass.
//!
//! Rank-based functions sort through [`crate::sort::merge_sort`]; the
//! mode counts frequencies with the crate's own [`crate::table::HashTable`].

use crate::error::{AnalyticsError, Result};
use crate::sort::merge_sort;
use crate::table::HashTable;

/// Arithmetic mean, or `0.0` for an empty sequence.
///
/// # Examples
/// ```
/// use trip_analytics::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Median: middle element of the sorted sequence, or the average of the
/// two middle elements for even length. `0.0` for an empty sequence.
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Examples
/// ```
/// use trip_analytics::stats::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
/// ```
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = merge_sort(data, true);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Mode: the first-seen value achieving the maximum frequency.
///
/// Frequencies are counted in a [`HashTable`] keyed by each value's
/// string coercion; ties are broken by first-seen order. `0.0` for an
/// empty sequence.
///
/// # Examples
/// ```
/// use trip_analytics::stats::mode;
/// assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0]), 2.0);
/// // both 1.0 and 2.0 occur twice; 1.0 was seen first
/// assert_eq!(mode(&[1.0, 2.0, 2.0, 1.0]), 1.0);
/// ```
pub fn mode(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut counts: HashTable<u64> = HashTable::new();
    let mut first_seen: Vec<f64> = Vec::new();
    for &value in data {
        if counts.increment(value.to_string()) == 1 {
            first_seen.push(value);
        }
    }
    let mut best = first_seen[0];
    let mut best_count = 0;
    for &value in &first_seen {
        let count = counts.get(&value.to_string()).copied().unwrap_or(0);
        if count > best_count {
            best_count = count;
            best = value;
        }
    }
    best
}

/// Population variance (denominator n), or `0.0` for an empty sequence.
pub fn variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation: `sqrt(variance(data))`.
///
/// # Examples
/// ```
/// use trip_analytics::stats::std_dev;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(std_dev(&v), 2.0);
/// ```
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Smallest value, or `0.0` for an empty sequence.
pub fn min(data: &[f64]) -> f64 {
    data.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest value, or `0.0` for an empty sequence.
pub fn max(data: &[f64]) -> f64 {
    data.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// The `p`-th percentile (`p` in `0..=100`) by linear interpolation
/// between floor and ceiling ranks.
///
/// For a sorted sequence of length n, `index = (p/100)(n−1)`; an integral
/// index returns that element, otherwise the two neighboring elements are
/// interpolated. `percentile(data, 50)` equals [`median`]; `p = 0` and
/// `p = 100` are the minimum and maximum.
///
/// # Errors
/// [`AnalyticsError::InvalidPercentile`] if `p` is outside `0..=100`.
/// An empty sequence yields the `0.0` sentinel, not an error.
///
/// # Examples
/// ```
/// use trip_analytics::stats::percentile;
/// let v = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&v, 25.0).unwrap(), 1.75);
/// assert_eq!(percentile(&v, 100.0).unwrap(), 4.0);
/// assert!(percentile(&v, 101.0).is_err());
/// ```
pub fn percentile(data: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(AnalyticsError::InvalidPercentile(p));
    }
    if data.is_empty() {
        return Ok(0.0);
    }
    let sorted = merge_sort(data, true);
    Ok(percentile_sorted(&sorted, p))
}

/// Percentile on an already ascending-sorted, non-empty sequence.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let index = p / 100.0 * (n - 1) as f64;
    let lower = index.floor() as usize;
    let fraction = index - index.floor();
    if fraction == 0.0 {
        sorted[lower]
    } else {
        let upper = (lower + 1).min(n - 1);
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

/// Interquartile range: `percentile(75) − percentile(25)`.
///
/// `0.0` for an empty sequence.
pub fn iqr(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = merge_sort(data, true);
    percentile_sorted(&sorted, 75.0) - percentile_sorted(&sorted, 25.0)
}

/// Flags outliers by Tukey's IQR rule.
///
/// Values strictly outside `[q1 − 1.5·iqr, q3 + 1.5·iqr]` are returned in
/// their original order. Sequences shorter than 4 elements yield no
/// outliers (insufficient sample for quartiles).
///
/// # Examples
/// ```
/// use trip_analytics::stats::detect_outliers;
/// let v = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 50.0];
/// assert_eq!(detect_outliers(&v), vec![50.0]);
/// ```
pub fn detect_outliers(data: &[f64]) -> Vec<f64> {
    if data.len() < 4 {
        return Vec::new();
    }
    let sorted = merge_sort(data, true);
    let q1 = percentile_sorted(&sorted, 25.0);
    let q3 = percentile_sorted(&sorted, 75.0);
    let spread = q3 - q1;
    let lower = q1 - 1.5 * spread;
    let upper = q3 + 1.5 * spread;
    data.iter()
        .copied()
        .filter(|&v| v < lower || v > upper)
        .collect()
}

/// Trailing moving average over a fixed window.
///
/// Position `i` holds the mean of `data[i + 1 − window ..= i]`, or `None`
/// until a full window is available.
///
/// # Errors
/// [`AnalyticsError::ZeroWindow`] if `window == 0`.
///
/// # Examples
/// ```
/// use trip_analytics::stats::moving_average;
/// let daily = [2.0, 4.0, 6.0, 8.0];
/// assert_eq!(
///     moving_average(&daily, 2).unwrap(),
///     vec![None, Some(3.0), Some(5.0), Some(7.0)],
/// );
/// ```
pub fn moving_average(data: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(AnalyticsError::ZeroWindow);
    }
    Ok((0..data.len())
        .map(|i| {
            if i + 1 >= window {
                Some(mean(&data[i + 1 - window..=i]))
            } else {
                None
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
