//! Top-K frequency composer: the k most frequent categorical keys.
//!
//! This is where the leaf structures meet: occurrences are counted with
//! [`HashTable::increment`], the k-th-largest admission threshold comes
//! from a [`BoundedMinHeap`] fed every distinct count, and the final
//! ranking is a stable [`merge_sort_by`] descending by count — stability
//! is what turns first-seen key order into the tie-break rule.
//!
//! Typical use is "busiest pickup→dropoff routes" style queries: O(n)
//! counting plus O(u log k) heap work over u distinct keys, without
//! sorting the full stream.

use crate::error::{AnalyticsError, Result};
use crate::heap::BoundedMinHeap;
use crate::sort::merge_sort_by;
use crate::table::HashTable;

/// A ranked category: its key and occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCount {
    pub key: String,
    pub count: u64,
}

/// Returns the `k` most frequent keys among `key_fn(item)` for every
/// item, most frequent first; equal counts rank by first-encountered key.
///
/// Fewer than `k` distinct keys yields all of them.
///
/// # Errors
/// [`AnalyticsError::ZeroK`] if `k == 0`.
///
/// # Examples
/// ```
/// use trip_analytics::topk::{top_k_categories, KeyCount};
///
/// let labels = ["a", "a", "a", "b", "b", "c"];
/// let top = top_k_categories(&labels, |l| l.to_string(), 2).unwrap();
/// assert_eq!(
///     top,
///     vec![
///         KeyCount { key: "a".into(), count: 3 },
///         KeyCount { key: "b".into(), count: 2 },
///     ]
/// );
/// ```
pub fn top_k_categories<T>(
    items: &[T],
    key_fn: impl Fn(&T) -> String,
    k: usize,
) -> Result<Vec<KeyCount>> {
    if k == 0 {
        return Err(AnalyticsError::ZeroK);
    }

    let mut counts: HashTable<u64> = HashTable::new();
    let mut first_seen: Vec<String> = Vec::new();
    for item in items {
        let key = key_fn(item);
        if counts.increment(key.clone()) == 1 {
            first_seen.push(key);
        }
    }
    if first_seen.is_empty() {
        return Ok(Vec::new());
    }

    // The heap retains the k largest counts; its minimum is then the
    // admission threshold for the final ranking.
    let mut heap = BoundedMinHeap::new(k)?;
    for key in &first_seen {
        let count = counts.get(key).copied().unwrap_or(0);
        heap.insert(count as f64);
    }
    let threshold = heap.peek().expect("at least one count inserted") as u64;

    let candidates: Vec<KeyCount> = first_seen
        .iter()
        .map(|key| KeyCount {
            key: key.clone(),
            count: counts.get(key).copied().unwrap_or(0),
        })
        .filter(|kc| kc.count >= threshold)
        .collect();

    // Stable descending sort keeps first-seen order within equal counts.
    let mut ranked = merge_sort_by(&candidates, |kc| kc.count as f64, false);
    ranked.truncate(k);
    Ok(ranked)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        // Counts agree with a model, the ranking is non-increasing, and
        // the result is the true top-k by (count, first-seen).
        #[test]
        fn ranking_is_correct(
            labels in proptest::collection::vec("[a-e]", 0..120),
            k in 1_usize..8,
        ) {
            let top = top_k_categories(&labels, |l| l.to_string(), k).unwrap();

            let mut model: HashMap<String, u64> = HashMap::new();
            let mut order: Vec<String> = Vec::new();
            for label in &labels {
                if !model.contains_key(label) {
                    order.push(label.clone());
                }
                *model.entry(label.clone()).or_insert(0) += 1;
            }
            // Reference ranking: stable sort of first-seen keys by count.
            let mut expected: Vec<KeyCount> = order
                .iter()
                .map(|key| KeyCount { key: key.clone(), count: model[key] })
                .collect();
            expected.sort_by(|a, b| b.count.cmp(&a.count));
            expected.truncate(k);

            prop_assert_eq!(top, expected);
        }

        #[test]
        fn result_never_exceeds_k(
            labels in proptest::collection::vec("[a-h]", 0..100),
            k in 1_usize..5,
        ) {
            let top = top_k_categories(&labels, |l| l.to_string(), k).unwrap();
            prop_assert!(top.len() <= k);
            for pair in top.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }
    }
}
