//! Ordering primitives: stable merge sort, quick select, binary search.
//!
//! Rank-based statistics elsewhere in the crate (medians, percentiles,
//! top-K ordering) are all derived from these routines, so the stability
//! guarantee of [`merge_sort_by`] is load-bearing: records with equal keys
//! keep their original relative order.
//!
//! All comparisons use IEEE-754 total ordering ([`f64::total_cmp`]), which
//! makes every routine total even if NaN reaches the input (NaN orders
//! after +∞).
//!
//! # Algorithms
//!
//! - **Merge sort**: top-down divide and conquer, O(n log n) worst case,
//!   stable. Reference: Knuth (1998), *TAOCP* Vol. 3, §5.2.4.
//! - **Quick select**: Hoare's selection via Lomuto partitioning, O(n)
//!   average. Reference: Hoare (1961), "Algorithm 65: Find", *CACM* 4(7).

use std::cmp::Ordering;

/// Stable merge sort over a slice of numbers.
///
/// Returns a new sorted vector; the input is not mutated.
///
/// # Complexity
/// Time: O(n log n) worst case, Space: O(n)
///
/// # Examples
/// ```
/// use trip_analytics::sort::merge_sort;
/// assert_eq!(merge_sort(&[3.0, 1.0, 2.0], true), vec![1.0, 2.0, 3.0]);
/// assert_eq!(merge_sort(&[3.0, 1.0, 2.0], false), vec![3.0, 2.0, 1.0]);
/// ```
pub fn merge_sort(values: &[f64], ascending: bool) -> Vec<f64> {
    merge_sort_by(values, |v| *v, ascending)
}

/// Stable merge sort of arbitrary items by a numeric key.
///
/// Items whose keys compare equal keep their original relative order, in
/// both ascending and descending direction. Sequences of length 0 or 1 are
/// returned unchanged.
///
/// # Complexity
/// Time: O(n log n) worst case, Space: O(n)
///
/// # Examples
/// ```
/// use trip_analytics::sort::merge_sort_by;
/// let trips = [("a", 9.5), ("b", 2.0), ("c", 9.5)];
/// let by_fare = merge_sort_by(&trips, |t| t.1, false);
/// // equal fares keep first-seen order: "a" before "c"
/// assert_eq!(by_fare, vec![("a", 9.5), ("c", 9.5), ("b", 2.0)]);
/// ```
pub fn merge_sort_by<T: Clone>(items: &[T], key: impl Fn(&T) -> f64, ascending: bool) -> Vec<T> {
    sort_halves(items, &key, ascending)
}

fn sort_halves<T: Clone>(items: &[T], key: &impl Fn(&T) -> f64, ascending: bool) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let middle = items.len() / 2;
    let left = sort_halves(&items[..middle], key, ascending);
    let right = sort_halves(&items[middle..], key, ascending);
    merge(left, right, key, ascending)
}

fn merge<T: Clone>(
    left: Vec<T>,
    right: Vec<T>,
    key: &impl Fn(&T) -> f64,
    ascending: bool,
) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut li = 0;
    let mut ri = 0;
    while li < left.len() && ri < right.len() {
        let ord = key(&left[li]).total_cmp(&key(&right[ri]));
        // On ties the left run wins; stability depends on this.
        let take_left = if ascending {
            ord != Ordering::Greater
        } else {
            ord != Ordering::Less
        };
        if take_left {
            out.push(left[li].clone());
            li += 1;
        } else {
            out.push(right[ri].clone());
            ri += 1;
        }
    }
    out.extend_from_slice(&left[li..]);
    out.extend_from_slice(&right[ri..]);
    out
}

/// Selects the k-th order statistic (0-based, ascending) of a slice.
///
/// # Algorithm
/// Iterative quick select over a scratch copy, Lomuto partition with the
/// last element as pivot. O(n) average; O(n²) worst case on adversarial
/// orderings (already-sorted input with this fixed pivot) — accepted, the
/// pivot is deliberately not randomized.
///
/// # Returns
/// - `None` if `k >= values.len()`.
///
/// # Examples
/// ```
/// use trip_analytics::sort::quick_select;
/// let v = [9.0, 1.0, 8.0, 2.0, 7.0];
/// assert_eq!(quick_select(&v, 0), Some(1.0));
/// assert_eq!(quick_select(&v, 2), Some(7.0));
/// assert_eq!(quick_select(&v, 5), None);
/// ```
pub fn quick_select(values: &[f64], k: usize) -> Option<f64> {
    quick_select_by(values, |v| *v, k)
}

/// Selects the item with the k-th smallest key (0-based).
///
/// Same contract and complexity as [`quick_select`]; the input slice is not
/// mutated.
pub fn quick_select_by<T: Clone>(
    items: &[T],
    key: impl Fn(&T) -> f64,
    k: usize,
) -> Option<T> {
    if k >= items.len() {
        return None;
    }
    let mut scratch = items.to_vec();
    let mut lo = 0;
    let mut hi = scratch.len() - 1;
    loop {
        if lo == hi {
            return Some(scratch[lo].clone());
        }
        let pivot = partition(&mut scratch, lo, hi, &key);
        match k.cmp(&pivot) {
            Ordering::Equal => return Some(scratch[pivot].clone()),
            Ordering::Less => hi = pivot - 1,
            Ordering::Greater => lo = pivot + 1,
        }
    }
}

/// Lomuto partition of `items[lo..=hi]` around the last element.
///
/// Returns the pivot's final index; everything left of it has a strictly
/// smaller key.
fn partition<T>(items: &mut [T], lo: usize, hi: usize, key: &impl Fn(&T) -> f64) -> usize {
    let pivot_key = key(&items[hi]);
    let mut store = lo;
    for i in lo..hi {
        if key(&items[i]).total_cmp(&pivot_key) == Ordering::Less {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, hi);
    store
}

/// Binary search for an exact match in an ascending-sorted slice.
///
/// The input must already be sorted ascending by value; behavior on
/// unsorted input is undefined (but never panics).
///
/// # Returns
/// - `Some(index)` of an arbitrary matching element, `None` on a miss.
///
/// # Examples
/// ```
/// use trip_analytics::sort::binary_search;
/// let v = [1.0, 3.0, 5.0, 7.0];
/// assert_eq!(binary_search(&v, 5.0), Some(2));
/// assert_eq!(binary_search(&v, 4.0), None);
/// ```
pub fn binary_search(sorted: &[f64], target: f64) -> Option<usize> {
    binary_search_by(sorted, |v| *v, target)
}

/// Binary search by key over a slice sorted ascending by the same key.
pub fn binary_search_by<T>(
    sorted: &[T],
    key: impl Fn(&T) -> f64,
    target: f64,
) -> Option<usize> {
    let mut lo = 0;
    let mut hi = sorted.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match key(&sorted[mid]).total_cmp(&target) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return Some(mid),
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sort_ascending() {
        let v = [5.0, 3.0, 8.0, 1.0, 9.0, 2.0];
        assert_eq!(merge_sort(&v, true), vec![1.0, 2.0, 3.0, 5.0, 8.0, 9.0]);
    }

    #[test]
    fn test_merge_sort_descending() {
        let v = [5.0, 3.0, 8.0, 1.0];
        assert_eq!(merge_sort(&v, false), vec![8.0, 5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_merge_sort_empty_and_single() {
        assert_eq!(merge_sort(&[], true), Vec::<f64>::new());
        assert_eq!(merge_sort(&[7.0], true), vec![7.0]);
    }

    #[test]
    fn test_merge_sort_duplicates() {
        let v = [2.0, 1.0, 2.0, 1.0];
        assert_eq!(merge_sort(&v, true), vec![1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_merge_sort_stability_ascending() {
        // Tag duplicates with a secondary id; equal keys must keep order.
        let v = [(0, 2.0), (1, 1.0), (2, 2.0), (3, 1.0), (4, 2.0)];
        let sorted = merge_sort_by(&v, |t| t.1, true);
        assert_eq!(
            sorted,
            vec![(1, 1.0), (3, 1.0), (0, 2.0), (2, 2.0), (4, 2.0)]
        );
    }

    #[test]
    fn test_merge_sort_stability_descending() {
        let v = [(0, 2.0), (1, 1.0), (2, 2.0), (3, 1.0)];
        let sorted = merge_sort_by(&v, |t| t.1, false);
        assert_eq!(sorted, vec![(0, 2.0), (2, 2.0), (1, 1.0), (3, 1.0)]);
    }

    #[test]
    fn test_quick_select_all_ranks() {
        let v = [9.0, 1.0, 8.0, 2.0, 7.0, 3.0];
        let sorted = merge_sort(&v, true);
        for (k, expected) in sorted.iter().enumerate() {
            assert_eq!(quick_select(&v, k), Some(*expected), "k = {k}");
        }
    }

    #[test]
    fn test_quick_select_out_of_range() {
        assert_eq!(quick_select(&[1.0, 2.0], 2), None);
        assert_eq!(quick_select(&[], 0), None);
    }

    #[test]
    fn test_quick_select_sorted_input() {
        // Worst case for the fixed pivot, still correct.
        let v: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert_eq!(quick_select(&v, 25), Some(25.0));
    }

    #[test]
    fn test_quick_select_duplicates() {
        let v = [5.0, 5.0, 5.0, 1.0];
        assert_eq!(quick_select(&v, 0), Some(1.0));
        assert_eq!(quick_select(&v, 3), Some(5.0));
    }

    #[test]
    fn test_quick_select_does_not_mutate() {
        let v = [3.0, 1.0, 2.0];
        let _ = quick_select(&v, 1);
        assert_eq!(v, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_binary_search_hit() {
        let v = [1.0, 3.0, 5.0, 7.0, 9.0];
        for (i, &x) in v.iter().enumerate() {
            assert_eq!(binary_search(&v, x), Some(i));
        }
    }

    #[test]
    fn test_binary_search_miss() {
        let v = [1.0, 3.0, 5.0];
        assert_eq!(binary_search(&v, 0.0), None);
        assert_eq!(binary_search(&v, 4.0), None);
        assert_eq!(binary_search(&v, 6.0), None);
    }

    #[test]
    fn test_binary_search_empty() {
        assert_eq!(binary_search(&[], 1.0), None);
    }

    #[test]
    fn test_binary_search_by_key() {
        let trips = [("a", 2.0), ("b", 4.0), ("c", 6.0)];
        assert_eq!(binary_search_by(&trips, |t| t.1, 4.0), Some(1));
        assert_eq!(binary_search_by(&trips, |t| t.1, 5.0), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e9_f64..1e9, 0..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn merge_sort_output_is_sorted(data in finite_vec(100), ascending in any::<bool>()) {
            let sorted = merge_sort(&data, ascending);
            for w in sorted.windows(2) {
                if ascending {
                    prop_assert!(w[0] <= w[1]);
                } else {
                    prop_assert!(w[0] >= w[1]);
                }
            }
        }

        #[test]
        fn merge_sort_is_permutation(data in finite_vec(100)) {
            let mut sorted = merge_sort(&data, true);
            let mut reference = data.clone();
            reference.sort_by(f64::total_cmp);
            sorted.sort_by(f64::total_cmp);
            prop_assert_eq!(sorted, reference);
        }

        #[test]
        fn merge_sort_preserves_tie_order(
            keys in proptest::collection::vec(0_u8..4, 0..60),
        ) {
            // Few distinct keys force many ties.
            let tagged: Vec<(usize, f64)> =
                keys.iter().enumerate().map(|(i, &k)| (i, k as f64)).collect();
            let sorted = merge_sort_by(&tagged, |t| t.1, true);
            for w in sorted.windows(2) {
                if w[0].1 == w[1].1 {
                    prop_assert!(w[0].0 < w[1].0, "tie order broken: {:?}", w);
                }
            }
        }

        #[test]
        fn quick_select_matches_sorted(data in finite_vec(80), k in 0_usize..80) {
            let selected = quick_select(&data, k);
            let sorted = merge_sort(&data, true);
            prop_assert_eq!(selected, sorted.get(k).copied());
        }

        #[test]
        fn binary_search_finds_members(data in finite_vec(80)) {
            let sorted = merge_sort(&data, true);
            for &x in &sorted {
                let idx = binary_search(&sorted, x);
                prop_assert!(idx.is_some());
                prop_assert_eq!(sorted[idx.unwrap()], x);
            }
        }
    }
}
