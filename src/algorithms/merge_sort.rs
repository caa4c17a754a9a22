//! Stable merge sorts
//!
//! ## Buffered merge sort
//!
//! Top-down recursion with a single auxiliary buffer allocated once. The slice
//! and the buffer start with identical contents and trade roles at every level:
//! each call sorts its halves *into the buffer* and merges them back, so no
//! level copies before merging. A merge is skipped entirely when the two runs
//! are already in order.
//!
//! ## Memory-free merge sort
//!
//! Same recursion shape, but runs are merged in place by block rotation, so the
//! sort allocates nothing at the price of `O(n log² n)` moves.
//!
//! ## Parallel merge sorts
//!
//! Large slices split into halves sorted on the rayon pool with
//! [`rayon::join`]; the final merge of each level runs on the joining thread.
//! Both the buffered and the memory-free sort have a parallel form, and each
//! produces exactly the output of its sequential counterpart.

use super::bounds::ensure_from_to;
use super::simple_sort::insertion_sort_by;
use super::{parallelism_available, Thresholds};
use crate::error::Result;
use crate::scalar::NaturalOrder;
use std::cmp::Ordering;

/// Stable merge sort in natural order
pub fn merge_sort<T: Copy + NaturalOrder>(a: &mut [T]) {
    merge_sort_by(a, T::natural_cmp);
}

/// Stable merge sort under `cmp`
pub fn merge_sort_by<T, F>(a: &mut [T], mut cmp: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort_with(a, &mut cmp, Thresholds::DEFAULT);
}

/// Stable merge sort of `a[from..to]` in natural order
pub fn merge_sort_range<T: Copy + NaturalOrder>(a: &mut [T], from: usize, to: usize) -> Result<()> {
    merge_sort_range_by(a, from, to, T::natural_cmp)
}

/// Stable merge sort of `a[from..to]` under `cmp`
pub fn merge_sort_range_by<T, F>(a: &mut [T], from: usize, to: usize, cmp: F) -> Result<()>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    ensure_from_to(a.len(), from, to)?;
    merge_sort_by(&mut a[from..to], cmp);
    Ok(())
}

/// Stable sort in natural order
pub fn stable_sort<T: Copy + NaturalOrder>(a: &mut [T]) {
    merge_sort(a);
}

pub(crate) fn merge_sort_with<T, F>(a: &mut [T], cmp: &mut F, thresholds: Thresholds)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if a.len() < thresholds.base {
        insertion_sort_by(a, cmp);
        return;
    }
    let mut supp = a.to_vec();
    sort_from_support(a, &mut supp, cmp, thresholds.base);
}

/// Sort `a`, whose contents equal `supp`, using `supp` as scratch.
fn sort_from_support<T, F>(a: &mut [T], supp: &mut [T], cmp: &mut F, base: usize)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = a.len();
    if len < base {
        insertion_sort_by(a, &mut *cmp);
        return;
    }

    let mid = len / 2;
    {
        let (supp_lo, supp_hi) = supp.split_at_mut(mid);
        let (a_lo, a_hi) = a.split_at_mut(mid);
        sort_from_support(supp_lo, a_lo, cmp, base);
        sort_from_support(supp_hi, a_hi, cmp, base);
    }

    merge_runs(supp, mid, a, cmp);
}

/// Merge the sorted runs `src[..mid]` and `src[mid..]` into `dst`
fn merge_runs<T, F>(src: &[T], mid: usize, dst: &mut [T], cmp: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = src.len();
    if cmp(&src[mid - 1], &src[mid]) != Ordering::Greater {
        dst.copy_from_slice(src);
        return;
    }

    let (mut p, mut q) = (0, mid);
    for slot in dst.iter_mut() {
        if q >= len || (p < mid && cmp(&src[p], &src[q]) != Ordering::Greater) {
            *slot = src[p];
            p += 1;
        } else {
            *slot = src[q];
            q += 1;
        }
    }
}

// ============================================================================
// Memory-free variant
// ============================================================================

/// Stable merge sort in natural order that allocates nothing
pub fn in_place_merge_sort<T: NaturalOrder>(a: &mut [T]) {
    in_place_merge_sort_by(a, T::natural_cmp);
}

/// Stable merge sort under `cmp` that allocates nothing
pub fn in_place_merge_sort_by<T, F>(a: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    in_place_sort(a, &mut cmp);
}

/// Memory-free stable sort of `a[from..to]` in natural order
pub fn in_place_merge_sort_range<T: NaturalOrder>(
    a: &mut [T],
    from: usize,
    to: usize,
) -> Result<()> {
    in_place_merge_sort_range_by(a, from, to, T::natural_cmp)
}

/// Memory-free stable sort of `a[from..to]` under `cmp`
pub fn in_place_merge_sort_range_by<T, F>(a: &mut [T], from: usize, to: usize, cmp: F) -> Result<()>
where
    F: FnMut(&T, &T) -> Ordering,
{
    ensure_from_to(a.len(), from, to)?;
    in_place_merge_sort_by(&mut a[from..to], cmp);
    Ok(())
}

fn in_place_sort<T, F>(a: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = a.len();
    if len < Thresholds::DEFAULT.base {
        insertion_sort_by(a, &mut *cmp);
        return;
    }

    let mid = len / 2;
    in_place_sort(&mut a[..mid], cmp);
    in_place_sort(&mut a[mid..], cmp);

    if cmp(&a[mid - 1], &a[mid]) != Ordering::Greater {
        return;
    }
    in_place_merge(a, mid, cmp);
}

/// Merge the sorted runs `a[..mid]` and `a[mid..]` in place
fn in_place_merge<T, F>(a: &mut [T], mid: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = a.len();
    if mid == 0 || mid >= len {
        return;
    }

    if len == 2 {
        if cmp(&a[1], &a[0]) == Ordering::Less {
            a.swap(0, 1);
        }
        return;
    }

    // A single element slides to its place with one rotation
    if mid == 1 {
        let pos = lower_bound(a, mid, len, 0, cmp);
        a[..pos].rotate_left(1);
        return;
    }
    if len - mid == 1 {
        let pos = upper_bound(a, 0, mid, mid, cmp);
        a[pos..].rotate_right(1);
        return;
    }

    let (first_cut, second_cut) = if mid > len - mid {
        let first_cut = mid / 2;
        (first_cut, lower_bound(a, mid, len, first_cut, cmp))
    } else {
        let second_cut = mid + (len - mid) / 2;
        (upper_bound(a, 0, mid, second_cut, cmp), second_cut)
    };

    if first_cut != mid && mid != second_cut {
        a[first_cut..second_cut].rotate_left(mid - first_cut);
    }

    let new_mid = first_cut + (second_cut - mid);
    in_place_merge(&mut a[..new_mid], first_cut, cmp);
    in_place_merge(&mut a[new_mid..], second_cut - new_mid, cmp);
}

/// First index in `from..to` whose element is not less than `a[pos]`
fn lower_bound<T, F>(a: &[T], mut from: usize, to: usize, pos: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut len = to - from;
    while len > 0 {
        let half = len / 2;
        let middle = from + half;
        if cmp(&a[middle], &a[pos]) == Ordering::Less {
            from = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    from
}

/// First index in `from..to` whose element is greater than `a[pos]`
fn upper_bound<T, F>(a: &[T], mut from: usize, to: usize, pos: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut len = to - from;
    while len > 0 {
        let half = len / 2;
        let middle = from + half;
        if cmp(&a[pos], &a[middle]) == Ordering::Less {
            len = half;
        } else {
            from = middle + 1;
            len -= half + 1;
        }
    }
    from
}

// ============================================================================
// Parallel variant
// ============================================================================

/// Stable parallel merge sort in natural order
pub fn parallel_merge_sort<T>(a: &mut [T])
where
    T: Copy + Send + NaturalOrder,
{
    parallel_merge_sort_by(a, T::natural_cmp);
}

/// Stable parallel merge sort under `cmp`.
///
/// Falls back to [`merge_sort_by`] below the parallel threshold or when the
/// rayon pool has a single thread.
pub fn parallel_merge_sort_by<T, F>(a: &mut [T], cmp: F)
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    parallel_merge_sort_with(a, &cmp, Thresholds::DEFAULT);
}

pub(crate) fn parallel_merge_sort_with<T, F>(a: &mut [T], cmp: &F, thresholds: Thresholds)
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if a.len() < thresholds.fork_cutoff() || !parallelism_available() {
        merge_sort_with(a, &mut |x: &T, y: &T| cmp(x, y), thresholds);
        return;
    }
    let mut supp = a.to_vec();
    parallel_sort_from_support(a, &mut supp, cmp, thresholds);
}

/// Stable parallel merge sort of `a[from..to]` under `cmp`
pub fn parallel_merge_sort_range_by<T, F>(a: &mut [T], from: usize, to: usize, cmp: F) -> Result<()>
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    ensure_from_to(a.len(), from, to)?;
    parallel_merge_sort_by(&mut a[from..to], cmp);
    Ok(())
}

fn parallel_sort_from_support<T, F>(a: &mut [T], supp: &mut [T], cmp: &F, thresholds: Thresholds)
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let len = a.len();
    if len < thresholds.fork_cutoff() {
        sort_from_support(a, supp, &mut |x: &T, y: &T| cmp(x, y), thresholds.base);
        return;
    }

    let mid = len / 2;
    {
        let (supp_lo, supp_hi) = supp.split_at_mut(mid);
        let (a_lo, a_hi) = a.split_at_mut(mid);
        rayon::join(
            || parallel_sort_from_support(supp_lo, a_lo, cmp, thresholds),
            || parallel_sort_from_support(supp_hi, a_hi, cmp, thresholds),
        );
    }

    merge_runs(supp, mid, a, &mut |x: &T, y: &T| cmp(x, y));
}

/// Stable parallel merge sort in natural order that allocates nothing
pub fn parallel_in_place_merge_sort<T>(a: &mut [T])
where
    T: Send + NaturalOrder,
{
    parallel_in_place_merge_sort_by(a, T::natural_cmp);
}

/// Stable parallel merge sort under `cmp` that allocates nothing.
///
/// Halves above the parallel threshold are sorted on the rayon pool and merged
/// by rotation on the joining thread; the result equals that of
/// [`in_place_merge_sort_by`].
pub fn parallel_in_place_merge_sort_by<T, F>(a: &mut [T], cmp: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if a.len() < Thresholds::DEFAULT.fork_cutoff() || !parallelism_available() {
        in_place_sort(a, &mut |x: &T, y: &T| cmp(x, y));
        return;
    }
    parallel_in_place_sort(a, &cmp, Thresholds::DEFAULT.fork_cutoff());
}

fn parallel_in_place_sort<T, F>(a: &mut [T], cmp: &F, cutoff: usize)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let len = a.len();
    if len < cutoff {
        in_place_sort(a, &mut |x: &T, y: &T| cmp(x, y));
        return;
    }

    let mid = len / 2;
    {
        let (lo, hi) = a.split_at_mut(mid);
        rayon::join(
            || parallel_in_place_sort(lo, cmp, cutoff),
            || parallel_in_place_sort(hi, cmp, cutoff),
        );
    }

    if cmp(&a[mid - 1], &a[mid]) != Ordering::Greater {
        return;
    }
    in_place_merge(a, mid, &mut |x: &T, y: &T| cmp(x, y));
}
