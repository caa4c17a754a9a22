//! Quadratic sorts for short slices
//!
//! Both run in place without allocation. Insertion sort is stable and finishes
//! merge sort's small runs; selection sort does the fewest writes and finishes
//! quicksort's.

use super::bounds::ensure_from_to;
use crate::error::Result;
use crate::scalar::NaturalOrder;
use std::cmp::Ordering;

/// Stable insertion sort in natural order
pub fn insertion_sort<T: NaturalOrder>(a: &mut [T]) {
    insertion_sort_by(a, T::natural_cmp);
}

/// Stable insertion sort under `cmp`
pub fn insertion_sort_by<T, F>(a: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..a.len() {
        let mut j = i;
        while j > 0 && cmp(&a[j], &a[j - 1]) == Ordering::Less {
            a.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Insertion sort of `a[from..to]` in natural order
pub fn insertion_sort_range<T: NaturalOrder>(a: &mut [T], from: usize, to: usize) -> Result<()> {
    ensure_from_to(a.len(), from, to)?;
    insertion_sort(&mut a[from..to]);
    Ok(())
}

/// Selection sort in natural order
pub fn selection_sort<T: NaturalOrder>(a: &mut [T]) {
    selection_sort_by(a, T::natural_cmp);
}

/// Selection sort under `cmp`; not stable
pub fn selection_sort_by<T, F>(a: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = a.len();
    for i in 0..len.saturating_sub(1) {
        let mut m = i;
        for j in i + 1..len {
            if cmp(&a[j], &a[m]) == Ordering::Less {
                m = j;
            }
        }
        if m != i {
            a.swap(i, m);
        }
    }
}

/// Selection sort of `a[from..to]` in natural order
pub fn selection_sort_range<T: NaturalOrder>(a: &mut [T], from: usize, to: usize) -> Result<()> {
    ensure_from_to(a.len(), from, to)?;
    selection_sort(&mut a[from..to]);
    Ok(())
}
