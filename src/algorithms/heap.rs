//! Binary heaps stored in slices
//!
//! The heap is the prefix `heap[..size]` laid out implicitly (children of `i`
//! at `2i + 1` and `2i + 2`) with the smallest element under the order at the
//! root. The maintenance routines return where the moved element came to rest.

use super::bounds::ensure_from_to;
use crate::error::Result;
use crate::scalar::NaturalOrder;
use std::cmp::Ordering;

/// Move `heap[i]` down until neither child is smaller; returns its new index
pub fn shift_down<T, F>(heap: &mut [T], size: usize, mut i: usize, mut cmp: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(size <= heap.len());
    loop {
        let left = 2 * i + 1;
        if left >= size {
            break;
        }
        let right = left + 1;
        let child = if right < size && cmp(&heap[right], &heap[left]) == Ordering::Less {
            right
        } else {
            left
        };
        if cmp(&heap[i], &heap[child]) != Ordering::Greater {
            break;
        }
        heap.swap(i, child);
        i = child;
    }
    i
}

/// Move `heap[i]` up until its parent is not larger; returns its new index
pub fn shift_up<T, F>(heap: &mut [T], mut i: usize, mut cmp: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    while i != 0 {
        let parent = (i - 1) / 2;
        if cmp(&heap[parent], &heap[i]) != Ordering::Greater {
            break;
        }
        heap.swap(parent, i);
        i = parent;
    }
    i
}

/// Arrange `heap[..size]` into a heap
pub fn heapify<T, F>(heap: &mut [T], size: usize, mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut i = size / 2;
    while i != 0 {
        i -= 1;
        shift_down(heap, size, i, &mut cmp);
    }
}

/// [`shift_down`] in natural order
pub fn shift_down_natural<T: NaturalOrder>(heap: &mut [T], size: usize, i: usize) -> usize {
    shift_down(heap, size, i, T::natural_cmp)
}

/// [`shift_up`] in natural order
pub fn shift_up_natural<T: NaturalOrder>(heap: &mut [T], i: usize) -> usize {
    shift_up(heap, i, T::natural_cmp)
}

/// [`heapify`] in natural order
pub fn heapify_natural<T: NaturalOrder>(heap: &mut [T], size: usize) {
    heapify(heap, size, T::natural_cmp);
}

/// Heap sort in natural order
pub fn heap_sort<T: NaturalOrder>(a: &mut [T]) {
    heap_sort_by(a, T::natural_cmp);
}

/// Heap sort under `cmp`; not stable, no allocation
pub fn heap_sort_by<T, F>(a: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // A min-heap under the reversed order keeps the largest element at the root
    let mut reversed = |x: &T, y: &T| cmp(y, x);
    let len = a.len();
    heapify(a, len, &mut reversed);
    for end in (1..len).rev() {
        a.swap(0, end);
        shift_down(a, end, 0, &mut reversed);
    }
}

/// Heap sort of `a[from..to]` in natural order
pub fn heap_sort_range<T: NaturalOrder>(a: &mut [T], from: usize, to: usize) -> Result<()> {
    heap_sort_range_by(a, from, to, T::natural_cmp)
}

/// Heap sort of `a[from..to]` under `cmp`
pub fn heap_sort_range_by<T, F>(a: &mut [T], from: usize, to: usize, cmp: F) -> Result<()>
where
    F: FnMut(&T, &T) -> Ordering,
{
    ensure_from_to(a.len(), from, to)?;
    heap_sort_by(&mut a[from..to], cmp);
    Ok(())
}
