//! Three-way quicksort
//!
//! Bentley–McIlroy partitioning: elements equal to the pivot are swapped to
//! both ends during the scan and moved to the middle afterwards, so runs of
//! duplicates are never recursed into. The pivot is the median of three
//! elements for short slices and a ninther (median of three medians of three,
//! sampled `len / 8` apart) above the median-of-nine threshold. Short slices
//! are finished by selection sort. Not stable.

use super::bounds::ensure_from_to;
use super::simple_sort::selection_sort_by;
use super::{parallelism_available, Thresholds};
use crate::error::Result;
use crate::scalar::NaturalOrder;
use std::cmp::Ordering;

/// Quicksort in natural order
pub fn quick_sort<T: Copy + NaturalOrder>(x: &mut [T]) {
    quick_sort_by(x, T::natural_cmp);
}

/// Quicksort under `cmp`
pub fn quick_sort_by<T, F>(x: &mut [T], mut cmp: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_with(x, &mut cmp, Thresholds::DEFAULT);
}

/// Quicksort of `x[from..to]` in natural order
pub fn quick_sort_range<T>(x: &mut [T], from: usize, to: usize) -> Result<()>
where
    T: Copy + NaturalOrder,
{
    quick_sort_range_by(x, from, to, T::natural_cmp)
}

/// Quicksort of `x[from..to]` under `cmp`
pub fn quick_sort_range_by<T, F>(x: &mut [T], from: usize, to: usize, cmp: F) -> Result<()>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    ensure_from_to(x.len(), from, to)?;
    quick_sort_by(&mut x[from..to], cmp);
    Ok(())
}

/// Unstable sort in natural order
pub fn unstable_sort<T: Copy + NaturalOrder>(x: &mut [T]) {
    quick_sort(x);
}

pub(crate) fn quick_sort_with<T, F>(x: &mut [T], cmp: &mut F, thresholds: Thresholds)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if x.len() < thresholds.base {
        selection_sort_by(x, cmp);
        return;
    }
    let (lower, upper) = partition(x, cmp, thresholds);
    let len = x.len();
    if lower > 1 {
        quick_sort_with(&mut x[..lower], cmp, thresholds);
    }
    if upper > 1 {
        quick_sort_with(&mut x[len - upper..], cmp, thresholds);
    }
}

/// Index of the median of `x[a]`, `x[b]`, `x[c]`
#[inline]
fn med3<T, F>(x: &[T], a: usize, b: usize, c: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let ab = cmp(&x[a], &x[b]);
    let ac = cmp(&x[a], &x[c]);
    let bc = cmp(&x[b], &x[c]);
    if ab == Ordering::Less {
        if bc == Ordering::Less {
            b
        } else if ac == Ordering::Less {
            c
        } else {
            a
        }
    } else if bc == Ordering::Greater {
        b
    } else if ac == Ordering::Greater {
        c
    } else {
        a
    }
}

/// Swap the `n`-element blocks starting at `a` and `b`
#[inline]
fn swap_blocks<T>(x: &mut [T], a: usize, b: usize, n: usize) {
    for i in 0..n {
        x.swap(a + i, b + i);
    }
}

/// Three-way partition around a sampled pivot.
///
/// Returns `(lower, upper)`: after the call `x[..lower]` holds the elements
/// less than the pivot and `x[len - upper..]` those greater than it; everything
/// in between equals the pivot.
fn partition<T, F>(x: &mut [T], cmp: &mut F, thresholds: Thresholds) -> (usize, usize)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = x.len();

    let mut l = 0;
    let mut m = len / 2;
    let mut n = len - 1;
    if len > thresholds.median_of_nine {
        let s = len / 8;
        l = med3(x, l, l + s, l + 2 * s, cmp);
        m = med3(x, m - s, m, m + s, cmp);
        n = med3(x, n - 2 * s, n - s, n, cmp);
    }
    m = med3(x, l, m, n, cmp);
    let v = x[m];

    // a..b and c..d bracket the unscanned region; equal keys park at the ends.
    // c can step below zero, hence signed indices.
    let mut a: isize = 0;
    let mut b: isize = 0;
    let mut c: isize = len as isize - 1;
    let mut d: isize = c;
    loop {
        while b <= c {
            let comparison = cmp(&x[b as usize], &v);
            if comparison == Ordering::Greater {
                break;
            }
            if comparison == Ordering::Equal {
                x.swap(a as usize, b as usize);
                a += 1;
            }
            b += 1;
        }
        while c >= b {
            let comparison = cmp(&x[c as usize], &v);
            if comparison == Ordering::Less {
                break;
            }
            if comparison == Ordering::Equal {
                x.swap(c as usize, d as usize);
                d -= 1;
            }
            c -= 1;
        }
        if b > c {
            break;
        }
        x.swap(b as usize, c as usize);
        b += 1;
        c -= 1;
    }

    // Move the parked equal keys to the middle
    let n = len as isize;
    let s = a.min(b - a);
    swap_blocks(x, 0, (b - s) as usize, s as usize);
    let s = (d - c).min(n - d - 1);
    swap_blocks(x, b as usize, (n - s) as usize, s as usize);

    ((b - a) as usize, (d - c) as usize)
}

// ============================================================================
// Parallel variant
// ============================================================================

/// Parallel quicksort in natural order
pub fn parallel_quick_sort<T>(x: &mut [T])
where
    T: Copy + Send + NaturalOrder,
{
    parallel_quick_sort_by(x, T::natural_cmp);
}

/// Parallel quicksort under `cmp`.
///
/// Partitions are sorted on the rayon pool while they stay above the parallel
/// threshold. The result equals that of [`quick_sort_by`] on the same input.
pub fn parallel_quick_sort_by<T, F>(x: &mut [T], cmp: F)
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    parallel_quick_sort_with(x, &cmp, Thresholds::DEFAULT);
}

pub(crate) fn parallel_quick_sort_with<T, F>(x: &mut [T], cmp: &F, thresholds: Thresholds)
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if x.len() < thresholds.fork_cutoff() || !parallelism_available() {
        quick_sort_with(x, &mut |p: &T, q: &T| cmp(p, q), thresholds);
        return;
    }
    parallel_quick_sort_rec(x, cmp, thresholds);
}

/// Parallel quicksort of `x[from..to]` under `cmp`
pub fn parallel_quick_sort_range_by<T, F>(
    x: &mut [T],
    from: usize,
    to: usize,
    cmp: F,
) -> Result<()>
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    ensure_from_to(x.len(), from, to)?;
    parallel_quick_sort_by(&mut x[from..to], cmp);
    Ok(())
}

fn parallel_quick_sort_rec<T, F>(x: &mut [T], cmp: &F, thresholds: Thresholds)
where
    T: Copy + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let len = x.len();
    // Below the base case the sequential sort no longer partitions
    if len < thresholds.fork_cutoff() {
        quick_sort_with(x, &mut |p: &T, q: &T| cmp(p, q), thresholds);
        return;
    }

    let (lower, upper) = partition(x, &mut |p: &T, q: &T| cmp(p, q), thresholds);
    let (head, tail) = x.split_at_mut(len - upper);
    let head = &mut head[..lower];
    rayon::join(
        || {
            if lower > 1 {
                parallel_quick_sort_rec(head, cmp, thresholds);
            }
        },
        || {
            if upper > 1 {
                parallel_quick_sort_rec(tail, cmp, thresholds);
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::with_pool;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vec(len: usize, seed: u64, range: i64) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-range..range)).collect()
    }

    #[test]
    fn test_quick_sort_reference() {
        let mut a = vec![5, 3, 1, 4, 1, 5, 9, 2, 6];
        quick_sort(&mut a);
        assert_eq!(a, vec![1, 1, 2, 3, 4, 5, 5, 6, 9]);
    }

    #[test]
    fn test_quick_sort_lengths_around_thresholds() {
        for &len in &[0usize, 1, 2, 15, 16, 17, 127, 128, 129, 1000, 10_000] {
            let v = random_vec(len, len as u64 + 1, 1_000_000);
            let mut a = v.clone();
            quick_sort(&mut a);
            let mut expected = v;
            expected.sort();
            assert_eq!(a, expected, "len {}", len);
        }
    }

    #[test]
    fn test_quick_sort_many_duplicates() {
        let v = random_vec(5000, 17, 3);
        let mut a = v.clone();
        quick_sort(&mut a);
        let mut expected = v;
        expected.sort();
        assert_eq!(a, expected);

        let mut same = vec![7u16; 1000];
        quick_sort(&mut same);
        assert!(same.iter().all(|&x| x == 7));
    }

    #[test]
    fn test_quick_sort_by_descending() {
        let mut a: Vec<u32> = (0..300).collect();
        quick_sort_by(&mut a, |x, y| y.cmp(x));
        assert_eq!(a, (0..300).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_quick_sort_range() {
        let mut a = vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        quick_sort_range_by(&mut a, 0, 5, |x: &i32, y: &i32| x.cmp(y)).unwrap();
        assert_eq!(a, vec![5, 6, 7, 8, 9, 4, 3, 2, 1, 0]);
        assert!(quick_sort_range_by(&mut a, 6, 5, |x: &i32, y: &i32| x.cmp(y)).is_err());

        let mut b = vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        quick_sort_range(&mut b, 5, 10).unwrap();
        assert_eq!(b, vec![9, 8, 7, 6, 5, 0, 1, 2, 3, 4]);
        assert!(quick_sort_range(&mut b, 0, 11).is_err());

        let mut c = random_vec(20_000, 8, 50);
        let expected_tail = c[10_000..].to_vec();
        with_pool(4, || parallel_quick_sort_range_by(&mut c, 0, 10_000, |x, y| x.cmp(y)))
            .unwrap();
        assert!(c[..10_000].windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(c[10_000..], expected_tail[..]);
    }

    #[test]
    fn test_partition_brackets_pivot() {
        let mut x = random_vec(500, 23, 10);
        let len = x.len();
        let mut cmp = |a: &i64, b: &i64| a.cmp(b);
        let (lower, upper) = partition(&mut x, &mut cmp, Thresholds::DEFAULT);
        assert!(lower + upper < len);
        let pivot = x[lower];
        assert!(x[..lower].iter().all(|&e| e < pivot));
        assert!(x[lower..len - upper].iter().all(|&e| e == pivot));
        assert!(x[len - upper..].iter().all(|&e| e > pivot));
    }

    #[test]
    fn test_float_sort_with_nan_and_signed_zero() {
        let mut a = vec![f32::NAN, 2.0, -0.0, 0.0, -3.5, f32::INFINITY, 0.0, -0.0];
        a.extend((0..40).map(|i| i as f32 * 0.5));
        quick_sort(&mut a);
        assert!(a.last().map_or(false, |x| x.is_nan()));
        assert_eq!(a[0], -3.5);
        assert!(a[1] == 0.0 && a[1].is_sign_negative());
        assert!(a[2] == 0.0 && a[2].is_sign_negative());
        assert!(a[3] == 0.0 && a[3].is_sign_positive());
    }

    #[test]
    fn test_parallel_quick_sort_matches_sequential() {
        let v = random_vec(60_000, 42, 1 << 20);
        let mut sequential = v.clone();
        quick_sort(&mut sequential);

        let mut parallel = v;
        parallel_quick_sort(&mut parallel);
        assert_eq!(parallel, sequential);

        let mut small = random_vec(50, 1, 100);
        let mut expected = small.clone();
        expected.sort();
        parallel_quick_sort_by(&mut small, |a, b| a.cmp(b));
        assert_eq!(small, expected);
    }

    /// Keys with many ties, tagged with their input position
    fn tagged_vec(len: usize, seed: u64, keys: u32) -> Vec<(u32, u32)> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len as u32).map(|i| (rng.gen_range(0..keys), i)).collect()
    }

    #[test]
    fn test_parallel_quick_sort_forks_identically() {
        let by_key = |a: &(u32, u32), b: &(u32, u32)| a.0.cmp(&b.0);
        for seed in 0..4 {
            let v = tagged_vec(50_000, seed, 64);
            let mut sequential = v.clone();
            quick_sort_by(&mut sequential, by_key);

            let mut parallel = v;
            with_pool(4, || parallel_quick_sort_by(&mut parallel, by_key));
            assert_eq!(parallel, sequential, "seed {}", seed);
        }
    }

    #[test]
    fn test_parallel_quick_sort_cutoff_below_base() {
        let thresholds = Thresholds {
            base: 16,
            median_of_nine: 128,
            parallel: 2,
        };
        let by_key = |a: &(u32, u32), b: &(u32, u32)| a.0.cmp(&b.0);
        for seed in 0..200 {
            let v = tagged_vec(12, seed, 8);
            let mut sequential = v.clone();
            quick_sort_with(&mut sequential, &mut |a, b| by_key(a, b), thresholds);

            let mut parallel = v;
            with_pool(4, || parallel_quick_sort_with(&mut parallel, &by_key, thresholds));
            assert_eq!(parallel, sequential, "seed {}", seed);
        }
    }
}
