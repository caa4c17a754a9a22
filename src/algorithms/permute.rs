//! Order-changing utilities: shuffle and reverse

use super::bounds::ensure_from_to;
use crate::error::Result;
use rand::Rng;

/// Fisher–Yates shuffle of the whole slice
pub fn shuffle<T, R: Rng + ?Sized>(a: &mut [T], rng: &mut R) {
    for i in (1..a.len()).rev() {
        let p = rng.gen_range(0..=i);
        a.swap(i, p);
    }
}

/// Fisher–Yates shuffle of `a[from..to]`
pub fn shuffle_range<T, R: Rng + ?Sized>(
    a: &mut [T],
    from: usize,
    to: usize,
    rng: &mut R,
) -> Result<()> {
    ensure_from_to(a.len(), from, to)?;
    shuffle(&mut a[from..to], rng);
    Ok(())
}

/// Reverse the whole slice
pub fn reverse<T>(a: &mut [T]) {
    a.reverse();
}

/// Reverse `a[from..to]`
pub fn reverse_range<T>(a: &mut [T], from: usize, to: usize) -> Result<()> {
    ensure_from_to(a.len(), from, to)?;
    a[from..to].reverse();
    Ok(())
}
