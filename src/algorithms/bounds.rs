//! Range validation shared by the ranged array routines

use crate::error::{check_offset_length, check_range, Result};

/// Validate that `from..to` is a well-formed range within a slice of `len`.
///
/// Fails with `InvalidRange` when `from > to` and with `OutOfBounds` when
/// `to > len`.
#[inline]
pub fn ensure_from_to(len: usize, from: usize, to: usize) -> Result<()> {
    check_range(from, to, len)
}

/// Validate that `offset..offset + length` lies within a slice of `len`
#[inline]
pub fn ensure_offset_length(len: usize, offset: usize, length: usize) -> Result<()> {
    check_offset_length(offset, length, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimoraError;

    #[test]
    fn test_ensure_from_to() {
        assert!(ensure_from_to(10, 0, 10).is_ok());
        assert!(ensure_from_to(10, 4, 4).is_ok());
        assert!(matches!(
            ensure_from_to(10, 5, 4),
            Err(PrimoraError::InvalidRange { .. })
        ));
        assert!(matches!(
            ensure_from_to(10, 0, 11),
            Err(PrimoraError::OutOfBounds { index: 11, size: 10 })
        ));
    }

    #[test]
    fn test_ensure_offset_length() {
        assert!(ensure_offset_length(10, 2, 8).is_ok());
        assert!(ensure_offset_length(0, 0, 0).is_ok());
        assert!(ensure_offset_length(10, 2, 9).is_err());
        assert!(ensure_offset_length(10, 11, 0).is_err());
    }
}
