//! Error handling for the primora library
//!
//! Every failure in this crate is a caller error surfaced immediately: a
//! mutation attempted on an immutable collection, a query on an empty one, or a
//! malformed range handed to the array utilities.

use thiserror::Error;

/// Main error type for the primora library
#[derive(Error, Debug)]
pub enum PrimoraError {
    /// I/O related errors (configuration files only)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The collection deliberately does not offer this capability
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: String,
    },

    /// First/last query on an empty collection, or a cursor moved past its bound
    #[error("No such element: {context}")]
    NoSuchElement {
        /// What was being looked for
        context: String,
    },

    /// Malformed range, such as `from > to`
    #[error("Invalid range: {message}")]
    InvalidRange {
        /// Error message describing the range
        message: String,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Invalid argument passed to a constructor or helper
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message describing the argument
        message: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl PrimoraError {
    /// Create an unsupported operation error
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create a no such element error
    pub fn no_such_element<S: Into<String>>(context: S) -> Self {
        Self::NoSuchElement {
            context: context.into(),
        }
    }

    /// Create an invalid range error
    pub fn invalid_range<S: Into<String>>(message: S) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::UnsupportedOperation { .. } => false,
            Self::NoSuchElement { .. } => false,
            Self::InvalidRange { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::InvalidArgument { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::UnsupportedOperation { .. } => "unsupported",
            Self::NoSuchElement { .. } => "no_such_element",
            Self::InvalidRange { .. } => "range",
            Self::OutOfBounds { .. } => "bounds",
            Self::InvalidArgument { .. } => "argument",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PrimoraError>;

/// Assert that the half-open range `start..end` lies within a slice of `size`
#[inline]
pub fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end {
        return Err(PrimoraError::invalid_range(format!(
            "start {} > end {}",
            start, end
        )));
    }
    if end > size {
        return Err(PrimoraError::out_of_bounds(end, size));
    }
    Ok(())
}

/// Assert that `offset..offset + length` lies within a slice of `size`
#[inline]
pub fn check_offset_length(offset: usize, length: usize, size: usize) -> Result<()> {
    let end = offset
        .checked_add(length)
        .ok_or_else(|| PrimoraError::invalid_range(format!(
            "offset {} + length {} overflows",
            offset, length
        )))?;
    if end > size {
        return Err(PrimoraError::out_of_bounds(end, size));
    }
    Ok(())
}
