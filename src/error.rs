//! Error types shared by every scan entry point.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while preparing or running a scan.
///
/// A scan that fails part-way leaves its output in a partially written,
/// unspecified state. There is no rollback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input and output views of an out-of-place scan differ in length.
    #[error("length mismatch: input has {input} elements, output has {output}")]
    LengthMismatch {
        /// Length of the input view.
        input: usize,
        /// Length of the output view.
        output: usize,
    },

    /// A view handed to the scan is not laid out contiguously in memory.
    #[error("view is not contiguous in memory")]
    NonContiguous,

    /// A checked arithmetic operator overflowed.
    #[error("arithmetic overflow in operator `{operator}`")]
    Overflow {
        /// Name of the operator that overflowed.
        operator: &'static str,
    },

    /// A user supplied operator failed.
    #[error("operator failed: {0}")]
    Operator(#[source] Box<dyn core::error::Error + Send + Sync>),

    /// The dedicated worker pool could not be created.
    #[cfg(feature = "rayon")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    #[test]
    fn length_mismatch_message_names_both_lengths() {
        let err = Error::LengthMismatch {
            input: 3,
            output: 4,
        };

        assert_eq!(
            err.to_string(),
            "length mismatch: input has 3 elements, output has 4"
        );
    }

    #[test]
    fn overflow_message_names_operator() {
        let err = Error::Overflow {
            operator: "checked_plus",
        };

        assert_eq!(
            err.to_string(),
            "arithmetic overflow in operator `checked_plus`"
        );
    }

    #[test]
    fn operator_error_keeps_source() {
        let err = Error::Operator("negative input".into());

        assert!(core::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "operator failed: negative input");
    }
}
