//! Classification errors

use untp_object::ShapeError;

/// Why a component could not be classified
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// A `LocalStorageLoader` did not hold exactly one nested component
    #[error("expected exactly one nested component, found {found}")]
    MultipleNestedComponents {
        /// Number of nested components present
        found: usize,
    },

    /// A field the classifier reads had the wrong shape
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl ClassifyError {
    /// Whether the caller should skip the component and carry on
    ///
    /// Shape faults are fatal for the document; a nested-component count
    /// mismatch is only reported.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MultipleNestedComponents { .. })
    }
}
