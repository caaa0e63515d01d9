//! Structural self-checks for topology tables.
//!
//! Checks run after every connectivity computation in debug builds and when
//! the `check-invariants` or `strict-invariants` feature is enabled.

use crate::mesh_error::MeshError;

/// Types whose internal consistency can be validated.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panic on the first violation when invariant checking is enabled.
    #[inline]
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "invariant check failed");
    }
}

/// Run a fallible check and panic with context when invariant checking is enabled.
///
/// Expands to nothing in release builds without the invariant features.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!("[invariants] {}: {}", format_args!($($ctx)*), e);
        }
    };
}
