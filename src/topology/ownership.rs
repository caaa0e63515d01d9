//! Ownership of local entities on a distributed mesh.
//!
//! Local indices of each dimension are split by the ghost offset: indices
//! below it are owned by this partition, indices at or above it are ghost
//! copies of entities owned by a neighbour.

use serde::{Deserialize, Serialize};

/// Whether a local entity is owned by this partition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Ownership {
    /// Owned by the current partition.
    Owned,
    /// Replicated from a neighbouring partition for overlap computation.
    Ghost,
}

impl Ownership {
    /// Classify `index` against a ghost offset.
    #[inline]
    pub fn of(index: usize, ghost_offset: usize) -> Self {
        if index < ghost_offset {
            Ownership::Owned
        } else {
            Ownership::Ghost
        }
    }

    /// Returns true for [`Ownership::Ghost`].
    #[inline]
    pub fn is_ghost(self) -> bool {
        matches!(self, Ownership::Ghost)
    }
}
