//! Compressed Sparse Row adjacency between two entity dimensions.
//!
//! A [`Connectivity`] maps each source entity to an ordered row of local
//! indices of target entities. Rows are contiguous slices of one index
//! array, so a cursor can borrow a row without copying it.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Immutable CSR adjacency table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    /// `offsets[i]..offsets[i + 1]` is the range of row `i` in `indices`.
    offsets: Vec<usize>,
    /// Concatenated rows.
    indices: Vec<usize>,
}

impl Default for Connectivity {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            indices: Vec::new(),
        }
    }
}

impl Connectivity {
    /// Build from an iterator of rows.
    ///
    /// # Example
    /// ```rust
    /// use mesh_entities::topology::connectivity::Connectivity;
    /// let c = Connectivity::from_rows([vec![3, 7, 1], vec![], vec![2]]);
    /// assert_eq!(c.num_entities(), 3);
    /// assert_eq!(c.row(0), &[3, 7, 1]);
    /// assert!(c.row(1).is_empty());
    /// ```
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[usize]>,
    {
        let mut offsets = vec![0];
        let mut indices = Vec::new();
        for row in rows {
            indices.extend_from_slice(row.as_ref());
            offsets.push(indices.len());
        }
        Self { offsets, indices }
    }

    /// Build from a flat array where every row has `width` entries.
    ///
    /// # Panics
    /// Panics if `width == 0` or `flat.len()` is not a multiple of `width`.
    pub fn from_uniform(width: usize, flat: Vec<usize>) -> Self {
        assert!(width > 0, "uniform connectivity needs a positive row width");
        assert_eq!(
            flat.len() % width,
            0,
            "flat array of length {} does not split into rows of {width}",
            flat.len()
        );
        let rows = flat.len() / width;
        Self {
            offsets: (0..=rows).map(|r| r * width).collect(),
            indices: flat,
        }
    }

    /// Build from raw CSR arrays, validating their consistency.
    pub fn try_from_csr(offsets: Vec<usize>, indices: Vec<usize>) -> Result<Self, MeshError> {
        let c = Self { offsets, indices };
        c.validate_invariants()?;
        Ok(c)
    }

    /// Identity table: every entity is incident only to itself.
    pub fn identity(size: usize) -> Self {
        Self::from_uniform(1, (0..size).collect())
    }

    /// Number of source entities (rows).
    #[inline]
    pub fn num_entities(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored incidences.
    #[inline]
    pub fn num_connections(&self) -> usize {
        self.indices.len()
    }

    /// True if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_entities() == 0
    }

    /// The row of source entity `entity`.
    ///
    /// # Panics
    /// Panics if `entity >= self.num_entities()`.
    #[inline]
    pub fn row(&self, entity: usize) -> &[usize] {
        self.try_row(entity).unwrap_or_else(|| {
            panic!(
                "entity {entity} out of range for connectivity with {} rows",
                self.num_entities()
            )
        })
    }

    /// The row of source entity `entity`, if it exists.
    #[inline]
    pub fn try_row(&self, entity: usize) -> Option<&[usize]> {
        let start = *self.offsets.get(entity)?;
        let end = *self.offsets.get(entity + 1)?;
        Some(&self.indices[start..end])
    }

    /// Iterate over all rows in source order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .map(|w| &self.indices[w[0]..w[1]])
    }

    /// Largest target index plus one, or 0 when there are no incidences.
    pub fn target_bound(&self) -> usize {
        self.indices.iter().max().map_or(0, |m| m + 1)
    }

    /// Reverse the direction of the table.
    ///
    /// `num_targets` is the number of target entities, which becomes the
    /// number of rows. Each row of the result is in ascending source order.
    pub fn transpose(&self, num_targets: usize) -> Self {
        let mut counts = vec![0usize; num_targets + 1];
        for &t in &self.indices {
            counts[t + 1] += 1;
        }
        for i in 0..num_targets {
            counts[i + 1] += counts[i];
        }
        let offsets = counts.clone();
        let mut write = counts;
        let mut indices = vec![0usize; self.indices.len()];
        for (src, row) in self.rows().enumerate() {
            for &t in row {
                indices[write[t]] = src;
                write[t] += 1;
            }
        }
        Self { offsets, indices }
    }

    /// Check that every entry is below `bound`, reporting the first that is not.
    pub(crate) fn check_targets(&self, d0: usize, d1: usize, bound: usize) -> Result<(), MeshError> {
        match self.indices.iter().find(|&&t| t >= bound) {
            Some(&index) => Err(MeshError::ConnectivityIndexOutOfRange {
                d0,
                d1,
                index,
                count: bound,
            }),
            None => Ok(()),
        }
    }
}

impl DebugInvariants for Connectivity {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        match self.offsets.first().copied() {
            Some(0) => {}
            Some(first) => {
                return Err(MeshError::MalformedConnectivity(format!(
                    "offsets start at {first}, expected 0"
                )));
            }
            None => {
                return Err(MeshError::MalformedConnectivity(
                    "offsets array is empty".into(),
                ));
            }
        }
        if let Some((row, (a, b))) = self
            .offsets
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (a, b))| a > b)
        {
            return Err(MeshError::MalformedConnectivity(format!(
                "offsets decrease at row {row}: {a} > {b}"
            )));
        }
        let last = self.offsets.last().copied().unwrap_or_default();
        if last != self.indices.len() {
            return Err(MeshError::MalformedConnectivity(format!(
                "final offset {last} does not match {} indices",
                self.indices.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_rows() {
        let c = Connectivity::default();
        assert!(c.is_empty());
        assert_eq!(c.num_connections(), 0);
        assert!(c.try_row(0).is_none());
        assert!(c.validate_invariants().is_ok());
    }

    #[test]
    fn uniform_rows() {
        let c = Connectivity::from_uniform(3, vec![0, 1, 2, 1, 2, 3]);
        assert_eq!(c.num_entities(), 2);
        assert_eq!(c.row(1), &[1, 2, 3]);
        assert_eq!(c.target_bound(), 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn row_out_of_range_panics() {
        let c = Connectivity::from_rows([[0usize, 1]]);
        let _ = c.row(1);
    }

    #[test]
    fn transpose_sorts_sources() {
        let c = Connectivity::from_rows([vec![2, 0], vec![0], vec![1, 2]]);
        let t = c.transpose(3);
        assert_eq!(t.num_entities(), 3);
        assert_eq!(t.row(0), &[0, 1]);
        assert_eq!(t.row(1), &[2]);
        assert_eq!(t.row(2), &[0, 2]);
        assert_eq!(t.num_connections(), c.num_connections());
    }

    #[test]
    fn transpose_keeps_isolated_targets() {
        let c = Connectivity::from_rows([vec![0]]);
        let t = c.transpose(3);
        assert_eq!(t.num_entities(), 3);
        assert!(t.row(1).is_empty());
        assert!(t.row(2).is_empty());
    }

    #[test]
    fn identity_rows() {
        let c = Connectivity::identity(3);
        assert_eq!(
            c.rows().map(<[usize]>::to_vec).collect::<Vec<_>>(),
            vec![vec![0], vec![1], vec![2]]
        );
        assert!(Connectivity::identity(0).is_empty());
    }

    #[test]
    fn malformed_csr_is_rejected() {
        assert!(matches!(
            Connectivity::try_from_csr(vec![0, 2, 1], vec![0, 1]),
            Err(MeshError::MalformedConnectivity(_))
        ));
        assert!(matches!(
            Connectivity::try_from_csr(vec![1, 2], vec![0, 1]),
            Err(MeshError::MalformedConnectivity(_))
        ));
        assert!(matches!(
            Connectivity::try_from_csr(vec![0, 1], vec![0, 1]),
            Err(MeshError::MalformedConnectivity(_))
        ));
        assert!(Connectivity::try_from_csr(vec![0, 1, 3], vec![4, 0, 1]).is_ok());
    }

    #[test]
    fn check_targets_reports_first_violation() {
        let c = Connectivity::from_rows([vec![0, 5], vec![9]]);
        assert_eq!(
            c.check_targets(0, 2, 5),
            Err(MeshError::ConnectivityIndexOutOfRange {
                d0: 0,
                d1: 2,
                index: 5,
                count: 5
            })
        );
        assert!(c.check_targets(0, 2, 10).is_ok());
    }
}
