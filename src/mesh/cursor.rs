//! Forward cursor over mesh entities.
//!
//! An [`EntityCursor`] owns exactly one [`MeshEntity`] slot and repositions
//! it in place on every [`advance`](EntityCursor::advance). It runs in one of
//! two modes:
//!
//! - **sequential** (no index table): the slot's local index is `pos`;
//! - **incidence** (index table = a borrowed connectivity row): the slot's
//!   local index is `row[pos]`.
//!
//! The cursor has no notion of its own end. Termination is detected by
//! comparing against an end cursor, which compares positions and the
//! *identity* of the index table, never its contents.
//!
//! ```rust
//! # fn main() -> Result<(), mesh_entities::mesh_error::MeshError> {
//! use mesh_entities::mesh::{Cell, EntityCursor, Vertex};
//! use mesh_entities::mesh_generation::unit_interval;
//!
//! let mesh = unit_interval(3)?;
//! let mut cursor = EntityCursor::<Cell>::new(&mesh, 0);
//! let end = EntityCursor::<Cell>::new(&mesh, 3);
//! let mut visited = Vec::new();
//! while cursor != end {
//!     visited.push(cursor.current().map(|c| c.index()));
//!     cursor.advance();
//! }
//! assert_eq!(visited, [Some(0), Some(1), Some(2)]);
//!
//! let cell = cursor.mesh_entity(1);
//! let vertices = EntityCursor::<Vertex>::incident(&cell, 0);
//! assert_eq!(vertices.current().map(|v| v.index()), Some(1));
//! # Ok(())
//! # }
//! ```

use crate::mesh::entity::{EntityKind, MeshEntity};
use crate::mesh::mesh::Mesh;
use std::fmt;

/// Single-pass cursor over entities of kind `K`.
///
/// References returned by [`current`](Self::current) borrow the cursor, so
/// they cannot be held across [`advance`](Self::advance).
pub struct EntityCursor<'m, K: EntityKind> {
    slot: Option<MeshEntity<'m, K>>,
    pos: usize,
    index: Option<&'m [usize]>,
    len: usize,
}

impl<K: EntityKind> Default for EntityCursor<'_, K> {
    /// A sentinel: no entity, position 0, no index table.
    fn default() -> Self {
        Self {
            slot: None,
            pos: 0,
            index: None,
            len: 0,
        }
    }
}

impl<K: EntityKind> Clone for EntityCursor<'_, K> {
    /// Copies the entity slot and shares the borrowed index table.
    fn clone(&self) -> Self {
        Self {
            slot: self.slot,
            pos: self.pos,
            index: self.index,
            len: self.len,
        }
    }
}

impl<'m, K: EntityKind> EntityCursor<'m, K> {
    /// Sequential cursor over all entities of kind `K`, at position `pos`.
    ///
    /// A mesh without vertices has no entities of any dimension and yields a
    /// sentinel that keeps `pos`. Otherwise the entities of the kind's
    /// dimension are generated if needed.
    pub fn new(mesh: &'m Mesh, pos: usize) -> Self {
        if mesh.num_vertices() == 0 {
            return Self {
                pos,
                ..Self::default()
            };
        }
        let len = mesh.num_entities(K::dimension(mesh));
        Self {
            slot: Some(MeshEntity::new(mesh, pos)),
            pos,
            index: None,
            len,
        }
    }

    /// Incidence cursor over the entities of kind `K` incident to `parent`,
    /// at position `pos` of the parent's connectivity row.
    ///
    /// Computes `parent.dim() → K::dimension` on first use; later cursors
    /// reuse the memoized table.
    pub fn incident<P: EntityKind>(parent: &MeshEntity<'m, P>, pos: usize) -> Self {
        Self::on_row(parent.mesh(), parent.dim(), parent.index(), pos)
    }

    pub(crate) fn on_row(mesh: &'m Mesh, parent_dim: usize, parent_index: usize, pos: usize) -> Self {
        let dim = K::dimension(mesh);
        let row = mesh.init_connectivity(parent_dim, dim).row(parent_index);
        log::trace!(
            "incidence cursor {parent_dim}:{parent_index} -> {} at {pos}/{}",
            K::NAME,
            row.len()
        );
        let local = row.get(pos).copied().unwrap_or_default();
        Self {
            slot: Some(MeshEntity::new(mesh, local)),
            pos,
            index: Some(row),
            len: row.len(),
        }
    }

    /// Move to the next position and reposition the entity slot.
    ///
    /// No bounds check is made. Past the last entity the slot keeps its last
    /// index and [`current`](Self::current) returns `None`.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
        let local = match self.index {
            Some(row) => row.get(self.pos).copied(),
            None => Some(self.pos),
        };
        if let (Some(entity), Some(local)) = (self.slot.as_mut(), local) {
            entity.set_index(local);
        }
    }

    /// The entity at the current position.
    ///
    /// `None` for a sentinel or at or past the last entity.
    #[inline]
    pub fn current(&self) -> Option<&MeshEntity<'m, K>> {
        if self.pos < self.len {
            self.slot.as_ref()
        } else {
            None
        }
    }

    /// Position counter.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True if the cursor has no backing entity.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.slot.is_none()
    }

    /// The borrowed index table, `None` in sequential mode.
    #[inline]
    pub fn index_table(&self) -> Option<&'m [usize]> {
        self.index
    }

    /// A fresh view of entity `index` of kind `K` in the cursor's mesh.
    ///
    /// # Panics
    /// Panics on a sentinel.
    pub fn mesh_entity(&self, index: usize) -> MeshEntity<'m, K> {
        match &self.slot {
            Some(entity) => MeshEntity::new(entity.mesh(), index),
            None => panic!("sentinel {} cursor has no mesh", K::NAME),
        }
    }

    /// Number of positions this cursor can dereference.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Whether both cursors walk the same index table, or both are sequential.
    #[inline]
    pub(crate) fn same_table(&self, other: &Self) -> bool {
        match (self.index, other.index) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }
}

impl<K: EntityKind> PartialEq for EntityCursor<'_, K> {
    /// Equal iff positions match and both use the same index table.
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.same_table(other)
    }
}

impl<K: EntityKind> Eq for EntityCursor<'_, K> {}

impl<K: EntityKind> fmt::Debug for EntityCursor<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCursor")
            .field("kind", &K::NAME)
            .field("pos", &self.pos)
            .field("entity", &self.slot.map(|e| e.index()))
            .field("table", &self.index.map(<[usize]>::as_ptr))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::entity::{Cell, Edge, Vertex};
    use crate::mesh::mesh::Mesh;
    use crate::mesh_generation::{unit_interval, unit_square};
    use crate::topology::cell_type::CellType;

    #[test]
    fn default_is_a_sentinel() {
        let a = EntityCursor::<Cell>::default();
        let b = EntityCursor::<Cell>::default();
        assert!(a.is_sentinel());
        assert!(a.current().is_none());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_mesh_yields_sentinels() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = Mesh::builder(CellType::Triangle, 2).build()?;
        let begin = EntityCursor::<Edge>::new(&mesh, 0);
        assert!(begin.is_sentinel());
        assert_eq!(begin, EntityCursor::<Edge>::default());
        assert_eq!(EntityCursor::<Edge>::new(&mesh, 4).position(), 4);
        Ok(())
    }

    #[test]
    fn sequential_advance_tracks_position() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_interval(3)?;
        let mut c = EntityCursor::<Vertex>::new(&mesh, 0);
        assert!(c.index_table().is_none());
        for expected in 0..4 {
            assert_eq!(c.current().map(MeshEntity::index), Some(expected));
            c.advance();
        }
        assert_eq!(c.position(), 4);
        assert!(c.current().is_none());
        assert!(!c.is_sentinel());
        Ok(())
    }

    #[test]
    fn incidence_follows_row() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_square(1, 1, CellType::Triangle)?;
        let cell = MeshEntity::<Cell>::new(&mesh, 1);
        let row = mesh.topology().connectivity(2, 0).row(1).to_vec();
        let mut c = EntityCursor::<Vertex>::incident(&cell, 0);
        for &expected in &row {
            assert_eq!(c.current().map(MeshEntity::index), Some(expected));
            c.advance();
        }
        assert!(c.current().is_none());
        assert_eq!(c, EntityCursor::<Vertex>::incident(&cell, row.len()));
        Ok(())
    }

    #[test]
    fn clone_copies_slot_and_shares_table() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_square(1, 1, CellType::Triangle)?;
        let cell = MeshEntity::<Cell>::new(&mesh, 0);
        let mut a = EntityCursor::<Vertex>::incident(&cell, 0);
        let b = a.clone();
        a.advance();
        assert_eq!(b.position(), 0);
        assert_ne!(a.current(), b.current());
        assert!(std::ptr::eq(
            a.index_table().expect("row"),
            b.index_table().expect("row")
        ));
        Ok(())
    }

    #[test]
    fn cursors_on_different_rows_are_unequal() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_square(1, 1, CellType::Triangle)?;
        let c0 = MeshEntity::<Cell>::new(&mesh, 0);
        let c1 = MeshEntity::<Cell>::new(&mesh, 1);
        let a = EntityCursor::<Vertex>::incident(&c0, 1);
        let b = EntityCursor::<Vertex>::incident(&c1, 1);
        assert_ne!(a, b);
        assert_ne!(a, EntityCursor::<Vertex>::new(&mesh, 1));
        assert_eq!(a, EntityCursor::<Vertex>::incident(&c0, 1));
        Ok(())
    }

    #[test]
    fn incident_computes_connectivity_once() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_square(2, 1, CellType::Quadrilateral)?;
        let v0 = MeshEntity::<Vertex>::new(&mesh, 0);
        let v1 = MeshEntity::<Vertex>::new(&mesh, 1);
        assert!(!mesh.topology().is_computed(0, 1));

        let first = EntityCursor::<Edge>::incident(&v0, 0);
        let computed = mesh.topology().num_computations();
        assert!(mesh.topology().is_computed(0, 1));

        let second = EntityCursor::<Edge>::incident(&v1, 0);
        let again = EntityCursor::<Edge>::incident(&v0, 1);
        assert_eq!(mesh.topology().num_computations(), computed);
        assert!(first.current().is_some() && second.current().is_some());
        assert!(first.same_table(&again));
        Ok(())
    }
}
