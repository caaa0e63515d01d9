//! Begin/end cursor pairs for whole-mesh and incidence traversal.
//!
//! Whole-mesh ranges are ghost-aware. The default [`RangeKind::Regular`]
//! stops at the ghost offset, so only owned entities are visited.
//! [`RangeKind::All`] and [`RangeKind::Ghost`] opt into the ghost layer.
//! Incidence ranges cover the full connectivity row; ghost filtering does
//! not apply to local incidence.
//!
//! ```rust
//! # fn main() -> Result<(), mesh_entities::mesh_error::MeshError> {
//! use mesh_entities::mesh::{Mesh, Vertex};
//! use mesh_entities::topology::cell_type::CellType;
//!
//! let mesh = Mesh::builder(CellType::Interval, 1)
//!     .vertices(vec![0.0, 1.0, 2.0])
//!     .cells(vec![0, 1, 1, 2])
//!     .ghost_vertex_offset(2)
//!     .build()?;
//! assert_eq!(mesh.vertices().len(), 2);
//! for cell in mesh.cells() {
//!     let vertices: Vec<usize> = cell.entities::<Vertex>().iter().map(|v| v.index()).collect();
//!     assert_eq!(vertices.len(), 2);
//! }
//! # Ok(())
//! # }
//! ```

use crate::mesh::cursor::EntityCursor;
use crate::mesh::entity::{Cell, Edge, EntityKind, Face, Facet, MeshEntity, Vertex};
use crate::mesh::mesh::Mesh;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Which part of a dimension's local indices a whole-mesh range covers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RangeKind {
    /// Owned entities: `[0, ghost_offset)`.
    #[default]
    Regular,
    /// Owned and ghost entities: `[0, size)`.
    All,
    /// Ghost entities only: `[ghost_offset, size)`.
    Ghost,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Scope {
    Mesh(RangeKind),
    Incident { dim: usize, index: usize },
}

/// Traversal scope for entities of kind `K`; produces fresh cursors.
pub struct EntityRange<'m, K: EntityKind> {
    mesh: &'m Mesh,
    scope: Scope,
    _kind: PhantomData<fn() -> K>,
}

impl<K: EntityKind> Clone for EntityRange<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: EntityKind> Copy for EntityRange<'_, K> {}

/// All owned vertices of a mesh.
pub type Vertices<'m> = EntityRange<'m, Vertex>;
/// All owned edges of a mesh.
pub type Edges<'m> = EntityRange<'m, Edge>;
/// All owned faces of a mesh.
pub type Faces<'m> = EntityRange<'m, Face>;
/// All owned facets of a mesh.
pub type Facets<'m> = EntityRange<'m, Facet>;
/// All owned cells of a mesh.
pub type Cells<'m> = EntityRange<'m, Cell>;

impl<'m, K: EntityKind> EntityRange<'m, K> {
    /// Owned entities of kind `K` in `mesh`.
    pub fn new(mesh: &'m Mesh) -> Self {
        Self::with_kind(mesh, RangeKind::Regular)
    }

    /// Entities of kind `K` in `mesh`, selected by `kind`.
    pub fn with_kind(mesh: &'m Mesh, kind: RangeKind) -> Self {
        Self {
            mesh,
            scope: Scope::Mesh(kind),
            _kind: PhantomData,
        }
    }

    /// Entities of kind `K` incident to `parent`.
    ///
    /// The connectivity is computed here if it is missing, so `begin` and
    /// `end` only look it up.
    pub fn incident<P: EntityKind>(parent: &MeshEntity<'m, P>) -> Self {
        let mesh = parent.mesh();
        mesh.init_connectivity(parent.dim(), K::dimension(mesh));
        Self {
            mesh,
            scope: Scope::Incident {
                dim: parent.dim(),
                index: parent.index(),
            },
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    /// `[start, end)` positions of a whole-mesh range.
    fn bounds(&self, kind: RangeKind) -> (usize, usize) {
        let dim = K::dimension(self.mesh);
        let size = self.mesh.num_entities(dim);
        let offset = self.mesh.ghost_offset(dim);
        match kind {
            RangeKind::Regular => (0, offset),
            RangeKind::All => (0, size),
            RangeKind::Ghost => (offset, size),
        }
    }

    /// Cursor at the first position.
    pub fn begin(&self) -> EntityCursor<'m, K> {
        match self.scope {
            Scope::Mesh(kind) => EntityCursor::new(self.mesh, self.bounds(kind).0),
            Scope::Incident { dim, index } => EntityCursor::on_row(self.mesh, dim, index, 0),
        }
    }

    /// Cursor one past the last position.
    ///
    /// For `Regular` ranges this sits at the ghost offset rather than the
    /// entity count.
    pub fn end(&self) -> EntityCursor<'m, K> {
        match self.scope {
            Scope::Mesh(kind) => EntityCursor::new(self.mesh, self.bounds(kind).1),
            Scope::Incident { dim, index } => {
                let len = self
                    .mesh
                    .init_connectivity(dim, K::dimension(self.mesh))
                    .row(index)
                    .len();
                EntityCursor::on_row(self.mesh, dim, index, len)
            }
        }
    }

    /// Number of entities the range visits.
    pub fn len(&self) -> usize {
        self.end().position() - self.begin().position()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterator over the range's entities.
    pub fn iter(&self) -> EntityIter<'m, K> {
        EntityIter {
            cursor: self.begin(),
            end: self.end(),
        }
    }
}

impl<K: EntityKind> std::fmt::Debug for EntityRange<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRange")
            .field("kind", &K::NAME)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Drives a begin cursor up to an end cursor.
///
/// Items are `Copy` views of the begin cursor's slot; no step allocates.
#[derive(Clone, Debug)]
pub struct EntityIter<'m, K: EntityKind> {
    cursor: EntityCursor<'m, K>,
    end: EntityCursor<'m, K>,
}

impl<'m, K: EntityKind> EntityIter<'m, K> {
    /// Iterate from `begin` until it compares equal to `end` or runs past
    /// its last entity.
    pub fn new(begin: EntityCursor<'m, K>, end: EntityCursor<'m, K>) -> Self {
        Self { cursor: begin, end }
    }
}

impl<'m, K: EntityKind> Iterator for EntityIter<'m, K> {
    type Item = MeshEntity<'m, K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.end {
            return None;
        }
        let entity = *self.cursor.current()?;
        self.cursor.advance();
        Some(entity)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let pos = self.cursor.position();
        let mut remaining = self.cursor.len().saturating_sub(pos);
        // `end` only stops iteration when it walks the same table and lies ahead.
        if self.cursor.same_table(&self.end) && self.end.position() >= pos {
            remaining = remaining.min(self.end.position() - pos);
        }
        (remaining, Some(remaining))
    }
}

impl<K: EntityKind> ExactSizeIterator for EntityIter<'_, K> {}

impl<K: EntityKind> FusedIterator for EntityIter<'_, K> {}

impl<'m, K: EntityKind> IntoIterator for EntityRange<'m, K> {
    type Item = MeshEntity<'m, K>;
    type IntoIter = EntityIter<'m, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'m, K: EntityKind> IntoIterator for &EntityRange<'m, K> {
    type Item = MeshEntity<'m, K>;
    type IntoIter = EntityIter<'m, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::{unit_interval, unit_square};
    use crate::topology::cell_type::CellType;

    fn ghosted_line() -> Result<Mesh, crate::mesh_error::MeshError> {
        // 5 vertices, 4 cells; vertices 3.. and cells 2.. are ghosts
        Mesh::builder(CellType::Interval, 1)
            .vertices(vec![0.0, 1.0, 2.0, 3.0, 4.0])
            .cells(vec![0, 1, 1, 2, 2, 3, 3, 4])
            .ghost_vertex_offset(3)
            .ghost_cell_offset(2)
            .build()
    }

    #[test]
    fn regular_range_stops_at_ghost_offset() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = ghosted_line()?;
        let cells = Cells::new(&mesh);
        assert_eq!(cells.end().position(), 2);
        let seen: Vec<usize> = cells.iter().map(|c| c.index()).collect();
        assert_eq!(seen, [0, 1]);
        Ok(())
    }

    #[test]
    fn all_and_ghost_ranges() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = ghosted_line()?;
        let all: Vec<usize> = Vertices::with_kind(&mesh, RangeKind::All)
            .iter()
            .map(|v| v.index())
            .collect();
        assert_eq!(all, [0, 1, 2, 3, 4]);
        let ghosts = Vertices::with_kind(&mesh, RangeKind::Ghost);
        assert_eq!(ghosts.begin().position(), 3);
        assert!(ghosts.iter().all(|v| v.is_ghost()));
        assert_eq!(ghosts.len(), 2);
        Ok(())
    }

    #[test]
    fn end_equals_begin_advanced_offset_times() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = ghosted_line()?;
        let range = Vertices::new(&mesh);
        let mut cursor = range.begin();
        for _ in 0..mesh.ghost_offset(0) {
            assert_ne!(cursor, range.end());
            cursor.advance();
        }
        assert_eq!(cursor, range.end());
        Ok(())
    }

    #[test]
    fn incident_range_covers_row_without_ghost_filtering() -> Result<(), Box<dyn std::error::Error>>
    {
        let mesh = ghosted_line()?;
        // vertex 2 is owned but touches the ghost cell 2
        let vertex = MeshEntity::<Vertex>::new(&mesh, 2);
        let cells: Vec<usize> = vertex.entities::<Cell>().iter().map(|c| c.index()).collect();
        assert_eq!(cells, [1, 2]);
        Ok(())
    }

    #[test]
    fn iterator_is_exact_and_fused() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_square(2, 2, CellType::Triangle)?;
        let mut it = Cells::new(&mesh).iter();
        assert_eq!(it.len(), 8);
        it.next();
        assert_eq!(it.len(), 7);
        it.by_ref().for_each(drop);
        assert!(it.next().is_none());
        assert_eq!(it.len(), 0);
        Ok(())
    }

    #[test]
    fn mismatched_end_falls_back_to_row_length() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_square(1, 1, CellType::Triangle)?;
        let cell = MeshEntity::<Cell>::new(&mesh, 0);
        let it = EntityIter::new(
            EntityCursor::<Vertex>::incident(&cell, 0),
            EntityCursor::<Vertex>::new(&mesh, 1),
        );
        assert_eq!(it.len(), 3);
        assert_eq!(it.count(), 3);

        let behind = EntityIter::new(
            EntityCursor::<Vertex>::new(&mesh, 2),
            EntityCursor::<Vertex>::new(&mesh, 1),
        );
        assert_eq!(behind.len(), 2);
        assert_eq!(behind.count(), 2);

        let ahead = EntityIter::new(
            EntityCursor::<Vertex>::new(&mesh, 1),
            EntityCursor::<Vertex>::new(&mesh, 3),
        );
        assert_eq!(ahead.len(), 2);
        assert_eq!(ahead.count(), 2);
        Ok(())
    }

    #[test]
    fn ranges_on_the_same_scope_are_reusable() -> Result<(), Box<dyn std::error::Error>> {
        let mesh = unit_interval(4)?;
        let range = Cells::new(&mesh);
        let first: Vec<_> = range.into_iter().collect();
        let second: Vec<_> = (&range).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(range.begin(), range.begin());
        Ok(())
    }
}
