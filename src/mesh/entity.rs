//! Entity kinds and lightweight entity views.
//!
//! An [`EntityKind`] is a zero-sized marker that fixes the dimension of the
//! entities a cursor or range walks. A [`MeshEntity`] is a `Copy` view of
//! `(mesh, dimension, local index)`: it is a position, not an owning handle,
//! and repositioning it costs a single store.

use crate::mesh::mesh::Mesh;
use crate::mesh::range::EntityRange;
use crate::topology::cell_type::CellType;
use crate::topology::ownership::Ownership;
use std::fmt;
use std::marker::PhantomData;

/// Marker trait for the kind of entity a traversal yields.
pub trait EntityKind: Copy + fmt::Debug + Send + Sync + 'static {
    /// Human-readable kind name.
    const NAME: &'static str;

    /// Topological dimension of entities of this kind in `mesh`.
    fn dimension(mesh: &Mesh) -> usize;
}

/// Dimension-0 entities.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Vertex;

/// Dimension-1 entities.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Edge;

/// Dimension-2 entities.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Face;

/// Entities of dimension `D - 1`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Facet;

/// Entities of the topological dimension `D`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Cell;

impl EntityKind for Vertex {
    const NAME: &'static str = "vertex";
    #[inline]
    fn dimension(_mesh: &Mesh) -> usize {
        0
    }
}

impl EntityKind for Edge {
    const NAME: &'static str = "edge";
    #[inline]
    fn dimension(_mesh: &Mesh) -> usize {
        1
    }
}

impl EntityKind for Face {
    const NAME: &'static str = "face";
    #[inline]
    fn dimension(_mesh: &Mesh) -> usize {
        2
    }
}

impl EntityKind for Facet {
    const NAME: &'static str = "facet";
    #[inline]
    fn dimension(mesh: &Mesh) -> usize {
        mesh.dim().saturating_sub(1)
    }
}

impl EntityKind for Cell {
    const NAME: &'static str = "cell";
    #[inline]
    fn dimension(mesh: &Mesh) -> usize {
        mesh.dim()
    }
}

/// View of one entity of kind `K` in a borrowed mesh.
pub struct MeshEntity<'m, K: EntityKind> {
    mesh: &'m Mesh,
    dim: usize,
    index: usize,
    _kind: PhantomData<fn() -> K>,
}

impl<K: EntityKind> Clone for MeshEntity<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: EntityKind> Copy for MeshEntity<'_, K> {}

impl<'m, K: EntityKind> MeshEntity<'m, K> {
    /// View entity `index` of kind `K`.
    ///
    /// The index is not checked; incidence queries on an out-of-range view
    /// panic.
    #[inline]
    pub fn new(mesh: &'m Mesh, index: usize) -> Self {
        Self {
            mesh,
            dim: K::dimension(mesh),
            index,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    /// Topological dimension of the entity.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Local index within its dimension.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the view to another entity of the same kind.
    #[inline]
    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Local indices of the incident entities of dimension `dim`.
    ///
    /// Computes the connectivity on first use.
    ///
    /// # Panics
    /// Panics if `dim` exceeds the mesh dimension or the view is out of range.
    #[inline]
    pub fn entity_indices(&self, dim: usize) -> &'m [usize] {
        self.mesh.init_connectivity(self.dim, dim).row(self.index)
    }

    /// Number of incident entities of dimension `dim`.
    #[inline]
    pub fn num_entities(&self, dim: usize) -> usize {
        self.entity_indices(dim).len()
    }

    /// Range over the incident entities of kind `T`.
    #[inline]
    pub fn entities<T: EntityKind>(&self) -> EntityRange<'m, T> {
        EntityRange::incident(self)
    }

    /// Owned or ghost, by the ghost offset of the entity's dimension.
    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.mesh.topology().ownership(self.dim, self.index)
    }

    #[inline]
    pub fn is_ghost(&self) -> bool {
        self.ownership().is_ghost()
    }

    /// Average of the entity's vertex coordinates.
    pub fn midpoint(&self) -> Vec<f64> {
        let geometry = self.mesh.geometry();
        let vertices = self.entity_indices(0);
        let mut mid = vec![0.0; geometry.dim()];
        for &v in vertices {
            for (m, x) in mid.iter_mut().zip(geometry.point(v)) {
                *m += x;
            }
        }
        let n = vertices.len().max(1) as f64;
        mid.iter_mut().for_each(|m| *m /= n);
        mid
    }
}

impl<'m> MeshEntity<'m, Vertex> {
    /// Coordinates of the vertex.
    #[inline]
    pub fn point(&self) -> &'m [f64] {
        self.mesh.geometry().point(self.index)
    }
}

impl MeshEntity<'_, Cell> {
    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.mesh.cell_type()
    }
}

impl<K: EntityKind> PartialEq for MeshEntity<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.mesh, other.mesh) && self.dim == other.dim && self.index == other.index
    }
}

impl<K: EntityKind> Eq for MeshEntity<'_, K> {}

impl<K: EntityKind> fmt::Debug for MeshEntity<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshEntity")
            .field("kind", &K::NAME)
            .field("dim", &self.dim)
            .field("index", &self.index)
            .finish()
    }
}

impl<K: EntityKind> fmt::Display for MeshEntity<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", K::NAME, self.index)
    }
}
