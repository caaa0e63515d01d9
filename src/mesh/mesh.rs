//! The mesh: topology plus vertex geometry.

use crate::debug_invariants::DebugInvariants;
use crate::mesh::builder::MeshBuilder;
use crate::mesh::entity::{Cell, EntityKind, Vertex};
use crate::mesh::geometry::Geometry;
use crate::mesh::range::{Cells, EntityRange, RangeKind, Vertices};
use crate::mesh_error::MeshError;
use crate::topology::cache::InvalidateCache;
use crate::topology::cell_type::CellType;
use crate::topology::connectivity::Connectivity;
use crate::topology::mesh_topology::Topology;
use serde::{Deserialize, Serialize};

/// An unstructured mesh of a single cell type.
///
/// Traversal only needs `&Mesh`; missing connectivity is computed and
/// memoized behind shared references. Operations that replace or drop
/// tables take `&mut self`, so they cannot overlap a live traversal.
#[derive(Debug)]
pub struct Mesh {
    topology: Topology,
    geometry: Geometry,
}

/// Serializable description of a mesh, without derived connectivity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub cell_type: CellType,
    pub gdim: usize,
    /// Flat vertex coordinates, `gdim` per vertex.
    pub coordinates: Vec<f64>,
    /// Flat cell→vertex indices, `cell_type.num_vertices()` per cell.
    pub cells: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost_vertex_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost_cell_offset: Option<usize>,
}

impl Mesh {
    /// Start building a mesh of `cell_type` cells in `gdim` dimensions.
    pub fn builder(cell_type: CellType, gdim: usize) -> MeshBuilder {
        MeshBuilder::new(cell_type, gdim)
    }

    pub(crate) fn from_parts(topology: Topology, geometry: Geometry) -> Self {
        let mesh = Self { topology, geometry };
        mesh.topology.debug_assert_invariants();
        mesh
    }

    /// Rebuild a mesh from its serialized description.
    pub fn from_data(data: MeshData) -> Result<Self, MeshError> {
        let mut builder = MeshBuilder::new(data.cell_type, data.gdim)
            .vertices(data.coordinates)
            .cells(data.cells);
        if let Some(offset) = data.ghost_vertex_offset {
            builder = builder.ghost_vertex_offset(offset);
        }
        if let Some(offset) = data.ghost_cell_offset {
            builder = builder.ghost_cell_offset(offset);
        }
        builder.build()
    }

    /// Serializable description of this mesh.
    pub fn to_data(&self) -> MeshData {
        let tdim = self.dim();
        let vertex_offset = self.topology.ghost_offset(0);
        let cell_offset = self.topology.ghost_offset(tdim);
        MeshData {
            cell_type: self.cell_type(),
            gdim: self.geometry.dim(),
            coordinates: self.geometry.coordinates().to_vec(),
            cells: self
                .topology
                .connectivity(tdim, 0)
                .rows()
                .flatten()
                .copied()
                .collect(),
            ghost_vertex_offset: (vertex_offset < self.num_vertices()).then_some(vertex_offset),
            ghost_cell_offset: (cell_offset < self.num_cells()).then_some(cell_offset),
        }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Topological dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.topology.dim()
    }

    /// Geometric dimension.
    #[inline]
    pub fn gdim(&self) -> usize {
        self.geometry.dim()
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.topology.cell_type()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.topology.num_vertices()
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.topology.num_cells()
    }

    /// Number of entities of dimension `dim`, owned and ghost.
    ///
    /// # Panics
    /// Panics if `dim > self.dim()`.
    #[inline]
    pub fn num_entities(&self, dim: usize) -> usize {
        self.topology.size(dim)
    }

    /// Number of owned entities of dimension `dim`.
    ///
    /// # Panics
    /// Panics if `dim > self.dim()`.
    #[inline]
    pub fn ghost_offset(&self, dim: usize) -> usize {
        self.topology.ghost_offset(dim)
    }

    /// Ensure the entities of dimension `dim` exist.
    pub fn init(&self, dim: usize) -> usize {
        self.num_entities(dim)
    }

    /// Ensure `d0 → d1` is computed and return it.
    ///
    /// Idempotent; see [`Topology::connectivity`].
    ///
    /// # Panics
    /// Panics if either dimension exceeds `self.dim()`.
    #[inline]
    pub fn init_connectivity(&self, d0: usize, d1: usize) -> &Connectivity {
        self.topology.connectivity(d0, d1)
    }

    /// Fallible variant of [`Mesh::init_connectivity`].
    pub fn try_init_connectivity(&self, d0: usize, d1: usize) -> Result<&Connectivity, MeshError> {
        self.topology.try_connectivity(d0, d1)
    }

    /// Install a precomputed `d0 → d1` table; see [`Topology::set_connectivity`].
    pub fn set_connectivity(
        &mut self,
        d0: usize,
        d1: usize,
        table: Connectivity,
    ) -> Result<(), MeshError> {
        self.topology.set_connectivity(d0, d1, table)
    }

    /// Owned entities of kind `K`.
    pub fn entities<K: EntityKind>(&self) -> EntityRange<'_, K> {
        EntityRange::new(self)
    }

    /// Entities of kind `K` selected by `kind`.
    pub fn entities_with<K: EntityKind>(&self, kind: RangeKind) -> EntityRange<'_, K> {
        EntityRange::with_kind(self, kind)
    }

    /// Owned vertices.
    pub fn vertices(&self) -> Vertices<'_> {
        self.entities::<Vertex>()
    }

    /// Owned cells.
    pub fn cells(&self) -> Cells<'_> {
        self.entities::<Cell>()
    }
}

impl InvalidateCache for Mesh {
    fn invalidate_cache(&mut self) {
        self.topology.invalidate_cache();
    }
}
