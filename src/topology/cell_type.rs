//! Reference cell metadata for mesh cells.
//!
//! Each cell type lists its sub-entities of every intermediate dimension as
//! tuples of local vertex indices. Vertex orderings follow the usual
//! conventions:
//!
//! - [`CellType::Interval`]: `(0,1)`
//! - [`CellType::Triangle`]: `(0,1,2)`
//! - [`CellType::Quadrilateral`]: `(0,1,2,3)` in cyclic order
//! - [`CellType::Tetrahedron`]: `(0,1,2,3)`
//! - [`CellType::Hexahedron`]: `(0,…,7)` with `0..=3` the bottom face and
//!   `4..=7` the top face, both cyclic.

use serde::{Deserialize, Serialize};

/// Cell types supported as the cell type of a mesh.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 0D point.
    Point,
    /// 1D segment.
    Interval,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product cell.
    Quadrilateral,
    /// 3D simplex.
    Tetrahedron,
    /// 3D tensor-product cell.
    Hexahedron,
}

const TRIANGLE_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0]];

const QUADRILATERAL_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 3], &[3, 0]];

const TETRAHEDRON_EDGES: &[&[usize]] = &[
    &[0, 1],
    &[1, 2],
    &[2, 0],
    &[0, 3],
    &[1, 3],
    &[2, 3],
];

const TETRAHEDRON_FACES: &[&[usize]] = &[&[0, 1, 2], &[0, 1, 3], &[1, 2, 3], &[0, 2, 3]];

const HEXAHEDRON_EDGES: &[&[usize]] = &[
    &[0, 1],
    &[1, 2],
    &[2, 3],
    &[3, 0],
    &[4, 5],
    &[5, 6],
    &[6, 7],
    &[7, 4],
    &[0, 4],
    &[1, 5],
    &[2, 6],
    &[3, 7],
];

const HEXAHEDRON_FACES: &[&[usize]] = &[
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

impl CellType {
    /// Topological dimension of the cell.
    pub const fn dimension(self) -> usize {
        match self {
            CellType::Point => 0,
            CellType::Interval => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron => 3,
        }
    }

    /// Number of vertices of the cell.
    pub const fn num_vertices(self) -> usize {
        match self {
            CellType::Point => 1,
            CellType::Interval => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }

    /// Whether a mesh can be built from cells of this type.
    ///
    /// Point clouds have no cells in the topological sense, so `Point` is
    /// only a sub-entity type.
    pub const fn is_mesh_cell(self) -> bool {
        !matches!(self, CellType::Point)
    }

    /// Local vertex tuples of the sub-entities of dimension `dim`.
    ///
    /// Dimension 0 and the cell's own dimension are trivial and return an
    /// empty table; every other dimension up to the cell dimension is listed.
    pub fn sub_entities(self, dim: usize) -> &'static [&'static [usize]] {
        match (self, dim) {
            (CellType::Triangle, 1) => TRIANGLE_EDGES,
            (CellType::Quadrilateral, 1) => QUADRILATERAL_EDGES,
            (CellType::Tetrahedron, 1) => TETRAHEDRON_EDGES,
            (CellType::Tetrahedron, 2) => TETRAHEDRON_FACES,
            (CellType::Hexahedron, 1) => HEXAHEDRON_EDGES,
            (CellType::Hexahedron, 2) => HEXAHEDRON_FACES,
            _ => &[],
        }
    }

    /// Cell type of the sub-entities of dimension `dim`.
    pub const fn sub_entity_type(self, dim: usize) -> CellType {
        match (self, dim) {
            (_, 0) => CellType::Point,
            (_, 1) => CellType::Interval,
            (CellType::Tetrahedron, 2) => CellType::Triangle,
            (CellType::Hexahedron, 2) => CellType::Quadrilateral,
            _ => self,
        }
    }
}
