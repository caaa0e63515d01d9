//! MeshError: Unified error type for mesh-entities public APIs
//!
//! Traversal never fails; this type covers mesh construction, connectivity
//! preloading, deserialization, and the fallible `try_*` accessors.

use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for mesh-entities operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The cell type cannot be used as the cell type of a mesh.
    #[error("Unsupported cell type for a mesh: {0:?}")]
    UnsupportedCellType(CellType),
    /// A cell was given with the wrong number of vertices.
    #[error("Cell {cell} has {found} vertices, expected {expected}")]
    CellVertexCount {
        cell: usize,
        expected: usize,
        found: usize,
    },
    /// A cell references a vertex that does not exist.
    #[error("Cell {cell} references vertex {vertex}, but the mesh has {num_vertices} vertices")]
    VertexOutOfRange {
        cell: usize,
        vertex: usize,
        num_vertices: usize,
    },
    /// The flat coordinate array does not divide into points.
    #[error("Coordinate array of length {len} is not a multiple of geometric dimension {gdim}")]
    CoordinateLength { len: usize, gdim: usize },
    /// The geometric dimension cannot host cells of the topological dimension.
    #[error("Geometric dimension {gdim} is smaller than topological dimension {tdim}")]
    GeometricDimension { gdim: usize, tdim: usize },
    /// A ghost offset lies beyond the number of entities of its dimension.
    #[error("Ghost offset {offset} for dimension {dim} exceeds entity count {count}")]
    GhostOffsetOutOfRange {
        dim: usize,
        offset: usize,
        count: usize,
    },
    /// A dimension larger than the topological dimension was requested.
    #[error("Dimension {dim} exceeds topological dimension {tdim}")]
    DimensionOutOfRange { dim: usize, tdim: usize },
    /// A preloaded connectivity has the wrong number of rows.
    #[error("Connectivity {d0} -> {d1} has {found} rows, expected {expected}")]
    ConnectivityShape {
        d0: usize,
        d1: usize,
        expected: usize,
        found: usize,
    },
    /// A connectivity entry does not name an entity of the target dimension.
    #[error("Connectivity {d0} -> {d1} references entity {index}, but dimension {d1} has {count} entities")]
    ConnectivityIndexOutOfRange {
        d0: usize,
        d1: usize,
        index: usize,
        count: usize,
    },
    /// Entity-defining connectivities are derived from the cells and cannot be replaced.
    #[error("Connectivity {d0} -> {d1} defines mesh entities and cannot be preloaded")]
    ConnectivityNotPreloadable { d0: usize, d1: usize },
    /// CSR offsets are inconsistent with the index array.
    #[error("Malformed connectivity: {0}")]
    MalformedConnectivity(String),
    /// Invalid parameters passed to a mesh generator.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
