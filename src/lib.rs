//! # mesh-entities
//!
//! Dimension-generic entity iteration over unstructured meshes.
//!
//! A [`Mesh`](mesh::Mesh) stores its cells as a cell→vertex table and derives
//! every other `d0 → d1` connectivity lazily, memoizing each table on first
//! use. Traversal goes through [`EntityCursor`](mesh::EntityCursor), a
//! forward cursor that repositions a single [`MeshEntity`](mesh::MeshEntity)
//! in place, and [`EntityRange`](mesh::EntityRange), which pairs a begin and
//! an end cursor for whole-mesh or incidence iteration.
//!
//! ## Ghost entities
//!
//! Vertices and cells carry a ghost offset: local indices at or above it
//! belong to a neighboring partition. Edges and faces touched only by ghost
//! cells are numbered last and are ghosts too. Whole-mesh ranges visit owned
//! entities only, unless built with [`RangeKind::All`](mesh::RangeKind) or
//! [`RangeKind::Ghost`](mesh::RangeKind). Incidence ranges are never
//! filtered.
//!
//! ## Usage
//!
//! ```rust
//! # fn main() -> Result<(), mesh_entities::mesh_error::MeshError> {
//! use mesh_entities::prelude::*;
//!
//! let mesh = unit_square(2, 2, CellType::Triangle)?;
//! let mut incidences = 0;
//! for cell in mesh.cells() {
//!     for edge in cell.entities::<Edge>() {
//!         assert!(edge.index() < mesh.num_entities(1));
//!         incidences += 1;
//!     }
//! }
//! assert_eq!(incidences, 3 * mesh.num_cells());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//! - `check-invariants`: run structural validation after construction and
//!   every derived table, also in release builds.
//! - `strict-invariants`: alias of `check-invariants` for CI.

pub mod debug_invariants;
pub mod mesh;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{
        Cell, Cells, Edge, Edges, EntityCursor, EntityIter, EntityKind, EntityRange, Face, Faces,
        Facet, Facets, Mesh, MeshBuilder, MeshData, MeshEntity, RangeKind, Vertex, Vertices,
    };
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{unit_cube, unit_interval, unit_square};
    pub use crate::topology::{CellType, Connectivity, InvalidateCache, Ownership, Topology};
}
