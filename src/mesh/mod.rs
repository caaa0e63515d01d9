//! Meshes and entity traversal.
//!
//! - [`Mesh`] owns a [`Topology`](crate::topology::mesh_topology::Topology)
//!   and the vertex [`Geometry`].
//! - [`MeshEntity`] is a cheap view of one entity; [`EntityKind`] markers
//!   fix its dimension.
//! - [`EntityCursor`] walks entities by repositioning a single owned view.
//! - [`EntityRange`] hands out begin/end cursor pairs for the whole mesh or
//!   for the entities incident to one parent.

pub mod builder;
pub mod cursor;
pub mod entity;
pub mod geometry;
#[allow(clippy::module_inception)]
pub mod mesh;
pub mod range;

pub use builder::MeshBuilder;
pub use cursor::EntityCursor;
pub use entity::{Cell, Edge, EntityKind, Face, Facet, MeshEntity, Vertex};
pub use geometry::Geometry;
pub use mesh::{Mesh, MeshData};
pub use range::{Cells, Edges, EntityIter, EntityRange, Faces, Facets, RangeKind, Vertices};
