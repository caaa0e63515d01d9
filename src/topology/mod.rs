//! Top-level module for mesh topology.
//!
//! This module provides the storage the traversal core reads from:
//! - [`Connectivity`]: CSR adjacency between two dimensions
//! - [`Topology`]: the `(d0, d1)` table with lazy, memoized computation and ghost offsets
//! - [`CellType`]: reference-cell sub-entity tables
//! - [`Ownership`]: owned/ghost classification by ghost offset

pub mod cache;
pub mod cell_type;
mod compute;
pub mod connectivity;
pub mod mesh_topology;
pub mod ownership;

pub use cache::InvalidateCache;
pub use cell_type::CellType;
pub use connectivity::Connectivity;
pub use mesh_topology::Topology;
pub use ownership::Ownership;
