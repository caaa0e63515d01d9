//! Mesh topology: the table of connectivities indexed by `(d0, d1)`.
//!
//! Only the cell→vertex table is stored eagerly. Every other table is
//! computed on first demand and memoized in a [`OnceCell`], so a query
//! through `&Topology` may populate a slot but never recomputes one. Rows
//! handed out borrow the topology; dropping derived tables needs `&mut`
//! (see [`InvalidateCache`]).
//!
//! # Ghost offsets
//! Vertices and cells carry the ghost offsets supplied at construction.
//! A derived entity (edge, face) is owned if an owned cell contains it;
//! those touched only by ghost cells are numbered after the owned ones.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::cache::InvalidateCache;
use crate::topology::cell_type::CellType;
use crate::topology::compute::{EntitySet, compute_entities, compute_inclusion};
use crate::topology::connectivity::Connectivity;
use crate::topology::ownership::Ownership;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Where a `(d0, d1)` table lives.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Slot {
    /// `D → 0`, given at construction.
    Cells,
    /// `d → 0` for `0 < d < D`, part of the entity set of `d`.
    EntityVertices(usize),
    /// `D → d` for `0 < d < D`, part of the entity set of `d`.
    CellEntities(usize),
    /// Any other table, stored in the flat `(d0, d1)` slot array.
    Derived(usize),
}

/// Topology of a single-cell-type mesh with lazily computed connectivity.
#[derive(Debug)]
pub struct Topology {
    cell_type: CellType,
    num_vertices: usize,
    cells: Connectivity,
    /// Entity sets by dimension; only `0 < d < D` are used.
    entities: Vec<OnceCell<EntitySet>>,
    /// `(D + 1)²` derived slots, row-major in `d0`.
    derived: Vec<OnceCell<Connectivity>>,
    vertex_ghost_offset: Option<usize>,
    cell_ghost_offset: Option<usize>,
    computations: AtomicUsize,
}

impl Topology {
    /// Create a topology from validated cell→vertex connectivity.
    ///
    /// `vertex_ghost_offset`/`cell_ghost_offset` default to the full counts.
    pub(crate) fn new(
        cell_type: CellType,
        num_vertices: usize,
        cells: Connectivity,
        vertex_ghost_offset: Option<usize>,
        cell_ghost_offset: Option<usize>,
    ) -> Self {
        let tdim = cell_type.dimension();
        Self {
            cell_type,
            num_vertices,
            cells,
            entities: (0..=tdim).map(|_| OnceCell::new()).collect(),
            derived: (0..(tdim + 1) * (tdim + 1)).map(|_| OnceCell::new()).collect(),
            vertex_ghost_offset,
            cell_ghost_offset,
            computations: AtomicUsize::new(0),
        }
    }

    /// Topological dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.cell_type.dimension()
    }

    /// Cell type of every cell.
    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.num_entities()
    }

    /// Number of tables computed so far, counting each entity set once.
    ///
    /// Preloaded tables are not counted. The count survives
    /// [`InvalidateCache::invalidate_cache`].
    pub fn num_computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of entities of dimension `dim`, generating them if needed.
    ///
    /// # Panics
    /// Panics if `dim > self.dim()`.
    pub fn size(&self, dim: usize) -> usize {
        self.assert_dim(dim);
        if dim == 0 {
            self.num_vertices
        } else if dim == self.dim() {
            self.num_cells()
        } else {
            self.entity_set(dim).entity_vertices.num_entities()
        }
    }

    /// Number of owned entities of dimension `dim`; local indices at or
    /// above it are ghosts.
    ///
    /// # Panics
    /// Panics if `dim > self.dim()`.
    pub fn ghost_offset(&self, dim: usize) -> usize {
        self.assert_dim(dim);
        if dim == 0 {
            self.vertex_ghost_offset.unwrap_or(self.num_vertices)
        } else if dim == self.dim() {
            self.cell_ghost_offset.unwrap_or_else(|| self.num_cells())
        } else {
            self.entity_set(dim).num_owned
        }
    }

    /// Ownership of entity `index` of dimension `dim`.
    pub fn ownership(&self, dim: usize, index: usize) -> Ownership {
        Ownership::of(index, self.ghost_offset(dim))
    }

    /// The `d0 → d1` table if it has already been computed or preloaded.
    ///
    /// # Panics
    /// Panics if either dimension exceeds `self.dim()`.
    pub fn get(&self, d0: usize, d1: usize) -> Option<&Connectivity> {
        match self.slot(d0, d1) {
            Slot::Cells => Some(&self.cells),
            Slot::EntityVertices(d) => self.entities[d].get().map(|s| &s.entity_vertices),
            Slot::CellEntities(d) => self.entities[d].get().map(|s| &s.cell_entities),
            Slot::Derived(i) => self.derived[i].get(),
        }
    }

    /// Whether `d0 → d1` is available without computation.
    pub fn is_computed(&self, d0: usize, d1: usize) -> bool {
        self.get(d0, d1).is_some()
    }

    /// The `d0 → d1` table, computing it first if needed.
    ///
    /// Idempotent: a table is computed at most once until the cache is
    /// invalidated; later calls return the memoized table.
    ///
    /// # Panics
    /// Panics if either dimension exceeds `self.dim()`.
    pub fn connectivity(&self, d0: usize, d1: usize) -> &Connectivity {
        match self.slot(d0, d1) {
            Slot::Cells => &self.cells,
            Slot::EntityVertices(d) => &self.entity_set(d).entity_vertices,
            Slot::CellEntities(d) => &self.entity_set(d).cell_entities,
            Slot::Derived(i) => self.derived[i].get_or_init(|| self.compute_derived(d0, d1)),
        }
    }

    /// Fallible variant of [`Topology::connectivity`].
    pub fn try_connectivity(&self, d0: usize, d1: usize) -> Result<&Connectivity, MeshError> {
        self.check_dim(d0)?;
        self.check_dim(d1)?;
        Ok(self.connectivity(d0, d1))
    }

    /// Install a precomputed `d0 → d1` table, replacing any existing one.
    ///
    /// Entity-defining tables (`D → 0`, `d → 0` and `D → d` for `0 < d < D`)
    /// are derived from the cells and cannot be preloaded.
    pub fn set_connectivity(
        &mut self,
        d0: usize,
        d1: usize,
        table: Connectivity,
    ) -> Result<(), MeshError> {
        self.check_dim(d0)?;
        self.check_dim(d1)?;
        let Slot::Derived(i) = self.slot(d0, d1) else {
            return Err(MeshError::ConnectivityNotPreloadable { d0, d1 });
        };
        table.validate_invariants()?;
        self.validate_table(d0, d1, &table)?;
        log::debug!(
            "preloaded connectivity {d0} -> {d1} ({} rows, {} incidences)",
            table.num_entities(),
            table.num_connections()
        );
        self.derived[i] = OnceCell::with_value(table);
        Ok(())
    }

    fn entity_set(&self, dim: usize) -> &EntitySet {
        self.entities[dim].get_or_init(|| {
            let owned_cells = self.cell_ghost_offset.unwrap_or_else(|| self.num_cells());
            let set = compute_entities(self.cell_type, &self.cells, dim, owned_cells);
            self.computations.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "computed {} entities of dimension {dim} and connectivity {} -> {dim}",
                set.entity_vertices.num_entities(),
                self.dim()
            );
            crate::debug_invariants!(
                set.entity_vertices.validate_invariants(),
                "entity vertices of dimension {}",
                dim
            );
            set
        })
    }

    fn compute_derived(&self, d0: usize, d1: usize) -> Connectivity {
        let table = if d0 == d1 {
            Connectivity::identity(self.size(d0))
        } else if d0 < d1 {
            self.connectivity(d1, d0).transpose(self.size(d0))
        } else {
            compute_inclusion(
                self.connectivity(d0, 0),
                self.connectivity(0, d1),
                self.connectivity(d1, 0),
            )
        };
        self.computations.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "computed connectivity {d0} -> {d1} ({} rows, {} incidences)",
            table.num_entities(),
            table.num_connections()
        );
        crate::debug_invariants!(
            self.validate_table(d0, d1, &table),
            "connectivity {} -> {}",
            d0,
            d1
        );
        table
    }

    fn slot(&self, d0: usize, d1: usize) -> Slot {
        self.assert_dim(d0);
        self.assert_dim(d1);
        let tdim = self.dim();
        match (d0, d1) {
            (d0, 0) if d0 == tdim && tdim > 0 => Slot::Cells,
            (d, 0) if d > 0 && d < tdim => Slot::EntityVertices(d),
            (d0, d) if d0 == tdim && d > 0 && d < tdim => Slot::CellEntities(d),
            _ => Slot::Derived(d0 * (tdim + 1) + d1),
        }
    }

    fn check_dim(&self, dim: usize) -> Result<(), MeshError> {
        if dim > self.dim() {
            Err(MeshError::DimensionOutOfRange {
                dim,
                tdim: self.dim(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn assert_dim(&self, dim: usize) {
        if let Err(e) = self.check_dim(dim) {
            panic!("{e}");
        }
    }

    fn validate_table(&self, d0: usize, d1: usize, table: &Connectivity) -> Result<(), MeshError> {
        let expected = self.size(d0);
        if table.num_entities() != expected {
            return Err(MeshError::ConnectivityShape {
                d0,
                d1,
                expected,
                found: table.num_entities(),
            });
        }
        table.check_targets(d0, d1, self.size(d1))
    }
}

impl InvalidateCache for Topology {
    fn invalidate_cache(&mut self) {
        log::debug!(
            "invalidating derived topology of {:?} mesh",
            self.cell_type
        );
        for set in &mut self.entities {
            set.take();
        }
        for table in &mut self.derived {
            table.take();
        }
    }
}

impl DebugInvariants for Topology {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let tdim = self.dim();
        self.cells.validate_invariants()?;
        self.cells.check_targets(tdim, 0, self.num_vertices)?;
        for (dim, offset) in [
            (0, self.vertex_ghost_offset),
            (tdim, self.cell_ghost_offset),
        ] {
            if let Some(offset) = offset {
                let count = self.size(dim);
                if offset > count {
                    return Err(MeshError::GhostOffsetOutOfRange { dim, offset, count });
                }
            }
        }
        for d0 in 0..=tdim {
            for d1 in 0..=tdim {
                if let Some(table) = self.get(d0, d1) {
                    table.validate_invariants()?;
                    self.validate_table(d0, d1, table)?;
                }
            }
        }
        Ok(())
    }
}
