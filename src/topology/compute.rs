//! Derivation of connectivity tables from the cell→vertex table.
//!
//! - Intermediate entities (edges, faces) are generated from the reference
//!   cell sub-entity tables and numbered in first-seen order over cells.
//!   Owned cells precede ghost cells, so entities touched only by ghost
//!   cells are numbered last.
//! - Upward tables are transposes of downward ones.
//! - Downward tables between intermediate dimensions use vertex-set inclusion.
//!
//! Every row produced here, except `cell → entity`, is in ascending order.

use crate::topology::cell_type::CellType;
use crate::topology::connectivity::Connectivity;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;

/// Entities of one intermediate dimension together with their cell incidence.
#[derive(Clone, Debug)]
pub(crate) struct EntitySet {
    /// `d → 0`: each entity's vertices, ascending.
    pub entity_vertices: Connectivity,
    /// `D → d`: each cell's entities in reference-cell order.
    pub cell_entities: Connectivity,
    /// Entities `num_owned..` belong to ghost cells only.
    pub num_owned: usize,
}

/// Generate the entities of dimension `dim` (with `0 < dim < D`).
///
/// Cells `owned_cells..` are ghosts. An entity is owned if any owned cell
/// contains it.
///
/// # Panics
/// Panics if `cell_type` has no sub-entities of dimension `dim`.
pub(crate) fn compute_entities(
    cell_type: CellType,
    cells: &Connectivity,
    dim: usize,
    owned_cells: usize,
) -> EntitySet {
    let local = cell_type.sub_entities(dim);
    let width = cell_type.sub_entity_type(dim).num_vertices();

    let mut numbering: HashMap<Vec<usize>, usize> = HashMap::new();
    let mut entity_vertices = Vec::new();
    let mut cell_entities = Vec::with_capacity(cells.num_entities() * local.len());
    let mut num_owned = None;

    for (c, cell) in cells.rows().enumerate() {
        if c == owned_cells {
            num_owned = Some(numbering.len());
        }
        for sub in local {
            let key: Vec<usize> = sub.iter().map(|&l| cell[l]).sorted_unstable().collect();
            let next = numbering.len();
            let index = match numbering.entry(key) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    entity_vertices.extend_from_slice(e.key());
                    *e.insert(next)
                }
            };
            cell_entities.push(index);
        }
    }

    let num_owned = num_owned.unwrap_or(numbering.len());
    log::trace!(
        "generated {} entities of dimension {dim} ({num_owned} owned) from {} {cell_type:?} cells",
        numbering.len(),
        cells.num_entities()
    );

    EntitySet {
        entity_vertices: Connectivity::from_uniform(width, entity_vertices),
        cell_entities: Connectivity::from_uniform(local.len(), cell_entities),
        num_owned,
    }
}

/// `d0 → d1` for `d0 > d1 > 0`: the `d1` entities whose vertices all belong
/// to the `d0` entity.
///
/// `vertex_targets` (`0 → d1`) must have ascending rows and
/// `source_vertices` (`d0 → 0`) must have ascending rows.
pub(crate) fn compute_inclusion(
    source_vertices: &Connectivity,
    vertex_targets: &Connectivity,
    target_vertices: &Connectivity,
) -> Connectivity {
    Connectivity::from_rows(source_vertices.rows().map(|vertices| {
        vertices
            .iter()
            .map(|&v| vertex_targets.row(v).iter().copied())
            .kmerge()
            .dedup()
            .filter(|&t| {
                target_vertices
                    .row(t)
                    .iter()
                    .all(|v| vertices.binary_search(v).is_ok())
            })
            .collect::<Vec<_>>()
    }))
}
