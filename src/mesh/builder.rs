//! Validated mesh construction.

use crate::mesh::geometry::Geometry;
use crate::mesh::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::connectivity::Connectivity;
use crate::topology::mesh_topology::Topology;

/// Builder for [`Mesh`].
///
/// Local indices at or above a ghost offset are ghosts; without an offset
/// every vertex (cell) is owned.
#[derive(Clone, Debug)]
pub struct MeshBuilder {
    cell_type: CellType,
    gdim: usize,
    coordinates: Vec<f64>,
    cells: Vec<usize>,
    ragged_cell: Option<(usize, usize)>,
    ghost_vertex_offset: Option<usize>,
    ghost_cell_offset: Option<usize>,
}

impl MeshBuilder {
    pub fn new(cell_type: CellType, gdim: usize) -> Self {
        Self {
            cell_type,
            gdim,
            coordinates: Vec::new(),
            cells: Vec::new(),
            ragged_cell: None,
            ghost_vertex_offset: None,
            ghost_cell_offset: None,
        }
    }

    /// Append one vertex.
    pub fn add_vertex(mut self, point: &[f64]) -> Self {
        self.coordinates.extend_from_slice(point);
        self
    }

    /// Replace all vertices with a flat coordinate array.
    pub fn vertices(mut self, coordinates: Vec<f64>) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Append one cell.
    pub fn add_cell(mut self, vertices: &[usize]) -> Self {
        let expected = self.cell_type.num_vertices();
        if vertices.len() != expected && self.ragged_cell.is_none() {
            self.ragged_cell = Some((self.cells.len() / expected, vertices.len()));
        }
        self.cells.extend_from_slice(vertices);
        self
    }

    /// Replace all cells with a flat cell→vertex array.
    pub fn cells(mut self, cells: Vec<usize>) -> Self {
        self.cells = cells;
        self.ragged_cell = None;
        self
    }

    /// Vertices `offset..` are ghosts.
    pub fn ghost_vertex_offset(mut self, offset: usize) -> Self {
        self.ghost_vertex_offset = Some(offset);
        self
    }

    /// Cells `offset..` are ghosts.
    pub fn ghost_cell_offset(mut self, offset: usize) -> Self {
        self.ghost_cell_offset = Some(offset);
        self
    }

    /// Validate the input and build the mesh.
    ///
    /// # Errors
    /// * [`MeshError::UnsupportedCellType`] for [`CellType::Point`].
    /// * [`MeshError::GeometricDimension`] if `gdim` is below the cell dimension.
    /// * [`MeshError::CoordinateLength`] if coordinates do not split into points.
    /// * [`MeshError::CellVertexCount`] for a cell with the wrong vertex count.
    /// * [`MeshError::VertexOutOfRange`] for a cell naming a missing vertex.
    /// * [`MeshError::GhostOffsetOutOfRange`] for an offset past the entity count.
    pub fn build(self) -> Result<Mesh, MeshError> {
        let cell_type = self.cell_type;
        if !cell_type.is_mesh_cell() {
            return Err(MeshError::UnsupportedCellType(cell_type));
        }
        let tdim = cell_type.dimension();
        if self.gdim < tdim {
            return Err(MeshError::GeometricDimension {
                gdim: self.gdim,
                tdim,
            });
        }
        let geometry = Geometry::try_new(self.gdim, self.coordinates)?;
        let num_vertices = geometry.num_points();

        let width = cell_type.num_vertices();
        if let Some((cell, found)) = self.ragged_cell {
            return Err(MeshError::CellVertexCount {
                cell,
                expected: width,
                found,
            });
        }
        if self.cells.len() % width != 0 {
            return Err(MeshError::CellVertexCount {
                cell: self.cells.len() / width,
                expected: width,
                found: self.cells.len() % width,
            });
        }
        if let Some((pos, &vertex)) = self
            .cells
            .iter()
            .enumerate()
            .find(|&(_, &v)| v >= num_vertices)
        {
            return Err(MeshError::VertexOutOfRange {
                cell: pos / width,
                vertex,
                num_vertices,
            });
        }
        let num_cells = self.cells.len() / width;
        for (dim, offset, count) in [
            (0, self.ghost_vertex_offset, num_vertices),
            (tdim, self.ghost_cell_offset, num_cells),
        ] {
            if let Some(offset) = offset.filter(|&o| o > count) {
                return Err(MeshError::GhostOffsetOutOfRange { dim, offset, count });
            }
        }

        let mut referenced = vec![false; num_vertices];
        for &v in &self.cells {
            referenced[v] = true;
        }
        let unreferenced = referenced.iter().filter(|&&r| !r).count();
        if unreferenced > 0 {
            log::warn!("{unreferenced} of {num_vertices} vertices are not referenced by any cell");
        }

        log::debug!(
            "building {cell_type:?} mesh: {num_vertices} vertices, {num_cells} cells, gdim {}",
            self.gdim
        );
        let topology = Topology::new(
            cell_type,
            num_vertices,
            Connectivity::from_uniform(width, self.cells),
            self.ghost_vertex_offset,
            self.ghost_cell_offset,
        );
        Ok(Mesh::from_parts(topology, geometry))
    }
}
