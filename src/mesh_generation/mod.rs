//! Structured mesh generators on the unit interval, square, and cube.
//!
//! Vertices are numbered lexicographically with `x` fastest. Quadrilateral
//! and hexahedral cells list their vertices cyclically (see
//! [`CellType`]); simplices split each box conformingly.

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidGeometry(message.into())
}

/// Six tetrahedra sharing the `0 → 6` diagonal of a cyclically numbered hexahedron.
const KUHN_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 1, 5, 6],
    [0, 4, 5, 6],
    [0, 3, 7, 6],
    [0, 4, 7, 6],
];

/// Generate `[0, 1]` divided into `n` segments.
pub fn unit_interval(n: usize) -> Result<Mesh, MeshError> {
    if n == 0 {
        return Err(invalid_geometry("n must be positive"));
    }
    let coordinates = (0..=n).map(|i| i as f64 / n as f64).collect();
    let cells = (0..n).flat_map(|i| [i, i + 1]).collect();
    Mesh::builder(CellType::Interval, 1)
        .vertices(coordinates)
        .cells(cells)
        .build()
}

/// Generate `[0, 1]²` with `nx × ny` boxes of triangles or quadrilaterals.
///
/// Each box is split into two triangles along its `v0 → v2` diagonal.
pub fn unit_square(nx: usize, ny: usize, cell_type: CellType) -> Result<Mesh, MeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    if !matches!(cell_type, CellType::Triangle | CellType::Quadrilateral) {
        return Err(MeshError::UnsupportedCellType(cell_type));
    }

    let mut coordinates = Vec::with_capacity(2 * (nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            coordinates.extend_from_slice(&[i as f64 / nx as f64, j as f64 / ny as f64]);
        }
    }

    let row_stride = nx + 1;
    let mut cells = Vec::with_capacity(nx * ny * 6);
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * row_stride + i;
            let v1 = v0 + 1;
            let v3 = v0 + row_stride;
            let v2 = v3 + 1;
            match cell_type {
                CellType::Triangle => cells.extend_from_slice(&[v0, v1, v2, v0, v2, v3]),
                _ => cells.extend_from_slice(&[v0, v1, v2, v3]),
            }
        }
    }

    Mesh::builder(cell_type, 2)
        .vertices(coordinates)
        .cells(cells)
        .build()
}

/// Generate `[0, 1]³` with `nx × ny × nz` boxes of tetrahedra or hexahedra.
///
/// Each box is split into six tetrahedra around its main diagonal.
pub fn unit_cube(nx: usize, ny: usize, nz: usize, cell_type: CellType) -> Result<Mesh, MeshError> {
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(invalid_geometry("nx, ny and nz must be positive"));
    }
    if !matches!(cell_type, CellType::Tetrahedron | CellType::Hexahedron) {
        return Err(MeshError::UnsupportedCellType(cell_type));
    }

    let mut coordinates = Vec::with_capacity(3 * (nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                coordinates.extend_from_slice(&[
                    i as f64 / nx as f64,
                    j as f64 / ny as f64,
                    k as f64 / nz as f64,
                ]);
            }
        }
    }

    let row_stride = nx + 1;
    let layer_stride = (nx + 1) * (ny + 1);
    let mut cells = Vec::with_capacity(nx * ny * nz * 24);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let v0 = k * layer_stride + j * row_stride + i;
                let bottom = [v0, v0 + 1, v0 + row_stride + 1, v0 + row_stride];
                let hex = [
                    bottom[0],
                    bottom[1],
                    bottom[2],
                    bottom[3],
                    bottom[0] + layer_stride,
                    bottom[1] + layer_stride,
                    bottom[2] + layer_stride,
                    bottom[3] + layer_stride,
                ];
                match cell_type {
                    CellType::Tetrahedron => {
                        for tet in KUHN_TETRAHEDRA {
                            cells.extend(tet.iter().map(|&l| hex[l]));
                        }
                    }
                    _ => cells.extend_from_slice(&hex),
                }
            }
        }
    }

    Mesh::builder(cell_type, 3)
        .vertices(coordinates)
        .cells(cells)
        .build()
}
