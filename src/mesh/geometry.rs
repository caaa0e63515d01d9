//! Vertex coordinate storage.
//!
//! Coordinates are stored flat, `gdim` values per vertex.

use crate::mesh_error::MeshError;

/// Vertex coordinates with a fixed geometric dimension.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    gdim: usize,
    coordinates: Vec<f64>,
}

impl Geometry {
    /// Wrap a flat coordinate array, validating its length.
    pub fn try_new(gdim: usize, coordinates: Vec<f64>) -> Result<Self, MeshError> {
        if gdim == 0 || coordinates.len() % gdim != 0 {
            return Err(MeshError::CoordinateLength {
                len: coordinates.len(),
                gdim,
            });
        }
        Ok(Self { gdim, coordinates })
    }

    /// Geometric dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.gdim
    }

    /// Number of stored points.
    #[inline]
    pub fn num_points(&self) -> usize {
        if self.gdim == 0 {
            0
        } else {
            self.coordinates.len() / self.gdim
        }
    }

    /// Coordinates of point `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.num_points()`.
    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.coordinates[i * self.gdim..(i + 1) * self.gdim]
    }

    /// The flat coordinate array.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }
}
