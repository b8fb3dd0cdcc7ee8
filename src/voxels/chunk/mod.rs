//! # Chunk Module
//!
//! This module provides the uncompressed forms of a chunk's voxel data:
//!
//! - [`DenseVolume`]: one material byte per cell of a `2^N` cube. It is the
//!   target of decompression, the input of compression and the voxel source the
//!   greedy mesher reads.
//! - [`FaceLayer`]: the single outer layer of a cube facing one side, which is all
//!   a neighbouring chunk needs to know to decide face visibility at the border.
//!
//! ## Memory Layout
//!
//! Cells are stored x-outer, z-middle, y-inner: the cell `(x, y, z)` of a cube
//! with edge exponent `N` lives at index `(x << 2N) | (z << N) | y`. This is the
//! same order the compressed encoding enumerates octants in, so it is part of the
//! fixed format rather than an implementation detail.

mod face_layer;

pub use face_layer::FaceLayer;

use cgmath::{Point3, Vector3};

use super::block::Material;

/// A dense cube of `2^N` cells per edge, one material byte per cell.
///
/// Coordinates are not bounds checked beyond slice indexing; callers are
/// trusted to stay within `[0, edge)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseVolume {
    /// `N` in `edge = 2^N`
    edge_exponent: u8,
    /// Cells in x-outer / z-middle / y-inner order
    cells: Vec<Material>,
}

impl DenseVolume {
    /// Creates a cube of edge `2^edge_exponent` filled with `fill`.
    pub fn new(edge_exponent: u8, fill: Material) -> Self {
        let edge = 1usize << edge_exponent;
        DenseVolume {
            edge_exponent,
            cells: vec![fill; edge * edge * edge],
        }
    }

    /// Wraps an existing cell buffer laid out in the dense order.
    ///
    /// `cells.len()` must be `8^edge_exponent`.
    pub fn from_cells(edge_exponent: u8, cells: Vec<Material>) -> Self {
        debug_assert_eq!(cells.len(), 1usize << (3 * edge_exponent as usize));
        DenseVolume {
            edge_exponent,
            cells,
        }
    }

    /// `N` in `edge = 2^N`.
    #[inline]
    pub fn edge_exponent(&self) -> u8 {
        self.edge_exponent
    }

    /// Number of cells along each edge.
    #[inline]
    pub fn edge(&self) -> usize {
        1 << self.edge_exponent
    }

    /// Index of `(x, y, z)` in [`DenseVolume::cells`].
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        let n = self.edge_exponent as usize;
        (x << (2 * n)) | (z << n) | y
    }

    /// The material at `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Material {
        self.cells[self.index(x, y, z)]
    }

    /// Overwrites the material at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, material: Material) {
        let index = self.index(x, y, z);
        self.cells[index] = material;
    }

    /// All cells in dense order.
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }

    /// Consumes the volume, returning its cell buffer.
    pub fn into_cells(self) -> Vec<Material> {
        self.cells
    }

    /// Fills the axis-aligned box starting at `min` with extent `size`.
    pub fn fill_box(&mut self, min: Point3<usize>, size: Vector3<usize>, material: Material) {
        for x in min.x..min.x + size.x {
            for z in min.z..min.z + size.z {
                let row = self.index(x, min.y, z);
                self.cells[row..row + size.y].fill(material);
            }
        }
    }

    /// Returns the material of the cube at `origin` with edge `size` if every
    /// cell in it holds the same material.
    ///
    /// Scans in storage order and stops at the first mismatch.
    pub fn uniform_material(&self, origin: Point3<usize>, size: usize) -> Option<Material> {
        let first = self.get(origin.x, origin.y, origin.z);
        for x in origin.x..origin.x + size {
            for z in origin.z..origin.z + size {
                let row = self.index(x, origin.y, z);
                if self.cells[row..row + size].iter().any(|&m| m != first) {
                    return None;
                }
            }
        }
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_x_outer_z_middle_y_inner() {
        let volume = DenseVolume::new(2, 0);
        assert_eq!(volume.index(0, 1, 0), 1);
        assert_eq!(volume.index(0, 0, 1), 4);
        assert_eq!(volume.index(1, 0, 0), 16);
        assert_eq!(volume.index(3, 3, 3), 63);
    }

    #[test]
    fn fill_box_touches_only_the_box() {
        let mut volume = DenseVolume::new(2, 0);
        volume.fill_box(Point3::new(1, 2, 0), Vector3::new(2, 2, 1), 7);

        let mut filled = 0;
        for x in 0..4 {
            for y in 0..4 {
                for z in 0..4 {
                    let inside = (1..3).contains(&x) && (2..4).contains(&y) && z == 0;
                    assert_eq!(volume.get(x, y, z) == 7, inside);
                    filled += inside as usize;
                }
            }
        }
        assert_eq!(filled, 4);
    }

    #[test]
    fn uniform_material_detects_single_mismatch() {
        let mut volume = DenseVolume::new(3, 5);
        assert_eq!(volume.uniform_material(Point3::new(0, 0, 0), 8), Some(5));

        volume.set(7, 7, 7, 1);
        assert_eq!(volume.uniform_material(Point3::new(0, 0, 0), 8), None);
        assert_eq!(volume.uniform_material(Point3::new(0, 0, 0), 4), Some(5));
        assert_eq!(volume.uniform_material(Point3::new(4, 4, 4), 4), None);
        assert_eq!(volume.uniform_material(Point3::new(7, 7, 7), 1), Some(1));
    }
}
