//! # Face Layer Module
//!
//! A face layer is the `edge × edge` slab of cells on one side of a cube. When a
//! chunk is meshed, each neighbour contributes the layer facing back towards it
//! so that border faces can be culled without decompressing the whole neighbour.

use crate::voxels::block::{BlockSide, Material};

use super::DenseVolume;

/// The outermost layer of a cube facing `side`.
///
/// Cells are addressed by `(row, bit)` using the axes returned by
/// [`Axis::layer_axes`](crate::voxels::block::Axis::layer_axes) for the side's
/// axis: X sides are `(z, y)`, Y sides `(x, z)` and Z sides `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceLayer {
    side: BlockSide,
    edge_exponent: u8,
    cells: Vec<Material>,
}

impl FaceLayer {
    /// Creates a layer of edge `2^edge_exponent` filled with `fill`.
    pub fn new(side: BlockSide, edge_exponent: u8, fill: Material) -> Self {
        let edge = 1usize << edge_exponent;
        FaceLayer {
            side,
            edge_exponent,
            cells: vec![fill; edge * edge],
        }
    }

    /// Copies the layer facing `side` out of a dense cube.
    pub fn from_dense(volume: &DenseVolume, side: BlockSide) -> Self {
        let mut layer = FaceLayer::new(side, volume.edge_exponent(), 0);
        let edge = volume.edge();
        let depth = layer.depth();
        let axis = side.axis();
        for row in 0..edge {
            for bit in 0..edge {
                let [x, y, z] = axis.compose(depth, row, bit);
                layer.set(row, bit, volume.get(x, y, z));
            }
        }
        layer
    }

    /// Which side of the cube this layer lies on.
    #[inline]
    pub fn side(&self) -> BlockSide {
        self.side
    }

    /// Number of cells along each edge.
    #[inline]
    pub fn edge(&self) -> usize {
        1 << self.edge_exponent
    }

    /// The coordinate of this layer along its side's axis: `edge - 1` for
    /// positive sides, `0` for negative ones.
    #[inline]
    pub fn depth(&self) -> usize {
        if self.side.is_positive() {
            self.edge() - 1
        } else {
            0
        }
    }

    /// The material at `(row, bit)`.
    #[inline]
    pub fn get(&self, row: usize, bit: usize) -> Material {
        self.cells[(row << self.edge_exponent) | bit]
    }

    /// Overwrites the material at `(row, bit)`.
    #[inline]
    pub fn set(&mut self, row: usize, bit: usize, material: Material) {
        self.cells[(row << self.edge_exponent) | bit] = material;
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dense_reads_the_outer_slab() {
        let mut volume = DenseVolume::new(2, 0);
        // Marks on the +X slab at (y=1, z=2) and the -Y slab at (x=3, z=1).
        volume.set(3, 1, 2, 9);
        volume.set(3, 0, 1, 4);

        let right = FaceLayer::from_dense(&volume, BlockSide::RIGHT);
        assert_eq!(right.depth(), 3);
        assert_eq!(right.get(2, 1), 9);
        assert_eq!(right.get(1, 0), 4);

        let bottom = FaceLayer::from_dense(&volume, BlockSide::BOTTOM);
        assert_eq!(bottom.depth(), 0);
        assert_eq!(bottom.get(3, 1), 4);
        assert_eq!(bottom.cells().iter().filter(|&&m| m != 0).count(), 1);

        let left = FaceLayer::from_dense(&volume, BlockSide::LEFT);
        assert!(left.cells().iter().all(|&m| m == 0));
    }
}
