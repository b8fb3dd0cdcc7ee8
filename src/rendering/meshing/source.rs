//! Voxel data as seen by the mesher.
//!
//! The extractor only needs to read cells of the cube being meshed and, at the
//! border, the cell just across each side. [`ChunkMeshInput`] answers border
//! queries from its neighbours' face layers; a bare [`DenseVolume`] is treated
//! as floating in air.

use cgmath::Point3;

use crate::voxels::{
    block::{BlockSide, Material, AIR},
    chunk::{DenseVolume, FaceLayer},
    volume::VoxelVolume,
};

/// Read access to a cube of voxels and the cells bordering it.
pub trait VoxelSource {
    /// `N` in `edge = 2^N` of the cube being meshed.
    fn edge_exponent(&self) -> u8;

    /// The material inside the cube at `(x, y, z)`.
    fn voxel(&self, x: usize, y: usize, z: usize) -> Material;

    /// The material just outside the cube across `side`, at `(row, bit)` of the
    /// layer perpendicular to that side.
    fn neighbour(&self, side: BlockSide, row: usize, bit: usize) -> Material;

    /// Whether the cube holds nothing but air, in which case it has no faces.
    fn is_empty(&self) -> bool {
        false
    }
}

impl VoxelSource for DenseVolume {
    fn edge_exponent(&self) -> u8 {
        DenseVolume::edge_exponent(self)
    }

    #[inline]
    fn voxel(&self, x: usize, y: usize, z: usize) -> Material {
        self.get(x, y, z)
    }

    #[inline]
    fn neighbour(&self, _side: BlockSide, _row: usize, _bit: usize) -> Material {
        AIR
    }
}

/// A chunk's decompressed cube together with the facing layer of each of its
/// six neighbours.
#[derive(Clone, Debug)]
pub struct ChunkMeshInput {
    volume: DenseVolume,
    /// Indexed by the side of this chunk the neighbour lies across
    neighbours: [FaceLayer; 6],
    empty: bool,
}

impl ChunkMeshInput {
    /// Builds an input from decompressed data.
    ///
    /// `neighbours[side as usize]` must be the layer of the neighbour across
    /// `side` that faces back towards this chunk, i.e. a layer for
    /// `side.opposite()`, with the same edge as `volume`.
    pub fn new(volume: DenseVolume, neighbours: [FaceLayer; 6]) -> Self {
        debug_assert!(BlockSide::all()
            .into_iter()
            .all(|side| neighbours[side as usize].side() == side.opposite()
                && neighbours[side as usize].edge() == volume.edge()));
        let empty = volume.uniform_material(Point3::new(0, 0, 0), volume.edge()) == Some(AIR);
        ChunkMeshInput {
            volume,
            neighbours,
            empty,
        }
    }

    /// Decompresses `volume` downsampled by `lod` and the facing layer of each
    /// present neighbour. A missing neighbour is treated as air.
    ///
    /// `neighbours` is indexed by [`BlockSide`]; every neighbour must have the
    /// same edge exponent as `volume`.
    ///
    /// The downsampled edge, `volume.edge() >> lod`, must not exceed
    /// [`MAX_MESH_EDGE`](super::MAX_MESH_EDGE) for the result to be meshable:
    /// mesh a 128-edge volume at `lod >= 2`.
    pub fn gather(volume: &VoxelVolume, neighbours: [Option<&VoxelVolume>; 6], lod: u8) -> Self {
        let edge_exponent = volume.edge_exponent() - lod;
        let mut dense = DenseVolume::new(edge_exponent, AIR);
        if lod == 0 {
            volume.decompress_full(&mut dense);
        } else {
            volume.decompress_lod(&mut dense, lod);
        }

        let layers = BlockSide::all().map(|side| match neighbours[side as usize] {
            Some(neighbour) => neighbour.decompress_face_layer_lod(side.opposite(), lod),
            None => FaceLayer::new(side.opposite(), edge_exponent, AIR),
        });

        Self::new(dense, layers)
    }

    /// The chunk's own cells.
    pub fn volume(&self) -> &DenseVolume {
        &self.volume
    }

    /// The layer of the neighbour across `side`.
    pub fn neighbour_layer(&self, side: BlockSide) -> &FaceLayer {
        &self.neighbours[side as usize]
    }
}

impl VoxelSource for ChunkMeshInput {
    fn edge_exponent(&self) -> u8 {
        self.volume.edge_exponent()
    }

    #[inline]
    fn voxel(&self, x: usize, y: usize, z: usize) -> Material {
        self.volume.get(x, y, z)
    }

    #[inline]
    fn neighbour(&self, side: BlockSide, row: usize, bit: usize) -> Material {
        self.neighbours[side as usize].get(row, bit)
    }

    fn is_empty(&self) -> bool {
        self.empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_reads_facing_layers() {
        let chunk = VoxelVolume::new(2, 1);
        let east = VoxelVolume::new(2, AIR);
        // East neighbour's -X layer is what borders this chunk's +X side.
        east.store_uniform(Point3::new(0, 0, 0), 5, 2);

        let mut neighbours = [None; 6];
        neighbours[BlockSide::RIGHT as usize] = Some(&east);
        let input = ChunkMeshInput::gather(&chunk, neighbours, 0);

        assert_eq!(input.neighbour_layer(BlockSide::RIGHT).side(), BlockSide::LEFT);
        // X layers are (row = z, bit = y).
        assert_eq!(input.neighbour(BlockSide::RIGHT, 1, 1), 5);
        assert_eq!(input.neighbour(BlockSide::RIGHT, 3, 3), AIR);
        assert_eq!(input.neighbour(BlockSide::TOP, 0, 0), AIR);
        assert_eq!(input.voxel(3, 3, 3), 1);
        assert!(!input.is_empty());
    }

    #[test]
    fn air_chunk_is_empty() {
        let input = ChunkMeshInput::gather(&VoxelVolume::new(3, AIR), [None; 6], 1);
        assert!(input.is_empty());
        assert_eq!(input.volume().edge(), 4);
    }
}
