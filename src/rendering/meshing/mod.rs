//! Surface extraction for voxel rendering.
//!
//! This module turns decompressed voxel cubes into compact, GPU-friendly face
//! lists. It implements greedy meshing to reduce the number of faces by
//! merging coplanar neighbours of the same material into rectangles.
//!
//! # Architecture
//! - [`GreedyMeshExtractor`]: the mesher, generic over any [`VoxelSource`]
//! - [`ChunkMeshInput`]: a chunk plus its neighbours' bordering layers
//! - [`Mesh`]: the output, eight buckets of [`PackedFace`]s
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_engine_core::{
//!     rendering::meshing::{with_extractor, ChunkMeshInput, MeshBucket},
//!     voxels::{block::{BlockSide, MaterialTable}, volume::VoxelVolume},
//! };
//!
//! let chunk = VoxelVolume::new(5, 0);
//! chunk.store_uniform(Point3::new(0, 0, 0), 1, 16);
//!
//! let input = ChunkMeshInput::gather(&chunk, [None; 6], 0);
//! let mesh = with_extractor(|extractor| {
//!     extractor.extract(&input, &MaterialTable::new(), Point3::new(0, 0, 0), 0)
//! });
//! assert_eq!(mesh.quads(MeshBucket::Opaque(BlockSide::TOP)).len(), 1);
//! ```

mod face;
mod greedy;
mod mesh;
mod source;

pub use face::{Face, PackedFace};
pub use greedy::{is_face_visible, with_extractor, GreedyMeshExtractor, MAX_MESH_EDGE};
pub use mesh::{Mesh, MeshBucket, MESH_BUCKET_COUNT};
pub use source::{ChunkMeshInput, VoxelSource};
