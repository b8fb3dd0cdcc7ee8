//! The output of one extraction: packed faces sorted into draw buckets.

use cgmath::Point3;

use crate::voxels::block::{BlockSide, TransparencyClass};

use super::face::PackedFace;

/// Number of draw buckets in a [`Mesh`].
pub const MESH_BUCKET_COUNT: usize = 8;

/// A group of faces drawn together.
///
/// Opaque faces are split by side so the renderer can cull whole buckets that
/// face away from the camera. Transparent faces are split by class so they can
/// be drawn in separate passes.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum MeshBucket {
    /// Opaque faces facing one side; buckets 0 through 5
    Opaque(BlockSide),
    /// Water faces; bucket 6
    Water,
    /// Glass and other transparent solid faces; bucket 7
    Glass,
}

impl MeshBucket {
    /// All buckets in index order.
    pub fn all() -> [MeshBucket; MESH_BUCKET_COUNT] {
        let [left, right, bottom, top, back, front] = BlockSide::all().map(MeshBucket::Opaque);
        [left, right, bottom, top, back, front, MeshBucket::Water, MeshBucket::Glass]
    }

    /// The bucket for a face on `side` of a material of class `class`.
    #[inline]
    pub fn for_face(side: BlockSide, class: TransparencyClass) -> Self {
        match class {
            TransparencyClass::Opaque => MeshBucket::Opaque(side),
            TransparencyClass::Water => MeshBucket::Water,
            TransparencyClass::Glass => MeshBucket::Glass,
        }
    }

    /// Position of this bucket in [`Mesh`] storage.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MeshBucket::Opaque(side) => side as usize,
            MeshBucket::Water => 6,
            MeshBucket::Glass => 7,
        }
    }
}

/// The surface of one chunk at one level of detail.
///
/// A mesh is immutable once extracted; re-meshing a chunk produces a new mesh
/// that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    chunk: Point3<i32>,
    lod: u8,
    buckets: [Vec<PackedFace>; MESH_BUCKET_COUNT],
}

impl Mesh {
    pub(crate) fn new(chunk: Point3<i32>, lod: u8, buckets: [Vec<PackedFace>; MESH_BUCKET_COUNT]) -> Self {
        Mesh { chunk, lod, buckets }
    }

    /// A mesh without faces.
    pub fn empty(chunk: Point3<i32>, lod: u8) -> Self {
        Self::new(chunk, lod, Default::default())
    }

    /// Coordinate of the chunk this mesh belongs to.
    pub fn chunk(&self) -> Point3<i32> {
        self.chunk
    }

    /// Level of detail the chunk was meshed at.
    pub fn lod(&self) -> u8 {
        self.lod
    }

    /// The faces in `bucket`.
    pub fn quads(&self, bucket: MeshBucket) -> &[PackedFace] {
        &self.buckets[bucket.index()]
    }

    /// The faces in `bucket` as raw bytes, ready for a buffer upload.
    pub fn as_bytes(&self, bucket: MeshBucket) -> &[u8] {
        bytemuck::cast_slice(self.quads(bucket))
    }

    /// Number of faces in each bucket, in bucket index order.
    pub fn counts(&self) -> [usize; MESH_BUCKET_COUNT] {
        let mut counts = [0; MESH_BUCKET_COUNT];
        for (count, bucket) in counts.iter_mut().zip(&self.buckets) {
            *count = bucket.len();
        }
        counts
    }

    /// Total number of faces across all buckets.
    pub fn face_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether the mesh has no faces at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Iterates over every face with the bucket it was sorted into.
    pub fn iter(&self) -> impl Iterator<Item = (MeshBucket, &PackedFace)> + '_ {
        MeshBucket::all()
            .into_iter()
            .flat_map(move |bucket| self.quads(bucket).iter().map(move |face| (bucket, face)))
    }
}
