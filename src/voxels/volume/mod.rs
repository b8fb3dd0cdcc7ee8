//! # Volume Module
//!
//! [`VoxelVolume`] is the compressed, thread-safe storage of one cubic chunk of
//! voxels. The cube is encoded as a minimal octree in a single byte buffer (see
//! [`node`] for the format) which is published through an [`MtResource`]:
//!
//! - Reads take a snapshot of the current buffer and walk it without holding
//!   any lock, so a read never sees a half-replaced buffer.
//! - Edits are serialized by a per-volume writer lock. Each edit decompresses a
//!   private dense copy, modifies it, re-encodes it and publishes the result.
//!
//! ## Example
//!
//! ```
//! use cgmath::Point3;
//! use voxel_engine_core::voxels::volume::VoxelVolume;
//!
//! let volume = VoxelVolume::new(4, 0);
//! assert_eq!(volume.byte_len(), 2);
//!
//! volume.store_uniform(Point3::new(2, 4, 6), 3, 2);
//! assert_eq!(volume.get_material(3, 5, 7), 3);
//! assert_eq!(volume.get_material(1, 5, 7), 0);
//! ```

pub mod encoder;
pub mod node;
pub mod traversal;
pub mod transform;

pub use transform::{CopyMode, Region, Transform};

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use cgmath::{Point3, Vector3};
use log::{debug, trace};
use web_time::Instant;

use crate::core::MtResource;
use crate::voxels::{
    block::{BlockSide, Material, AIR},
    chunk::{DenseVolume, FaceLayer},
};

use self::{
    node::{Node, MAX_EDGE_EXPONENT},
    traversal::Window,
};

/// A compressed cube of `2^N` voxels per edge.
///
/// All methods take `&self`; a volume can be shared between threads behind an
/// `Arc` and read and edited concurrently.
pub struct VoxelVolume {
    edge_exponent: u8,
    data: MtResource<[u8]>,
    writer: Mutex<()>,
}

impl VoxelVolume {
    /// Creates a volume of edge `2^edge_exponent` where every cell is `fill`.
    pub fn new(edge_exponent: u8, fill: Material) -> Self {
        Self::from_bytes(edge_exponent, vec![node::NodeTag::Homogeneous as u8, fill])
    }

    /// Wraps bytes previously returned by [`VoxelVolume::get_bytes`].
    ///
    /// The bytes are trusted to be a complete encoding of a cube with this edge
    /// exponent; they are not validated.
    pub fn from_bytes(edge_exponent: u8, bytes: impl Into<Arc<[u8]>>) -> Self {
        debug_assert!(
            edge_exponent <= MAX_EDGE_EXPONENT,
            "edge exponent {edge_exponent} exceeds {MAX_EDGE_EXPONENT}"
        );
        VoxelVolume {
            edge_exponent,
            data: MtResource::new(bytes.into()),
            writer: Mutex::new(()),
        }
    }

    /// Compresses a dense cube.
    pub fn from_dense(volume: &DenseVolume) -> Self {
        Self::from_bytes(volume.edge_exponent(), encoder::encode(volume))
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

    /// The complete current encoding.
    ///
    /// The returned buffer is an immutable snapshot; later edits publish a new
    /// buffer and leave it untouched.
    pub fn get_bytes(&self) -> Arc<[u8]> {
        self.data.snapshot()
    }

    /// Size of the current encoding in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.snapshot().len()
    }

    /// The material of the whole volume if it holds only one.
    pub fn uniform_material(&self) -> Option<Material> {
        match Node::read(&self.data.snapshot(), 0) {
            Node::Homogeneous(material) => Some(material),
            _ => None,
        }
    }

    /// The material at `(x, y, z)`, found by descending the octree.
    ///
    /// Coordinates must be below [`VoxelVolume::edge`].
    pub fn get_material(&self, x: usize, y: usize, z: usize) -> Material {
        debug_assert!(x < self.edge() && y < self.edge() && z < self.edge());
        traversal::material_at(&self.data.snapshot(), self.edge_exponent, x, y, z)
    }

    /// Decompresses the whole volume into `target`, which must have the same
    /// edge exponent.
    pub fn decompress_full(&self, target: &mut DenseVolume) {
        debug_assert_eq!(target.edge_exponent(), self.edge_exponent);
        let data = self.data.snapshot();
        traversal::walk(&data, self.edge(), &Window::cube(self.edge(), 1), &mut |[x, y, z], m| {
            target.set(x, y, z, m)
        });
    }

    /// Decompresses the whole volume into a new dense cube.
    pub fn to_dense(&self) -> DenseVolume {
        let mut dense = DenseVolume::new(self.edge_exponent, AIR);
        self.decompress_full(&mut dense);
        dense
    }

    /// Decompresses a downsampled copy of the volume into `target`, which must
    /// have edge exponent `N - lod`. Each output cell takes the material at the
    /// min corner of its `2^lod` block.
    pub fn decompress_lod(&self, target: &mut DenseVolume, lod: u8) {
        debug_assert!(lod <= self.edge_exponent);
        debug_assert_eq!(target.edge_exponent(), self.edge_exponent - lod);
        let window = Window::cube(self.edge(), 1 << lod);
        let data = self.data.snapshot();
        traversal::walk(&data, self.edge(), &window, &mut |position, m| {
            let [x, y, z] = window.output_position(position);
            target.set(x, y, z, m);
        });
    }

    /// Decompresses `region` into `target` with its min corner at `dest_offset`.
    ///
    /// The region is sampled at its level of detail and oriented by its
    /// transform; the written box has extent [`Region::output_extent`] and must
    /// fit inside `target`.
    pub fn decompress_region(
        &self,
        target: &mut DenseVolume,
        dest_offset: Point3<usize>,
        region: &Region,
    ) {
        self.read_region(region, |[x, y, z], m| {
            target.set(dest_offset.x + x, dest_offset.y + y, dest_offset.z + z, m)
        });
    }

    /// Decompresses the outer layer facing `side`.
    pub fn decompress_face_layer(&self, side: BlockSide) -> FaceLayer {
        self.decompress_face_layer_lod(side, 0)
    }

    /// Decompresses the outer layer facing `side` of the volume downsampled by
    /// `lod`, matching the corresponding slab of [`VoxelVolume::decompress_lod`].
    pub fn decompress_face_layer_lod(&self, side: BlockSide, lod: u8) -> FaceLayer {
        let mut layer = FaceLayer::new(side, self.edge_exponent - lod, AIR);
        self.decompress_face_layer_into(&mut layer, lod);
        layer
    }

    /// Fills `target` with the layer facing `target.side()`, downsampled by `lod`.
    pub fn decompress_face_layer_into(&self, target: &mut FaceLayer, lod: u8) {
        debug_assert_eq!(target.edge() << lod, self.edge());
        let side = target.side();
        let axis = side.axis() as usize;
        let step = 1 << lod;

        let mut window = Window::cube(self.edge(), step);
        if side.is_positive() {
            window.min[axis] = self.edge() - step;
        } else {
            window.max[axis] = 1;
        }

        let data = self.data.snapshot();
        traversal::walk(&data, self.edge(), &window, &mut |position, m| {
            let (row, bit) = side.axis().decompose(window.output_position(position));
            target.set(row, bit, m);
        });
    }

    /// Fills the cube of edge `side_length` at `min_corner` with `material`.
    pub fn store_uniform(&self, min_corner: Point3<usize>, material: Material, side_length: usize) {
        let size = Vector3::new(side_length, side_length, side_length);
        self.edit(|dense| dense.fill_box(min_corner, size, material));
    }

    /// Copies `region` of `source` into this volume with its min corner at
    /// `dest_offset`.
    ///
    /// With [`CopyMode::SkipAir`] air cells of the source leave the destination
    /// unchanged. `source` may be this volume: the region is read from the
    /// buffer current when the edit starts.
    pub fn store_region_from(
        &self,
        dest_offset: Point3<usize>,
        source: &VoxelVolume,
        region: &Region,
        mode: CopyMode,
    ) {
        self.edit(|dense| {
            source.read_region(region, |[x, y, z], m| {
                if mode == CopyMode::SkipAir && m == AIR {
                    return;
                }
                dense.set(dest_offset.x + x, dest_offset.y + y, dest_offset.z + z, m);
            });
        });
    }

    /// Walks `region`, passing each output position (relative to the region's
    /// output box) and material to `sink`.
    fn read_region<F>(&self, region: &Region, mut sink: F)
    where
        F: FnMut([usize; 3], Material),
    {
        let min = region.source_offset;
        let window = Window {
            min: [min.x, min.y, min.z],
            max: [min.x + region.size.x, min.y + region.size.y, min.z + region.size.z],
            step: region.step(),
        };
        let sampled = region.sampled_size();
        let transform = region.transform;

        let data = self.data.snapshot();
        traversal::walk(&data, self.edge(), &window, &mut |position, m| {
            let output = window.output_position(position);
            // Partial blocks at the far edge have no output cell.
            if output[0] < sampled.x && output[1] < sampled.y && output[2] < sampled.z {
                sink(transform.apply(output, sampled), m);
            }
        });
    }

    /// Runs `edit` on a dense copy of the volume and publishes the re-encoded
    /// result. Edits are serialized by the writer lock.
    fn edit<F>(&self, edit: F)
    where
        F: FnOnce(&mut DenseVolume),
    {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();

        let mut dense = self.to_dense();
        edit(&mut dense);
        let encoded = encoder::encode(&dense);
        let new_len = encoded.len();

        let previous = self.data.publish(Arc::from(encoded));
        debug!(
            "Recompressed {}³ volume: {} -> {} bytes in {:?}",
            self.edge(),
            previous.len(),
            new_len,
            start.elapsed()
        );
        trace!("Volume root is {:?}", Node::read(&self.data.snapshot(), 0));
    }
}

impl Clone for VoxelVolume {
    /// Creates an independent volume sharing the current immutable buffer.
    fn clone(&self) -> Self {
        Self::from_bytes(self.edge_exponent, self.get_bytes())
    }
}

impl fmt::Debug for VoxelVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxelVolume")
            .field("edge_exponent", &self.edge_exponent)
            .field("byte_len", &self.byte_len())
            .finish()
    }
}
