//! Greedy meshing of voxel cubes.
//!
//! Each of the six sides is swept layer by layer. For every layer the visible
//! faces are collected into a bit grid, one `u32` per row, alongside the
//! material of every set bit. Rectangles are then grown greedily: the lowest set
//! bit of a row starts a run, the run extends along the row while the material
//! matches, and the whole run extends over following rows while every bit of it
//! is still set with the same material. Consumed bits are cleared and the
//! rectangle is emitted as one packed face.

use std::cell::RefCell;

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::voxels::block::{BlockSide, Material, MaterialProperties, AIR};

use super::{
    face::{Face, PackedFace},
    mesh::{Mesh, MeshBucket, MESH_BUCKET_COUNT},
    source::VoxelSource,
};

/// Largest cube edge the extractor can mesh; one row must fit a `u32`.
pub const MAX_MESH_EDGE: usize = 32;

/// Whether the face of `voxel` towards `occluder` is visible.
///
/// Air has no faces. Air shows every face next to it. Transparent occluders
/// show faces of other materials, and of their own material unless it is
/// self-occluding. Opaque occluders hide everything.
#[inline]
pub fn is_face_visible<P>(properties: &P, voxel: Material, occluder: Material) -> bool
where
    P: MaterialProperties + ?Sized,
{
    voxel != AIR
        && (occluder == AIR
            || (properties.is_transparent(occluder)
                && (!properties.is_self_occluding(voxel) || voxel != occluder)))
}

/// Reusable greedy mesher.
///
/// The extractor owns the per-layer scratch grids so repeated extractions on
/// the same thread do not allocate beyond the output lists.
pub struct GreedyMeshExtractor {
    masks: [u32; MAX_MESH_EDGE],
    materials: [[Material; MAX_MESH_EDGE]; MAX_MESH_EDGE],
}

impl GreedyMeshExtractor {
    /// Creates an extractor with empty scratch space.
    pub fn new() -> Self {
        GreedyMeshExtractor {
            masks: [0; MAX_MESH_EDGE],
            materials: [[AIR; MAX_MESH_EDGE]; MAX_MESH_EDGE],
        }
    }

    /// Meshes `source` into a new [`Mesh`] tagged with `chunk` and `lod`.
    ///
    /// # Panics
    ///
    /// If the cube's edge exceeds [`MAX_MESH_EDGE`]. Rows are `u32` masks and
    /// packed faces hold 6-bit positions, so larger cubes cannot be meshed.
    pub fn extract<S, P>(&mut self, source: &S, properties: &P, chunk: Point3<i32>, lod: u8) -> Mesh
    where
        S: VoxelSource + ?Sized,
        P: MaterialProperties + ?Sized,
    {
        let edge = 1usize << source.edge_exponent();
        assert!(edge <= MAX_MESH_EDGE, "edge {edge} exceeds {MAX_MESH_EDGE}");

        if source.is_empty() {
            return Mesh::empty(chunk, lod);
        }

        let start = Instant::now();
        let mut buckets: [Vec<PackedFace>; MESH_BUCKET_COUNT] = Default::default();
        for side in BlockSide::all() {
            for layer in 0..edge {
                self.fill_layer(source, properties, side, layer, edge);
                self.merge_layer(properties, side, layer, edge, &mut buckets);
            }
        }

        let mesh = Mesh::new(chunk, lod, buckets);
        debug!(
            "Meshed chunk {:?} at lod {}: {} faces in {:?}",
            chunk,
            lod,
            mesh.face_count(),
            start.elapsed()
        );
        mesh
    }

    /// Marks the visible faces of `side` in `layer`.
    fn fill_layer<S, P>(&mut self, source: &S, properties: &P, side: BlockSide, layer: usize, edge: usize)
    where
        S: VoxelSource + ?Sized,
        P: MaterialProperties + ?Sized,
    {
        let axis = side.axis();
        // None when the occluding cell lies outside the cube.
        let occluder_layer = if side.is_positive() {
            Some(layer + 1).filter(|&l| l < edge)
        } else {
            layer.checked_sub(1)
        };

        for row in 0..edge {
            let mut mask = 0u32;
            for bit in 0..edge {
                let [x, y, z] = axis.compose(layer, row, bit);
                let voxel = source.voxel(x, y, z);
                if voxel == AIR {
                    continue;
                }
                let occluder = match occluder_layer {
                    Some(l) => {
                        let [ox, oy, oz] = axis.compose(l, row, bit);
                        source.voxel(ox, oy, oz)
                    }
                    None => source.neighbour(side, row, bit),
                };
                if is_face_visible(properties, voxel, occluder) {
                    mask |= 1 << bit;
                    self.materials[row][bit] = voxel;
                }
            }
            self.masks[row] = mask;
        }
    }

    /// Greedily merges the marked faces of `layer` and emits them.
    fn merge_layer<P>(
        &mut self,
        properties: &P,
        side: BlockSide,
        layer: usize,
        edge: usize,
        buckets: &mut [Vec<PackedFace>; MESH_BUCKET_COUNT],
    ) where
        P: MaterialProperties + ?Sized,
    {
        let axis = side.axis();
        for row in 0..edge {
            while self.masks[row] != 0 {
                let bit = self.masks[row].trailing_zeros() as usize;
                let material = self.materials[row][bit];

                let mut width = 1;
                while bit + width < edge
                    && self.masks[row] & (1 << (bit + width)) != 0
                    && self.materials[row][bit + width] == material
                {
                    width += 1;
                }
                let run = (((1u64 << width) - 1) << bit) as u32;

                let mut height = 1;
                while row + height < edge
                    && self.masks[row + height] & run == run
                    && self.materials[row + height][bit..bit + width]
                        .iter()
                        .all(|&m| m == material)
                {
                    height += 1;
                }

                for r in row..row + height {
                    self.masks[r] &= !run;
                }

                let [x, y, z] = axis.compose(layer, row, bit);
                let face = Face {
                    min: Point3::new(x, y, z),
                    width,
                    height,
                    side,
                    material,
                };
                let bucket = MeshBucket::for_face(side, properties.transparency_class(material));
                buckets[bucket.index()].push(PackedFace::pack(&face));
            }
        }
    }
}

impl Default for GreedyMeshExtractor {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static EXTRACTOR: RefCell<GreedyMeshExtractor> = RefCell::new(GreedyMeshExtractor::new());
}

/// Runs `f` with this thread's extractor.
///
/// Worker threads meshing many chunks reuse one extractor each instead of
/// creating one per call. Calls must not nest.
pub fn with_extractor<F, R>(f: F) -> R
where
    F: FnOnce(&mut GreedyMeshExtractor) -> R,
{
    EXTRACTOR.with(|extractor| f(&mut extractor.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::{
        block::{MaterialConfig, MaterialTable, TransparencyClass},
        chunk::DenseVolume,
    };

    const STONE: Material = 1;
    const GLASS: Material = 2;
    const LEAVES: Material = 3;

    fn table() -> MaterialTable {
        let mut table = MaterialTable::new();
        let entries = [
            (STONE, "stone", TransparencyClass::Opaque, false),
            (GLASS, "glass", TransparencyClass::Glass, true),
            (LEAVES, "leaves", TransparencyClass::Glass, false),
        ];
        for (id, name, class, self_occluding) in entries {
            table
                .insert(MaterialConfig {
                    id,
                    name: name.to_string(),
                    class,
                    self_occluding,
                })
                .unwrap();
        }
        table
    }

    #[test]
    fn visibility_rule() {
        let table = table();
        assert!(!is_face_visible(&table, AIR, STONE));
        assert!(is_face_visible(&table, STONE, AIR));
        assert!(!is_face_visible(&table, STONE, STONE));
        assert!(is_face_visible(&table, STONE, GLASS));
        assert!(!is_face_visible(&table, GLASS, GLASS));
        assert!(is_face_visible(&table, LEAVES, LEAVES));
        assert!(is_face_visible(&table, GLASS, LEAVES));
        assert!(!is_face_visible(&table, GLASS, STONE));
    }

    #[test]
    fn full_layer_merges_into_one_face() {
        let mut volume = DenseVolume::new(2, AIR);
        volume.fill_box(Point3::new(0, 0, 0), (4, 1, 4).into(), STONE);

        let mesh = GreedyMeshExtractor::new().extract(&volume, &table(), Point3::new(0, 0, 0), 0);

        let top = mesh.quads(MeshBucket::Opaque(BlockSide::TOP));
        assert_eq!(top.len(), 1);
        let face = top[0].unpack().unwrap();
        assert_eq!((face.width, face.height), (4, 4));
        assert_eq!(face.min, Point3::new(0, 0, 0));
        // Four sides, each a 4 × 1 strip.
        assert_eq!(mesh.face_count(), 6);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn oversized_cube_is_rejected() {
        let volume = DenseVolume::new(6, STONE);
        GreedyMeshExtractor::new().extract(&volume, &table(), Point3::new(0, 0, 0), 0);
    }

    #[test]
    fn materials_split_runs() {
        let mut volume = DenseVolume::new(1, AIR);
        volume.set(0, 0, 0, STONE);
        volume.set(0, 0, 1, LEAVES);

        let mesh = with_extractor(|extractor| extractor.extract(&volume, &table(), Point3::new(0, 0, 0), 0));

        // Stone shows through the leaves, but the leaves' back face is hidden
        // by the stone.
        assert_eq!(mesh.quads(MeshBucket::Opaque(BlockSide::FRONT)).len(), 1);
        assert_eq!(mesh.quads(MeshBucket::Glass).len(), 5);
        assert_eq!(mesh.counts().iter().sum::<usize>(), 11);
    }
}
