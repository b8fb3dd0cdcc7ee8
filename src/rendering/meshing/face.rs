use bytemuck::{Pod, Zeroable};
use cgmath::{Point3, Vector3};
use num_traits::FromPrimitive;

use crate::voxels::block::{BlockSide, Material};

/// A merged rectangle of coplanar voxel faces.
///
/// `width` runs along the bit axis and `height` along the row axis of the
/// layer perpendicular to `side` (see
/// [`Axis::layer_axes`](crate::voxels::block::Axis::layer_axes)). `min` is the
/// voxel at the rectangle's min corner, not a vertex position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// The min-corner voxel in chunk coordinates
    pub min: Point3<usize>,
    /// Number of voxels along the bit axis
    pub width: usize,
    /// Number of voxels along the row axis
    pub height: usize,
    /// Which side of the voxels this face covers
    pub side: BlockSide,
    /// The material of every voxel under the face
    pub material: Material,
}

impl Face {
    /// The number of voxels the face spans along each axis; 1 along its normal.
    pub fn extent(&self) -> Vector3<usize> {
        let axis = self.side.axis();
        let [x, y, z] = axis.compose(1, self.height, self.width);
        Vector3::new(x, y, z)
    }

    /// Whether the face covers voxel `(x, y, z)`.
    pub fn covers(&self, x: usize, y: usize, z: usize) -> bool {
        let extent = self.extent();
        (self.min.x..self.min.x + extent.x).contains(&x)
            && (self.min.y..self.min.y + extent.y).contains(&y)
            && (self.min.z..self.min.z + extent.z).contains(&z)
    }
}

/// A face packed into two 32-bit words for upload to the GPU.
///
/// ```text
/// word0 = height << 24 | width << 18 | x << 12 | y << 6 | z
/// word1 = side << 8 | material
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedFace {
    /// Extent and min-corner position
    pub word0: u32,
    /// Side and material
    pub word1: u32,
}

impl PackedFace {
    /// Packs `face`. Positions must be below 64 and the width below 64.
    #[inline]
    pub fn pack(face: &Face) -> Self {
        debug_assert!(face.width < 64 && face.height < 256);
        debug_assert!(face.min.x < 64 && face.min.y < 64 && face.min.z < 64);
        PackedFace {
            word0: (face.height as u32) << 24
                | (face.width as u32) << 18
                | (face.min.x as u32) << 12
                | (face.min.y as u32) << 6
                | face.min.z as u32,
            word1: (face.side as u32) << 8 | face.material as u32,
        }
    }

    /// Decodes the face, or `None` if the side field is not a valid side.
    pub fn unpack(&self) -> Option<Face> {
        let side = BlockSide::from_u32((self.word1 >> 8) & 0xFF)?;
        Some(Face {
            min: Point3::new(
                ((self.word0 >> 12) & 0x3F) as usize,
                ((self.word0 >> 6) & 0x3F) as usize,
                (self.word0 & 0x3F) as usize,
            ),
            width: ((self.word0 >> 18) & 0x3F) as usize,
            height: (self.word0 >> 24) as usize,
            side,
            material: self.word1 as Material,
        })
    }
}
