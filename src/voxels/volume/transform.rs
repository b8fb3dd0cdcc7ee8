//! # Transform Module
//!
//! Orientation and copy options for reading a volume into another one. Stored
//! bytes never change with orientation; transforms only permute the index an
//! output cell is written to.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A horizontal orientation applied to output indices at read time.
///
/// Components apply in a fixed order: mirror X, then mirror Z, then a quarter
/// turn about the Y axis mapping `(x, z)` to `(extent_z - 1 - z, x)`. The turn
/// swaps the X and Z extents of the output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Mirror along the X axis
    pub mirror_x: bool,
    /// Mirror along the Z axis
    pub mirror_z: bool,
    /// Quarter turn about the Y axis
    pub rotate_90: bool,
}

impl Transform {
    /// The transform that leaves every index in place.
    pub const IDENTITY: Transform = Transform {
        mirror_x: false,
        mirror_z: false,
        rotate_90: false,
    };

    /// Whether this is [`Transform::IDENTITY`].
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Extent of the output for a region of `size` cells.
    pub fn output_extent(&self, size: Vector3<usize>) -> Vector3<usize> {
        if self.rotate_90 {
            Vector3::new(size.z, size.y, size.x)
        } else {
            size
        }
    }

    /// Maps a position within a region of `size` cells to its output position.
    #[inline]
    pub fn apply(&self, position: [usize; 3], size: Vector3<usize>) -> [usize; 3] {
        let [mut x, y, mut z] = position;
        if self.mirror_x {
            x = size.x - 1 - x;
        }
        if self.mirror_z {
            z = size.z - 1 - z;
        }
        if self.rotate_90 {
            (x, z) = (size.z - 1 - z, x);
        }
        [x, y, z]
    }
}

/// How source cells overwrite the destination when copying between volumes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyMode {
    /// Every cell of the region is overwritten.
    #[default]
    Replace,
    /// Air in the source leaves the destination cell untouched.
    SkipAir,
}

/// A box of source cells and how it is sampled and oriented.
///
/// `size` is measured in source cells; with a level of detail of `lod` the box
/// yields `size / 2^lod` output cells per axis, each taken from the min corner
/// of its `2^lod` block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Min corner of the box in the source
    pub source_offset: Point3<usize>,
    /// Extent of the box in source cells
    pub size: Vector3<usize>,
    /// Sampling level: one output cell per `2^lod` source cells per axis
    pub lod: u8,
    /// Orientation applied to output indices
    pub transform: Transform,
}

impl Region {
    /// A full resolution, untransformed region.
    pub fn new(source_offset: Point3<usize>, size: Vector3<usize>) -> Self {
        Region {
            source_offset,
            size,
            lod: 0,
            transform: Transform::IDENTITY,
        }
    }

    /// Sets the sampling level.
    pub fn with_lod(mut self, lod: u8) -> Self {
        self.lod = lod;
        self
    }

    /// Sets the output orientation.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Source cells consumed per output cell along each axis.
    #[inline]
    pub fn step(&self) -> usize {
        1 << self.lod
    }

    /// Output cells per axis before the transform is applied.
    pub fn sampled_size(&self) -> Vector3<usize> {
        self.size / self.step()
    }

    /// Output cells per axis after the transform is applied.
    pub fn output_extent(&self) -> Vector3<usize> {
        self.transform.output_extent(self.sampled_size())
    }
}
