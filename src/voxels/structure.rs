//! # Structure Module
//!
//! A structure is a named, reusable volume (a tree, a house) that is stamped
//! into chunks. The stored volume is never rewritten per orientation; a
//! [`Transform`] permutes output indices while it is read.

use cgmath::Point3;
use log::trace;

use super::{
    chunk::DenseVolume,
    volume::{CopyMode, Region, Transform, VoxelVolume},
};

/// A named volume that can be placed into other volumes.
#[derive(Clone, Debug)]
pub struct Structure {
    name: String,
    volume: VoxelVolume,
}

impl Structure {
    /// Creates a structure from its compressed contents.
    pub fn new(name: impl Into<String>, volume: VoxelVolume) -> Self {
        Structure {
            name: name.into(),
            volume,
        }
    }

    /// The structure's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compressed contents.
    pub fn volume(&self) -> &VoxelVolume {
        &self.volume
    }

    /// Writes the whole structure into `target` with its min corner at
    /// `dest_offset`, oriented by `transform`. Air in the structure leaves the
    /// target's cells as they are.
    pub fn stamp_into(&self, target: &VoxelVolume, dest_offset: Point3<usize>, transform: Transform) {
        let edge = self.volume.edge();
        let region = Region::new(Point3::new(0, 0, 0), (edge, edge, edge).into()).with_transform(transform);
        trace!("Stamping structure '{}' at {:?}", self.name, dest_offset);
        target.store_region_from(dest_offset, &self.volume, &region, CopyMode::SkipAir);
    }

    /// The decompressed structure, for meshing in isolation.
    pub fn mesh_source(&self) -> DenseVolume {
        self.volume.to_dense()
    }
}
