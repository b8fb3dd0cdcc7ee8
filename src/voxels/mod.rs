//! # Voxels Module
//!
//! Storage of voxel data:
//!
//! - [`block`]: material ids, block sides and material properties
//! - [`chunk`]: dense cubes and face layers, the uncompressed working forms
//! - [`volume`]: the compressed, thread-safe [`volume::VoxelVolume`]
//! - [`structure`]: named volumes stamped into chunks

pub mod block;
pub mod chunk;
pub mod structure;
pub mod volume;
