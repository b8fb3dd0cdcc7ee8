#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Engine Core
//!
//! Compressed voxel storage and greedy surface extraction for a chunked voxel
//! world.
//!
//! ## Key Modules
//!
//! * `core` - The copy-on-write snapshot container shared by the storage types
//! * `voxels` - Materials, dense cubes, compressed volumes and structures
//! * `rendering` - The greedy mesher and the packed face format it produces
//!
//! ## Architecture
//!
//! A chunk owns a [`VoxelVolume`](voxels::volume::VoxelVolume): a minimal octree
//! encoded in one byte buffer. Edits decompress a private copy, modify it and
//! publish a re-encoded buffer; reads walk an immutable snapshot. To draw a
//! chunk, a [`ChunkMeshInput`](rendering::meshing::ChunkMeshInput) gathers the
//! chunk's cells and the bordering layer of each neighbour, and the
//! [`GreedyMeshExtractor`](rendering::meshing::GreedyMeshExtractor) turns them
//! into a [`Mesh`](rendering::meshing::Mesh) of packed faces.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_engine_core::{
//!     rendering::meshing::{ChunkMeshInput, GreedyMeshExtractor},
//!     voxels::{block::MaterialTable, volume::VoxelVolume},
//! };
//!
//! let materials = MaterialTable::from_json_str(
//!     r#"{ "materials": [ { "id": 1, "name": "stone" } ] }"#,
//! ).unwrap();
//!
//! let chunk = VoxelVolume::new(4, 0);
//! chunk.store_uniform(Point3::new(4, 4, 4), 1, 4);
//!
//! let input = ChunkMeshInput::gather(&chunk, [None; 6], 0);
//! let mesh = GreedyMeshExtractor::new().extract(&input, &materials, Point3::new(0, 0, 0), 0);
//! assert_eq!(mesh.face_count(), 6);
//! ```
//!
//! ## Performance Considerations
//!
//! * Uniform volumes encode to two bytes and are never expanded by reads
//! * Reads hold a lock only long enough to clone an `Arc`
//! * The mesher reuses its scratch grids; see
//!   [`with_extractor`](rendering::meshing::with_extractor) for one per thread

pub mod core;
pub mod error;
pub mod rendering;
pub mod voxels;

pub use error::{Error, Result};

#[cfg(not(target_family = "wasm"))]
use log::info;

/// Initializes the `env_logger` backend, writing to stdout and filtered by
/// `RUST_LOG`.
///
/// Calling it more than once is harmless; only the first call installs a logger.
#[cfg(not(target_family = "wasm"))]
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    if log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok()
    {
        info!("Logger initialized");
    }
}
