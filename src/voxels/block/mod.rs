//! # Block Module
//!
//! This module provides the block-level vocabulary shared by the storage and
//! meshing code: material ids, the six block sides and the material property
//! lookup.

pub mod block_side;
pub mod material_table;

pub use block_side::{Axis, BlockSide};
pub use material_table::{MaterialConfig, MaterialProperties, MaterialTable, TransparencyClass};

/// A material id. One byte per voxel, both in memory and in the encoded format.
///
/// Properties such as transparency are resolved externally by id through
/// [`MaterialProperties`].
pub type Material = u8;

/// The material id of empty space.
pub const AIR: Material = 0;
