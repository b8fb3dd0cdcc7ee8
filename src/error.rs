//! Error types for the voxel core.
//!
//! Volume and meshing operations are infallible by contract; only loading
//! configuration data can fail.

use thiserror::Error;

use crate::voxels::block::Material;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document is not valid JSON or has the wrong shape
    #[error("Malformed material table: {0}")]
    Json(#[from] serde_json::Error),

    /// Two entries configure the same material id
    #[error("Material {id} is defined more than once (\"{first}\" and \"{second}\")")]
    DuplicateMaterial {
        /// The repeated id
        id: Material,
        /// Name of the first entry with this id
        first: String,
        /// Name of the offending entry
        second: String,
    },

    /// An entry configures the air id
    #[error("Material {0} is reserved for air and cannot be configured")]
    ReservedMaterial(Material),
}

/// Convenience alias used by the fallible configuration entry points.
pub type Result<T> = std::result::Result<T, Error>;
