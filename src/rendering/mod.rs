//! # Rendering Module
//!
//! CPU side of chunk rendering: the greedy mesher and the packed face format it
//! hands to the GPU layer.

pub mod meshing;
