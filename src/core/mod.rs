//! # Core Module
//!
//! This module provides the concurrency primitive shared by the voxel storage
//! types.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe copy-on-write snapshot container. Readers take an
//!   `Arc` snapshot of the current version; writers publish a complete
//!   replacement with a single pointer swap.
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use voxel_engine_core::core::MtResource;
//!
//! let counter = MtResource::new(Arc::new(0u32));
//! let next = *counter.snapshot() + 1;
//! counter.publish(Arc::new(next));
//! assert_eq!(*counter.snapshot(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
