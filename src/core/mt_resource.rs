//! Copy-on-write snapshot container for data shared across threads.

use std::sync::{Arc, PoisonError, RwLock};

/// A thread-safe, copy-on-write snapshot container.
///
/// `MtResource` holds the current version of a value of type `T` behind an
/// `Arc<RwLock<Arc<T>>>`. Readers take a cheap reference-counted snapshot of the
/// current version under the read lock and then work on that immutable snapshot
/// without holding any lock. Writers build a complete replacement off-lock and
/// publish it with [`MtResource::publish`], which only holds the write lock for
/// the pointer swap.
///
/// A reader therefore never observes a half-written value: it either sees the
/// version before a publish or the version after it.
///
/// # Type Parameters
/// - `T`: The type of the contained value, must be `Send + Sync` and may be unsized
///   (for example `[u8]`)
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use voxel_engine_core::core::MtResource;
///
/// let bytes: MtResource<[u8]> = MtResource::new(Arc::from(vec![0u8, 1]));
/// let before = bytes.snapshot();
///
/// bytes.publish(Arc::from(vec![0u8, 2]));
///
/// // The old snapshot is untouched, new readers see the new version.
/// assert_eq!(&*before, &[0, 1]);
/// assert_eq!(&*bytes.snapshot(), &[0, 2]);
/// ```
///
/// # Performance Considerations
/// - `snapshot()` only holds the read lock for an `Arc` clone
/// - `publish()` only holds the write lock for a pointer swap
/// - The previous version is freed once the last snapshot referencing it is dropped
pub struct MtResource<T: Send + Sync + ?Sized> {
    /// The lock guarding the current version
    pub resource: Arc<RwLock<Arc<T>>>,
}

impl<T: Send + Sync + ?Sized> MtResource<T> {
    /// Creates a new `MtResource` whose current version is `resource`.
    ///
    /// # Arguments
    /// * `resource` - The initial version
    ///
    /// # Returns
    /// A new `MtResource` publishing the provided value
    pub fn new(resource: Arc<T>) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a reference-counted snapshot of the current version.
    ///
    /// A poisoned lock is recovered: the guarded value is only ever replaced
    /// wholesale, so a panicking holder cannot leave it partially written.
    pub fn snapshot(&self) -> Arc<T> {
        self.resource
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically replaces the current version with `resource`.
    ///
    /// # Returns
    /// The version that was current before the swap
    pub fn publish(&self, resource: Arc<T>) -> Arc<T> {
        let mut guard = self
            .resource
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, resource)
    }
}

impl<T: Send + Sync + ?Sized> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
