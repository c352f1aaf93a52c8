//! Mutex helpers.
//!
//! Library code never panics on a poisoned lock. The shared state guarded by
//! mutexes here (width caches, the logger's output sink and last timestamp)
//! stays usable after a panicking writer, so the poison is simply cleared.

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// ```rust
/// use std::sync::Mutex;
/// use flexstack::sync::lock_recover;
///
/// let mutex = Mutex::new(42);
/// assert_eq!(*lock_recover(&mutex), 42);
/// ```
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        mutex.clear_poison();
        poisoned.into_inner()
    })
}
