use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mock store, recovering the data if a test thread panicked mid-update.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
