//! Pooled scratch buffers.
//!
//! The matching engine keeps two rolling rows per call. Short rows live on
//! the stack via `SmallVec`; trace rows that outlive the computing call
//! (match collections and iterators hand them to the caller) are rented
//! from a process-wide typed pool and returned exactly once when the
//! owning guard drops.
//!
//! Pool contents are garbage on rent: `rent` clears and re-initializes the
//! requested prefix before handing the buffer out.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Recycled arrays kept per pool; extras are dropped on return.
const MAX_SHELVED: usize = 16;

/// A process-wide shelf of reusable `Vec<T>` backing stores.
pub struct ArrayPool<T> {
    shelf: Mutex<Vec<Vec<T>>>,
}

impl<T: Clone + Default> ArrayPool<T> {
    pub const fn new() -> Self {
        Self {
            shelf: Mutex::new(Vec::new()),
        }
    }

    /// Rent a buffer of exactly `len` elements, each reset to `T::default()`.
    pub fn rent(&'static self, len: usize) -> PooledBuf<T> {
        let mut buf = {
            let mut shelf = self.shelf.lock();
            match shelf.iter().position(|b| b.capacity() >= len) {
                Some(i) => shelf.swap_remove(i),
                None => shelf.pop().unwrap_or_default(),
            }
        };
        buf.clear();
        buf.resize(len, T::default());
        PooledBuf { buf, pool: self }
    }

    fn recycle(&self, mut buf: Vec<T>) {
        buf.clear();
        let mut shelf = self.shelf.lock();
        if shelf.len() < MAX_SHELVED {
            shelf.push(buf);
        }
    }
}

impl<T: Clone + Default> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A rented buffer. Dereferences to a slice; the backing store returns to
/// its pool when the guard drops, so releasing twice is unrepresentable.
pub struct PooledBuf<T: Clone + Default + 'static> {
    buf: Vec<T>,
    pool: &'static ArrayPool<T>,
}

impl<T: Clone + Default + 'static> PooledBuf<T> {
    /// Shrink the visible region to the first `len` elements.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }
}

impl<T: Clone + Default> Deref for PooledBuf<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T: Clone + Default> DerefMut for PooledBuf<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Clone + Default> Drop for PooledBuf<T> {
    fn drop(&mut self) {
        self.pool.recycle(std::mem::take(&mut self.buf));
    }
}

impl<T: Clone + Default + std::fmt::Debug> std::fmt::Debug for PooledBuf<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static POOL: ArrayPool<u64> = ArrayPool::new();

    #[test]
    fn rent_initializes_contents() {
        {
            let mut first = POOL.rent(8);
            first.iter_mut().for_each(|v| *v = 0xDEAD);
        }
        // The recycled store must come back zeroed, not with stale data.
        let again = POOL.rent(8);
        assert_eq!(again.len(), 8);
        assert!(again.iter().all(|&v| v == 0));
    }

    #[test]
    fn rent_grows_to_requested_length() {
        let buf = POOL.rent(1024);
        assert_eq!(buf.len(), 1024);
    }

    #[test]
    fn truncate_shrinks_view() {
        let mut buf = POOL.rent(16);
        buf.truncate(4);
        assert_eq!(buf.len(), 4);
    }
}
