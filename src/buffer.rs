//! Growable buffer for pattern-id lists.
//!
//! Tree construction carries a list of live pattern ids through every
//! partition step. The buffer grows by doubling-plus-one and surfaces
//! allocation failure as [`BuildError::OutOfMemory`] instead of
//! aborting, so a failed build can unwind and release everything it
//! allocated. Storage is released on drop.

use crate::error::BuildError;

/// A growable list with an explicit, fallible growth policy.
#[derive(Debug, Default)]
pub struct Buffer<T: Copy> {
    items: Vec<T>,
}

impl<T: Copy> Buffer<T> {
    pub fn new() -> Buffer<T> {
        Buffer { items: Vec::new() }
    }

    /// Pre-size the backing store. Fails with `OutOfMemory` rather than
    /// aborting if the allocation is refused.
    pub fn with_capacity(capacity: usize) -> Result<Buffer<T>, BuildError> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| BuildError::OutOfMemory)?;
        Ok(Buffer { items })
    }

    /// Append one element. When full, capacity grows to `cap * 2 + 1`;
    /// existing elements keep their order across the reallocation.
    pub fn push(&mut self, item: T) -> Result<(), BuildError> {
        if self.items.len() == self.items.capacity() {
            self.items
                .try_reserve_exact(self.items.capacity() + 1)
                .map_err(|_| BuildError::OutOfMemory)?;
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return the last element, `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Reset length to zero without releasing storage.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T: Copy> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
