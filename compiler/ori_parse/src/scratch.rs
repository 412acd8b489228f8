//! Scratch buffer for temporary allocations during parsing.
//!
//! Provides a reusable buffer to reduce per-list allocations.
//! Inspired by Zig's parser which uses a scratch buffer for temporary collections.
//!
//! # Status
//! This module provides infrastructure for the scratch buffer optimization
//! described in `plans/ori_parse_improvements/section-01-quick-wins.md`.
//! The types are ready for use but not yet integrated into the parser.
//! Migration of list-parsing functions will be done incrementally as needed.
//!
//! # Usage Pattern
//! ```ignore
//! fn parse_items(&mut self) -> Result<ItemRange, ParseError> {
//!     // Borrow scratch buffer with RAII scope
//!     let mut scope = self.scratch.scope();
//!
//!     while has_more {
//!         let item = self.parse_item()?;
//!         scope.push(item);
//!     }
//!
//!     // Copy to arena and get range
//!     let range = self.arena.alloc_items(scope.drain());
//!     Ok(range)
//!     // scope drops here, buffer is truncated automatically
//! }
//! ```

// Infrastructure for future optimization - not yet integrated into parser.
// See plans/ori_parse_improvements/section-01-quick-wins.md for details.
#![allow(dead_code)]

use std::marker::PhantomData;

/// A reusable buffer for temporary storage during parsing.
///
/// The buffer maintains a single backing Vec that grows as needed but is never
/// shrunk. Multiple "scopes" can be nested, each tracking their start position.
/// When a scope is dropped, the buffer is truncated back to that position.
///
/// # Performance
/// - Avoids repeated allocations for small temporary collections
/// - The backing Vec grows to the high-water mark and stays there
/// - Stack-like scope semantics allow nested list parsing
#[derive(Debug, Default)]
pub struct ScratchBuffer<T> {
    /// Storage for all temporary items.
    storage: Vec<T>,
}

impl<T> ScratchBuffer<T> {
    /// Create a new empty scratch buffer.
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    /// Create a scratch buffer with pre-allocated capacity.
    ///
    /// # Heuristics
    /// For parsing, a good starting capacity is `source_len / 50`, which
    /// roughly estimates the number of AST nodes in typical code.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
        }
    }

    /// Begin a new scope for temporary storage.
    ///
    /// The returned `ScratchScope` provides push access and automatically
    /// truncates the buffer when dropped.
    pub fn scope(&mut self) -> ScratchScope<'_, T> {
        let start = self.storage.len();
        ScratchScope {
            buffer: self,
            start,
            _marker: PhantomData,
        }
    }

    /// Get the current capacity of the buffer.
    ///
    /// This is useful for monitoring memory usage.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Get the current length of the buffer.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.storage.len()
    }
}

/// An RAII guard for a scratch buffer scope.
///
/// When dropped, truncates the buffer back to the start position,
/// allowing the memory to be reused by subsequent scopes.
pub struct ScratchScope<'a, T> {
    buffer: &'a mut ScratchBuffer<T>,
    start: usize,
    _marker: PhantomData<T>,
}

impl<T> ScratchScope<'_, T> {
    /// Push an item to the scratch buffer.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.buffer.storage.push(item);
    }

    /// Get a slice of items in this scope.
    pub fn as_slice(&self) -> &[T] {
        &self.buffer.storage[self.start..]
    }

    /// Get the number of items in this scope.
    pub fn len(&self) -> usize {
        self.buffer.storage.len() - self.start
    }

    /// Check if this scope is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain all items from this scope, consuming them.
    ///
    /// This is typically called right before the scope is dropped to
    /// transfer ownership of the items to another container.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.buffer.storage.drain(self.start..)
    }
}

impl<T> Drop for ScratchScope<'_, T> {
    fn drop(&mut self) {
        // Truncate back to start position, allowing memory reuse
        self.buffer.storage.truncate(self.start);
    }
}
