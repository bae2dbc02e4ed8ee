use alloc::collections::VecDeque;

use crate::{ItemView, Pool, ViewHolder};

/// Bounded FIFO of detached holders that are still bound to their index.
///
/// A cache hit reattaches a holder without calling `bind_view` again.
#[derive(Debug)]
pub struct Cache<V> {
    entries: VecDeque<ViewHolder<V>>,
    capacity: usize,
}

impl<V: ItemView> Cache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewHolder<V>> {
        self.entries.iter()
    }

    /// Detaches `holder` into the cache.
    ///
    /// On overflow the oldest entry moves to `pool`; whatever the pool evicts is destroyed.
    pub fn offer(&mut self, mut holder: ViewHolder<V>, pool: &mut Pool<V>) {
        holder.detach();
        self.entries.push_back(holder);
        if self.entries.len() <= self.capacity {
            return;
        }
        let Some(oldest) = self.entries.pop_front() else {
            return;
        };
        rtrace!(index = oldest.current_index(), "cache overflow, moving to pool");
        if let Some(evicted) = pool.offer(oldest) {
            rtrace!(index = evicted.current_index(), "pool overflow, destroying");
            evicted.destroy();
        }
    }

    /// Removes and returns the first holder bound to `index`.
    pub fn try_take_by_index(&mut self, index: usize) -> Option<ViewHolder<V>> {
        let pos = self
            .entries
            .iter()
            .position(|h| h.current_index() == index)?;
        self.entries.remove(pos)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = ViewHolder<V>> + '_ {
        self.entries.drain(..)
    }
}
