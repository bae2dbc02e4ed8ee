use alloc::collections::VecDeque;

use crate::{ItemView, ViewHolder};

/// Bounded FIFO of recycled, unbound view holders.
///
/// Insertion order approximates LRU: the longest-idle holder is evicted first.
#[derive(Debug)]
pub struct Pool<V> {
    entries: VecDeque<ViewHolder<V>>,
    capacity: usize,
}

impl<V: ItemView> Pool<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
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

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewHolder<V>> {
        self.entries.iter()
    }

    /// Removes and returns the oldest holder.
    pub fn try_take(&mut self) -> Option<ViewHolder<V>> {
        self.entries.pop_front()
    }

    /// Recycles `holder` into the pool.
    ///
    /// When the pool is full the oldest holder is evicted and returned; the caller must destroy
    /// it. A zero-capacity pool hands `holder` straight back.
    #[must_use = "an evicted holder must be destroyed"]
    pub fn offer(&mut self, mut holder: ViewHolder<V>) -> Option<ViewHolder<V>> {
        holder.recycle();
        if self.capacity == 0 {
            return Some(holder);
        }
        let evicted = if self.is_full() {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(holder);
        evicted
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = ViewHolder<V>> + '_ {
        self.entries.drain(..)
    }
}
