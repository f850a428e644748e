//! Contiguous entity storage with liveness flags
//!
//! Entities are flagged dead during a tick and compacted out in one sweep at
//! the end, so the backing `Vec` keeps its allocation across ticks.

/// Anything stored in a [`Pool`]
pub trait Lifecycle {
    fn is_alive(&self) -> bool;
}

/// Contiguous store for one entity kind, optionally capped
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
    cap: Option<usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cap: None,
        }
    }
}

impl<T: Lifecycle> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool that silently drops spawns past `cap` live entries
    pub fn with_cap(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            cap: Some(cap),
        }
    }

    /// Add an entity. Returns false if the pool is full.
    pub fn spawn(&mut self, item: T) -> bool {
        if self.cap.is_some_and(|cap| self.items.len() >= cap) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Compact out dead entries, preserving order. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.is_alive());
        before - self.items.len()
    }

    /// Update-and-compact in one pass; `f` reports whether the entry survives
    pub fn retain_mut(&mut self, f: impl FnMut(&mut T) -> bool) {
        self.items.retain_mut(f);
    }

    /// Spawn limit, if any
    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T: Lifecycle> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Lifecycle> IntoIterator for &'a mut Pool<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
