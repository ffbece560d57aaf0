//! A priority queue that keeps its entries in insertion order and selects
//! on removal.
//!
//! Every entry is stamped with a sequence number when it is enqueued. On
//! [`dequeue`], the entry with the greatest priority wins, and among entries
//! sharing that priority the one with the smallest sequence number (the one
//! enqueued first) wins.
//!
//! [`dequeue`]: PriorityQueue::dequeue
//!
//! # Examples
//!
//! ```
//! use linked_queues::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("A", 5);
//! queue.enqueue("B", 5);
//! queue.enqueue("C", 10);
//! queue.enqueue("D", 5);
//!
//! assert_eq!(queue.dequeue(), Ok("C"));
//! assert_eq!(queue.dequeue(), Ok("A"));
//! assert_eq!(queue.dequeue(), Ok("B"));
//! assert_eq!(queue.dequeue(), Ok("D"));
//! assert!(queue.dequeue().is_err());
//! ```

use std::fmt::{Debug, Formatter};
use std::iter::FromIterator;

use log::{debug, trace};

use crate::EmptyCollectionError;

/// An immutable `(value, priority, sequence)` record owned by a
/// [`PriorityQueue`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Entry<T> {
    value: T,
    priority: i32,
    sequence: u64,
}

impl<T> Entry<T> {
    /// The value as it was enqueued.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Larger is served first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The insertion stamp. Unique within the lifetime of the queue and
    /// strictly increasing in insertion order.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Consumes the entry, returning its value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Whether `self` is served before `other`.
    fn precedes(&self, other: &Self) -> bool {
        self.priority > other.priority
            || (self.priority == other.priority && self.sequence < other.sequence)
    }
}

impl<T: Debug> Debug for Entry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (Pri:{}, #{})", self.value, self.priority, self.sequence)
    }
}

/// A queue that serves the highest priority first, and equal priorities in
/// the order they were enqueued.
///
/// Entries are stored in insertion order; selection happens in
/// [`dequeue`](PriorityQueue::dequeue) by scanning every entry.
pub struct PriorityQueue<T> {
    entries: Vec<Entry<T>>,
    next_sequence: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty `PriorityQueue`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Adds `value` at the back of the queue with the given `priority`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(1) time.
    pub fn enqueue(&mut self, value: T, priority: i32) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        trace!("enqueue #{} with priority {}", sequence, priority);
        self.entries.push(Entry {
            value,
            priority,
            sequence,
        });
    }

    /// Removes and returns the value with the highest priority. Among equal
    /// priorities the earliest enqueued value is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError::Queue`] if the queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::{EmptyCollectionError, PriorityQueue};
    ///
    /// let mut queue = PriorityQueue::new();
    /// assert_eq!(queue.dequeue(), Err::<&str, _>(EmptyCollectionError::Queue));
    ///
    /// queue.enqueue("low", 1);
    /// queue.enqueue("high", 10);
    /// assert_eq!(queue.dequeue(), Ok("high"));
    /// assert_eq!(queue.size(), 1);
    /// ```
    pub fn dequeue(&mut self) -> Result<T, EmptyCollectionError> {
        let index = match self.best_index() {
            Some(index) => index,
            None => {
                debug!("dequeue from an empty priority queue");
                return Err(EmptyCollectionError::Queue);
            }
        };
        let entry = self.entries.remove(index);
        trace!(
            "dequeue #{} with priority {}, {} left",
            entry.sequence,
            entry.priority,
            self.entries.len()
        );
        Ok(entry.into_value())
    }

    /// Returns the value [`dequeue`](PriorityQueue::dequeue) would remove,
    /// or `None` if the queue is empty.
    pub fn peek(&self) -> Option<&T> {
        self.best_index().map(|index| &self.entries[index].value)
    }

    /// Returns the number of entries in the queue.
    #[inline]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    fn best_index(&self) -> Option<usize> {
        let mut entries = self.entries.iter().enumerate();
        let (mut best, mut best_entry) = entries.next()?;
        for (index, entry) in entries {
            if entry.precedes(best_entry) {
                best = index;
                best_entry = entry;
            }
        }
        Some(best)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T> Extend<(T, i32)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, i32)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

impl<T> FromIterator<(T, i32)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, i32)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T> IntoIterator for &'a PriorityQueue<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
