use std::ops::Deref;

use ghost_cell::{GhostCell, GhostToken};
use log::trace;
use static_rc::StaticRc;

use crate::list::iterator::Iter;

pub mod iterator;

mod algorithms;

/// The `LinkedList` is a doubly-linked list whose nodes are shared by their
/// two neighbours without raw pointers.
///
/// Every node is split into two halves of a [`StaticRc`]: one half is held by
/// the node before it (or by the list as its head), the other by the node
/// after it (or by the list as its tail). The contents of the nodes live in
/// [`GhostCell`]s, and the list owns the [`GhostToken`] that unlocks them,
/// so a list is created inside a token scope:
///
/// ```
/// use ghost_cell::GhostToken;
/// use linked_queues::LinkedList;
///
/// GhostToken::new(|token| {
///     let mut list = LinkedList::new(token);
///     list.push_back(2);
///     list.push_front(1);
///     assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
/// });
/// ```
///
/// or, equivalently, with [`LinkedList::with`].
///
/// Adding and removing at either end computes in *O*(1) time. Operations
/// that look for a value ([`insert_after`], [`remove`], [`replace`]) take
/// *O*(*n*) time.
///
/// The list never reports errors: removing from an empty list, or looking
/// for a value that is not there, leaves the list unchanged.
///
/// [`insert_after`]: LinkedList::insert_after
/// [`remove`]: LinkedList::remove
/// [`replace`]: LinkedList::replace
pub struct LinkedList<'id, T> {
    links: [Option<NodePtr<'id, T>>; 2],
    token: GhostToken<'id>,
    #[cfg(feature = "length")]
    /// the length of the list
    len: usize,
}

pub(crate) struct Node<'id, T> {
    pub(crate) links: [Option<NodePtr<'id, T>>; 2],
    pub(crate) elem: T,
}

pub(crate) type NodePtr<'id, T> = Half<GhostCell<'id, Node<'id, T>>>;
type NodeBox<'id, T> = Full<GhostCell<'id, Node<'id, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, T> Node<'id, T> {
    pub(crate) const NEXT: usize = 0;
    pub(crate) const PREV: usize = 1;

    fn new(elem: T) -> Self {
        let links = [None, None];
        Self { elem, links }
    }
}

// private methods
impl<'id, T> LinkedList<'id, T> {
    pub(crate) const HEAD: usize = 0;
    pub(crate) const TAIL: usize = 1;

    pub(crate) fn head(&self) -> Option<&GhostCell<'id, Node<'id, T>>> {
        self.links[Self::HEAD].as_deref()
    }

    pub(crate) fn tail(&self) -> Option<&GhostCell<'id, Node<'id, T>>> {
        self.links[Self::TAIL].as_deref()
    }

    pub(crate) fn token(&self) -> &GhostToken<'id> {
        &self.token
    }

    fn new_node(elem: T) -> NodeBox<'id, T> {
        Full::new(GhostCell::new(Node::new(elem)))
    }

    fn into_elem(node: NodeBox<'id, T>) -> T {
        let cell = *Full::into_box(node);
        cell.into_inner().elem
    }

    /// Link a detached node `node` at the end `side` of the list.
    ///
    /// The old end node (if any) becomes the inner neighbour of `node`; both
    /// of `node`'s links must be empty.
    fn link_at(&mut self, side: usize, node: NodeBox<'id, T>) {
        let oppo = 1 - side;
        let (left, right): (NodePtr<'id, T>, NodePtr<'id, T>) = Full::split(node);
        match self.links[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(&mut self.token).links[oppo] = Some(left);
                right.deref().borrow_mut(&mut self.token).links[side] = Some(this_side);
            }
            None => self.links[oppo] = Some(left),
        }
        self.links[side] = Some(right);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        #[cfg(debug_assertions)]
        self.assert_ends();
    }

    /// Unlink the node at the end `side` of the list, and return it detached
    /// (both links empty), or return `None` if the list is empty.
    fn unlink_at(&mut self, side: usize) -> Option<NodeBox<'id, T>> {
        let oppo = 1 - side;
        let right = self.links[side].take()?;
        let inner = right.deref().borrow_mut(&mut self.token).links[side].take();
        let left = match inner {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(&mut self.token).links[oppo].take();
                self.links[side] = Some(this_side);
                left
            }
            None => self.links[oppo].take(),
        };
        // The other half of an end node is held either by its inner
        // neighbour or, for a single node, by the opposite end of the list.
        let left = left.expect("end node is missing its second half");
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        #[cfg(debug_assertions)]
        self.assert_ends();
        Some(Full::join(left, right))
    }

    /// `head.prev` and `tail.next` are always empty, and `head` and `tail`
    /// are either both present or both absent.
    #[cfg(debug_assertions)]
    fn assert_ends(&self) {
        match (self.head(), self.tail()) {
            (None, None) => {}
            (Some(head), Some(tail)) => {
                assert!(head.borrow(&self.token).links[Node::<T>::PREV].is_none());
                assert!(tail.borrow(&self.token).links[Node::<T>::NEXT].is_none());
            }
            _ => panic!("exactly one of head and tail is set"),
        }
        #[cfg(feature = "length")]
        assert_eq!(self.len == 0, self.head().is_none());
    }
}

impl<'id, T> LinkedList<'id, T> {
    /// Create an empty `LinkedList` that unlocks its nodes with `token`.
    ///
    /// # Examples
    /// ```
    /// use ghost_cell::GhostToken;
    /// use linked_queues::LinkedList;
    ///
    /// GhostToken::new(|token| {
    ///     let list: LinkedList<'_, u32> = LinkedList::new(token);
    ///     assert!(list.is_empty());
    /// });
    /// ```
    #[inline]
    pub fn new(token: GhostToken<'id>) -> Self {
        let links = [None, None];
        Self {
            links,
            token,
            #[cfg(feature = "length")]
            len: 0,
        }
    }

    /// Runs `f` with a new empty `LinkedList` created in a fresh token scope,
    /// and returns what `f` returns.
    ///
    /// # Examples
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// let values = LinkedList::with(|mut list| {
    ///     list.extend(1..=5);
    ///     list.insert_after(&3, 99);
    ///     list.iter().copied().collect::<Vec<_>>()
    /// });
    /// assert_eq!(values, vec![1, 2, 3, 99, 4, 5]);
    /// ```
    pub fn with<R, F>(f: F) -> R
    where
        F: for<'brand> FnOnce(LinkedList<'brand, T>) -> R,
    {
        GhostToken::new(|token| f(LinkedList::new(token)))
    }

    /// Returns `true` if the `LinkedList` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }

    /// Returns the length of the `LinkedList`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, or *O*(*n*) time if the
    /// `length` feature is disabled.
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `LinkedList`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the head element, or `None` if the list is
    /// empty.
    pub fn front(&self) -> Option<&T> {
        self.head().map(|head| &head.borrow(&self.token).elem)
    }

    /// Provides a reference to the tail element, or `None` if the list is
    /// empty.
    pub fn back(&self) -> Option<&T> {
        self.tail().map(|tail| &tail.borrow(&self.token).elem)
    }

    /// Inserts an element as the new head of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     list.push_front(2);
    ///     assert_eq!(list.front(), Some(&2));
    ///
    ///     list.push_front(1);
    ///     assert_eq!(list.front(), Some(&1));
    ///     assert_eq!(list.back(), Some(&2));
    /// });
    /// ```
    pub fn push_front(&mut self, elem: T) {
        trace!("insert at head");
        self.link_at(Self::HEAD, Self::new_node(elem));
    }

    /// Inserts an element as the new tail of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elem: T) {
        trace!("insert at tail");
        self.link_at(Self::TAIL, Self::new_node(elem));
    }

    /// Removes the head element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     assert_eq!(list.pop_front(), None);
    ///
    ///     list.push_front(1);
    ///     list.push_front(3);
    ///     assert_eq!(list.pop_front(), Some(3));
    ///     assert_eq!(list.pop_front(), Some(1));
    ///     assert_eq!(list.pop_front(), None);
    /// });
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.unlink_at(Self::HEAD)?;
        trace!("remove head");
        Some(Self::into_elem(node))
    }

    /// Removes the tail element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.unlink_at(Self::TAIL)?;
        trace!("remove tail");
        Some(Self::into_elem(node))
    }

    /// Provides an iterator from head to tail. Iterating it backwards (with
    /// [`rev`](Iterator::rev) or [`next_back`](DoubleEndedIterator::next_back))
    /// walks from tail to head.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     list.extend(vec![0, 1, 2]);
    ///
    ///     let mut iter = list.iter();
    ///     assert_eq!(iter.next(), Some(&0));
    ///     assert_eq!(iter.next_back(), Some(&2));
    ///     assert_eq!(iter.next(), Some(&1));
    ///     assert_eq!(iter.next(), None);
    /// });
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, 'id, T> {
        Iter::new(self)
    }

    /// Provides an iterator from tail to head.
    #[inline]
    pub fn iter_rev(&self) -> std::iter::Rev<Iter<'_, 'id, T>> {
        self.iter().rev()
    }
}

impl<'id, T> Drop for LinkedList<'id, T> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
impl<'id, T> LinkedList<'id, T> {
    /// Walk the whole list checking that every `next` link is mirrored by a
    /// `prev` link, and that the walk ends at `tail`.
    pub(crate) fn assert_links(&self) {
        fn same<U>(a: Option<&U>, b: Option<&U>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => std::ptr::eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }

        let mut prev = None;
        let mut current = self.head();
        let mut count = 0_usize;
        while let Some(cell) = current {
            let node = cell.borrow(&self.token);
            assert!(same(node.links[Node::<T>::PREV].as_deref(), prev));
            prev = Some(cell);
            current = node.links[Node::<T>::NEXT].as_deref();
            count += 1;
        }
        assert!(same(prev, self.tail()));
        assert_eq!(count, self.len());
        assert_eq!(count, self.iter_rev().count());
    }
}
