use crate::list::{LinkedList, Node};
use ghost_cell::{GhostCell, GhostToken};
use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

/// An iterator over the elements of a `LinkedList`.
///
/// It keeps the two nodes `front..=back` that have not been yielded yet,
/// and unlocks them with the list's token, which it borrows for as long as
/// it lives. Since the list is borrowed immutably, it cannot be modified
/// while it is iterated:
///
/// ```compile_fail
/// use linked_queues::LinkedList;
///
/// LinkedList::with(|mut list| {
///     list.push_back(1);
///     let mut iter = list.iter();
///
///     // Won't compile, because list is already borrowed immutably.
///     list.push_back(4);
///     println!("{:?}", iter.next());
/// });
/// ```
///
/// Every call to [`LinkedList::iter`] starts over from the current head and
/// tail.
pub struct Iter<'a, 'id, T> {
    front: Option<&'a GhostCell<'id, Node<'id, T>>>,
    back: Option<&'a GhostCell<'id, Node<'id, T>>>,
    token: &'a GhostToken<'id>,
    #[cfg(feature = "length")]
    len: usize,
}

impl<'a, 'id, T> Iter<'a, 'id, T> {
    pub(crate) fn new(list: &'a LinkedList<'id, T>) -> Self {
        #[cfg(feature = "length")]
        let len = list.len();
        Self {
            front: list.head(),
            back: list.tail(),
            token: list.token(),
            #[cfg(feature = "length")]
            len,
        }
    }

    /// Marks the range as exhausted once `front` and `back` meet at
    /// `current`.
    fn finish_at(&mut self, current: &'a GhostCell<'id, Node<'id, T>>) -> bool {
        let met = match (self.front, self.back) {
            (Some(front), Some(back)) => ptr::eq(front, back) && ptr::eq(front, current),
            _ => false,
        };
        if met {
            self.front = None;
            self.back = None;
        }
        met
    }
}

impl<'a, 'id, T> Clone for Iter<'a, 'id, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            token: self.token,
            #[cfg(feature = "length")]
            len: self.len,
        }
    }
}

impl<'a, 'id, T: fmt::Debug> fmt::Debug for Iter<'a, 'id, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, 'id, T> Iterator for Iter<'a, 'id, T> {
    type Item = &'a T;

    /// Return `*front` and move `front` to `front.next`, or return `None` if
    /// `front..=back` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front?;
        let node = current.borrow(self.token);
        if !self.finish_at(current) {
            self.front = node.links[Node::<T>::NEXT].as_deref();
        }
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(&node.elem)
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, 'id, T> DoubleEndedIterator for Iter<'a, 'id, T> {
    /// Return `*back` and move `back` to `back.prev`, or return `None` if
    /// `front..=back` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        let current = self.back?;
        let node = current.borrow(self.token);
        if !self.finish_at(current) {
            self.back = node.links[Node::<T>::PREV].as_deref();
        }
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(&node.elem)
    }
}

#[cfg(feature = "length")]
impl<'a, 'id, T> ExactSizeIterator for Iter<'a, 'id, T> {}

impl<'a, 'id, T> FusedIterator for Iter<'a, 'id, T> {}

/// An owning iterator over the elements of a `LinkedList`.
///
/// This `struct` is created by the [`into_iter`] method on [`LinkedList`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: LinkedList::into_iter
pub struct IntoIter<'id, T> {
    list: LinkedList<'id, T>,
}

impl<'id, T: fmt::Debug> fmt::Debug for IntoIter<'id, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<'id, T> Iterator for IntoIter<'id, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'id, T> DoubleEndedIterator for IntoIter<'id, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

#[cfg(feature = "length")]
impl<'id, T> ExactSizeIterator for IntoIter<'id, T> {}

impl<'id, T> FusedIterator for IntoIter<'id, T> {}

impl<'id, T> IntoIterator for LinkedList<'id, T> {
    type Item = T;
    type IntoIter = IntoIter<'id, T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, 'id, T> IntoIterator for &'a LinkedList<'id, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, 'id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'id, T> Extend<T> for LinkedList<'id, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|elem| self.push_back(elem));
    }
}

impl<'a, 'id, T: 'a + Copy> Extend<&'a T> for LinkedList<'id, T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use crate::list::LinkedList;
    use std::iter::FromIterator;

    #[test]
    fn iter_both_directions() {
        LinkedList::<i32>::with(|mut list| {
            assert_eq!(list.iter().next(), None);
            assert_eq!(list.iter().next_back(), None);

            list.extend(1..=5);
            assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3, 4, 5]);
            assert_eq!(Vec::from_iter(list.iter_rev().copied()), vec![5, 4, 3, 2, 1]);
            assert_eq!(list.iter().last(), Some(&5));
        })
    }

    #[test]
    fn iter_meets_in_the_middle() {
        LinkedList::<i32>::with(|mut list| {
            list.extend(&[1, 2, 3]);
            let mut iter = list.iter();
            #[cfg(feature = "length")]
            assert_eq!(iter.len(), 3);
            assert_eq!(iter.next(), Some(&1));
            assert_eq!(iter.next_back(), Some(&3));
            #[cfg(feature = "length")]
            assert_eq!(iter.size_hint(), (1, Some(1)));
            assert_eq!(iter.next_back(), Some(&2));
            #[cfg(feature = "length")]
            assert_eq!(iter.len(), 0);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);
            // fused
            assert_eq!(iter.next(), None);

            list.push_back(4);
            let mut iter = list.iter();
            assert_eq!(iter.next_back(), Some(&4));
            assert_eq!(iter.next(), Some(&1));
            #[cfg(feature = "length")]
            assert_eq!(iter.len(), 2);
            assert_eq!(iter.next(), Some(&2));
            assert_eq!(iter.next(), Some(&3));
            assert_eq!(iter.next_back(), None);
            #[cfg(feature = "length")]
            assert_eq!(iter.len(), 0);
        })
    }

    #[test]
    fn iter_restarts() {
        LinkedList::<char>::with(|mut list| {
            list.extend("abc".chars());
            let first: String = list.iter().collect();
            let second: String = list.iter().collect();
            assert_eq!(first, "abc");
            assert_eq!(first, second);

            let iter = list.iter();
            assert_eq!(format!("{:?}", iter), "Iter(['a', 'b', 'c'])");
            assert_eq!(iter.clone().count(), 3);
        })
    }

    #[test]
    fn into_iter_drains() {
        LinkedList::<i32>::with(|mut list| {
            list.extend(0..4);
            let mut iter = list.into_iter();
            #[cfg(feature = "length")]
            assert_eq!(iter.len(), 4);
            assert_eq!(iter.next_back(), Some(3));
            assert_eq!(iter.collect::<Vec<_>>(), vec![0, 1, 2]);
        })
    }

    #[test]
    fn borrowed_into_iter() {
        LinkedList::<i32>::with(|mut list| {
            list.extend(vec![10, 20]);
            let mut sum = 0;
            for elem in &list {
                sum += *elem;
            }
            assert_eq!(sum, 30);
        })
    }
}
