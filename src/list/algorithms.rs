use crate::list::{Full, LinkedList, Node, NodePtr};
use log::trace;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Deref;

impl<'a, 'b, T: PartialEq> PartialEq<LinkedList<'b, T>> for LinkedList<'a, T> {
    fn eq(&self, other: &LinkedList<'b, T>) -> bool {
        self.iter().eq(other)
    }
}

impl<'id, T: Eq> Eq for LinkedList<'id, T> {}

impl<'id, T: Hash> Hash for LinkedList<'id, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<'id, T: Debug> Debug for LinkedList<'id, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the list as `<LinkedList>{1, 2, 3}`.
impl<'id, T: Display> Display for LinkedList<'id, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("<LinkedList>{")?;
        for (i, elem) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(elem, f)?;
        }
        f.write_str("}")
    }
}

/// A walk from the head of a list that holds the node under the cursor by
/// one of its own halves, so the node can be unlocked with the token while
/// its neighbours stay reachable.
///
/// The half of every passed node is lifted out of the `next` link of the node
/// before it (or out of the list's head), and the `next` link of the last
/// passed node is left in place. Dropping the walk puts the lifted halves
/// back, also when a comparison panics halfway.
struct Walk<'l, 'id, T> {
    list: &'l mut LinkedList<'id, T>,
    passed: Vec<NodePtr<'id, T>>,
}

impl<'l, 'id, T> Walk<'l, 'id, T> {
    fn new(list: &'l mut LinkedList<'id, T>) -> Self {
        Self {
            list,
            passed: Vec::new(),
        }
    }

    /// Step onto the next node and return its element, or return `None`
    /// once the tail has been passed.
    fn advance(&mut self) -> Option<&mut T> {
        let token = &mut self.list.token;
        let next = match self.passed.last() {
            Some(current) => current.deref().borrow_mut(token).links[Node::<T>::NEXT].take(),
            None => self.list.links[LinkedList::<T>::HEAD].take(),
        };
        self.passed.push(next?);
        let current = self.passed.last()?;
        Some(&mut current.deref().borrow_mut(token).elem)
    }

    /// Link a new node holding `elem` between the current node and its
    /// successor (or the tail).
    fn insert_after_current(&mut self, elem: T) {
        let current = match self.passed.last() {
            Some(current) => current,
            None => return,
        };
        let token = &mut self.list.token;
        let (left, right): (NodePtr<'id, T>, NodePtr<'id, T>) =
            Full::split(LinkedList::new_node(elem));
        let next = current.deref().borrow_mut(token).links[Node::<T>::NEXT].take();
        // The half of `current` held after it moves into the new node.
        let back = match &next {
            Some(next) => {
                let next = next.deref().borrow_mut(token);
                next.links[Node::<T>::PREV].replace(right)
            }
            None => self.list.links[LinkedList::<T>::TAIL].replace(right),
        };
        left.deref().borrow_mut(token).links = [next, back];
        current.deref().borrow_mut(token).links[Node::<T>::NEXT] = Some(left);
        #[cfg(feature = "length")]
        {
            self.list.len += 1;
        }
    }

    /// Unlink the current node from its predecessor and successor, and
    /// return its element. The walk steps back onto the predecessor.
    fn remove_current(&mut self) -> Option<T> {
        let current = self.passed.pop()?;
        let token = &mut self.list.token;
        let (next, prev) = {
            let node = current.deref().borrow_mut(token);
            (
                node.links[Node::<T>::NEXT].take(),
                node.links[Node::<T>::PREV].take(),
            )
        };
        let other = match &next {
            Some(next) => {
                let next = next.deref().borrow_mut(token);
                mem::replace(&mut next.links[Node::<T>::PREV], prev)
            }
            None => mem::replace(&mut self.list.links[LinkedList::<T>::TAIL], prev),
        };
        match self.passed.last() {
            Some(before) => before.deref().borrow_mut(token).links[Node::<T>::NEXT] = next,
            None => self.list.links[LinkedList::<T>::HEAD] = next,
        }
        // The other half of a node is held by its successor or, for the
        // tail, by the list.
        let other = other.expect("removed node is missing its second half");
        #[cfg(feature = "length")]
        {
            self.list.len -= 1;
        }
        Some(LinkedList::into_elem(Full::join(current, other)))
    }
}

impl<'l, 'id, T> Drop for Walk<'l, 'id, T> {
    fn drop(&mut self) {
        let token = &mut self.list.token;
        let mut following: Option<NodePtr<'id, T>> = None;
        while let Some(half) = self.passed.pop() {
            if following.is_some() {
                half.deref().borrow_mut(token).links[Node::<T>::NEXT] = following;
            }
            following = Some(half);
        }
        if following.is_some() {
            self.list.links[LinkedList::<T>::HEAD] = following;
        }
        #[cfg(debug_assertions)]
        {
            if !std::thread::panicking() {
                self.list.assert_ends();
            }
        }
    }
}

impl<'id, T> LinkedList<'id, T> {
    /// Returns `true` if the `LinkedList` contains an element equal to the
    /// given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     list.extend(0..3);
    ///     assert_eq!(list.contains(&0), true);
    ///     assert_eq!(list.contains(&10), false);
    /// });
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Inserts `elem` right after the first element equal to `target`. If
    /// that element is the tail, `elem` becomes the new tail. Does nothing
    /// (and drops `elem`) if no element equals `target`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     list.extend(vec![1, 2, 3, 4, 5]);
    ///     list.insert_after(&3, 99);
    ///     list.insert_after(&42, 0);
    ///     assert_eq!(list.to_string(), "<LinkedList>{1, 2, 3, 99, 4, 5}");
    /// });
    /// ```
    pub fn insert_after(&mut self, target: &T, elem: T)
    where
        T: PartialEq<T>,
    {
        let mut walk = Walk::new(self);
        while let Some(current) = walk.advance() {
            if *current == *target {
                walk.insert_after_current(elem);
                return;
            }
        }
        trace!("insert after: target not found");
    }

    /// Removes the first element equal to `target` and returns it, or returns
    /// `None` and leaves the list unchanged if there is none.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     list.extend(vec![1, 2, 3, 2]);
    ///     assert_eq!(list.remove(&2), Some(2));
    ///     assert_eq!(list.remove(&7), None);
    ///     assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    /// });
    /// ```
    pub fn remove(&mut self, target: &T) -> Option<T>
    where
        T: PartialEq<T>,
    {
        let mut walk = Walk::new(self);
        while let Some(current) = walk.advance() {
            if *current == *target {
                trace!("remove: found");
                return walk.remove_current();
            }
        }
        trace!("remove: target not found");
        None
    }

    /// Replaces, in place, every element equal to `old` with a clone of
    /// `new`, and returns how many were replaced.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::LinkedList;
    ///
    /// LinkedList::with(|mut list| {
    ///     list.extend(vec![2, 1, 2, 3]);
    ///     assert_eq!(list.replace(&2, 9), 2);
    ///     assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![9, 1, 9, 3]);
    /// });
    /// ```
    pub fn replace(&mut self, old: &T, new: T) -> usize
    where
        T: PartialEq<T> + Clone,
    {
        let mut replaced = 0;
        let mut walk = Walk::new(self);
        while let Some(current) = walk.advance() {
            if *current == *old {
                current.clone_from(&new);
                replaced += 1;
            }
        }
        trace!("replace: {} element(s)", replaced);
        replaced
    }
}

#[cfg(test)]
mod tests {
    use crate::list::LinkedList;
    use rstest::rstest;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::panic::{self, AssertUnwindSafe};

    fn to_vec(list: &LinkedList<'_, i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[rstest]
    #[case(&[1, 2, 3, 4, 5], 3, 99, &[1, 2, 3, 99, 4, 5])]
    #[case(&[1, 2, 3, 4, 5], 5, 99, &[1, 2, 3, 4, 5, 99])]
    #[case(&[1, 2, 3, 4, 5], 1, 99, &[1, 99, 2, 3, 4, 5])]
    #[case(&[1, 2, 3, 4, 5], 6, 99, &[1, 2, 3, 4, 5])]
    #[case(&[3, 3], 3, 0, &[3, 0, 3])]
    #[case(&[7], 7, 8, &[7, 8])]
    #[case(&[], 1, 2, &[])]
    fn insert_after(
        #[case] input: &[i32],
        #[case] target: i32,
        #[case] elem: i32,
        #[case] expected: &[i32],
    ) {
        LinkedList::<i32>::with(|mut list| {
            list.extend(input);
            list.insert_after(&target, elem);
            list.assert_links();
            assert_eq!(to_vec(&list), expected);
            assert_eq!(list.back(), expected.last());
        })
    }

    #[rstest]
    #[case(&[1, 2, 3], 2, Some(2), &[1, 3])]
    #[case(&[1, 2, 3], 1, Some(1), &[2, 3])]
    #[case(&[1, 2, 3], 3, Some(3), &[1, 2])]
    #[case(&[1, 2, 3], 4, None, &[1, 2, 3])]
    #[case(&[2, 1, 2], 2, Some(2), &[1, 2])]
    #[case(&[5], 5, Some(5), &[])]
    #[case(&[], 5, None, &[])]
    fn remove(
        #[case] input: &[i32],
        #[case] target: i32,
        #[case] removed: Option<i32>,
        #[case] expected: &[i32],
    ) {
        LinkedList::<i32>::with(|mut list| {
            list.extend(input);
            assert_eq!(list.remove(&target), removed);
            list.assert_links();
            assert_eq!(to_vec(&list), expected);
            assert_eq!(list.front(), expected.first());
            assert_eq!(list.back(), expected.last());
            assert_eq!(list.is_empty(), expected.is_empty());
        })
    }

    #[test]
    fn remove_down_to_empty() {
        LinkedList::<i32>::with(|mut list| {
            list.extend(vec![4, 8, 15, 16, 23, 42]);
            for value in &[15, 4, 42, 16, 8, 23] {
                let len = list.len();
                assert_eq!(list.remove(value), Some(*value));
                assert_eq!(list.len(), len - 1);
                list.assert_links();
            }
            assert!(list.is_empty());
            assert_eq!(list.front(), None);
            assert_eq!(list.back(), None);
        })
    }

    #[rstest]
    #[case(&[2, 1, 2, 3, 2], 2, 7, 3, &[7, 1, 7, 3, 7])]
    #[case(&[1, 2, 3], 4, 7, 0, &[1, 2, 3])]
    #[case(&[1, 1], 1, 1, 2, &[1, 1])]
    #[case(&[], 1, 2, 0, &[])]
    fn replace(
        #[case] input: &[i32],
        #[case] old: i32,
        #[case] new: i32,
        #[case] count: usize,
        #[case] expected: &[i32],
    ) {
        LinkedList::<i32>::with(|mut list| {
            list.extend(input);
            let holding_new = input.iter().filter(|&&x| x == new || x == old).count();
            assert_eq!(list.replace(&old, new), count);
            list.assert_links();
            assert_eq!(to_vec(&list), expected);
            if old != new {
                assert!(!list.contains(&old));
            }
            assert_eq!(list.iter().filter(|&&x| x == new).count(), holding_new);
        })
    }

    fn addresses(list: &LinkedList<'_, String>) -> Vec<*const String> {
        list.iter().map(|s| s as *const String).collect()
    }

    #[test]
    fn interior_operations_keep_other_nodes() {
        LinkedList::<String>::with(|mut list| {
            list.extend(vec!["a", "b", "a", "c"].into_iter().map(String::from));
            let before = addresses(&list);

            assert_eq!(list.replace(&"a".to_string(), "z".to_string()), 2);
            assert_eq!(addresses(&list), before);
            assert_eq!(list.to_string(), "<LinkedList>{z, b, z, c}");

            assert_eq!(list.remove(&"b".to_string()), Some("b".to_string()));
            assert_eq!(addresses(&list), vec![before[0], before[2], before[3]]);

            list.insert_after(&"z".to_string(), "y".to_string());
            let after = addresses(&list);
            assert_eq!(after.len(), 4);
            assert_eq!((after[0], after[2], after[3]), (before[0], before[2], before[3]));
            assert_eq!(list.to_string(), "<LinkedList>{z, y, z, c}");
            list.assert_links();
        })
    }

    /// Compares like an `i32`, except that comparing 3 panics.
    #[derive(Debug, Clone)]
    struct Touchy(i32);

    impl PartialEq for Touchy {
        fn eq(&self, other: &Self) -> bool {
            if self.0 == 3 {
                panic!("compared 3");
            }
            self.0 == other.0
        }
    }

    fn values(list: &LinkedList<'_, Touchy>) -> Vec<i32> {
        list.iter().map(|t| t.0).collect()
    }

    #[test]
    fn panicking_comparison_leaves_list_intact() {
        LinkedList::<Touchy>::with(|mut list| {
            list.extend((1..=4).map(Touchy));

            let replaced =
                panic::catch_unwind(AssertUnwindSafe(|| list.replace(&Touchy(9), Touchy(0))));
            assert!(replaced.is_err());
            list.assert_links();
            assert_eq!(values(&list), vec![1, 2, 3, 4]);

            let removed = panic::catch_unwind(AssertUnwindSafe(|| list.remove(&Touchy(4))));
            assert!(removed.is_err());
            list.assert_links();
            assert_eq!(values(&list), vec![1, 2, 3, 4]);

            let inserted =
                panic::catch_unwind(AssertUnwindSafe(|| list.insert_after(&Touchy(4), Touchy(5))));
            assert!(inserted.is_err());
            list.assert_links();
            assert_eq!(values(&list), vec![1, 2, 3, 4]);

            // elements before the panicking one are still reachable
            assert_eq!(list.remove(&Touchy(2)), Some(Touchy(2)));
            list.insert_after(&Touchy(1), Touchy(7));
            list.assert_links();
            assert_eq!(values(&list), vec![1, 7, 3, 4]);
        })
    }

    #[test]
    fn eq_debug_display_and_hash() {
        fn hash_of<H: Hash>(value: &H) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let (debug, display, hash) = LinkedList::<i32>::with(|mut list| {
            list.extend(1..=3);
            LinkedList::<i32>::with(|mut other| {
                other.extend(vec![1, 2]);
                assert_ne!(list, other);
                other.push_back(3);
                assert_eq!(list, other);
            });
            (format!("{:?}", list), list.to_string(), hash_of(&list))
        });
        assert_eq!(debug, "[1, 2, 3]");
        assert_eq!(display, "<LinkedList>{1, 2, 3}");
        assert_eq!(hash, LinkedList::<i32>::with(|mut list| {
            list.extend(1..=3);
            hash_of(&list)
        }));

        LinkedList::<i32>::with(|list| assert_eq!(list.to_string(), "<LinkedList>{}"));
    }
}
