//! This crate provides three small collections: a [`PriorityQueue`] that
//! serves equal priorities first-in first-out, a [`TurnQueue`] that rotates
//! participants with turn budgets, and a doubly-linked [`LinkedList`] whose
//! nodes are shared without raw pointers.
//!
//! The collections are independent of each other. They share only the
//! [`EmptyCollectionError`] returned when the queues are asked for an element
//! they do not have.
//!
//! Here is a quick example showing how the queues work.
//!
//! ```
//! use linked_queues::{EmptyCollectionError, PriorityQueue, TurnQueue};
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("A", 5);
//! queue.enqueue("B", 10);
//! queue.enqueue("C", 5);
//! assert_eq!(queue.dequeue(), Ok("B"));
//! assert_eq!(queue.dequeue(), Ok("A")); // first in among equals
//!
//! let mut players = TurnQueue::new();
//! players.add_person("Sue", 1);
//! players.add_person("Tim", 0); // infinite turns
//! assert_eq!(players.get_next_person()?.name(), "Sue");
//! assert_eq!(players.get_next_person()?.name(), "Tim");
//! assert_eq!(players.get_next_person()?.name(), "Tim");
//! # Ok::<(), EmptyCollectionError>(())
//! ```
//!
//! # Memory Layout of the List
//!
//! The memory layout of the [`LinkedList`] is like the following graph:
//! ```text
//!                  Node 0                   Node 1                    Node N-1
//!               ╔═══════════╗           ╔═══════════╗              ╔═══════════╗
//!    None ←──── ║   prev    ║ ←──────── ║   prev    ║ ←── ┄┄ ←──── ║   prev    ║
//!               ╟───────────╢           ╟───────────╢              ╟───────────╢
//!               ║   next    ║ ────────→ ║   next    ║ ──→ ┄┄ ────→ ║   next    ║ ────→ None
//!               ╟───────────╢           ╟───────────╢              ╟───────────╢
//!               ║  elem T   ║           ║  elem T   ║              ║  elem T   ║
//!               ╚═══════════╝           ╚═══════════╝              ╚═══════════╝
//!                     ↑                                                  ↑
//!               ╔═══════════╗                                            │
//!               ║   head    ║                                            │
//!               ╟───────────╢                                            │
//!               ║   tail    ║ ───────────────────────────────────────────┘
//!               ╟───────────╢
//!               ║   token   ║
//!               ╟───────────╢
//!               ║   (len)   ║
//!               ╚═══════════╝
//!                LinkedList
//! ```
//! The `LinkedList` contains:
//! - the `head` and `tail` links, both `None` in an empty list, and both
//!   pointing to the same node in a list of one element;
//! - the `token` that unlocks the contents of every node;
//! - a length field `len` indicating the length of the list. It can be disabled
//!   by disabling the `length` feature in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! linked_queues = { default-features = false }
//! ```
//!
//! Each node of the list is allocated on heap, and every arrow of the graph
//! is one half of the node it points to: the two halves of a node are held by
//! its two neighbours, or by the list when the node is at an end. A node is
//! freed once both of its halves are joined back together, which happens
//! exactly when it is unlinked from both of its neighbours.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] iterator. It is double-ended,
//! so the list can be walked from head to tail and from tail to head, and a
//! new iterator always starts from the current ends of the list.
//!
//! ## Examples
//!
//! ```
//! use linked_queues::LinkedList;
//!
//! LinkedList::with(|mut list| {
//!     list.extend(vec![1, 2, 3]);
//!     let mut iter = list.iter();
//!     assert_eq!(iter.next(), Some(&1));
//!     assert_eq!(iter.next(), Some(&2));
//!     assert_eq!(iter.next(), Some(&3));
//!     assert_eq!(iter.next(), None);
//!     assert_eq!(iter.next(), None); // Fused
//!
//!     let backward: Vec<i32> = list.iter_rev().copied().collect();
//!     assert_eq!(backward, vec![3, 2, 1]);
//! });
//! ```
//!
//! # Logging
//!
//! Operations emit records through the [`log`] facade: `trace` for every
//! insertion, removal and dispatch, `debug` when a queue is asked for an
//! element it does not have or a participant runs out of turns. No logger is
//! installed by this crate.
//!
//! [`Iter`]: crate::list::iterator::Iter
//! [`log`]: https://docs.rs/log

#[doc(inline)]
pub use error::EmptyCollectionError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::LinkedList;
#[doc(inline)]
pub use priority_queue::{Entry, PriorityQueue};
#[doc(inline)]
pub use turn_queue::{Exhaustion, Participant, TurnQueue};

pub mod list;
pub mod priority_queue;
pub mod turn_queue;

mod error;
