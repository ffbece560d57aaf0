//! A round-robin rotation of participants, each with a turn budget.
//!
//! [`get_next_person`] takes the participant at the front, charges it one
//! turn and puts it back at the end of the rotation while it still has turns
//! left. A budget of zero or less means the participant has infinite turns:
//! it is never charged and always goes back into the rotation.
//!
//! What happens once a finite budget runs out is configured by
//! [`Exhaustion`].
//!
//! [`get_next_person`]: TurnQueue::get_next_person
//!
//! # Examples
//!
//! ```
//! use linked_queues::TurnQueue;
//!
//! let mut players = TurnQueue::new();
//! players.add_person("Bob", 2);
//! players.add_person("Tim", 5);
//! players.add_person("Sue", 3);
//!
//! let mut order = Vec::new();
//! while !players.is_empty() {
//!     order.push(players.get_next_person().unwrap().name().to_string());
//! }
//! assert_eq!(
//!     order,
//!     ["Bob", "Tim", "Sue", "Bob", "Tim", "Sue", "Tim", "Sue", "Tim", "Tim"]
//! );
//! ```

use std::collections::vec_deque::{self, VecDeque};
use std::fmt::{Display, Formatter};

use log::{debug, trace};

use crate::EmptyCollectionError;

/// A member of a [`TurnQueue`] rotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    name: String,
    remaining_turns: i32,
}

impl Participant {
    /// Create a participant named `name` with a budget of `turns`. A budget
    /// of zero or less means infinite turns.
    pub fn new(name: impl Into<String>, turns: i32) -> Self {
        Self {
            name: name.into(),
            remaining_turns: turns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turns left in the budget. Zero or less is read as infinite while the
    /// participant is queued.
    pub fn remaining_turns(&self) -> i32 {
        self.remaining_turns
    }

    /// Whether the budget reads as infinite, i.e. it is not positive.
    pub fn has_infinite_turns(&self) -> bool {
        self.remaining_turns <= 0
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}:{})", self.name, self.remaining_turns)
    }
}

/// What a [`TurnQueue`] does with a participant whose finite budget has
/// been used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exhaustion {
    /// A participant that starts with `n > 0` turns is dispatched exactly `n`
    /// times. The last dispatch reports `0` remaining turns and the
    /// participant leaves the rotation.
    Retire,
    /// A positive budget is charged and the participant is always put back.
    /// Once the budget reads `0` it is no longer charged, so the participant
    /// keeps rotating like one with infinite turns.
    Linger,
}

impl Default for Exhaustion {
    fn default() -> Self {
        Exhaustion::Retire
    }
}

/// A queue of participants taking turns in arrival order.
#[derive(Debug, Clone, Default)]
pub struct TurnQueue {
    people: VecDeque<Participant>,
    exhaustion: Exhaustion,
}

impl TurnQueue {
    /// Create an empty `TurnQueue` with the default [`Exhaustion::Retire`]
    /// policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty `TurnQueue` that handles used-up budgets according to
    /// `exhaustion`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::{Exhaustion, TurnQueue};
    ///
    /// let mut players = TurnQueue::with_exhaustion(Exhaustion::Linger);
    /// players.add_person("Ann", 1);
    ///
    /// assert_eq!(players.get_next_person().unwrap().remaining_turns(), 0);
    /// assert_eq!(players.get_next_person().unwrap().remaining_turns(), 0);
    /// assert_eq!(players.length(), 1);
    /// ```
    pub fn with_exhaustion(exhaustion: Exhaustion) -> Self {
        Self {
            people: VecDeque::new(),
            exhaustion,
        }
    }

    pub fn exhaustion(&self) -> Exhaustion {
        self.exhaustion
    }

    /// Adds a participant at the back of the rotation. A non-positive `turns`
    /// means infinite turns.
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(1) time.
    pub fn add_person(&mut self, name: impl Into<String>, turns: i32) {
        let person = Participant::new(name, turns);
        trace!("add {} to the rotation", person);
        self.people.push_back(person);
    }

    /// Dispatches the participant at the front of the rotation and returns it
    /// as it stands after being charged for the turn.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError::Rotation`] if nobody is in the
    /// rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_queues::{EmptyCollectionError, TurnQueue};
    ///
    /// let mut players = TurnQueue::new();
    /// assert_eq!(
    ///     players.get_next_person(),
    ///     Err(EmptyCollectionError::Rotation)
    /// );
    ///
    /// players.add_person("Tim", 0);
    /// for _ in 0..10 {
    ///     assert_eq!(players.get_next_person().unwrap().remaining_turns(), 0);
    /// }
    /// ```
    pub fn get_next_person(&mut self) -> Result<Participant, EmptyCollectionError> {
        let mut person = match self.people.pop_front() {
            Some(person) => person,
            None => {
                debug!("dispatch from an empty rotation");
                return Err(EmptyCollectionError::Rotation);
            }
        };

        let requeue = match (self.exhaustion, person.remaining_turns) {
            (_, turns) if turns <= 0 => true,
            (Exhaustion::Retire, turns) => {
                person.remaining_turns = turns - 1;
                turns > 1
            }
            (Exhaustion::Linger, turns) => {
                person.remaining_turns = turns - 1;
                true
            }
        };

        if requeue {
            trace!("dispatch {}", person);
            self.people.push_back(person.clone());
        } else {
            debug!("dispatch {}, out of turns", person);
        }
        Ok(person)
    }

    /// Returns the participant the next call to
    /// [`get_next_person`](TurnQueue::get_next_person) dispatches.
    pub fn peek(&self) -> Option<&Participant> {
        self.people.front()
    }

    /// Returns the number of participants in the rotation.
    #[inline]
    pub fn length(&self) -> usize {
        self.people.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Iterates over the participants in rotation order.
    pub fn iter(&self) -> vec_deque::Iter<'_, Participant> {
        self.people.iter()
    }
}

impl Display for TurnQueue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, person) in self.people.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", person)?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a TurnQueue {
    type Item = &'a Participant;
    type IntoIter = vec_deque::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
