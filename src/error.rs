use thiserror::Error;

/// Returned when an element is requested from a collection that holds none.
///
/// Emptiness is a caller error: nothing is retried or recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum EmptyCollectionError {
    /// [`PriorityQueue::dequeue`](crate::PriorityQueue::dequeue) on an empty queue.
    #[error("The queue is empty.")]
    Queue,
    /// [`TurnQueue::get_next_person`](crate::TurnQueue::get_next_person) with
    /// nobody in the rotation.
    #[error("No one in the queue.")]
    Rotation,
}
