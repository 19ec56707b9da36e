//! Scheduled ride events and the queue that orders them
//!
//! - `queue`: FIFO-stable min-priority queue
//! - `types`: the `RideStart` / `RideEnd` event variants
//! - `handler`: state transitions applied when an event is processed

pub mod handler;
pub mod queue;
pub mod types;

pub use queue::PriorityQueue;
pub use types::RideEvent;
