//! Request counters for coarse per-caller limiting
//!
//! Counters are injected wherever they are needed. Entries carry their own
//! window and are evicted once it has passed.

mod counter;
mod memory;

pub use counter::{CounterSnapshot, RequestCounter};
pub use memory::InMemoryRequestCounter;
