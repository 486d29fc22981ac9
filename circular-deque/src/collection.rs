//! Collection types

mod circular_deque;
mod slots;

pub use circular_deque::{CircularDeque, CircularDequeError};
pub use slots::{Slots, SlotsError};
