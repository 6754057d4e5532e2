//! Common, shared types.

pub mod bus;
pub mod events;
pub mod layers;
pub mod pool;
pub mod random;
pub mod state;
pub mod storage;
pub mod timers;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
