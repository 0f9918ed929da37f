//! Order identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Venue-visible order identifier. Never zero: the venue uses id 0 in error
/// frames that do not refer to an order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic order-id source, shared by quote and hedge orders.
///
/// Ids start at 1 and are never reused within a session.
#[derive(Debug)]
pub struct OrderIdAllocator {
    next: u64,
}

impl OrderIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> OrderId {
        let id = OrderId(self.next);
        self.next += 1;
        id
    }
}

impl Default for OrderIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut alloc = OrderIdAllocator::new();
        assert_eq!(alloc.next_id(), OrderId(1));
        assert_eq!(alloc.next_id(), OrderId(2));
        assert_eq!(alloc.next_id(), OrderId(3));
    }
}
