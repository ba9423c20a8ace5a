//! Request id generation for the envelope `requestId`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Supplies a fresh identifier for every envelope.
pub trait RequestIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// `agent-<uuid v4>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestIds;

impl RequestIdSource for UuidRequestIds {
    fn next_id(&self) -> String {
        format!("agent-{}", uuid::Uuid::new_v4())
    }
}

/// `<prefix>-<n>` with `n` counting from 1. Deterministic, for tests and
/// offline tooling.
#[derive(Debug)]
pub struct SequentialRequestIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialRequestIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), counter: AtomicU64::new(0) }
    }
}

impl RequestIdSource for SequentialRequestIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_prefixed_and_unique() {
        let ids = UuidRequestIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a.starts_with("agent-"));
        assert_eq!(a.len(), "agent-".len() + 36);
        assert_ne!(a, b);
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialRequestIds::new("req");
        assert_eq!(ids.next_id(), "req-1");
        assert_eq!(ids.next_id(), "req-2");
    }
}
