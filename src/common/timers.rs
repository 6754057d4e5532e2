//! Scheduled-callback queue keyed by due time.
//!
//! The queue owns its own clock. Each frame the caller advances it by the frame
//! delta and gets back every action that came due, oldest first. Actions due on
//! the same instant come out in the order they were scheduled.
//!
//! Cancelling is lazy: the token goes into a tombstone set and the entry is
//! dropped when it reaches the front of the heap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use bevy::platform::collections::HashSet;

/// Cancellation token for one scheduled action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Entry<A> {
    due: Duration,
    token: TimerToken,
    action: A,
}

// Min-heap on (due, schedule order).
impl<A> Ord for Entry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.token.0.cmp(&self.token.0))
    }
}

impl<A> PartialOrd for Entry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> PartialEq for Entry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl<A> Eq for Entry<A> {}

#[derive(Debug)]
pub struct TimerQueue<A> {
    now: Duration,
    next_token: u64,
    heap: BinaryHeap<Entry<A>>,
    cancelled: HashSet<TimerToken>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_token: 0,
            heap: BinaryHeap::new(),
            cancelled: HashSet::default(),
        }
    }
}

impl<A> TimerQueue<A> {
    /// Scheduled and not yet fired or cancelled.
    #[inline]
    pub fn pending(&self) -> usize {
        self.heap.len() - self.cancelled.len()
    }

    /// Run `action` once `delay` has elapsed from the queue's current time.
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.heap.push(Entry {
            due: self.now + delay,
            token,
            action,
        });
        token
    }

    /// Returns `false` if the action already fired or was cancelled before.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let scheduled = self.heap.iter().any(|e| e.token == token);
        scheduled && self.cancelled.insert(token)
    }

    /// Advance the clock and collect every action that came due.
    pub fn advance(&mut self, delta: Duration) -> Vec<A> {
        self.now += delta;

        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.due <= self.now) {
            let Some(entry) = self.heap.pop() else { break };
            if self.cancelled.remove(&entry.token) {
                continue;
            }
            due.push(entry.action);
        }
        due
    }

    /// Drop everything without firing. The clock keeps running.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.cancelled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn fires_only_once_due() {
        let mut q = TimerQueue::default();
        q.schedule(secs(1.0), "a");

        assert!(q.advance(secs(0.5)).is_empty());
        assert_eq!(q.advance(secs(0.5)), vec!["a"]);
        assert!(q.advance(secs(10.0)).is_empty());
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn orders_by_due_time_then_schedule_order() {
        let mut q = TimerQueue::default();
        q.schedule(secs(2.0), "late");
        q.schedule(secs(1.0), "first");
        q.schedule(secs(1.0), "second");
        q.schedule(secs(1.0), "third");

        assert_eq!(q.advance(secs(3.0)), vec!["first", "second", "third", "late"]);
    }

    #[test]
    fn delay_is_relative_to_current_clock() {
        let mut q = TimerQueue::default();
        q.advance(secs(5.0));
        q.schedule(secs(1.0), 1);

        assert!(q.advance(secs(0.9)).is_empty());
        assert_eq!(q.advance(secs(0.2)), vec![1]);
    }

    #[test]
    fn cancelled_action_never_fires() {
        let mut q = TimerQueue::default();
        let a = q.schedule(secs(1.0), "a");
        q.schedule(secs(1.0), "b");

        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.pending(), 1);
        assert_eq!(q.advance(secs(1.0)), vec!["b"]);
    }

    #[test]
    fn cancel_after_fire_is_rejected() {
        let mut q = TimerQueue::default();
        let a = q.schedule(secs(0.1), ());
        q.advance(secs(1.0));

        assert!(!q.cancel(a));
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn clear_drops_pending_actions() {
        let mut q = TimerQueue::default();
        q.schedule(secs(1.0), 1);
        let b = q.schedule(secs(1.0), 2);
        q.cancel(b);

        q.clear();
        assert_eq!(q.pending(), 0);
        assert!(q.advance(secs(5.0)).is_empty());
    }
}
