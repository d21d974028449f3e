use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// One-shot timers against a virtual millisecond clock.
///
/// Timers due at the same instant fire in the order they were armed.
/// Cancellation is lazy: the heap entry stays until it surfaces.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    queue: BinaryHeap<Reverse<(u64, TimerId)>>,
    tasks: HashMap<TimerId, T>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse((self.now.saturating_add(delay), id)));
        self.tasks.insert(id, task);
        id
    }

    /// Returns the task if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.tasks.remove(&id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn next_due(&mut self) -> Option<u64> {
        self.discard_cancelled();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to it
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        self.discard_cancelled();
        let Reverse((due, id)) = *self.queue.peek()?;
        if due > until {
            return None;
        }
        self.queue.pop();
        let task = self.tasks.remove(&id)?;
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, id))) = self.queue.peek() {
            if self.tasks.contains_key(id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
