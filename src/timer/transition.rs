//! Transition-end emulation
//!
//! A completion registered here fires exactly once: on the first
//! `transitionend` whose target is the node itself, or on the fallback timer
//! armed at duration + slack, whichever comes first.

use super::scheduler::{Scheduler, TimerId};
use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaitId(u64);

#[derive(Debug)]
struct PendingWait<C> {
    id: WaitId,
    node: NodeId,
    fallback: Option<TimerId>,
    completion: C,
}

#[derive(Debug)]
pub struct TransitionWaits<C> {
    next_id: u64,
    pending: Vec<PendingWait<C>>,
}

impl<C> TransitionWaits<C> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn register(&mut self, node: NodeId, completion: C) -> WaitId {
        let id = WaitId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingWait {
            id,
            node,
            fallback: None,
            completion,
        });
        id
    }

    fn set_fallback(&mut self, id: WaitId, timer: TimerId) {
        if let Some(wait) = self.pending.iter_mut().find(|w| w.id == id) {
            wait.fallback = Some(timer);
        }
    }

    /// Take a single wait; `None` once it has already completed
    pub fn complete(&mut self, id: WaitId) -> Option<(Option<TimerId>, C)> {
        let index = self.pending.iter().position(|w| w.id == id)?;
        let wait = self.pending.remove(index);
        Some((wait.fallback, wait.completion))
    }

    /// Take every wait on `node`, oldest first
    pub fn complete_node(&mut self, node: NodeId) -> Vec<(Option<TimerId>, C)> {
        self.drain_where(|wait_node, _| wait_node == node)
    }

    /// Take every wait whose completion matches the predicate
    pub fn drain_where(
        &mut self,
        mut predicate: impl FnMut(NodeId, &C) -> bool,
    ) -> Vec<(Option<TimerId>, C)> {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());
        for wait in self.pending.drain(..) {
            if predicate(wait.node, &wait.completion) {
                taken.push((wait.fallback, wait.completion));
            } else {
                kept.push(wait);
            }
        }
        self.pending = kept;
        taken
    }
}

impl<C> Default for TransitionWaits<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Start waiting for `node`'s transition to end.
///
/// With a zero duration nothing is registered and the completion is handed
/// straight back for the caller to run now.
pub fn emulate_transition_end<T, C>(
    waits: &mut TransitionWaits<C>,
    scheduler: &mut Scheduler<T>,
    node: NodeId,
    duration: u64,
    slack: u64,
    completion: C,
    fallback_task: impl FnOnce(WaitId) -> T,
) -> Option<C> {
    if duration == 0 {
        return Some(completion);
    }
    let id = waits.register(node, completion);
    let timer = scheduler.schedule(duration.saturating_add(slack), fallback_task(id));
    waits.set_fallback(id, timer);
    None
}

/// Parse the first entry of a CSS time list (`150ms`, `0.3s`, `.2s, 1s`)
pub fn parse_duration_ms(value: &str) -> Option<u64> {
    let first = value.split(',').next()?.trim();
    let (number, scale) = if let Some(ms) = first.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(s) = first.strip_suffix('s') {
        (s, 1000.0)
    } else {
        return None;
    };
    let parsed: f64 = number.trim().parse().ok()?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }
    Some((parsed * scale).round() as u64)
}

/// Duration plus delay from inline styles, else the configured fallback
pub fn transition_duration(doc: &Document, node: NodeId, configured: u64) -> u64 {
    let Some(duration) = doc
        .style(node, "transition-duration")
        .and_then(|v| parse_duration_ms(&v))
    else {
        return configured;
    };
    let delay = doc
        .style(node, "transition-delay")
        .and_then(|v| parse_duration_ms(&v))
        .unwrap_or(0);
    duration + delay
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod transition_tests;
