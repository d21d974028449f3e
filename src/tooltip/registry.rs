use std::collections::HashMap;

use super::tooltip_state::{InstanceId, Tooltip};
use crate::dom::NodeId;

/// Tooltip instances, keyed by id, plus the element each live one is bound to.
///
/// At most one instance is bound per element; the page retires the previous
/// one before binding a replacement. A retired instance is no longer bound
/// but stays here until its last hide has played out.
#[derive(Debug, Default)]
pub struct TooltipRegistry {
    next_id: u64,
    instances: HashMap<InstanceId, Tooltip>,
    bound: HashMap<NodeId, InstanceId>,
}

impl TooltipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&mut self) -> InstanceId {
        self.next_id += 1;
        InstanceId(self.next_id)
    }

    /// The instance currently bound to `element`
    pub fn get(&self, element: NodeId) -> Option<&Tooltip> {
        self.instances.get(self.bound.get(&element)?)
    }

    pub fn contains(&self, element: NodeId) -> bool {
        self.bound.contains_key(&element)
    }

    pub fn bound_id(&self, element: NodeId) -> Option<InstanceId> {
        self.bound.get(&element).copied()
    }

    /// Any instance, bound or retired
    pub fn instance(&self, id: InstanceId) -> Option<&Tooltip> {
        self.instances.get(&id)
    }

    pub(crate) fn instance_mut(&mut self, id: InstanceId) -> Option<&mut Tooltip> {
        self.instances.get_mut(&id)
    }

    pub(crate) fn bind(&mut self, tooltip: Tooltip) {
        self.bound.insert(tooltip.element(), tooltip.id());
        self.instances.insert(tooltip.id(), tooltip);
    }

    /// Unbind the element's instance, keeping it until [`Self::reap`] drops it
    pub(crate) fn retire(&mut self, element: NodeId) -> Option<InstanceId> {
        self.bound.remove(&element)
    }

    /// Drop `id` if it is retired and has nothing left to do
    pub(crate) fn reap(&mut self, id: InstanceId) -> bool {
        let retired = self
            .instances
            .get(&id)
            .is_some_and(|t| self.bound.get(&t.element()) != Some(&id) && t.is_settled());
        if retired {
            self.instances.remove(&id);
        }
        retired
    }

    /// Number of bound elements
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Retired instances still finishing a hide
    pub fn retiring(&self) -> usize {
        self.instances.len() - self.bound.len()
    }

    /// Bound elements in ascending id order
    pub fn elements(&self) -> Vec<NodeId> {
        let mut elements: Vec<NodeId> = self.bound.keys().copied().collect();
        elements.sort();
        elements
    }
}
