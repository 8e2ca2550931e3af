//! Explicit mapping from modal identifiers to document nodes.

use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};
use crate::MODAL_CLASS;

/// Presentation state of a single modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct ModalRegistry {
    modals: BTreeMap<String, NodeId>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `id`, replacing any earlier registration.
    pub fn register(&mut self, id: &str, node: NodeId) -> &mut Self {
        self.modals.insert(id.to_string(), node);
        self
    }

    /// Every element with class `modal` and an id, plus every element a
    /// trigger points at (`target_attr`) that resolves to an id.
    pub fn discover(doc: &Document, target_attr: &str) -> Self {
        let mut registry = Self::new();
        for node in doc.descendants() {
            if !doc.has_class(node, MODAL_CLASS) {
                continue;
            }
            if let Some(id) = doc.element(node).id.as_deref() {
                registry.register(id, node);
            }
        }
        for trigger in doc.elements_with_attribute(target_attr) {
            let Some(id) = doc.attribute(trigger, target_attr) else {
                continue;
            };
            match doc.get_element_by_id(id) {
                Some(node) => {
                    registry.register(id, node);
                }
                None => tracing::warn!(modal_id = id, "trigger points at a missing modal"),
            }
        }
        registry
    }

    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.modals.get(id).copied()
    }

    /// Reverse lookup used for logging.
    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.modals
            .iter()
            .find(|(_, n)| **n == node)
            .map(|(id, _)| id.as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modals.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modals.is_empty()
    }
}
