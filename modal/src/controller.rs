//! Click-driven open/close wiring for overlay dialogs.
//!
//! # Design
//! Handlers are plain data keyed by the node they are bound to. `click`
//! walks from the event target up through its ancestors and runs each
//! node's handlers in binding order, the way a bubbling DOM click would.
//! A closer handler stops propagation after the node's handlers have run.
//!
//! At most one modal is open at a time; the controller tracks it in a
//! single slot rather than querying the document for an `is-open` class.

use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};
use crate::error::ModalError;
use crate::registry::{ModalRegistry, ModalState};
use crate::{
    DEFAULT_MODAL_ID, HIDDEN_CLASS, HIDE_ATTR, MODAL_CLASS, OPEN_CLASS, OVERLAY_ID, TARGET_ATTR,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Handler {
    /// Open the named modal.
    Open { modal_id: String },
    /// Stop propagation; close the enclosing modal when the click landed on
    /// this node itself rather than on nested content.
    CloseOnSelf,
    /// Close the open modal unless the click landed inside `closer_region`.
    DismissOutside { closer_region: Option<NodeId> },
}

#[derive(Debug, Clone)]
pub struct ModalController {
    overlay: NodeId,
    registry: ModalRegistry,
    handlers: BTreeMap<NodeId, Vec<Handler>>,
    open: Option<NodeId>,
}

impl ModalController {
    /// A controller with no bound elements. All modals start closed.
    pub fn new(overlay: NodeId, registry: ModalRegistry) -> Self {
        Self {
            overlay,
            registry,
            handlers: BTreeMap::new(),
            open: None,
        }
    }

    /// Discover triggers, closers, and the default modal from markup.
    ///
    /// Fails when the shared overlay is missing. A missing default modal
    /// only disables outside-click dismissal.
    pub fn bind(doc: &Document) -> Result<Self, ModalError> {
        let overlay = doc
            .get_element_by_id(OVERLAY_ID)
            .ok_or_else(|| ModalError::MissingElement(OVERLAY_ID.to_string()))?;
        let mut controller = Self::new(overlay, ModalRegistry::discover(doc, TARGET_ATTR));

        for trigger in doc.elements_with_attribute(TARGET_ATTR) {
            if let Some(modal_id) = doc.attribute(trigger, TARGET_ATTR) {
                controller.bind_trigger(trigger, modal_id);
            }
        }
        for closer in doc.elements_with_attribute(HIDE_ATTR) {
            controller.bind_closer(closer);
        }
        match doc.get_element_by_id(DEFAULT_MODAL_ID) {
            Some(default_modal) => {
                let closer_region = doc.element_with_attribute_value(HIDE_ATTR, DEFAULT_MODAL_ID);
                controller.bind_outside_dismiss(default_modal, closer_region);
            }
            None => tracing::warn!("no #{DEFAULT_MODAL_ID} element; outside clicks will not dismiss"),
        }

        tracing::debug!(
            modals = controller.registry.len(),
            bound = controller.handlers.len(),
            "modal controller bound"
        );
        Ok(controller)
    }

    pub fn bind_trigger(&mut self, node: NodeId, modal_id: &str) {
        self.push_handler(
            node,
            Handler::Open {
                modal_id: modal_id.to_string(),
            },
        );
    }

    pub fn bind_closer(&mut self, node: NodeId) {
        self.push_handler(node, Handler::CloseOnSelf);
    }

    pub fn bind_outside_dismiss(&mut self, node: NodeId, closer_region: Option<NodeId>) {
        self.push_handler(node, Handler::DismissOutside { closer_region });
    }

    fn push_handler(&mut self, node: NodeId, handler: Handler) {
        self.handlers.entry(node).or_default().push(handler);
    }

    pub fn registry(&self) -> &ModalRegistry {
        &self.registry
    }

    pub fn open_modal(&self) -> Option<NodeId> {
        self.open
    }

    pub fn open_modal_id(&self) -> Option<&str> {
        self.open.and_then(|node| self.registry.id_of(node))
    }

    pub fn state(&self, modal_id: &str) -> Option<ModalState> {
        let node = self.registry.get(modal_id)?;
        Some(if self.open == Some(node) {
            ModalState::Open
        } else {
            ModalState::Closed
        })
    }

    /// Deliver a click on `target`, bubbling through its ancestors.
    ///
    /// An error from a handler aborts the dispatch; changes made by earlier
    /// handlers remain applied. A `target` from another document is rejected
    /// before any handler runs.
    pub fn click(&mut self, doc: &mut Document, target: NodeId) -> Result<(), ModalError> {
        ensure_owned(doc, target)?;
        let path: Vec<NodeId> = doc.ancestors(target).collect();
        for node in path {
            let Some(handlers) = self.handlers.get(&node).cloned() else {
                continue;
            };
            let mut stop_propagation = false;
            for handler in handlers {
                match handler {
                    Handler::Open { modal_id } => self.open(doc, &modal_id)?,
                    Handler::CloseOnSelf => {
                        stop_propagation = true;
                        if target == node {
                            if let Some(modal) = doc.closest_with_class(node, MODAL_CLASS) {
                                self.close(doc, modal)?;
                            }
                        }
                    }
                    Handler::DismissOutside { closer_region } => {
                        let inside = closer_region.is_some_and(|region| doc.contains(region, target));
                        if let Some(open) = self.open.filter(|_| !inside) {
                            self.close(doc, open)?;
                        }
                    }
                }
            }
            if stop_propagation {
                break;
            }
        }
        Ok(())
    }

    /// Open a registered modal, closing any other open modal first.
    pub fn open(&mut self, doc: &mut Document, modal_id: &str) -> Result<(), ModalError> {
        let modal = self
            .registry
            .get(modal_id)
            .ok_or_else(|| ModalError::UnknownModal(modal_id.to_string()))?;
        if self.open == Some(modal) {
            return Ok(());
        }
        ensure_owned(doc, modal)?;
        ensure_owned(doc, self.overlay)?;
        if let Some(previous) = self.open {
            self.close(doc, previous)?;
        }

        doc.add_class(modal, OPEN_CLASS);
        doc.remove_class(modal, HIDDEN_CLASS);
        doc.add_class(self.overlay, OPEN_CLASS);
        self.open = Some(modal);
        tracing::debug!(modal_id, "modal opened");
        Ok(())
    }

    /// Hide `modal`. The overlay is cleared unless a different modal is
    /// still open.
    pub fn close(&mut self, doc: &mut Document, modal: NodeId) -> Result<(), ModalError> {
        ensure_owned(doc, modal)?;
        ensure_owned(doc, self.overlay)?;
        doc.remove_class(modal, OPEN_CLASS);
        doc.add_class(modal, HIDDEN_CLASS);
        if self.open.is_some_and(|current| current != modal) {
            return Ok(());
        }
        self.open = None;
        doc.remove_class(self.overlay, OPEN_CLASS);
        tracing::debug!(modal_id = self.registry.id_of(modal), "modal closed");
        Ok(())
    }

    pub fn close_by_id(&mut self, doc: &mut Document, modal_id: &str) -> Result<(), ModalError> {
        let modal = self
            .registry
            .get(modal_id)
            .ok_or_else(|| ModalError::UnknownModal(modal_id.to_string()))?;
        self.close(doc, modal)
    }
}

fn ensure_owned(doc: &Document, node: NodeId) -> Result<(), ModalError> {
    if doc.owns(node) {
        Ok(())
    } else {
        Err(ModalError::ForeignNode(node))
    }
}
