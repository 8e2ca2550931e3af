use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised while binding or driving a `ModalController`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    /// A fixed element the controller depends on is absent.
    #[error("required element #{0} is missing")]
    MissingElement(String),

    /// A trigger named a modal that is not registered.
    #[error("no modal registered under id {0:?}")]
    UnknownModal(String),

    /// A node id handed to the controller does not index this document.
    #[error("node {0:?} does not belong to this document")]
    ForeignNode(NodeId),
}
