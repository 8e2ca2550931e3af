//! Modal dialog open/close controller.
//!
//! # Overview
//! Elements carrying `data-modal-target="<id>"` open the modal with that id;
//! elements carrying `data-modal-hide` close their enclosing `.modal` when
//! clicked directly. Clicking the `#default-modal` backdrop outside its
//! closer region dismisses whichever modal is open. Opening adds `is-open`
//! and removes `hidden` on the modal and marks `#modal-overlay` `is-open`;
//! closing reverses that.
//!
//! # Design
//! - `Document` is a headless element tree; the controller mutates classes
//!   on it and never holds references into it.
//! - `ModalRegistry` maps ids to nodes explicitly. `ModalController::bind`
//!   fills it from markup, or callers build one and bind handlers by hand.
//! - A single `Option` slot records the open modal.

pub mod controller;
pub mod dom;
pub mod error;
pub mod registry;

pub use controller::ModalController;
pub use dom::{Document, Element, NodeId};
pub use error::ModalError;
pub use registry::{ModalRegistry, ModalState};

pub const OVERLAY_ID: &str = "modal-overlay";
pub const DEFAULT_MODAL_ID: &str = "default-modal";
pub const TARGET_ATTR: &str = "data-modal-target";
pub const HIDE_ATTR: &str = "data-modal-hide";
pub const MODAL_CLASS: &str = "modal";
pub const OPEN_CLASS: &str = "is-open";
pub const HIDDEN_CLASS: &str = "hidden";
