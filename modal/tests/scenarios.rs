//! Click scenarios on a page laid out the way the markup uses the modal
//! attributes: a shared overlay, a plain dialog, and the default modal
//! whose backdrop is its closer region.

use modal_core::{
    Document, Element, ModalController, ModalError, ModalState, NodeId, HIDDEN_CLASS, HIDE_ATTR,
    MODAL_CLASS, OPEN_CLASS, TARGET_ATTR,
};

struct Page {
    doc: Document,
    overlay: NodeId,
    open_dialog: NodeId,
    open_default: NodeId,
    broken_trigger: NodeId,
    dialog: NodeId,
    dialog_backdrop: NodeId,
    dialog_save: NodeId,
    default_modal: NodeId,
    default_backdrop: NodeId,
    default_panel_button: NodeId,
    default_footer: NodeId,
}

fn page() -> Page {
    let mut doc = Document::new();
    let root = doc.root();

    let open_dialog = doc.append(root, Element::new("button").with_attr(TARGET_ATTR, "dialog-1"));
    let open_default =
        doc.append(root, Element::new("button").with_attr(TARGET_ATTR, "default-modal"));
    let broken_trigger = doc.append(root, Element::new("button").with_attr(TARGET_ATTR, "nowhere"));
    let overlay = doc.append(root, Element::new("div").with_id("modal-overlay"));

    let dialog = doc.append(
        root,
        Element::new("div")
            .with_id("dialog-1")
            .with_class(MODAL_CLASS)
            .with_class(HIDDEN_CLASS),
    );
    let dialog_backdrop = doc.append(dialog, Element::new("div").with_attr(HIDE_ATTR, "dialog-1"));
    let dialog_content = doc.append(dialog_backdrop, Element::new("div"));
    let dialog_save = doc.append(dialog_content, Element::new("button"));

    let default_modal = doc.append(
        root,
        Element::new("div")
            .with_id("default-modal")
            .with_class(MODAL_CLASS)
            .with_class(HIDDEN_CLASS),
    );
    let default_backdrop =
        doc.append(default_modal, Element::new("div").with_attr(HIDE_ATTR, "default-modal"));
    let default_panel = doc.append(default_backdrop, Element::new("div"));
    let default_panel_button = doc.append(default_panel, Element::new("button"));
    let default_footer = doc.append(default_modal, Element::new("footer"));

    Page {
        doc,
        overlay,
        open_dialog,
        open_default,
        broken_trigger,
        dialog,
        dialog_backdrop,
        dialog_save,
        default_modal,
        default_backdrop,
        default_panel_button,
        default_footer,
    }
}

fn is_open(doc: &Document, node: NodeId) -> bool {
    doc.has_class(node, OPEN_CLASS) && !doc.has_class(node, HIDDEN_CLASS)
}

fn is_closed(doc: &Document, node: NodeId) -> bool {
    !doc.has_class(node, OPEN_CLASS) && doc.has_class(node, HIDDEN_CLASS)
}

#[test]
fn trigger_opens_its_modal() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();

    c.click(&mut p.doc, p.open_dialog).unwrap();

    assert!(is_open(&p.doc, p.dialog));
    assert!(p.doc.has_class(p.overlay, OPEN_CLASS));
    assert_eq!(c.state("dialog-1"), Some(ModalState::Open));
    assert_eq!(c.open_modal_id(), Some("dialog-1"));
}

#[test]
fn backdrop_click_closes_its_modal() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_dialog).unwrap();

    c.click(&mut p.doc, p.dialog_backdrop).unwrap();

    assert!(is_closed(&p.doc, p.dialog));
    assert!(!p.doc.has_class(p.overlay, OPEN_CLASS));
    assert_eq!(c.open_modal(), None);
}

#[test]
fn click_on_nested_content_keeps_modal_open() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_dialog).unwrap();

    c.click(&mut p.doc, p.dialog_save).unwrap();

    assert!(is_open(&p.doc, p.dialog));
    assert!(p.doc.has_class(p.overlay, OPEN_CLASS));
}

#[test]
fn default_modal_outside_click_dismisses() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_default).unwrap();
    assert!(is_open(&p.doc, p.default_modal));

    c.click(&mut p.doc, p.default_footer).unwrap();

    assert!(is_closed(&p.doc, p.default_modal));
    assert!(!p.doc.has_class(p.overlay, OPEN_CLASS));
}

#[test]
fn default_modal_click_inside_closer_region_keeps_modal_open() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_default).unwrap();

    c.click(&mut p.doc, p.default_panel_button).unwrap();

    assert!(is_open(&p.doc, p.default_modal));
    assert_eq!(c.open_modal(), Some(p.default_modal));
}

#[test]
fn default_modal_backdrop_click_closes_through_closer() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_default).unwrap();

    c.click(&mut p.doc, p.default_backdrop).unwrap();

    assert!(is_closed(&p.doc, p.default_modal));
    assert_eq!(c.open_modal(), None);
}

#[test]
fn outside_click_closes_whichever_modal_is_open() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_dialog).unwrap();

    c.click(&mut p.doc, p.default_modal).unwrap();

    assert!(is_closed(&p.doc, p.dialog));
    assert!(!p.doc.has_class(p.overlay, OPEN_CLASS));
}

#[test]
fn outside_click_with_nothing_open_changes_nothing() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    let before = p.doc.clone();

    c.click(&mut p.doc, p.default_footer).unwrap();

    for node in before.descendants() {
        assert_eq!(p.doc.element(node), before.element(node));
    }
}

#[test]
fn second_trigger_swaps_the_open_modal() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();
    c.click(&mut p.doc, p.open_dialog).unwrap();

    c.open(&mut p.doc, "default-modal").unwrap();

    assert!(is_closed(&p.doc, p.dialog));
    assert!(is_open(&p.doc, p.default_modal));
    assert!(p.doc.has_class(p.overlay, OPEN_CLASS));
    assert_eq!(c.open_modal_id(), Some("default-modal"));
}

#[test]
fn trigger_for_missing_modal_is_an_error() {
    let mut p = page();
    let mut c = ModalController::bind(&p.doc).unwrap();

    let err = c.click(&mut p.doc, p.broken_trigger).unwrap_err();

    assert_eq!(err, ModalError::UnknownModal("nowhere".to_string()));
    assert!(!p.doc.has_class(p.overlay, OPEN_CLASS));
}

#[test]
fn page_without_default_modal_still_binds() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, Element::new("div").with_id("modal-overlay"));
    let dialog = doc.append(
        root,
        Element::new("div")
            .with_id("only")
            .with_class(MODAL_CLASS)
            .with_class(HIDDEN_CLASS),
    );
    let trigger = doc.append(root, Element::new("a").with_attr(TARGET_ATTR, "only"));

    let mut c = ModalController::bind(&doc).unwrap();
    c.click(&mut doc, trigger).unwrap();
    assert!(is_open(&doc, dialog));

    // Without a default modal, clicks elsewhere do not dismiss.
    c.click(&mut doc, root).unwrap();
    assert!(is_open(&doc, dialog));
}

#[test]
fn explicit_registry_without_markup_discovery() {
    let mut doc = Document::new();
    let root = doc.root();
    let overlay = doc.append(root, Element::new("div"));
    let sheet = doc.append(root, Element::new("aside").with_class(MODAL_CLASS));
    let close = doc.append(sheet, Element::new("div"));
    let button = doc.append(root, Element::new("button"));

    let mut registry = modal_core::ModalRegistry::new();
    registry.register("sheet", sheet);
    let mut c = ModalController::new(overlay, registry);
    c.bind_trigger(button, "sheet");
    c.bind_closer(close);

    c.click(&mut doc, button).unwrap();
    assert_eq!(c.state("sheet"), Some(ModalState::Open));
    assert!(doc.has_class(overlay, OPEN_CLASS));

    c.click(&mut doc, close).unwrap();
    assert_eq!(c.state("sheet"), Some(ModalState::Closed));
    assert!(doc.has_class(sheet, HIDDEN_CLASS));
}
