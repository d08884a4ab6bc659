//! Tests for which presses start a gesture

use autoscroll::geometry::Point;
use autoscroll::page::{ListenerKind, MouseButton, Page};
use autoscroll::settings::ScrollMode;
use autoscroll::Disposition;
use rstest::rstest;

use crate::common::{Document, press};

#[rstest]
#[case::link(Document::LINK)]
#[case::editor(Document::EDITOR)]
#[case::input(Document::INPUT)]
fn test_protected_elements_keep_middle_click(#[case] point: Point) {
    let mut app = Document::new().controller(ScrollMode::Toggle);

    assert_eq!(
        press(&mut app, MouseButton::Middle, point),
        Disposition::PassThrough
    );
    assert!(!app.engine().is_active());
    assert!(app.page().indicators().is_empty());
    assert_eq!(app.page().total_listeners(), 0);
    assert_eq!(app.page().pending_frames(), 0);
}

#[test]
fn test_fixture_hit_testing_lands_on_expected_elements() {
    let doc = Document::new();
    assert_eq!(doc.page.element_at(Document::LINK), Some(doc.link_icon));
    assert_eq!(doc.page.parent(doc.link_icon), Some(doc.link));
    assert_eq!(doc.page.element_at(Document::EDITOR), Some(doc.editor));
    assert_eq!(doc.page.element_at(Document::INPUT), Some(doc.input));
    assert_eq!(doc.page.element_at(Document::FEED), Some(doc.feed));
    assert_eq!(doc.page.element_at(Document::PLAIN), Some(doc.article));
}

#[rstest]
#[case(MouseButton::Primary)]
#[case(MouseButton::Secondary)]
fn test_other_buttons_are_ignored(#[case] button: MouseButton) {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    assert_eq!(
        press(&mut app, button, Document::PLAIN),
        Disposition::PassThrough
    );
    assert!(!app.engine().is_active());
}

#[test]
fn test_plain_content_starts_gesture() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    assert_eq!(
        press(&mut app, MouseButton::Middle, Document::PLAIN),
        Disposition::Consume
    );
    assert!(app.engine().is_active());
    assert_eq!(app.page().indicators().len(), 1);
    assert_eq!(app.page().listener_count(ListenerKind::PointerMove), 1);
    assert_eq!(app.page().listener_count(ListenerKind::PointerUp), 1);
    assert_eq!(app.page().listener_count(ListenerKind::KeyDown), 1);
    assert_eq!(app.page().listener_count(ListenerKind::ContextMenu), 1);
}

#[test]
fn test_press_outside_document_starts_gesture() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let outside = Point::new(2000.0, 2000.0);
    assert_eq!(
        press(&mut app, MouseButton::Middle, outside),
        Disposition::Consume
    );
    assert!(app.engine().is_active());
}

#[test]
fn test_press_on_scroll_container_starts_gesture() {
    let mut app = Document::new().controller(ScrollMode::Drag);
    assert_eq!(
        press(&mut app, MouseButton::Middle, Document::FEED),
        Disposition::Consume
    );
    assert!(app.engine().is_active());
}
