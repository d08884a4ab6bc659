//! Tests for complete gestures: start, scroll, stop

use std::collections::BTreeMap;

use autoscroll::engine::SUPPRESSOR_LINGER;
use autoscroll::geometry::{Point, ScrollDelta};
use autoscroll::page::{Key, ListenerKind, MouseButton, ScrollRecord};
use autoscroll::settings::{
    ChangeNotice, ScrollMode, SettingKey, SettingsStore, StorageArea, StorageChange,
};
use autoscroll::{Disposition, PageEvent};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{Document, fire_timers, move_to, press, release, run_frames};

fn below(point: Point, dy: f64) -> Point {
    point.offset(0.0, dy)
}

#[test]
fn test_toggle_gesture_scrolls_page_until_escape() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    assert_eq!(
        release(&mut app, MouseButton::Middle),
        Disposition::PassThrough
    );

    move_to(&mut app, below(Document::PLAIN, 105.0));
    assert_eq!(run_frames(&mut app, 5), 5);
    // 12.649... px per frame; the remainder carries, so five frames apply 63.
    assert_eq!(app.page().page_scroll(), (0, 63));

    assert_eq!(
        app.handle(PageEvent::KeyDown(Key::Escape)),
        Disposition::Consume
    );
    assert!(!app.engine().is_active());
    assert!(app.page().indicators().is_empty());
    assert_eq!(app.page().pending_frames(), 0);
    assert_eq!(run_frames(&mut app, 5), 0);
    assert_eq!(app.page().page_scroll(), (0, 63));
}

#[test]
fn test_indicator_centered_on_press() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    let indicators = app.page().indicators();
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].1, Document::PLAIN.offset(-16.0, -16.0));
}

#[test]
fn test_toggle_stops_on_primary_click() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);

    assert_eq!(
        press(&mut app, MouseButton::Primary, Document::PLAIN),
        Disposition::PassThrough
    );
    assert!(app.engine().is_active());
    assert_eq!(
        release(&mut app, MouseButton::Primary),
        Disposition::Consume
    );
    assert!(!app.engine().is_active());
}

#[test]
fn test_toggle_second_middle_click_stops() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    let _ = release(&mut app, MouseButton::Middle);

    assert_eq!(
        press(&mut app, MouseButton::Middle, Document::PLAIN),
        Disposition::Consume
    );
    assert!(!app.engine().is_active());
    assert_eq!(
        release(&mut app, MouseButton::Middle),
        Disposition::PassThrough
    );
}

#[test]
fn test_drag_gesture_ends_on_release() {
    let mut app = Document::new().controller(ScrollMode::Drag);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    move_to(&mut app, below(Document::PLAIN, -1000.0));
    let _ = run_frames(&mut app, 2);
    assert_eq!(app.page().page_scroll(), (0, -200));

    assert_eq!(
        release(&mut app, MouseButton::Middle),
        Disposition::Consume
    );
    assert!(!app.engine().is_active());
    assert_eq!(app.page().total_listeners(), 1);
}

#[test]
fn test_feed_scrolls_instead_of_page() {
    let doc = Document::new();
    let feed = doc.feed;
    let mut app = doc.controller(ScrollMode::Toggle);

    let _ = press(&mut app, MouseButton::Middle, Document::FEED);
    move_to(&mut app, below(Document::FEED, 1000.0));
    let _ = run_frames(&mut app, 2);

    assert_eq!(app.page().element_scroll(feed), (0, 200));
    assert_eq!(app.page().page_scroll(), (0, 0));
    assert_eq!(
        app.page().scrolls(),
        &[
            ScrollRecord::Element(feed, ScrollDelta::new(0, 100)),
            ScrollRecord::Element(feed, ScrollDelta::new(0, 100)),
        ]
    );
}

#[test]
fn test_target_follows_origin_not_cursor() {
    let doc = Document::new();
    let feed = doc.feed;
    let mut app = doc.controller(ScrollMode::Toggle);

    // Start on plain content, then wander over the feed.
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    move_to(&mut app, Document::FEED);
    let _ = run_frames(&mut app, 1);

    assert_eq!(app.page().element_scroll(feed), (0, 0));
    assert_ne!(app.page().page_scroll(), (0, 0));
}

#[test]
fn test_settings_change_applies_mid_gesture() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    move_to(&mut app, below(Document::PLAIN, 1000.0));
    let _ = run_frames(&mut app, 1);
    assert_eq!(app.page().page_scroll(), (0, 100));

    app.store_mut().set(SettingKey::MaxScrollSpeed, json!(40))?;
    let _ = run_frames(&mut app, 1);
    assert_eq!(app.page().page_scroll(), (0, 140));
    Ok(())
}

#[test]
fn test_foreign_area_and_unknown_keys_are_ignored() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let before = *app.settings();

    let mut changes = BTreeMap::new();
    changes.insert(
        SettingKey::MaxScrollSpeed.as_str().to_string(),
        StorageChange {
            old_value: None,
            new_value: Some(json!(5)),
        },
    );
    app.store_mut().notify(&ChangeNotice {
        area: StorageArea::Local,
        changes,
    });
    app.store_mut()
        .notify(&ChangeNotice::single("theme", None, json!("dark")));
    app.store_mut().notify(&ChangeNotice::single(
        SettingKey::ScrollSensitivity.as_str(),
        None,
        json!("fast"),
    ));

    assert_eq!(app.pump_settings(), 0);
    assert_eq!(*app.settings(), before);
}

#[test]
fn test_context_menu_suppressed_only_while_scrolling() {
    let mut app = Document::new().controller(ScrollMode::Drag);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    assert_eq!(
        app.handle(PageEvent::ContextMenu(MouseButton::Middle)),
        Disposition::PreventDefault
    );
    let _ = release(&mut app, MouseButton::Middle);

    // The listener is still registered, but the gesture is over.
    assert_eq!(app.page().listener_count(ListenerKind::ContextMenu), 1);
    assert_eq!(
        app.handle(PageEvent::ContextMenu(MouseButton::Middle)),
        Disposition::PassThrough
    );
    fire_timers(&mut app, SUPPRESSOR_LINGER);
    assert_eq!(app.page().listener_count(ListenerKind::ContextMenu), 0);
    assert_eq!(
        app.handle(PageEvent::ContextMenu(MouseButton::Middle)),
        Disposition::PassThrough
    );
}

#[test]
fn test_quick_restart_keeps_one_suppressor() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    let _ = app.handle(PageEvent::KeyDown(Key::Escape));
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);

    assert!(app.engine().is_active());
    assert_eq!(app.page().listener_count(ListenerKind::ContextMenu), 1);
    assert_eq!(app.page().pending_timers(), 0);

    fire_timers(&mut app, SUPPRESSOR_LINGER * 10);
    assert_eq!(
        app.handle(PageEvent::ContextMenu(MouseButton::Middle)),
        Disposition::PreventDefault
    );
}

#[test]
fn test_frame_delivered_after_stop_is_harmless() {
    let mut app = Document::new().controller(ScrollMode::Toggle);
    let _ = press(&mut app, MouseButton::Middle, Document::PLAIN);
    move_to(&mut app, below(Document::PLAIN, 300.0));
    let late = app.page_mut().take_frame();
    let _ = app.handle(PageEvent::KeyDown(Key::Escape));

    if let Some(frame) = late {
        assert!(app.on_frame(frame).is_none());
    }
    assert_eq!(app.page().page_scroll(), (0, 0));
    assert_eq!(app.page().pending_frames(), 0);
}
