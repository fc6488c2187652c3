//! End-to-end behavior of the coordinator with live window wrappers.

use std::sync::{Arc, Mutex};

use psp_channel::{ChannelEvent, EventKind};
use psp_common::{AppEvent, PspError, Rect, SettingPatch, SettingValue, WindowKind};
use psp_config::PspConfig;

use super::{OpenRequest, PspApp};
use crate::window::WindowWrapper;

const SCREEN: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1920.0,
    height: 1040.0,
};

struct Harness {
    app: PspApp,
    windows: Vec<WindowWrapper>,
}

impl Harness {
    fn new() -> Self {
        Self {
            app: PspApp::new(PspConfig::default(), SCREEN),
            windows: Vec::new(),
        }
    }

    /// Open and bring live; returns the index into `windows`.
    fn open(&mut self, request: OpenRequest) -> usize {
        let window = self.app.open(request).unwrap();
        self.windows.push(window);
        self.settle();
        self.windows.len() - 1
    }

    fn open_kind(&mut self, kind: WindowKind) -> usize {
        self.open(OpenRequest::new(kind))
    }

    fn settle(&mut self) {
        for _ in 0..100 {
            let mut handled = self.app.pump();
            for window in &mut self.windows {
                handled += window.pump();
            }
            if handled == 0 {
                return;
            }
        }
        panic!("windows never settled");
    }

    fn w(&mut self, index: usize) -> &mut WindowWrapper {
        &mut self.windows[index]
    }

    fn value(&self, index: usize, id: &str) -> Option<SettingValue> {
        self.windows[index].model().settings.get(id).cloned()
    }
}

fn record(window: &mut WindowWrapper, kind: EventKind) -> Arc<Mutex<Vec<ChannelEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    window.on(kind, move |event| {
        sink.lock().unwrap().push(event.clone());
        Ok(())
    });
    seen
}

// =============================================================================
// OPENING
// =============================================================================

#[test]
fn opened_windows_go_live_with_snapshot() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);
    let qss = h.open_kind(WindowKind::Qss);

    assert!(h.w(psp).is_live());
    assert!(h.w(qss).is_live());
    assert_eq!(h.value(psp, "language"), Some(SettingValue::from("en-US")));
    assert_eq!(h.w(qss).model().theme.as_deref(), Some("default"));
    assert_eq!(h.app.window_count(), 2);
}

#[test]
fn singletons_cannot_open_twice() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);

    let err = h.app.open_window(WindowKind::Psp).unwrap_err();
    assert!(matches!(err, PspError::Window(_)));

    h.w(psp).close();
    h.settle();
    assert!(h.app.open_window(WindowKind::Psp).is_ok());
}

#[test]
fn tooltips_are_not_singletons() {
    let mut h = Harness::new();
    h.open_kind(WindowKind::Tooltip);
    h.open_kind(WindowKind::Tooltip);
    assert_eq!(h.app.window_count(), 2);
}

#[test]
fn window_ids_are_unique() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Tooltip);
    let b = h.open_kind(WindowKind::Tooltip);
    assert_ne!(h.w(a).id(), h.w(b).id());
}

#[test]
fn widget_opens_above_qss() {
    let mut h = Harness::new();
    let qss = h.open_kind(WindowKind::Qss);
    let widget = h.open_kind(WindowKind::QssWidget);

    let qss_bounds = h.w(qss).bounds();
    let widget_bounds = h.w(widget).bounds();
    assert!(widget_bounds.bottom() <= qss_bounds.y);
    assert!(widget_bounds.right() <= SCREEN.right());
}

#[test]
fn open_publishes_app_event() {
    let mut h = Harness::new();
    let mut events = h.app.subscribe();
    let about = h.open_kind(WindowKind::About);
    let id = h.w(about).id();

    match events.try_recv().unwrap() {
        AppEvent::WindowOpened { id: opened, kind } => {
            assert_eq!(opened, id);
            assert_eq!(kind, WindowKind::About);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

// =============================================================================
// SETTING UPDATES
// =============================================================================

#[test]
fn language_change_reaches_other_window_exactly_once() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let b = h.open_kind(WindowKind::Qss);
    let updates = record(h.w(b), EventKind::SettingUpdate);
    let locales = record(h.w(b), EventKind::LocaleChange);

    assert!(h.w(a).request_change(SettingPatch::new("language", "ko-KR")));
    h.settle();

    let language_updates: Vec<_> = updates
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, ChannelEvent::SettingUpdate(p) if p.id == "language"))
        .cloned()
        .collect();
    assert_eq!(
        language_updates,
        vec![ChannelEvent::setting_update("language", "ko-KR")]
    );
    assert_eq!(locales.lock().unwrap().len(), 1);
    assert_eq!(h.value(b, "language"), Some(SettingValue::from("ko-KR")));
    assert_eq!(h.w(b).model().locale.as_deref(), Some("ko-KR"));
    // The requesting window gets the echo too.
    assert_eq!(h.value(a, "language"), Some(SettingValue::from("ko-KR")));
}

#[test]
fn updates_arrive_in_send_order() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let b = h.open_kind(WindowKind::Qss);
    let seen = record(h.w(b), EventKind::SettingUpdate);

    for volume in [55.0, 60.0, 65.0] {
        h.w(a).request_change(SettingPatch::new("volume", volume));
    }
    h.settle();

    let values: Vec<_> = seen
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            ChannelEvent::SettingUpdate(p) => p.value.as_f64(),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![55.0, 60.0, 65.0]);
}

#[test]
fn racing_windows_resolve_to_later_write() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let b = h.open_kind(WindowKind::Qss);

    h.w(b).request_change(SettingPatch::new("theme", "black-white"));
    h.w(a).request_change(SettingPatch::new("theme", "yellow-black"));
    h.settle();

    for index in [a, b] {
        assert_eq!(h.value(index, "theme"), Some(SettingValue::from("yellow-black")));
        assert_eq!(h.w(index).model().theme.as_deref(), Some("yellow-black"));
    }
    assert_eq!(
        h.app.settings().get("theme"),
        Some(&SettingValue::from("yellow-black"))
    );
}

#[test]
fn invalid_request_gets_no_echo() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let seen = record(h.w(a), EventKind::SettingUpdate);

    h.w(a).request_change(SettingPatch::new("volume", 500.0));
    h.w(a).request_change(SettingPatch::new("brightness", 3.0));
    h.w(a).request_change(SettingPatch::new("read-aloud", "loud"));
    h.settle();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(h.app.settings().get("volume"), Some(&SettingValue::Number(50.0)));
}

#[test]
fn subscriptions_filter_broadcasts() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);
    let tooltip = h.open_kind(WindowKind::Tooltip);
    let updates = record(h.w(tooltip), EventKind::SettingUpdate);
    let themes = record(h.w(tooltip), EventKind::ThemeChange);

    h.w(psp).request_change(SettingPatch::new("theme", "white-black"));
    h.settle();

    assert!(updates.lock().unwrap().is_empty());
    assert_eq!(themes.lock().unwrap().len(), 1);
    assert_eq!(h.w(tooltip).model().theme.as_deref(), Some("white-black"));
}

#[test]
fn custom_subscriptions_are_honored() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);
    let survey = h.open(OpenRequest {
        subscriptions: Some(vec![EventKind::SettingUpdate]),
        ..OpenRequest::new(WindowKind::Survey)
    });

    h.w(psp).request_change(SettingPatch::new("mouse-speed", 8.0));
    h.settle();

    assert_eq!(h.value(survey, "mouse-speed"), Some(SettingValue::Number(8.0)));
}

// =============================================================================
// CLOSING
// =============================================================================

#[test]
fn closed_window_receives_nothing() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let b = h.open_kind(WindowKind::Qss);
    let seen = record(h.w(b), EventKind::SettingUpdate);

    h.w(b).close();
    h.settle();
    assert_eq!(h.app.window_count(), 1);

    h.w(a).request_change(SettingPatch::new("volume", 80.0));
    h.settle();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(h.value(b, "volume"), Some(SettingValue::Number(50.0)));
    assert_eq!(h.w(b).pump(), 0);
}

#[test]
fn window_closing_mid_flight_is_harmless() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let b = h.open_kind(WindowKind::Qss);

    // A's update reaches main before B's close, so main still sends it to B.
    h.w(a).request_change(SettingPatch::new("volume", 30.0));
    h.w(b).close();
    h.settle();

    assert!(h.w(b).is_closed());
    assert_eq!(h.value(b, "volume"), Some(SettingValue::Number(50.0)));
    assert_eq!(h.value(a, "volume"), Some(SettingValue::Number(30.0)));
    assert!(!h.app.registry.contains(h.windows[b].id()));
}

#[test]
fn main_can_close_a_window() {
    let mut h = Harness::new();
    let about = h.open_kind(WindowKind::About);
    let id = h.w(about).id();

    assert!(h.app.close_window(id));
    assert!(!h.app.close_window(id));
    h.settle();

    assert!(h.w(about).is_closed());
}

// =============================================================================
// UNDO, KEY-OUT, RESTART
// =============================================================================

#[test]
fn undo_restores_previous_value_everywhere() {
    let mut h = Harness::new();
    let a = h.open_kind(WindowKind::Psp);
    let b = h.open_kind(WindowKind::Qss);

    h.w(a).request_change(SettingPatch::new("text-zoom", 1.5));
    h.settle();
    h.w(b).undo();
    h.settle();

    assert_eq!(h.value(a, "text-zoom"), Some(SettingValue::Number(1.0)));
    assert_eq!(h.value(b, "text-zoom"), Some(SettingValue::Number(1.0)));

    // Nothing left to undo.
    h.w(b).undo();
    h.settle();
    assert_eq!(h.value(b, "text-zoom"), Some(SettingValue::Number(1.0)));
}

#[test]
fn key_out_resets_and_closes_transient_windows() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);
    let qss = h.open_kind(WindowKind::Qss);
    let widget = h.open_kind(WindowKind::QssWidget);

    h.w(psp).request_change(SettingPatch::new("language", "de-DE"));
    h.w(psp).request_change(SettingPatch::new("read-aloud", true));
    h.settle();
    assert_eq!(h.w(qss).model().restart_pending, vec!["language".to_string()]);

    h.w(qss).key_out();
    h.settle();

    assert!(h.w(widget).is_closed());
    for index in [psp, qss] {
        assert_eq!(h.value(index, "language"), Some(SettingValue::from("en-US")));
        assert_eq!(h.value(index, "read-aloud"), Some(SettingValue::Bool(false)));
        assert_eq!(h.w(index).model().locale.as_deref(), Some("en-US"));
        assert!(h.w(index).model().restart_pending.is_empty());
    }

    // Undo history is gone.
    h.w(psp).undo();
    h.settle();
    assert_eq!(h.value(psp, "read-aloud"), Some(SettingValue::Bool(false)));
}

#[test]
fn restart_now_resolves_pending() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);

    h.w(psp).request_change(SettingPatch::new("screen-reader", true));
    h.settle();
    assert_eq!(h.app.pending_restart(), ["screen-reader".to_string()]);

    h.w(psp).restart_later();
    h.settle();
    assert_eq!(h.w(psp).model().restart_pending, vec!["screen-reader".to_string()]);

    h.w(psp).restart_now();
    h.settle();
    assert!(h.app.pending_restart().is_empty());
    assert!(h.w(psp).model().restart_pending.is_empty());
}

#[test]
fn late_window_learns_pending_restart() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);
    h.w(psp).request_change(SettingPatch::new("language", "fr-FR"));
    h.settle();

    let qss = h.open_kind(WindowKind::Qss);
    assert_eq!(h.value(qss, "language"), Some(SettingValue::from("fr-FR")));
    assert_eq!(h.w(qss).model().locale.as_deref(), Some("fr-FR"));
    assert_eq!(h.w(qss).model().restart_pending, vec!["language".to_string()]);
}

#[test]
fn setting_changes_published_on_bus() {
    let mut h = Harness::new();
    let psp = h.open_kind(WindowKind::Psp);
    let mut events = h.app.subscribe();

    h.w(psp).request_change(SettingPatch::new("volume", 25.0));
    h.settle();

    match events.try_recv().unwrap() {
        AppEvent::SettingChanged { id, value } => {
            assert_eq!(id, "volume");
            assert_eq!(value, SettingValue::Number(25.0));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
