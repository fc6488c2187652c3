//! Headless driver: replays user actions from JSON lines against live
//! window wrappers and the coordinator.
//!
//! Each line names a window kind and an event in wire form:
//!
//! ```json
//! {"window": "qss", "action": {"name": "setting-update", "payload": {"id": "volume", "value": 80}}}
//! {"window": "psp", "action": {"name": "undo"}}
//! ```
//!
//! A line may carry an `anchor` rectangle; it only matters when the line
//! causes a window to open (tooltips and widgets are placed against it).
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use psp_channel::{ChannelEvent, EventKind, EventMessage};
use psp_common::{AppEvent, PspError, Rect, Result, WindowId, WindowKind};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::app_state::{OpenRequest, PspApp};
use crate::window::WindowWrapper;

/// Upper bound on pump rounds per settle; a healthy exchange needs a handful.
const MAX_SETTLE_ROUNDS: usize = 1000;

/// One line of input.
#[derive(Debug, Deserialize)]
pub struct ActionLine {
    pub window: WindowKind,
    pub action: EventMessage,
    #[serde(default)]
    pub anchor: Option<Rect>,
}

/// A parsed action ready to inject.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub window: WindowKind,
    pub event: ChannelEvent,
    pub anchor: Option<Rect>,
}

impl ActionLine {
    pub fn parse(line: &str) -> Result<Action> {
        let parsed: ActionLine = serde_json::from_str(line)
            .map_err(|e| PspError::Other(format!("bad action line: {e}")))?;
        let kind: EventKind = parsed.action.name.parse()?;
        let event = ChannelEvent::from_parts(kind, parsed.action.payload)?;
        Ok(Action {
            window: parsed.window,
            event,
            anchor: parsed.anchor,
        })
    }
}

pub struct Driver {
    app: PspApp,
    windows: Vec<WindowWrapper>,
    events: broadcast::Receiver<AppEvent>,
}

impl Driver {
    pub fn new(app: PspApp) -> Self {
        let events = app.subscribe();
        Self {
            app,
            windows: Vec::new(),
            events,
        }
    }

    pub fn app(&self) -> &PspApp {
        &self.app
    }

    /// Open a window and bring it live. `anchor` is the element a tooltip or
    /// widget is placed against.
    pub fn open(&mut self, kind: WindowKind, anchor: Option<Rect>) -> Result<WindowId> {
        let mut window = match anchor {
            Some(target) => self.app.open(OpenRequest::new(kind).anchored_to(target))?,
            None => self.app.open_window(kind)?,
        };
        attach_view_log(&mut window);
        let id = window.id();
        self.windows.push(window);
        self.settle();
        Ok(id)
    }

    /// Pump main and every window until nothing moves. Closed windows are
    /// dropped afterwards. Returns the number of events handled.
    pub fn settle(&mut self) -> usize {
        let mut total = 0;
        for _ in 0..MAX_SETTLE_ROUNDS {
            let mut handled = self.app.pump();
            for window in &mut self.windows {
                handled += window.pump();
            }
            if handled == 0 {
                break;
            }
            total += handled;
        }
        self.windows.retain(|w| !w.is_closed());
        self.drain_app_events();
        total
    }

    fn drain_app_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => tracing::debug!(event = ?event, "App event"),
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "App event log fell behind");
                }
                Err(_) => break,
            }
        }
    }

    /// Inject one user action into the first open window of its kind,
    /// opening one when there is none.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        let Action {
            window: kind,
            event,
            anchor,
        } = action;
        let index = match self.windows.iter().position(|w| w.kind() == kind) {
            Some(index) => index,
            None => {
                self.open(kind, anchor)?;
                self.windows
                    .iter()
                    .position(|w| w.kind() == kind)
                    .ok_or_else(|| PspError::Window(format!("{kind} window closed while opening")))?
            }
        };
        let window = &mut self.windows[index];

        let sent = match event {
            ChannelEvent::SettingUpdate(patch) => window.request_change(patch),
            ChannelEvent::KeyOut => window.key_out(),
            ChannelEvent::Undo => window.undo(),
            ChannelEvent::RestartNow => window.restart_now(),
            ChannelEvent::RestartLater => window.restart_later(),
            ChannelEvent::Close => {
                window.close();
                true
            }
            other @ (ChannelEvent::WindowReady(_)
            | ChannelEvent::Snapshot(_)
            | ChannelEvent::LocaleChange(_)
            | ChannelEvent::ThemeChange(_)
            | ChannelEvent::RestartRequired(_)) => {
                return Err(PspError::Window(format!(
                    "{} is not a user action",
                    other.kind()
                )));
            }
        };
        if !sent {
            tracing::debug!(kind = %kind, "Action was not delivered");
        }

        self.settle();
        Ok(())
    }

    pub fn apply_line(&mut self, line: &str) -> Result<()> {
        self.apply(ActionLine::parse(line)?)
    }

    /// Replay every line of `reader`. Bad lines are logged and skipped.
    /// Returns the number of actions applied.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut applied = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match self.apply_line(trimmed) {
                Ok(()) => applied += 1,
                Err(e) => tracing::warn!(line = index + 1, error = %e, "Action skipped"),
            }
        }
        Ok(applied)
    }

    /// Final state of every live window plus main's own view.
    pub fn report(&self) -> serde_json::Value {
        let windows: Vec<serde_json::Value> = self
            .windows
            .iter()
            .filter(|w| w.is_live())
            .map(|w| {
                serde_json::json!({
                    "id": w.id().to_string(),
                    "kind": w.kind(),
                    "state": w.state().to_string(),
                    "bounds": w.bounds(),
                    "model": w.model(),
                })
            })
            .collect();

        serde_json::json!({
            "session": self.app.session().as_str(),
            "settings": self.app.settings(),
            "pending_restart": self.app.pending_restart(),
            "windows": windows,
        })
    }

    pub fn shutdown(&mut self) {
        if self.app.is_shut_down() {
            return;
        }
        self.app.shutdown();
        for window in &mut self.windows {
            window.pump();
        }
        self.windows.clear();
        self.drain_app_events();
    }
}

/// Stand-in for a rendered view: logs every update the window reacts to.
fn attach_view_log(window: &mut WindowWrapper) {
    let id = window.id();
    let mut kinds = window.subscriptions().to_vec();
    kinds.extend([EventKind::Snapshot, EventKind::Close]);
    for kind in kinds {
        window.on(kind, move |event| {
            tracing::trace!(window_id = %id, kind = %event.kind(), "View updated");
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psp_common::{Rect, SettingValue};
    use psp_config::PspConfig;

    fn driver() -> Driver {
        let app = PspApp::new(PspConfig::default(), Rect::new(0.0, 0.0, 1920.0, 1040.0));
        let mut driver = Driver::new(app);
        driver.open(WindowKind::Psp, None).unwrap();
        driver.open(WindowKind::Qss, None).unwrap();
        driver
    }

    #[test]
    fn parses_action_line() {
        let action = ActionLine::parse(
            r#"{"window":"qss","action":{"name":"setting-update","payload":{"id":"volume","value":80}}}"#,
        )
        .unwrap();
        assert_eq!(action.window, WindowKind::Qss);
        assert_eq!(action.event, ChannelEvent::setting_update("volume", 80.0));
        assert_eq!(action.anchor, None);
    }

    #[test]
    fn anchor_places_opened_tooltip() {
        let mut driver = driver();
        driver
            .apply_line(
                r#"{"window":"tooltip","action":{"name":"restart-later"},"anchor":{"x":400,"y":500,"width":40,"height":20}}"#,
            )
            .unwrap();
        let report = driver.report();
        let tooltip = report["windows"]
            .as_array()
            .unwrap()
            .iter()
            .find(|w| w["kind"] == "tooltip")
            .unwrap()
            .clone();
        assert!(tooltip["bounds"]["y"].as_f64().unwrap() < 500.0);
    }

    #[test]
    fn rejects_unknown_window_and_event() {
        assert!(ActionLine::parse(r#"{"window":"dock","action":{"name":"undo"}}"#).is_err());
        let err = ActionLine::parse(r#"{"window":"psp","action":{"name":"explode"}}"#).unwrap_err();
        assert!(err.to_string().contains("explode"));
    }

    #[test]
    fn replays_lines_and_reports_models() {
        let mut driver = driver();
        let input = "\
# set a couple of things
{\"window\":\"qss\",\"action\":{\"name\":\"setting-update\",\"payload\":{\"id\":\"language\",\"value\":\"ko-KR\"}}}

{\"window\":\"psp\",\"action\":{\"name\":\"setting-update\",\"payload\":{\"id\":\"volume\",\"value\":75}}}
not json at all
{\"window\":\"psp\",\"action\":{\"name\":\"undo\"}}
";
        let applied = driver.run(input.as_bytes()).unwrap();
        assert_eq!(applied, 3);

        let report = driver.report();
        assert_eq!(report["settings"]["language"]["value"], "ko-KR");
        assert_eq!(report["settings"]["volume"]["value"], 50.0);
        assert_eq!(report["pending_restart"][0], "language");

        let windows = report["windows"].as_array().unwrap();
        assert_eq!(windows.len(), 2);
        for window in windows {
            assert_eq!(window["state"], "live");
            assert_eq!(window["model"]["locale"], "ko-KR");
        }
    }

    #[test]
    fn action_for_unopened_kind_opens_it() {
        let mut driver = driver();
        driver
            .apply_line(r#"{"window":"about","action":{"name":"restart-later"}}"#)
            .unwrap();
        assert_eq!(driver.app().window_count(), 3);
    }

    #[test]
    fn close_action_removes_window() {
        let mut driver = driver();
        driver
            .apply_line(r#"{"window":"qss","action":{"name":"close"}}"#)
            .unwrap();
        assert_eq!(driver.app().window_count(), 1);
        assert_eq!(driver.report()["windows"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn main_only_events_are_not_actions() {
        let mut driver = driver();
        let err = driver
            .apply_line(r#"{"window":"psp","action":{"name":"theme-change","payload":{"theme":"default"}}}"#)
            .unwrap_err();
        assert!(matches!(err, PspError::Window(_)));
        assert_eq!(
            driver.app().settings().get("theme"),
            Some(&SettingValue::from("default"))
        );
    }

    #[test]
    fn shutdown_closes_everything() {
        let mut driver = driver();
        driver.shutdown();
        driver.shutdown();
        assert_eq!(driver.app().window_count(), 0);
        assert!(driver.report()["windows"].as_array().unwrap().is_empty());
    }
}
