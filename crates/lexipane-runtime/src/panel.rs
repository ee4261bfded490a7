//! Panel render state machine.
//!
//! Drives the visual states of the side panel over one canonical
//! explanation. The panel tree is mutated only by the session controller
//! and this state machine; informational notices are appended to whatever
//! view is current, never replacing it.

use parking_lot::Mutex;

use lexipane_protocols::explanation::CanonicalExplanation;

use crate::banner::ErrorBanner;

/// Result views, exactly one active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Meaning,
    Vocabulary,
    Alternatives,
}

/// Where the floating trigger sits, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPosition {
    pub x: f64,
    pub y: f64,
}

/// Visual state of the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Hidden,
    /// Open with the welcome message and text input.
    Welcome,
    /// Progress indicator while a session is in flight.
    Loading,
    Result {
        explanation: CanonicalExplanation,
        active_tab: Tab,
    },
    /// Degraded rendering: the stub explanation plus a categorized banner.
    /// The "try another text" input stays reachable, as in every view.
    ErrorResult {
        explanation: CanonicalExplanation,
        banner: ErrorBanner,
        active_tab: Tab,
    },
}

/// The single panel UI tree.
#[derive(Debug)]
pub struct Panel {
    view: Mutex<PanelView>,
    notices: Mutex<Vec<String>>,
    trigger: Mutex<Option<TriggerPosition>>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Self {
            view: Mutex::new(PanelView::Hidden),
            notices: Mutex::new(Vec::new()),
            trigger: Mutex::new(None),
        }
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> PanelView {
        self.view.lock().clone()
    }

    pub fn is_open(&self) -> bool {
        !matches!(*self.view.lock(), PanelView::Hidden)
    }

    /// Open with the welcome view. The floating trigger and the open panel
    /// mutually exclude.
    pub fn open_welcome(&self) {
        *self.view.lock() = PanelView::Welcome;
        self.hide_trigger();
    }

    /// Enter the loading state. Re-entrant: a result view transitions back
    /// to loading when a new request starts from within the panel.
    pub fn show_loading(&self) {
        *self.view.lock() = PanelView::Loading;
        self.hide_trigger();
    }

    /// Render a successful explanation with the meaning tab active.
    pub fn show_result(&self, explanation: CanonicalExplanation) {
        *self.view.lock() = PanelView::Result { explanation, active_tab: Tab::default() };
    }

    /// Render a degraded result: stub explanation plus error banner.
    pub fn show_error_result(&self, explanation: CanonicalExplanation, banner: ErrorBanner) {
        *self.view.lock() =
            PanelView::ErrorResult { explanation, banner, active_tab: Tab::default() };
    }

    /// Switch the active result view. Pure client-side state change, no
    /// re-fetch; a no-op outside the result states.
    pub fn select_tab(&self, tab: Tab) -> bool {
        let mut view = self.view.lock();
        match &mut *view {
            PanelView::Result { active_tab, .. } | PanelView::ErrorResult { active_tab, .. } => {
                *active_tab = tab;
                true
            }
            _ => false,
        }
    }

    pub fn hide(&self) {
        *self.view.lock() = PanelView::Hidden;
    }

    /// Append an informational notice to the current view.
    pub fn push_notice(&self, notice: impl Into<String>) {
        self.notices.lock().push(notice.into());
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    /// Restore the idle state: hide the panel and trigger, drop notices,
    /// and leave a confirmation notice behind.
    pub fn reset(&self) {
        *self.view.lock() = PanelView::Hidden;
        self.hide_trigger();
        let mut notices = self.notices.lock();
        notices.clear();
        notices.push("Plugin state reset".to_string());
    }

    pub fn show_trigger(&self, position: TriggerPosition) {
        *self.trigger.lock() = Some(position);
    }

    pub fn hide_trigger(&self) {
        *self.trigger.lock() = None;
    }

    pub fn trigger(&self) -> Option<TriggerPosition> {
        *self.trigger.lock()
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
