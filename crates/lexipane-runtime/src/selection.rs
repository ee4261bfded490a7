//! Selection handling.
//!
//! Selection-change events are debounced, then resolved into one of three
//! actions: auto-submit (panel already open), show the floating trigger
//! near the selection (panel closed), or nothing. A selection originating
//! inside the panel never triggers anything.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::panel::TriggerPosition;

/// Quiet period before a selection change is acted on.
pub const SELECTION_DEBOUNCE: Duration = Duration::from_millis(1000);

const TRIGGER_SIZE: f64 = 30.0;
const TOP_CLEARANCE: f64 = 40.0;

/// Where the selection happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    Page,
    /// Inside the panel itself; must never re-trigger an explanation.
    Panel,
}

/// Bounding box of the selection, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub right: f64,
    pub top: f64,
}

/// Page viewport geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// One debounced selection-change event.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEvent {
    pub text: String,
    pub origin: SelectionOrigin,
    pub rect: Option<SelectionRect>,
}

/// What the runtime should do with a settled selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionAction {
    /// Panel is open: invoke the controller directly.
    AutoSubmit(String),
    /// Panel is closed: place the transient floating trigger.
    ShowTrigger { text: String, position: TriggerPosition },
    /// Clear the trigger (selection vanished).
    HideTrigger,
    /// Do nothing (selection inside the panel).
    Ignore,
}

/// Resolve a settled selection event against the panel state.
pub fn decide(event: &SelectionEvent, panel_open: bool, viewport: &Viewport) -> SelectionAction {
    if event.origin == SelectionOrigin::Panel {
        return SelectionAction::Ignore;
    }
    if event.text.trim().is_empty() {
        return SelectionAction::HideTrigger;
    }
    if panel_open {
        return SelectionAction::AutoSubmit(event.text.clone());
    }

    let anchor = event.rect.unwrap_or(SelectionRect {
        right: viewport.width / 2.0,
        top: viewport.height / 2.0,
    });
    SelectionAction::ShowTrigger {
        text: event.text.clone(),
        position: trigger_position(&anchor, viewport),
    }
}

/// Place the trigger above and to the right of the selection, clamped to
/// the viewport and flipped below the selection near the top edge.
pub fn trigger_position(rect: &SelectionRect, viewport: &Viewport) -> TriggerPosition {
    let mut x = rect.right + viewport.scroll_x;
    let mut y = rect.top + viewport.scroll_y;

    x = x.min(viewport.width - TRIGGER_SIZE + viewport.scroll_x);
    if y - viewport.scroll_y < TOP_CLEARANCE {
        y += TRIGGER_SIZE;
    }

    TriggerPosition { x, y: y - TRIGGER_SIZE }
}

/// Generation-counted debouncer: a settle call resolves only if no newer
/// event arrived during the quiet period.
#[derive(Debug)]
pub struct Debouncer {
    generation: AtomicU64,
    quiet: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SELECTION_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { generation: AtomicU64::new(0), quiet }
    }

    /// Wait out the quiet period; returns the event unless it was
    /// superseded by a newer one in the meantime.
    pub async fn settle(&self, event: SelectionEvent) -> Option<SelectionEvent> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.quiet).await;
        (self.generation.load(Ordering::SeqCst) == my_generation).then_some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport { width: 1200.0, height: 800.0, scroll_x: 0.0, scroll_y: 0.0 }
    }

    fn page_event(text: &str, rect: Option<SelectionRect>) -> SelectionEvent {
        SelectionEvent { text: text.to_string(), origin: SelectionOrigin::Page, rect }
    }

    #[test]
    fn test_panel_origin_is_ignored() {
        let event = SelectionEvent {
            text: "selected inside panel".to_string(),
            origin: SelectionOrigin::Panel,
            rect: None,
        };
        assert_eq!(decide(&event, true, &viewport()), SelectionAction::Ignore);
        assert_eq!(decide(&event, false, &viewport()), SelectionAction::Ignore);
    }

    #[test]
    fn test_empty_selection_hides_trigger() {
        let event = page_event("  ", None);
        assert_eq!(decide(&event, false, &viewport()), SelectionAction::HideTrigger);
    }

    #[test]
    fn test_open_panel_auto_submits() {
        let event = page_event("some words", Some(SelectionRect { right: 100.0, top: 200.0 }));
        assert_eq!(
            decide(&event, true, &viewport()),
            SelectionAction::AutoSubmit("some words".to_string())
        );
    }

    #[test]
    fn test_closed_panel_shows_trigger_near_selection() {
        let event = page_event("some words", Some(SelectionRect { right: 100.0, top: 200.0 }));
        match decide(&event, false, &viewport()) {
            SelectionAction::ShowTrigger { text, position } => {
                assert_eq!(text, "some words");
                assert_eq!(position, TriggerPosition { x: 100.0, y: 170.0 });
            }
            other => panic!("expected ShowTrigger, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_rect_centers_trigger() {
        let event = page_event("words", None);
        match decide(&event, false, &viewport()) {
            SelectionAction::ShowTrigger { position, .. } => {
                assert_eq!(position.x, 600.0);
                assert_eq!(position.y, 370.0);
            }
            other => panic!("expected ShowTrigger, got {other:?}"),
        }
    }

    #[test]
    fn test_trigger_clamped_to_right_edge() {
        let position = trigger_position(
            &SelectionRect { right: 1500.0, top: 200.0 },
            &viewport(),
        );
        assert_eq!(position.x, 1170.0);
    }

    #[test]
    fn test_trigger_flips_below_near_top_edge() {
        let position =
            trigger_position(&SelectionRect { right: 100.0, top: 10.0 }, &viewport());
        // 10 + 30 (flip) - 30 (raise) = 10: sits at the selection line
        // instead of above the viewport.
        assert_eq!(position.y, 10.0);
    }

    #[test]
    fn test_trigger_respects_scroll_offsets() {
        let scrolled = Viewport { width: 1200.0, height: 800.0, scroll_x: 50.0, scroll_y: 400.0 };
        let position =
            trigger_position(&SelectionRect { right: 100.0, top: 200.0 }, &scrolled);
        assert_eq!(position.x, 150.0);
        assert_eq!(position.y, 570.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_settles_single_event() {
        let debouncer = Debouncer::new(Duration::from_millis(1000));
        let settled = debouncer.settle(page_event("hello", None)).await;
        assert_eq!(settled.unwrap().text, "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_drops_superseded_event() {
        let debouncer = Debouncer::new(Duration::from_millis(1000));
        let (first, second) = tokio::join!(
            debouncer.settle(page_event("first", None)),
            debouncer.settle(page_event("second", None)),
        );
        assert!(first.is_none());
        assert_eq!(second.unwrap().text, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_sequential_events_both_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(debouncer.settle(page_event("a", None)).await.is_some());
        assert!(debouncer.settle(page_event("b", None)).await.is_some());
    }
}
