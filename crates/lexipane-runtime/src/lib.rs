//! # Lexipane Runtime
//!
//! Owns the per-request explanation lifecycle: the single-flight session
//! controller, the local stub generator, the panel render state machine,
//! selection handling with the floating trigger, and the command
//! dispatcher exposed to the host page.

mod banner;
mod dispatcher;
mod panel;
mod selection;
mod session;
mod stub;

pub use banner::ErrorBanner;
pub use dispatcher::CommandDispatcher;
pub use panel::{Panel, PanelView, Tab, TriggerPosition};
pub use selection::{
    Debouncer, SelectionAction, SelectionEvent, SelectionOrigin, SelectionRect, Viewport,
    decide, trigger_position,
};
pub use session::{Planner, SessionConfig, SessionController, SessionOutcome};
pub use stub::local_explanation;
