//! Alerting System
//!
//! Reacts to state-machine transitions, not per-frame classification, so the
//! UI and audio never churn while a state persists.

mod dispatcher;
mod sink;

pub use dispatcher::AlertDispatcher;
pub use sink::{AlertAudio, AlertUi, LogAudio, LogUi};
