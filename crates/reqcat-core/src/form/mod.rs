//! Form binding: validation rules, edit sessions, and submission payloads.

mod binder;
mod entity;
mod rules;
mod session;

pub use binder::FormBinder;
pub use entity::EntityKind;
pub use rules::{FieldRule, RuleKind, RuleSet, Violation};
pub use session::{EditSession, SessionMode, SessionState};
