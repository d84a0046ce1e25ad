//! Interactive create/update/delete controller.
//!
//! # Responsibility
//! - Hold transient form state and the single edit cursor.
//! - Validate user input, call the service, and swallow store failures
//!   into diagnostic log lines.
//!
//! # Invariants
//! - At most one event is editable at a time (`Idle -> Editing(id) -> Idle`).
//! - Validation failures and store failures leave persisted data untouched.

pub mod event_editor;
pub mod view_state;
