//! Rendering layer.
//!
//! # Responsibility
//! - Keep a grouped read model in sync with store change notifications.
//! - Paint that read model as text (terminal) or as a box layout (export).

pub mod layout;
pub mod text;
pub mod view;
