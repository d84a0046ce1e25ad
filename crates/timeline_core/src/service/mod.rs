//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Publish store change notifications after successful writes.

pub mod change_feed;
pub mod event_service;
