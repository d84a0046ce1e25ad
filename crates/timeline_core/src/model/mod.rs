//! Domain model for recorded timeline events.
//!
//! # Responsibility
//! - Define the single persisted entity and its input normalization rules.
//!
//! # Invariants
//! - `label` is trimmed and non-empty before it reaches storage.
//! - `note` is either absent or trimmed and non-empty.
//! - `year` is derived once from `year_number` and never recomputed.

pub mod event;
