//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the event store contract used by services.
//! - Keep SQL details out of service and editor code.
//!
//! # Invariants
//! - Writes re-check model validation before touching SQL.
//! - Missing rows surface as `RepoError::NotFound`, not as silent success.

pub mod event_repo;
