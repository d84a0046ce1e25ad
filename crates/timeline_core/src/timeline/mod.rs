//! Pure timeline presentation logic.
//!
//! # Responsibility
//! - Turn a years-before-present value into its display label.
//! - Cluster events by display label and order the clusters oldest-first.
//!
//! # Invariants
//! - Nothing in this module touches storage or logging.

pub mod group;
pub mod year_format;
