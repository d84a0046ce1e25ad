//! Core domain logic for the dated-event timeline.
//!
//! Records events as "years before present", stores them in a local SQLite
//! file, groups them by formatted year for display, and exports the laid-out
//! timeline as PNG.

pub mod config;
pub mod db;
pub mod editor;
pub mod export;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod timeline;

pub use config::AppConfig;
pub use editor::event_editor::EventEditor;
pub use editor::view_state::{AddForm, EditCursor, ViewState};
pub use export::{export_png, ExportError, ExportOptions, ExportedImage, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{EventId, EventValidationError, TimelineEvent, YearNumber};
pub use render::layout::{layout_timeline, RenderedView, ROOT_ELEMENT_ID};
pub use render::text::render_timeline;
pub use render::view::TimelineView;
pub use repo::event_repo::{
    EventOrder, EventRepository, RepoError, RepoResult, SqliteEventRepository,
};
pub use service::change_feed::{ChangeFeed, StoreChange};
pub use service::event_service::EventService;
pub use timeline::group::{flatten_groups, group_events, TimelineGroup};
pub use timeline::year_format::{format_year, YEARS_AGO_SUFFIX};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
