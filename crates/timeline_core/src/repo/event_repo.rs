//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide add/update/delete/scan APIs over the `events` table.
//! - Map rows into `TimelineEvent`, tolerating pre-`year_number` rows.
//!
//! # Invariants
//! - `create_event` never reuses or accepts a caller-chosen id.
//! - `update_event_text` only touches `label` and `note`.
//! - Ordered scans always break `created_at` ties by `id`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::event::{validate_text, EventId, EventValidationError, TimelineEvent};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENTS_TABLE: &str = "events";
const REQUIRED_EVENT_COLUMNS: &[&str] =
    &["id", "year", "year_number", "label", "note", "created_at"];

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    year,
    year_number,
    label,
    note,
    created_at
FROM events";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EventValidationError),
    Db(DbError),
    NotFound(EventId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Fetch order for full scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrder {
    /// Oldest-created first (`created_at ASC, id ASC`).
    #[default]
    CreatedAsc,
    /// Newest-created first (`created_at DESC, id DESC`).
    CreatedDesc,
}

impl EventOrder {
    fn order_by_sql(self) -> &'static str {
        match self {
            Self::CreatedAsc => "ORDER BY created_at ASC, id ASC",
            Self::CreatedDesc => "ORDER BY created_at DESC, id DESC",
        }
    }
}

/// Repository interface for the event store.
pub trait EventRepository {
    /// Inserts an unsaved event and returns the store-assigned id.
    fn create_event(&self, event: &TimelineEvent) -> RepoResult<EventId>;
    /// Replaces `label` and `note` of one event.
    fn update_event_text(&self, id: EventId, label: &str, note: Option<&str>) -> RepoResult<()>;
    /// Removes one event.
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<TimelineEvent>>;
    /// Full scan in the requested creation order.
    fn list_events(&self, order: EventOrder) -> RepoResult<Vec<TimelineEvent>>;
    fn count_events(&self) -> RepoResult<u64>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a connection that `open_db` / `open_db_in_memory` prepared.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the `events` shape this binary reads.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &TimelineEvent) -> RepoResult<EventId> {
        if let Some(id) = event.id {
            return Err(RepoError::InvalidData(format!(
                "new events must not carry an id, got {id}"
            )));
        }
        event.validate()?;

        let year_number = i64::try_from(event.year_number).map_err(|_| {
            RepoError::InvalidData(format!(
                "year_number {} exceeds storable range",
                event.year_number
            ))
        })?;

        self.conn.execute(
            "INSERT INTO events (
                year,
                year_number,
                label,
                note,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                event.year.as_str(),
                year_number,
                event.label.as_str(),
                event.note.as_deref(),
                event.created_at,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_event_text(&self, id: EventId, label: &str, note: Option<&str>) -> RepoResult<()> {
        validate_text(label, note)?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                label = ?2,
                note = ?3
             WHERE id = ?1;",
            params![id, label, note],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<TimelineEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn list_events(&self, order: EventOrder) -> RepoResult<Vec<TimelineEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} {};", order.order_by_sql()))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn count_events(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<TimelineEvent> {
    let id: EventId = row.get("id")?;

    // NULL can only come from hand-edited stores; treat it like a v1 row.
    let year_number = match row.get::<_, Option<i64>>("year_number")? {
        Some(value) => u64::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!(
                "negative year_number `{value}` in events.year_number (id {id})"
            ))
        })?,
        None => 0,
    };

    let event = TimelineEvent {
        id: Some(id),
        year_number,
        year: row.get("year")?,
        label: row.get("label")?,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    };
    event.validate().map_err(|err| {
        RepoError::InvalidData(format!("event {id} violates model invariants: {err}"))
    })?;
    Ok(event)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [EVENTS_TABLE],
            |row| row.get(0),
        )
        .optional()?;
    if table.is_none() {
        return Err(RepoError::MissingRequiredTable(EVENTS_TABLE));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(events);")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<HashSet<_>, _>>()?;
    for &column in REQUIRED_EVENT_COLUMNS {
        if !columns.contains(column) {
            return Err(RepoError::MissingRequiredColumn {
                table: EVENTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}
