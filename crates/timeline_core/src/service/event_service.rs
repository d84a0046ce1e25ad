//! Event use-case service.
//!
//! # Responsibility
//! - Turn raw add/edit input into validated store writes.
//! - Notify subscribers after each successful write.
//! - Serve the grouped timeline read model.
//!
//! # Invariants
//! - A failed write publishes nothing.
//! - Edits never change `year`, `year_number` or `created_at`.

use crate::model::event::{
    normalize_label, normalize_note, EventId, EventValidationError, TimelineEvent, YearNumber,
};
use crate::repo::event_repo::{EventOrder, EventRepository, RepoResult};
use crate::service::change_feed::{ChangeFeed, StoreChange};
use crate::timeline::group::{group_events, TimelineGroup};
use crossbeam_channel::Receiver;

/// Use-case service over an event repository.
pub struct EventService<R: EventRepository> {
    repo: R,
    feed: ChangeFeed,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            feed: ChangeFeed::new(),
        }
    }

    /// Subscribes to store change notifications.
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        self.feed.subscribe()
    }

    /// Records a new event and returns it with its assigned id.
    ///
    /// # Contract
    /// - `label` and `note` are trimmed; a blank note is stored as absent.
    /// - `year` is derived from `year_number` here and never again.
    pub fn add_event(
        &mut self,
        year_number: YearNumber,
        label: &str,
        note: Option<&str>,
    ) -> RepoResult<TimelineEvent> {
        let mut event = TimelineEvent::new(year_number, label, note)?;
        let id = self.repo.create_event(&event)?;
        event.id = Some(id);
        self.feed.publish(StoreChange::Added(id));
        Ok(event)
    }

    /// Replaces the text fields of one event.
    pub fn update_event_text(
        &mut self,
        id: EventId,
        label: &str,
        note: Option<&str>,
    ) -> RepoResult<()> {
        let label = normalize_label(label).ok_or(EventValidationError::EmptyLabel)?;
        let note = note.and_then(normalize_note);
        self.repo.update_event_text(id, &label, note.as_deref())?;
        self.feed.publish(StoreChange::Updated(id));
        Ok(())
    }

    /// Removes one event.
    pub fn delete_event(&mut self, id: EventId) -> RepoResult<()> {
        self.repo.delete_event(id)?;
        self.feed.publish(StoreChange::Deleted(id));
        Ok(())
    }

    pub fn get_event(&self, id: EventId) -> RepoResult<Option<TimelineEvent>> {
        self.repo.get_event(id)
    }

    pub fn list_events(&self, order: EventOrder) -> RepoResult<Vec<TimelineEvent>> {
        self.repo.list_events(order)
    }

    pub fn count_events(&self) -> RepoResult<u64> {
        self.repo.count_events()
    }

    /// Fetches every event in `order` and groups it for display.
    pub fn timeline(&self, order: EventOrder) -> RepoResult<Vec<TimelineGroup>> {
        let events = self.repo.list_events(order)?;
        Ok(group_events(&events))
    }
}
