//! Store-observing timeline read model.

use crate::model::event::EventId;
use crate::repo::event_repo::{EventOrder, EventRepository, RepoResult};
use crate::service::change_feed::StoreChange;
use crate::service::event_service::EventService;
use crate::timeline::group::{total_events, TimelineGroup};
use crossbeam_channel::Receiver;
use log::debug;

/// Grouped timeline that re-fetches when the store reports a change.
pub struct TimelineView {
    changes: Receiver<StoreChange>,
    order: EventOrder,
    groups: Vec<TimelineGroup>,
    loaded: bool,
}

impl TimelineView {
    /// Subscribes to `service` changes. Nothing is fetched until `refresh`.
    pub fn attach<R: EventRepository>(service: &mut EventService<R>, order: EventOrder) -> Self {
        Self {
            changes: service.subscribe(),
            order,
            groups: Vec::new(),
            loaded: false,
        }
    }

    /// Re-fetches unconditionally.
    ///
    /// On failure the previous groups and any pending changes stay, so the
    /// next `refresh_if_changed` retries.
    pub fn refresh<R: EventRepository>(&mut self, service: &EventService<R>) -> RepoResult<()> {
        let groups = service.timeline(self.order)?;
        let pending = self.drain();
        self.groups = groups;
        self.loaded = true;
        debug!(
            "event=view_refresh module=render status=ok groups={} events={} pending_changes={}",
            self.groups.len(),
            self.event_count(),
            pending.len()
        );
        Ok(())
    }

    /// Re-fetches only when never loaded or a change is pending.
    ///
    /// Returns whether a fetch happened.
    pub fn refresh_if_changed<R: EventRepository>(
        &mut self,
        service: &EventService<R>,
    ) -> RepoResult<bool> {
        if self.loaded && self.changes.is_empty() {
            return Ok(false);
        }
        self.refresh(service)?;
        Ok(true)
    }

    pub fn groups(&self) -> &[TimelineGroup] {
        &self.groups
    }

    pub fn event_count(&self) -> usize {
        total_events(&self.groups)
    }

    pub fn order(&self) -> EventOrder {
        self.order
    }

    fn drain(&self) -> Vec<EventId> {
        self.changes.try_iter().map(StoreChange::event_id).collect()
    }
}
