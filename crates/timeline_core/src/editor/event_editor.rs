//! Event editor controller.
//!
//! Every operation reports whether it took effect (`Option<EventId>` or
//! `bool`), but never returns an error: validation misses are skipped and
//! store failures are logged and dropped.

use crate::editor::view_state::{EditCursor, ViewState};
use crate::model::event::{normalize_label, EventId, TimelineEvent, YearNumber};
use crate::repo::event_repo::EventRepository;
use crate::service::event_service::EventService;
use log::{debug, error, info};

/// Stateful controller over an `EventService`.
pub struct EventEditor<R: EventRepository> {
    service: EventService<R>,
    state: ViewState,
}

impl<R: EventRepository> EventEditor<R> {
    pub fn new(service: EventService<R>) -> Self {
        Self {
            service,
            state: ViewState::default(),
        }
    }

    pub fn service(&self) -> &EventService<R> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut EventService<R> {
        &mut self.service
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Mutable access for binding form inputs.
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Adds one event.
    ///
    /// No-op when `year_number` is absent or `label` is blank. On success
    /// the add form's `label` and `note` are cleared; `year` is kept.
    pub fn add(
        &mut self,
        year_number: Option<YearNumber>,
        label: &str,
        note: Option<&str>,
    ) -> Option<EventId> {
        let Some(year_number) = year_number else {
            debug!("event=event_add module=editor status=skip reason=missing_year");
            return None;
        };
        if normalize_label(label).is_none() {
            debug!("event=event_add module=editor status=skip reason=empty_label");
            return None;
        }

        match self.service.add_event(year_number, label, note) {
            Ok(event) => {
                let id = event.id?;
                self.state.add_form.label.clear();
                self.state.add_form.note.clear();
                info!(
                    "event=event_add module=editor status=ok id={id} year_number={year_number}"
                );
                Some(id)
            }
            Err(err) => {
                error!("event=event_add module=editor status=error error={err}");
                None
            }
        }
    }

    /// Adds one event from the current add-form inputs.
    pub fn submit_add_form(&mut self) -> Option<EventId> {
        let form = self.state.add_form.clone();
        let note = (!form.note.is_empty()).then_some(form.note.as_str());
        self.add(form.year, &form.label, note)
    }

    /// Deletes one event. Clears the edit cursor if it pointed at `id`.
    pub fn delete(&mut self, id: EventId) -> bool {
        match self.service.delete_event(id) {
            Ok(()) => {
                if self.state.editing_id() == Some(id) {
                    self.state.editing = None;
                }
                info!("event=event_delete module=editor status=ok id={id}");
                true
            }
            Err(err) => {
                error!("event=event_delete module=editor status=error id={id} error={err}");
                false
            }
        }
    }

    /// Enters inline-edit mode for `event`.
    ///
    /// Refused for unsaved events and while a different event is being
    /// edited. Re-entering the same event resets its drafts.
    pub fn begin_edit(&mut self, event: &TimelineEvent) -> bool {
        let Some(id) = event.id else {
            debug!("event=event_edit_begin module=editor status=skip reason=unsaved");
            return false;
        };
        if let Some(current) = self.state.editing_id() {
            if current != id {
                debug!(
                    "event=event_edit_begin module=editor status=skip reason=busy editing={current} requested={id}"
                );
                return false;
            }
        }

        self.state.editing = Some(EditCursor {
            id,
            label: event.label.clone(),
            note: event.note.clone().unwrap_or_default(),
        });
        true
    }

    /// Replaces the drafts of the active edit.
    pub fn update_edit_draft(&mut self, label: &str, note: &str) -> bool {
        match self.state.editing.as_mut() {
            Some(cursor) => {
                cursor.label = label.to_string();
                cursor.note = note.to_string();
                true
            }
            None => false,
        }
    }

    /// Saves `label` / `note` for the event under the edit cursor.
    ///
    /// No-op when `id` is not the event being edited or `label` is blank.
    /// Leaves edit mode only when the store accepted the write.
    pub fn save_edit(&mut self, id: EventId, label: &str, note: Option<&str>) -> bool {
        if self.state.editing_id() != Some(id) {
            debug!("event=event_edit_save module=editor status=skip reason=not_editing id={id}");
            return false;
        }
        if normalize_label(label).is_none() {
            debug!("event=event_edit_save module=editor status=skip reason=empty_label id={id}");
            return false;
        }

        match self.service.update_event_text(id, label, note) {
            Ok(()) => {
                self.state.editing = None;
                info!("event=event_edit_save module=editor status=ok id={id}");
                true
            }
            Err(err) => {
                error!("event=event_edit_save module=editor status=error id={id} error={err}");
                false
            }
        }
    }

    /// Saves the drafts held by the edit cursor.
    pub fn submit_edit(&mut self) -> bool {
        let Some(cursor) = self.state.editing.clone() else {
            return false;
        };
        let note = (!cursor.note.is_empty()).then_some(cursor.note.as_str());
        self.save_edit(cursor.id, &cursor.label, note)
    }

    /// Discards drafts and leaves edit mode without touching the store.
    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
    }
}
