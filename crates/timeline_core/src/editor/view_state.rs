//! Transient UI state owned by the editor.

use crate::model::event::{EventId, TimelineEvent, YearNumber};

/// Add-form inputs. `year` is `None` while the numeric field is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub year: Option<YearNumber>,
    pub label: String,
    pub note: String,
}

impl AddForm {
    /// Whether the add action should be enabled.
    pub fn is_submittable(&self) -> bool {
        self.year.is_some() && !self.label.trim().is_empty()
    }
}

/// In-progress inline edit of one persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCursor {
    pub id: EventId,
    pub label: String,
    pub note: String,
}

/// View state of the timeline screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub add_form: AddForm,
    pub editing: Option<EditCursor>,
}

impl ViewState {
    /// The record currently in inline-edit mode, if any.
    pub fn editing_id(&self) -> Option<EventId> {
        self.editing.as_ref().map(|cursor| cursor.id)
    }

    pub fn is_editing(&self, event: &TimelineEvent) -> bool {
        event.id.is_some() && event.id == self.editing_id()
    }
}
