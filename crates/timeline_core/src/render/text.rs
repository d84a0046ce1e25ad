//! Plain-text timeline rendering.

use crate::editor::view_state::ViewState;
use crate::timeline::group::{total_events, TimelineGroup};
use std::fmt::Write;

const TITLE: &str = "タイムライン";
const EVENTS_UNIT: &str = "イベント";
const EMPTY_TITLE: &str = "まだイベントが追加されていません";
const EMPTY_HINT: &str = "イベントを追加してタイムラインを作成しましょう";
const NO_NOTE: &str = "補足なし";

/// Renders grouped events, marking the row under the edit cursor.
pub fn render_timeline(groups: &[TimelineGroup], state: &ViewState) -> String {
    let mut out = String::new();
    if groups.is_empty() {
        let _ = writeln!(out, "{EMPTY_TITLE}");
        let _ = writeln!(out, "{EMPTY_HINT}");
        return out;
    }

    let _ = writeln!(out, "{TITLE} ({} {EVENTS_UNIT})", total_events(groups));
    for group in groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "■ {} ({} {EVENTS_UNIT})", group.key, group.len());
        for event in &group.events {
            let marker = if state.is_editing(event) { '*' } else { ' ' };
            let id = event
                .id
                .map_or_else(|| "-".to_string(), |id| format!("#{id}"));
            let _ = writeln!(out, " {marker} {id:>5}  {}", event.label);
            let _ = writeln!(
                out,
                "          {}",
                event.note.as_deref().unwrap_or(NO_NOTE)
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render_timeline;
    use crate::editor::view_state::{EditCursor, ViewState};
    use crate::model::event::TimelineEvent;
    use crate::timeline::group::group_events;
    use crate::timeline::year_format::format_year;

    fn event(id: i64, year_number: u64, label: &str, note: Option<&str>) -> TimelineEvent {
        TimelineEvent {
            id: Some(id),
            year_number,
            year: format_year(year_number),
            label: label.to_string(),
            note: note.map(str::to_string),
            created_at: id,
        }
    }

    #[test]
    fn empty_timeline_shows_placeholder() {
        let text = render_timeline(&[], &ViewState::default());
        assert!(text.contains("まだイベントが追加されていません"));
    }

    #[test]
    fn groups_render_oldest_first_with_counts() {
        let groups = group_events(&[
            event(1, 60_000, "glacier", None),
            event(2, 4_600_000_000, "earth forms", Some("accretion")),
            event(3, 60_000, "humans", None),
        ]);
        let text = render_timeline(&groups, &ViewState::default());

        assert!(text.starts_with("タイムライン (3 イベント)"));
        let oldest = text.find("■ 46億年前 (1 イベント)").unwrap();
        let newer = text.find("■ 6万年前 (2 イベント)").unwrap();
        assert!(oldest < newer);
        assert!(text.contains("accretion"));
        assert!(text.contains("補足なし"));
    }

    #[test]
    fn editing_row_is_marked() {
        let groups = group_events(&[event(4, 10, "edit me", None), event(5, 10, "other", None)]);
        let state = ViewState {
            editing: Some(EditCursor {
                id: 4,
                label: "draft".to_string(),
                note: String::new(),
            }),
            ..ViewState::default()
        };
        let text = render_timeline(&groups, &state);
        assert!(text.contains(" *    #4  edit me"));
        assert!(text.contains("      #5  other"));
        assert!(!render_timeline(&groups, &ViewState::default()).contains('*'));
    }
}
