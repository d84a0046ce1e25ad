//! Timeline grouping.
//!
//! # Invariants
//! - Events are clustered by their stored `year` string, not `year_number`.
//!   Two numerically equal events formatted differently stay apart.
//! - Member order inside a group follows input order.
//! - Groups are ordered by the `year_number` of their first member,
//!   descending; ties keep first-appearance order.
//! - No group is ever empty.

use crate::model::event::{TimelineEvent, YearNumber};
use std::collections::HashMap;

/// One display cluster of events sharing a formatted year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineGroup {
    /// Formatted-year group key, e.g. `46億年前`.
    pub key: String,
    pub events: Vec<TimelineEvent>,
}

impl TimelineGroup {
    /// `year_number` of the first member; drives group ordering.
    pub fn representative_year_number(&self) -> YearNumber {
        self.events.first().map_or(0, |event| event.year_number)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Clusters `events` by display key and orders clusters oldest-first.
pub fn group_events(events: &[TimelineEvent]) -> Vec<TimelineGroup> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<TimelineGroup> = Vec::new();

    for event in events {
        match slots.get(event.year.as_str()) {
            Some(&slot) => groups[slot].events.push(event.clone()),
            None => {
                slots.insert(event.year.as_str(), groups.len());
                groups.push(TimelineGroup {
                    key: event.year.clone(),
                    events: vec![event.clone()],
                });
            }
        }
    }

    // `sort_by` is stable, so equal representatives keep first-seen order.
    groups.sort_by(|a, b| {
        b.representative_year_number()
            .cmp(&a.representative_year_number())
    });
    groups
}

/// Concatenates group members back into one list, in display order.
pub fn flatten_groups(groups: &[TimelineGroup]) -> Vec<TimelineEvent> {
    groups
        .iter()
        .flat_map(|group| group.events.iter().cloned())
        .collect()
}

/// Total number of events across all groups.
pub fn total_events(groups: &[TimelineGroup]) -> usize {
    groups.iter().map(TimelineGroup::len).sum()
}

#[cfg(test)]
mod tests {
    use super::{flatten_groups, group_events, total_events};
    use crate::model::event::TimelineEvent;
    use crate::timeline::year_format::format_year;

    fn event(id: i64, year_number: u64, label: &str) -> TimelineEvent {
        TimelineEvent {
            id: Some(id),
            year_number,
            year: format_year(year_number),
            label: label.to_string(),
            note: None,
            created_at: id,
        }
    }

    fn labels(events: &[TimelineEvent]) -> Vec<&str> {
        events.iter().map(|event| event.label.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_events(&[]).is_empty());
    }

    #[test]
    fn groups_are_ordered_oldest_first() {
        let groups = group_events(&[event(1, 60_000, "A"), event(2, 4_600_000_000, "B")]);
        let keys: Vec<_> = groups.iter().map(|group| group.key.as_str()).collect();
        assert_eq!(keys, vec!["46億年前", "6万年前"]);
        assert_eq!(labels(&groups[0].events), vec!["B"]);
        assert_eq!(labels(&groups[1].events), vec!["A"]);
    }

    #[test]
    fn same_year_members_keep_input_order() {
        let groups = group_events(&[
            event(1, 60_000, "first"),
            event(2, 100, "other"),
            event(3, 60_000, "second"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "6万年前");
        assert_eq!(labels(&groups[0].events), vec!["first", "second"]);
        assert_eq!(total_events(&groups), 3);
    }

    #[test]
    fn grouping_uses_display_key_not_number() {
        let mut legacy = event(2, 60_000, "legacy");
        legacy.year = "60000年前".to_string();
        let groups = group_events(&[event(1, 60_000, "current"), legacy]);

        assert_eq!(groups.len(), 2);
        // Equal representatives: first-seen group stays first.
        assert_eq!(groups[0].key, "6万年前");
        assert_eq!(groups[1].key, "60000年前");
    }

    #[test]
    fn representative_is_first_member_not_maximum() {
        let mut odd = event(1, 10, "first");
        odd.year = "shared".to_string();
        let mut big = event(2, 1_000_000, "second");
        big.year = "shared".to_string();
        let groups = group_events(&[odd, big, event(3, 500, "middle")]);

        assert_eq!(groups[0].key, "500年前");
        assert_eq!(groups[1].key, "shared");
        assert_eq!(groups[1].representative_year_number(), 10);
    }

    #[test]
    fn regrouping_flattened_output_is_idempotent() {
        let events = vec![
            event(1, 60_000, "a"),
            event(2, 4_600_000_000, "b"),
            event(3, 60_000, "c"),
            event(4, 0, "d"),
            event(5, 4_600_000_000, "e"),
        ];
        let once = group_events(&events);
        let twice = group_events(&flatten_groups(&once));
        assert_eq!(once, twice);
    }
}
