// src/aggregate.rs
//! Activity aggregation: raw records into per-bug mappings.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::identity::{DevId, DevRegistry};
use crate::ingest::{Assignment, Participation};

/// Distinct participants per bug. A developer commenting twice on the
/// same bug contributes one membership.
pub type BugParticipants = BTreeMap<String, BTreeSet<DevId>>;

/// Assigned period per bug.
pub type BugPeriods = HashMap<String, u32>;

/// Folds participation records into per-bug developer sets, interning
/// author handles through `registry` in record order.
#[must_use]
pub fn collect_participants(
    records: &[Participation],
    registry: &mut DevRegistry,
) -> BugParticipants {
    let mut participants = BugParticipants::new();
    for record in records {
        let dev = registry.intern(&record.author);
        participants
            .entry(record.bug_id.clone())
            .or_default()
            .insert(dev);
    }
    participants
}

/// Folds assignment records into a bug -> period map. A repeated bug id
/// keeps its last assignment.
#[must_use]
pub fn collect_assignments(records: &[Assignment]) -> BugPeriods {
    records
        .iter()
        .map(|a| (a.bug_id.clone(), a.period))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(bug: &str, author: &str) -> Participation {
        Participation {
            bug_id: bug.to_string(),
            author: author.to_string(),
        }
    }

    #[test]
    fn duplicate_comments_collapse_to_one_membership() {
        let records = vec![
            part("1", "alice"),
            part("1", "alice"),
            part("1", "bob"),
            part("2", "bob"),
        ];
        let mut registry = DevRegistry::new();
        let participants = collect_participants(&records, &mut registry);

        assert_eq!(participants["1"].len(), 2);
        assert_eq!(participants["2"].len(), 1);
        // alice seen first, so she gets id 1.
        assert_eq!(registry.get("alice"), Some(1));
        assert_eq!(registry.get("bob"), Some(2));
    }

    #[test]
    fn assignment_repeats_keep_last() {
        let records = vec![
            Assignment {
                bug_id: "7".into(),
                period: 1,
            },
            Assignment {
                bug_id: "7".into(),
                period: 4,
            },
        ];
        let periods = collect_assignments(&records);
        assert_eq!(periods["7"], 4);
    }
}
