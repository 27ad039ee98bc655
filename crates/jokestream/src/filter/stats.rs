use crate::prelude::*;
use chrono::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub total_checked: u64,

    /// Never exceeds [`FilterStats::total_checked`]
    pub total_blocked: u64,

    /// The sum of the values may exceed the [`FilterStats::total_blocked`],
    /// because a single joke may be blocked for several reasons.
    pub blocked_by_category: BTreeMap<String, u64>,

    pub last_checked: DateTime<Utc>,
}

/// Partial update of [`FilterStats`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStatsDelta {
    pub total_checked: Option<u64>,
    pub total_blocked: Option<u64>,

    /// Overwrites the counters of the categories present in the map. The
    /// counters are not summed, so the caller must merge them with the
    /// current snapshot beforehand.
    pub blocked_by_category: Option<BTreeMap<String, u64>>,
    pub last_checked: Option<DateTime<Utc>>,
}

/// Shared counters of the content filter decisions
#[derive(Debug, Default)]
pub struct FilterStatsTracker {
    stats: Mutex<Option<FilterStats>>,
}

impl FilterStatsTracker {
    pub fn new(stats: Option<FilterStats>) -> Self {
        Self {
            stats: Mutex::new(stats),
        }
    }

    pub fn get(&self) -> Option<FilterStats> {
        self.stats.lock().clone()
    }

    pub fn reset(&self) {
        *self.stats.lock() = None;
    }

    /// Merges the delta into the current snapshot. If there is no snapshot
    /// yet, it's created with zero counters.
    pub fn update(&self, delta: FilterStatsDelta) {
        let mut guard = self.stats.lock();

        let stats = guard.get_or_insert_with(|| FilterStats {
            total_checked: 0,
            total_blocked: 0,
            blocked_by_category: BTreeMap::new(),
            last_checked: Utc::now(),
        });

        let FilterStatsDelta {
            total_checked,
            total_blocked,
            blocked_by_category,
            last_checked,
        } = delta;

        if let Some(total_checked) = total_checked {
            stats.total_checked = total_checked;
        }
        if let Some(total_blocked) = total_blocked {
            stats.total_blocked = total_blocked;
        }
        if let Some(blocked_by_category) = blocked_by_category {
            stats.blocked_by_category.extend(blocked_by_category);
        }
        if let Some(last_checked) = last_checked {
            stats.last_checked = last_checked;
        }

        if stats.total_blocked > stats.total_checked {
            warn!(
                total_blocked = stats.total_blocked,
                total_checked = stats.total_checked,
                "Filter stats update blocked more jokes than it checked, \
                raising the number of checked jokes",
            );
            stats.total_checked = stats.total_blocked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn categories<const N: usize>(entries: [(&str, u64); N]) -> BTreeMap<String, u64> {
        entries
            .into_iter()
            .map(|(category, count)| (category.to_owned(), count))
            .collect()
    }

    #[test]
    fn first_update_creates_the_snapshot() {
        let tracker = FilterStatsTracker::default();
        assert_eq!(tracker.get(), None);

        let before = Utc::now();
        tracker.update(FilterStatsDelta {
            total_checked: Some(3),
            ..Default::default()
        });

        let stats = tracker.get().unwrap();
        assert_eq!(stats.total_checked, 3);
        assert_eq!(stats.total_blocked, 0);
        assert!(stats.blocked_by_category.is_empty());
        assert!(stats.last_checked >= before);
    }

    #[test]
    fn absent_fields_are_preserved() {
        let tracker = FilterStatsTracker::default();
        let last_checked = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        tracker.update(FilterStatsDelta {
            total_checked: Some(10),
            total_blocked: Some(4),
            blocked_by_category: Some(categories([("racism", 2)])),
            last_checked: Some(last_checked),
        });
        tracker.update(FilterStatsDelta {
            total_checked: Some(11),
            ..Default::default()
        });

        expect![[r#"
            Some(
                FilterStats {
                    total_checked: 11,
                    total_blocked: 4,
                    blocked_by_category: {
                        "racism": 2,
                    },
                    last_checked: 2024-01-02T03:04:05Z,
                },
            )
        "#]]
        .assert_debug_eq(&tracker.get());
    }

    #[test]
    fn blocked_by_category_overwrites_matching_keys() {
        let tracker = FilterStatsTracker::default();

        tracker.update(FilterStatsDelta {
            total_checked: Some(5),
            total_blocked: Some(5),
            blocked_by_category: Some(categories([("racism", 3), ("violence", 2)])),
            ..Default::default()
        });

        // The counter of `racism` is replaced, not incremented by 1
        tracker.update(FilterStatsDelta {
            blocked_by_category: Some(categories([("racism", 1), ("hate", 1)])),
            ..Default::default()
        });

        expect![[r#"
            {
                "hate": 1,
                "racism": 1,
                "violence": 2,
            }
        "#]]
        .assert_debug_eq(&tracker.get().unwrap().blocked_by_category);
    }

    #[test]
    fn blocked_never_exceeds_checked() {
        let tracker = FilterStatsTracker::default();

        tracker.update(FilterStatsDelta {
            total_checked: Some(2),
            total_blocked: Some(7),
            ..Default::default()
        });

        let stats = tracker.get().unwrap();
        assert_eq!(stats.total_blocked, 7);
        assert_eq!(stats.total_checked, 7);

        tracker.update(FilterStatsDelta {
            total_checked: Some(1),
            ..Default::default()
        });

        let stats = tracker.get().unwrap();
        assert!(stats.total_blocked <= stats.total_checked);
    }

    #[test]
    fn reset() {
        let tracker = FilterStatsTracker::default();
        tracker.update(FilterStatsDelta::default());
        assert!(tracker.get().is_some());

        tracker.reset();
        assert_eq!(tracker.get(), None);
    }
}
