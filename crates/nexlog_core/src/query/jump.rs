//! Date-jump resolution.
//!
//! Total over every target day: an exact group, the nearest earlier group,
//! or nothing when the target predates all data.

use crate::model::day::DayKey;
use serde::{Deserialize, Serialize};

/// Where a date jump lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "day")]
pub enum JumpTarget {
    /// The target day has its own group.
    Exact(DayKey),
    /// The most recent group before the target day.
    Nearest(DayKey),
}

impl JumpTarget {
    pub fn key(self) -> DayKey {
        match self {
            Self::Exact(day) | Self::Nearest(day) => day,
        }
    }
}

/// Resolves `target` against keys sorted most-recent first.
pub fn resolve_jump(target: DayKey, ordered_keys: &[DayKey]) -> Option<JumpTarget> {
    let position = ordered_keys.partition_point(|key| *key > target);
    let key = *ordered_keys.get(position)?;
    if key == target {
        Some(JumpTarget::Exact(key))
    } else {
        Some(JumpTarget::Nearest(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> DayKey {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn exact_day_resolves_to_itself() {
        let keys = [day(3, 3), day(3, 1)];
        assert_eq!(resolve_jump(day(3, 3), &keys), Some(JumpTarget::Exact(day(3, 3))));
    }

    #[test]
    fn gap_resolves_to_nearest_earlier_day() {
        let keys = [day(3, 3), day(3, 1)];
        assert_eq!(resolve_jump(day(3, 2), &keys), Some(JumpTarget::Nearest(day(3, 1))));
    }

    #[test]
    fn future_target_resolves_to_newest_day() {
        let keys = [day(3, 3), day(3, 1)];
        assert_eq!(resolve_jump(day(12, 1), &keys), Some(JumpTarget::Nearest(day(3, 3))));
    }

    #[test]
    fn target_before_all_data_is_none() {
        let keys = [day(3, 3), day(3, 1)];
        assert_eq!(resolve_jump(day(2, 28), &keys), None);
        assert_eq!(resolve_jump(day(2, 28), &[]), None);
    }
}
