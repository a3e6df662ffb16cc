// Copyright 2025 The wordtrail authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::chapters::CHAPTERS_PER_UNIT;
use crate::hearts::MAX_HEARTS;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// The single persisted progress record. One instance exists per
/// player; it is created with defaults on first run and mutated in
/// place from then on.
///
/// Invariants (enforced by [`ProgressRecord::normalize`] after loading
/// untrusted data, and preserved by the `hearts`, `streak`, and
/// `chapters` operations):
///
/// - `hearts` is in `0..=MAX_HEARTS`;
/// - `last_heart_time` is `None` if and only if `hearts == MAX_HEARTS`;
/// - `unit` and `chapter` only ever increase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    /// Current unlocked unit, starting at 1.
    pub unit: u32,
    /// Current unlocked chapter within `unit`, in `1..=CHAPTERS_PER_UNIT`.
    pub chapter: u32,
    /// Consumable resource spent on answer checks.
    pub hearts: u32,
    /// Consecutive-day study count.
    pub streak: u32,
    /// Calendar date of the last completed session.
    #[serde(rename = "lastStudyDate")]
    pub last_study_date: Option<Date>,
    /// Instant from which the next heart's regeneration is measured.
    /// `None` means hearts are full and no regeneration is pending.
    #[serde(rename = "lastHeartTime")]
    pub last_heart_time: Option<Timestamp>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            unit: 1,
            chapter: 1,
            hearts: MAX_HEARTS,
            streak: 0,
            last_study_date: None,
            last_heart_time: None,
        }
    }
}

impl ProgressRecord {
    /// Repair a record deserialized from untrusted data so that the
    /// invariants hold. A missing regeneration instant on a non-full
    /// record is restored to `now`, which costs at most one refill
    /// interval of progress.
    pub fn normalize(&mut self, now: Timestamp) {
        self.unit = self.unit.max(1);
        self.chapter = self.chapter.clamp(1, CHAPTERS_PER_UNIT);
        self.hearts = self.hearts.min(MAX_HEARTS);
        if self.hearts == MAX_HEARTS {
            self.last_heart_time = None;
        } else if self.last_heart_time.is_none() {
            self.last_heart_time = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let record = ProgressRecord::default();
        assert_eq!(record.unit, 1);
        assert_eq!(record.chapter, 1);
        assert_eq!(record.hearts, MAX_HEARTS);
        assert_eq!(record.streak, 0);
        assert_eq!(record.last_study_date, None);
        assert_eq!(record.last_heart_time, None);
    }

    #[test]
    fn test_wire_shape() {
        let record = ProgressRecord {
            unit: 2,
            chapter: 7,
            hearts: 12,
            streak: 4,
            last_study_date: Some(Date::try_from("2024-01-05".to_string()).unwrap()),
            last_heart_time: Some(Timestamp::from_millis(1700000000000)),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            "{\"unit\":2,\"chapter\":7,\"hearts\":12,\"streak\":4,\
             \"lastStudyDate\":\"2024-01-05\",\"lastHeartTime\":1700000000000}"
        );
        let back: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let record: ProgressRecord = serde_json::from_str("{\"hearts\":3}").unwrap();
        assert_eq!(record.hearts, 3);
        assert_eq!(record.unit, 1);
        assert_eq!(record.streak, 0);
        let record: ProgressRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ProgressRecord::default());
    }

    #[test]
    fn test_normalize_clamps_hearts() {
        let now = Timestamp::from_millis(5000);
        let mut record = ProgressRecord {
            hearts: 9999,
            last_heart_time: Some(Timestamp::from_millis(0)),
            ..ProgressRecord::default()
        };
        record.normalize(now);
        assert_eq!(record.hearts, MAX_HEARTS);
        assert_eq!(record.last_heart_time, None);
    }

    #[test]
    fn test_normalize_restores_regen_clock() {
        let now = Timestamp::from_millis(5000);
        let mut record = ProgressRecord {
            hearts: 3,
            last_heart_time: None,
            ..ProgressRecord::default()
        };
        record.normalize(now);
        assert_eq!(record.last_heart_time, Some(now));
    }

    #[test]
    fn test_normalize_repairs_zeroed_position() {
        let now = Timestamp::from_millis(0);
        let mut record = ProgressRecord {
            unit: 0,
            chapter: 0,
            ..ProgressRecord::default()
        };
        record.normalize(now);
        assert_eq!(record.unit, 1);
        assert_eq!(record.chapter, 1);
    }
}
