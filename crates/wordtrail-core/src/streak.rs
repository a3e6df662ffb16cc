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

//! Daily streak continuity. Decisions are made purely from calendar
//! dates; time of day never matters.

use crate::types::date::Date;
use crate::types::progress::ProgressRecord;

/// Passively re-evaluate the streak against today's date. A player
/// returning after a gap of more than one day sees zero immediately,
/// without having to complete a session first. Returns true if the
/// streak was reset.
pub fn evaluate(record: &mut ProgressRecord, today: Date) -> bool {
    if record.streak == 0 {
        return false;
    }
    let continuous = matches!(
        record.last_study_date,
        Some(date) if date == today || date == today.pred()
    );
    if !continuous {
        record.streak = 0;
        return true;
    }
    false
}

/// Record a completed session. At most one increment per calendar day:
/// a second completion on the same day leaves the streak unchanged.
pub fn record_completion(record: &mut ProgressRecord, today: Date) {
    if record.last_study_date == Some(today) {
        return;
    }
    record.streak = if record.last_study_date == Some(today.pred()) {
        record.streak + 1
    } else {
        1
    };
    record.last_study_date = Some(today);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::try_from(s.to_string()).unwrap()
    }

    fn record(streak: u32, last_study_date: Option<Date>) -> ProgressRecord {
        ProgressRecord {
            streak,
            last_study_date,
            ..ProgressRecord::default()
        }
    }

    #[test]
    fn test_evaluate_resets_after_gap() {
        let mut r = record(7, Some(date("2024-01-01")));
        assert!(evaluate(&mut r, date("2024-01-05")));
        assert_eq!(r.streak, 0);
    }

    #[test]
    fn test_evaluate_keeps_today_and_yesterday() {
        let mut r = record(7, Some(date("2024-01-05")));
        assert!(!evaluate(&mut r, date("2024-01-05")));
        assert_eq!(r.streak, 7);

        let mut r = record(7, Some(date("2024-01-04")));
        assert!(!evaluate(&mut r, date("2024-01-05")));
        assert_eq!(r.streak, 7);
    }

    #[test]
    fn test_evaluate_noop_on_zero_streak() {
        let mut r = record(0, None);
        assert!(!evaluate(&mut r, date("2024-01-05")));
    }

    #[test]
    fn test_completion_continues_from_yesterday() {
        let mut r = record(3, Some(date("2024-01-04")));
        record_completion(&mut r, date("2024-01-05"));
        assert_eq!(r.streak, 4);
        assert_eq!(r.last_study_date, Some(date("2024-01-05")));
    }

    #[test]
    fn test_completion_once_per_day() {
        let mut r = record(3, Some(date("2024-01-04")));
        record_completion(&mut r, date("2024-01-05"));
        record_completion(&mut r, date("2024-01-05"));
        assert_eq!(r.streak, 4);
    }

    #[test]
    fn test_completion_after_gap_restarts_at_one() {
        let mut r = record(9, Some(date("2024-01-01")));
        record_completion(&mut r, date("2024-01-05"));
        assert_eq!(r.streak, 1);
    }

    #[test]
    fn test_first_ever_completion() {
        let mut r = record(0, None);
        record_completion(&mut r, date("2024-01-05"));
        assert_eq!(r.streak, 1);
        assert_eq!(r.last_study_date, Some(date("2024-01-05")));
    }
}
