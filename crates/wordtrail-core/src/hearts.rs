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

//! Heart regeneration: translating elapsed wall-clock time into heart
//! count. All functions here are pure over `(record, now)`; scheduling
//! the once-per-second tick is the caller's concern.

use crate::types::progress::ProgressRecord;
use crate::types::timestamp::Timestamp;

/// The heart ceiling.
pub const MAX_HEARTS: u32 = 25;

/// One heart regenerates per this many milliseconds.
pub const REFILL_INTERVAL: i64 = 10 * 60 * 1000;

/// Outcome of a live regeneration tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Hearts are full; nothing is regenerating.
    Full,
    /// One heart was awarded on this tick. The caller must persist the
    /// record. Further overdue hearts are picked up by subsequent ticks.
    HeartGained,
    /// Counting down toward the next heart.
    Counting { remaining_ms: i64 },
}

/// One-shot catch-up for time that passed while the process was away.
/// Returns the number of hearts gained. Calling this again without
/// further elapsed time is a no-op, because the stored instant advances
/// by whole refill intervals and keeps the remainder.
pub fn catch_up(record: &mut ProgressRecord, now: Timestamp) -> u32 {
    if record.hearts >= MAX_HEARTS {
        return 0;
    }
    let Some(last) = record.last_heart_time else {
        return 0;
    };
    let elapsed = now.millis_since(last);
    if elapsed < 0 {
        // The clock moved backwards; restart the countdown from here.
        record.last_heart_time = Some(now);
        return 0;
    }
    let gained = (elapsed / REFILL_INTERVAL) as u32;
    if gained == 0 {
        return 0;
    }
    let awarded = gained.min(MAX_HEARTS - record.hearts);
    record.hearts += awarded;
    if record.hearts == MAX_HEARTS {
        record.last_heart_time = None;
    } else {
        record.last_heart_time = Some(last.plus_millis(gained as i64 * REFILL_INTERVAL));
    }
    awarded
}

/// Live tick, invoked once per second while a screen is mounted. Awards
/// at most one heart per call so a burst of overdue time drains across
/// consecutive ticks.
pub fn tick(record: &mut ProgressRecord, now: Timestamp) -> TickOutcome {
    if record.hearts >= MAX_HEARTS {
        return TickOutcome::Full;
    }
    let Some(last) = record.last_heart_time else {
        return TickOutcome::Full;
    };
    let remaining = REFILL_INTERVAL - now.millis_since(last);
    if remaining <= 0 {
        record.hearts += 1;
        if record.hearts == MAX_HEARTS {
            record.last_heart_time = None;
        } else {
            record.last_heart_time = Some(last.plus_millis(REFILL_INTERVAL));
        }
        TickOutcome::HeartGained
    } else {
        TickOutcome::Counting {
            remaining_ms: remaining,
        }
    }
}

/// Spend `n` hearts, floored at zero. Leaving the full state starts the
/// regeneration clock at `now`. Spending never blocks: callers that
/// want to gate an action must check `record.hearts > 0` themselves.
pub fn spend(record: &mut ProgressRecord, n: u32, now: Timestamp) {
    let was_full = record.hearts >= MAX_HEARTS;
    record.hearts = record.hearts.saturating_sub(n);
    if record.hearts < MAX_HEARTS && (was_full || record.last_heart_time.is_none()) {
        record.last_heart_time = Some(now);
    }
}

/// Render remaining milliseconds as `m:ss` for the countdown display.
pub fn format_remaining(remaining_ms: i64) -> String {
    let remaining_ms = remaining_ms.max(0);
    let mins = remaining_ms / 60_000;
    let secs = (remaining_ms % 60_000) / 1000;
    format!("{mins}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60 * 1000;

    fn record_with(hearts: u32, last_heart_time: Option<Timestamp>) -> ProgressRecord {
        ProgressRecord {
            hearts,
            last_heart_time,
            ..ProgressRecord::default()
        }
    }

    fn invariant_holds(record: &ProgressRecord) -> bool {
        record.hearts <= MAX_HEARTS
            && (record.last_heart_time.is_none()) == (record.hearts == MAX_HEARTS)
    }

    #[test]
    fn test_catch_up_worked_example() {
        // 20 hearts, last heart instant 35 minutes ago: three hearts
        // regenerate and 5 minutes of progress toward the fourth are
        // kept.
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(20, Some(now.plus_millis(-35 * MIN)));
        let gained = catch_up(&mut record, now);
        assert_eq!(gained, 3);
        assert_eq!(record.hearts, 23);
        assert_eq!(record.last_heart_time, Some(now.plus_millis(-5 * MIN)));
        assert!(invariant_holds(&record));
    }

    #[test]
    fn test_catch_up_is_idempotent() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(20, Some(now.plus_millis(-35 * MIN)));
        catch_up(&mut record, now);
        let snapshot = record.clone();
        assert_eq!(catch_up(&mut record, now), 0);
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_catch_up_caps_at_max() {
        let now = Timestamp::from_millis(1000 * MIN);
        let mut record = record_with(20, Some(now.plus_millis(-900 * MIN)));
        let gained = catch_up(&mut record, now);
        assert_eq!(gained, 5);
        assert_eq!(record.hearts, MAX_HEARTS);
        assert_eq!(record.last_heart_time, None);
        assert!(invariant_holds(&record));
    }

    #[test]
    fn test_catch_up_noop_when_full() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(MAX_HEARTS, None);
        assert_eq!(catch_up(&mut record, now), 0);
        assert_eq!(record.hearts, MAX_HEARTS);
    }

    #[test]
    fn test_catch_up_under_one_interval() {
        let now = Timestamp::from_millis(100 * MIN);
        let last = now.plus_millis(-9 * MIN);
        let mut record = record_with(10, Some(last));
        assert_eq!(catch_up(&mut record, now), 0);
        // The partial progress is untouched.
        assert_eq!(record.last_heart_time, Some(last));
    }

    #[test]
    fn test_catch_up_clock_moved_backwards() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(10, Some(now.plus_millis(30 * MIN)));
        assert_eq!(catch_up(&mut record, now), 0);
        assert_eq!(record.last_heart_time, Some(now));
    }

    #[test]
    fn test_tick_counting() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(10, Some(now.plus_millis(-4 * MIN)));
        let outcome = tick(&mut record, now);
        assert_eq!(
            outcome,
            TickOutcome::Counting {
                remaining_ms: 6 * MIN
            }
        );
        assert_eq!(record.hearts, 10);
    }

    #[test]
    fn test_tick_awards_one_heart_per_call() {
        // 25 minutes overdue: each tick awards exactly one heart and
        // advances the instant by one interval, so the backlog drains
        // across calls.
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(10, Some(now.plus_millis(-25 * MIN)));
        assert_eq!(tick(&mut record, now), TickOutcome::HeartGained);
        assert_eq!(record.hearts, 11);
        assert_eq!(tick(&mut record, now), TickOutcome::HeartGained);
        assert_eq!(record.hearts, 12);
        let outcome = tick(&mut record, now);
        assert_eq!(
            outcome,
            TickOutcome::Counting {
                remaining_ms: 5 * MIN
            }
        );
        assert!(invariant_holds(&record));
    }

    #[test]
    fn test_tick_reaches_full() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(MAX_HEARTS - 1, Some(now.plus_millis(-10 * MIN)));
        assert_eq!(tick(&mut record, now), TickOutcome::HeartGained);
        assert_eq!(record.hearts, MAX_HEARTS);
        assert_eq!(record.last_heart_time, None);
        assert_eq!(tick(&mut record, now), TickOutcome::Full);
    }

    #[test]
    fn test_spend_from_full_starts_clock() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(MAX_HEARTS, None);
        spend(&mut record, 1, now);
        assert_eq!(record.hearts, MAX_HEARTS - 1);
        assert_eq!(record.last_heart_time, Some(now));
        assert!(invariant_holds(&record));
    }

    #[test]
    fn test_spend_floors_at_zero() {
        let now = Timestamp::from_millis(100 * MIN);
        let mut record = record_with(2, Some(now.plus_millis(-MIN)));
        spend(&mut record, 5, now);
        assert_eq!(record.hearts, 0);
        // The regeneration clock keeps its partial progress.
        assert_eq!(record.last_heart_time, Some(now.plus_millis(-MIN)));
    }

    #[test]
    fn test_invariant_across_operation_sequences() {
        let mut record = ProgressRecord::default();
        let mut now = Timestamp::from_millis(0);
        for i in 0..200u32 {
            now = now.plus_millis((i as i64 % 13) * MIN);
            match i % 4 {
                0 => spend(&mut record, (i % 3) + 1, now),
                1 => {
                    catch_up(&mut record, now);
                }
                _ => {
                    tick(&mut record, now);
                }
            }
            assert!(invariant_holds(&record), "violated at step {i}: {record:?}");
        }
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(9 * MIN + 5 * 1000), "9:05");
        assert_eq!(format_remaining(10 * 1000), "0:10");
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(-500), "0:00");
    }
}
