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

use wordtrail_core::chapters::chapter_kind;
use wordtrail_core::error::Fallible;
use wordtrail_core::hearts;
use wordtrail_core::hearts::MAX_HEARTS;
use wordtrail_core::hearts::REFILL_INTERVAL;
use wordtrail_core::streak;
use wordtrail_core::types::date::Date;
use wordtrail_core::types::timestamp::Timestamp;

use crate::store::ProgressStore;

/// Print the persisted progress summary. The printed view includes
/// hearts regenerated while away, but the record on disk is left
/// untouched.
pub fn print_stats(progress_path: &str) -> Fallible<()> {
    let now = Timestamp::now();
    let today = Date::today();
    let store = ProgressStore::new(progress_path);
    let mut record = store.load(now);
    hearts::catch_up(&mut record, now);
    streak::evaluate(&mut record, today);

    println!(
        "Position: unit {}, chapter {} ({})",
        record.unit,
        record.chapter,
        chapter_kind(record.chapter)
    );
    println!("Hearts:   {}/{MAX_HEARTS}", record.hearts);
    match record.last_heart_time {
        Some(last) => {
            let remaining = REFILL_INTERVAL - now.millis_since(last);
            println!("          next heart in {}", hearts::format_remaining(remaining));
        }
        None => println!("          full"),
    }
    println!("Streak:   {} day(s)", record.streak);
    match record.last_study_date {
        Some(date) => println!("Last studied: {date}"),
        None => println!("Last studied: never"),
    }
    Ok(())
}
