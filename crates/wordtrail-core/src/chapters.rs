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

//! Chapter classification, unlock gating, and frontier progression.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::progress::ProgressRecord;

/// Chapters per unit; completing the last one wraps into the next unit.
pub const CHAPTERS_PER_UNIT: u32 = 25;

/// What a chapter index means within its unit. This classification is
/// the single source of truth for both the map display and question
/// generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChapterKind {
    /// Introduces the chapter's own new words.
    Learn,
    /// Re-tests the words of the nearest preceding learn chapter.
    Test,
    /// Cumulative review drawing on all prior learn chapters in the
    /// unit.
    Review,
}

impl Display for ChapterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChapterKind::Learn => write!(f, "learn"),
            ChapterKind::Test => write!(f, "test"),
            ChapterKind::Review => write!(f, "review"),
        }
    }
}

/// Classify a 1-based chapter index: every fifth chapter is a review,
/// the remaining even chapters are tests, the remaining odd chapters
/// introduce new words.
pub fn chapter_kind(chapter: u32) -> ChapterKind {
    if chapter % 5 == 0 {
        ChapterKind::Review
    } else if chapter % 2 == 0 {
        ChapterKind::Test
    } else {
        ChapterKind::Learn
    }
}

/// The learn chapter whose words a test chapter re-tests: the nearest
/// preceding chapter classified as learn. Chapter 6 resolves past the
/// chapter-5 review to chapter 3. Chapter 1 is always a learn chapter,
/// so the walk terminates.
pub fn test_source(chapter: u32) -> u32 {
    debug_assert_eq!(chapter_kind(chapter), ChapterKind::Test);
    let mut source = chapter.saturating_sub(1).max(1);
    while source > 1 && chapter_kind(source) != ChapterKind::Learn {
        source -= 1;
    }
    source
}

/// Whether `(unit, chapter)` is still locked given current progress.
/// Never mutates the record.
pub fn is_locked(record: &ProgressRecord, unit: u32, chapter: u32) -> bool {
    unit > record.unit || (unit == record.unit && chapter > record.chapter)
}

/// Advance the frontier after a completed session. Only completing the
/// record's current frontier chapter moves it; replaying an earlier
/// chapter changes nothing. Returns whether the record changed.
pub fn advance(record: &mut ProgressRecord, completed_unit: u32, completed_chapter: u32) -> bool {
    if completed_unit != record.unit || completed_chapter != record.chapter {
        return false;
    }
    record.chapter += 1;
    if record.chapter > CHAPTERS_PER_UNIT {
        record.unit += 1;
        record.chapter = 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_kinds() {
        assert_eq!(chapter_kind(1), ChapterKind::Learn);
        assert_eq!(chapter_kind(2), ChapterKind::Test);
        assert_eq!(chapter_kind(3), ChapterKind::Learn);
        assert_eq!(chapter_kind(4), ChapterKind::Test);
        assert_eq!(chapter_kind(5), ChapterKind::Review);
        assert_eq!(chapter_kind(6), ChapterKind::Test);
        assert_eq!(chapter_kind(10), ChapterKind::Review);
        assert_eq!(chapter_kind(13), ChapterKind::Learn);
        assert_eq!(chapter_kind(15), ChapterKind::Review);
        assert_eq!(chapter_kind(25), ChapterKind::Review);
    }

    #[test]
    fn test_test_source() {
        assert_eq!(test_source(2), 1);
        assert_eq!(test_source(4), 3);
        // Chapter 5 is a review and chapter 4 a test, so chapter 6 walks
        // back to chapter 3.
        assert_eq!(test_source(6), 3);
        assert_eq!(test_source(8), 7);
        assert_eq!(test_source(16), 13);
        assert_eq!(test_source(24), 23);
    }

    #[test]
    fn test_is_locked() {
        let record = ProgressRecord {
            unit: 2,
            chapter: 3,
            ..ProgressRecord::default()
        };
        assert!(!is_locked(&record, 1, 25));
        assert!(!is_locked(&record, 2, 3));
        assert!(is_locked(&record, 2, 4));
        assert!(is_locked(&record, 3, 1));
    }

    #[test]
    fn test_advance_frontier() {
        let mut record = ProgressRecord {
            unit: 1,
            chapter: 3,
            ..ProgressRecord::default()
        };
        assert!(advance(&mut record, 1, 3));
        assert_eq!((record.unit, record.chapter), (1, 4));
    }

    #[test]
    fn test_advance_ignores_replays() {
        let mut record = ProgressRecord {
            unit: 2,
            chapter: 10,
            ..ProgressRecord::default()
        };
        // Replaying an already-unlocked chapter does not move the
        // frontier.
        assert!(!advance(&mut record, 2, 4));
        assert!(!advance(&mut record, 1, 25));
        assert_eq!((record.unit, record.chapter), (2, 10));
    }

    #[test]
    fn test_advance_wraps_into_next_unit() {
        let mut record = ProgressRecord {
            unit: 3,
            chapter: CHAPTERS_PER_UNIT,
            ..ProgressRecord::default()
        };
        assert!(advance(&mut record, 3, CHAPTERS_PER_UNIT));
        assert_eq!((record.unit, record.chapter), (4, 1));
    }
}
