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

//! wordtrail-core: Core library for the wordtrail vocabulary game.
//!
//! This library holds everything with temporal or state-machine
//! reasoning in it:
//! - Heart regeneration from elapsed wall-clock time
//! - Daily streak continuity
//! - Chapter classification and unlock progression
//! - The quiz session engine (question generation, grading, retry
//!   queue)
//!
//! All of it is pure over explicit `now`/`today` parameters; the
//! `clock` feature gates the only wall-clock constructors.

pub mod chapters;
pub mod error;
pub mod hearts;
pub mod rng;
pub mod session;
pub mod streak;
pub mod types;
pub mod vocab;

// Re-exports for convenience
pub use chapters::{CHAPTERS_PER_UNIT, ChapterKind, chapter_kind};
pub use error::{ErrorReport, Fallible, fail};
pub use hearts::{MAX_HEARTS, REFILL_INTERVAL, TickOutcome};
pub use session::{Answer, QuizQuestion, QuizSession, SessionPhase};
pub use types::date::Date;
pub use types::progress::ProgressRecord;
pub use types::timestamp::Timestamp;
pub use vocab::{Vocabulary, Word};
