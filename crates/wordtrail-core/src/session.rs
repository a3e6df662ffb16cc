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

//! The quiz session engine: question generation, answer grading, and
//! the retry-queue state machine.
//!
//! Two variants of this logic exist in the wild; this module implements
//! the spend-per-check and deferred-review-pass variants. Every answer
//! check costs one heart whether or not it is correct, and missed
//! questions are collected for a single review pass at the end of the
//! queue rather than re-enqueued inline. The latter is what bounds a
//! session at two passes over the original question count.

use crate::chapters::ChapterKind;
use crate::chapters::chapter_kind;
use crate::chapters::test_source;
use crate::hearts;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::streak;
use crate::types::date::Date;
use crate::types::progress::ProgressRecord;
use crate::types::timestamp::Timestamp;
use crate::vocab::Vocabulary;
use crate::vocab::Word;

/// Review chapters draw at most this many words.
pub const REVIEW_WORD_CAP: usize = 15;

/// Options per multiple-choice question (one correct, three
/// distractors) and pairs per matching question.
const OPTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    SelectMeaning,
    SelectWord,
    Typed,
    Scramble,
    Matching,
}

/// One word/meaning pair of a matching question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchPair {
    pub word: String,
    pub meaning: String,
}

/// Kind-specific question material.
#[derive(Clone, Debug, PartialEq)]
pub enum QuestionPayload {
    /// Pick the meaning of the prompted word.
    SelectMeaning { options: Vec<String> },
    /// Pick the word for the prompted meaning.
    SelectWord { options: Vec<String> },
    /// Type the answer for the prompt. Runs in either direction: type
    /// the word for a prompted meaning, or type the meaning for a
    /// prompted word.
    Typed,
    /// Reassemble the word from a shuffled letter bag.
    Scramble { letters: Vec<String> },
    /// Match each word to its meaning.
    Matching { pairs: Vec<MatchPair> },
}

/// An ephemeral question. Generated per session, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizQuestion {
    /// The underlying word's id.
    pub id: u32,
    pub prompt: String,
    /// Accepted answers. Empty for matching questions, whose answer
    /// lives in the payload.
    pub answers: Vec<String>,
    pub payload: QuestionPayload,
}

impl QuizQuestion {
    pub fn kind(&self) -> QuestionKind {
        match self.payload {
            QuestionPayload::SelectMeaning { .. } => QuestionKind::SelectMeaning,
            QuestionPayload::SelectWord { .. } => QuestionKind::SelectWord,
            QuestionPayload::Typed => QuestionKind::Typed,
            QuestionPayload::Scramble { .. } => QuestionKind::Scramble,
            QuestionPayload::Matching { .. } => QuestionKind::Matching,
        }
    }

    /// Grade an answer. Typed text (including scramble reconstructions)
    /// matches case-insensitively after trimming; option answers must
    /// match an accepted option exactly; matching requires set equality
    /// of the solved pairs. An answer of the wrong shape is wrong.
    pub fn grade(&self, answer: &Answer) -> bool {
        match (&self.payload, answer) {
            (QuestionPayload::SelectMeaning { .. }, Answer::Choice(choice))
            | (QuestionPayload::SelectWord { .. }, Answer::Choice(choice)) => {
                self.answers.iter().any(|a| a == choice)
            }
            (QuestionPayload::Typed, Answer::Typed(text))
            | (QuestionPayload::Scramble { .. }, Answer::Typed(text)) => {
                let text = text.trim().to_lowercase();
                self.answers.iter().any(|a| a.trim().to_lowercase() == text)
            }
            (QuestionPayload::Matching { pairs }, Answer::Pairs(solved)) => {
                let mut solved: Vec<(String, String)> = solved.clone();
                solved.sort();
                solved.dedup();
                solved.len() == pairs.len()
                    && solved
                        .iter()
                        .all(|(w, m)| pairs.iter().any(|p| &p.word == w && &p.meaning == m))
            }
            _ => false,
        }
    }
}

/// A submitted answer.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    /// A picked option.
    Choice(String),
    /// Typed text, also used for an assembled letter bag.
    Typed(String),
    /// Solved `(word, meaning)` pairs of a matching question.
    Pairs(Vec<(String, String)>),
}

/// Select the words a session over `(unit, chapter)` draws from. Learn
/// chapters use their own slot, test chapters the resolved source learn
/// chapter, review chapters a shuffled union of all prior learn
/// chapters in the unit capped at [`REVIEW_WORD_CAP`].
pub fn select_words<'a>(
    vocab: &'a Vocabulary,
    unit: u32,
    chapter: u32,
    rng: &mut TinyRng,
) -> Vec<&'a Word> {
    match chapter_kind(chapter) {
        ChapterKind::Learn => vocab.words_for(unit, chapter),
        ChapterKind::Test => vocab.words_for(unit, test_source(chapter)),
        ChapterKind::Review => {
            let mut pool: Vec<&Word> = Vec::new();
            for prior in 1..chapter {
                if chapter_kind(prior) == ChapterKind::Learn {
                    pool.extend(vocab.words_for(unit, prior));
                }
            }
            let mut pool = shuffle(pool, rng);
            pool.truncate(REVIEW_WORD_CAP);
            pool
        }
    }
}

/// Generate the question queue for `(unit, chapter)`. Learn chapters
/// produce meaning-selection questions; test and review chapters mix
/// scramble, matching, and typed questions, never repeating a kind
/// twice in direct succession.
pub fn generate_questions(
    vocab: &Vocabulary,
    unit: u32,
    chapter: u32,
    rng: &mut TinyRng,
) -> Vec<QuizQuestion> {
    let words = select_words(vocab, unit, chapter, rng);
    let learn = chapter_kind(chapter) == ChapterKind::Learn;
    let mut questions: Vec<QuizQuestion> = Vec::with_capacity(words.len());
    let mut last_kind: Option<QuestionKind> = None;
    for word in words {
        let question = if learn {
            select_meaning_question(vocab, word, rng)
        } else {
            let kind = pick_drill_kind(last_kind, rng);
            last_kind = Some(kind);
            match kind {
                QuestionKind::Scramble => scramble_question(word, rng),
                QuestionKind::Matching => matching_question(vocab, word, rng),
                _ => typed_question(word, rng),
            }
        };
        questions.push(question);
    }
    questions
}

const DRILL_KINDS: [QuestionKind; 3] = [
    QuestionKind::Scramble,
    QuestionKind::Matching,
    QuestionKind::Typed,
];

fn pick_drill_kind(last: Option<QuestionKind>, rng: &mut TinyRng) -> QuestionKind {
    let candidates: Vec<QuestionKind> = DRILL_KINDS
        .into_iter()
        .filter(|kind| Some(*kind) != last)
        .collect();
    candidates[rng.pick_index(candidates.len())]
}

fn select_meaning_question(vocab: &Vocabulary, word: &Word, rng: &mut TinyRng) -> QuizQuestion {
    let mut options: Vec<String> = vec![word.meaning.clone()];
    // Distractors are sampled without replacement from the full word
    // list, skipping texts already present. The attempt bound keeps a
    // tiny vocabulary from looping forever; the question then simply
    // has fewer options.
    let all = vocab.all();
    for _ in 0..(all.len() * 8).max(32) {
        if options.len() >= OPTION_COUNT {
            break;
        }
        let candidate = &all[rng.pick_index(all.len())];
        if candidate.id != word.id && !options.contains(&candidate.meaning) {
            options.push(candidate.meaning.clone());
        }
    }
    let options = shuffle(options, rng);
    QuizQuestion {
        id: word.id,
        prompt: word.word.clone(),
        answers: vec![word.meaning.clone()],
        payload: QuestionPayload::SelectMeaning { options },
    }
}

fn scramble_question(word: &Word, rng: &mut TinyRng) -> QuizQuestion {
    let letters: Vec<String> = word.word.chars().map(|c| c.to_string()).collect();
    let letters = shuffle(letters, rng);
    QuizQuestion {
        id: word.id,
        prompt: word.meaning.clone(),
        answers: vec![word.word.clone()],
        payload: QuestionPayload::Scramble { letters },
    }
}

/// A typed question in a random direction. The word-to-meaning
/// direction accepts any of the meaning's comma-separated alternates.
fn typed_question(word: &Word, rng: &mut TinyRng) -> QuizQuestion {
    let (prompt, answers) = if rng.generate(2) == 0 {
        (word.meaning.clone(), vec![word.word.clone()])
    } else {
        (word.word.clone(), word.meaning_alternates())
    };
    QuizQuestion {
        id: word.id,
        prompt,
        answers,
        payload: QuestionPayload::Typed,
    }
}

fn matching_question(vocab: &Vocabulary, word: &Word, rng: &mut TinyRng) -> QuizQuestion {
    let all = vocab.all();
    let target_idx = all.iter().position(|w| w.id == word.id).unwrap_or(0);
    let mut pairs: Vec<MatchPair> = vec![MatchPair {
        word: word.word.clone(),
        meaning: word.meaning.clone(),
    }];
    for idx in rng.sample_distinct(all.len(), OPTION_COUNT - 1, target_idx) {
        pairs.push(MatchPair {
            word: all[idx].word.clone(),
            meaning: all[idx].meaning.clone(),
        });
    }
    let pairs = shuffle(pairs, rng);
    QuizQuestion {
        id: word.id,
        prompt: "Match each word to its meaning".to_string(),
        answers: Vec::new(),
        payload: QuestionPayload::Matching { pairs },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Answering questions from the queue.
    Active,
    /// The queue ran out with missed questions pending; waiting for the
    /// player to acknowledge the review pass.
    ReviewIntro,
    Finished,
}

/// One quiz session: an ordered question queue, a cursor, and the
/// buffer of missed questions awaiting the review pass.
pub struct QuizSession {
    queue: Vec<QuizQuestion>,
    step: usize,
    failed: Vec<QuizQuestion>,
    reviewing: bool,
    phase: SessionPhase,
    combo: u32,
}

impl QuizSession {
    /// A session over a generated queue. An empty queue is finished
    /// from the start (a chapter with no eligible words is not an
    /// error).
    pub fn new(queue: Vec<QuizQuestion>) -> Self {
        let phase = if queue.is_empty() {
            SessionPhase::Finished
        } else {
            SessionPhase::Active
        };
        Self {
            queue,
            step: 0,
            failed: Vec::new(),
            reviewing: false,
            phase,
            combo: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn reviewing(&self) -> bool {
        self.reviewing
    }

    /// Consecutive correct answers since the last miss.
    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        match self.phase {
            SessionPhase::Active => self.queue.get(self.step),
            _ => None,
        }
    }

    /// Zero-based cursor into the current queue.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Missed questions waiting for the review pass.
    pub fn pending_review(&self) -> usize {
        self.failed.len()
    }

    /// Fraction of the current queue already passed, for the progress
    /// bar.
    pub fn progress(&self) -> f64 {
        if self.phase == SessionPhase::Finished || self.queue.is_empty() {
            1.0
        } else {
            self.step as f64 / self.queue.len() as f64
        }
    }

    /// Grade the current question. One heart is spent before grading,
    /// correct or not; the caller gates on `record.hearts > 0`. A wrong
    /// answer is remembered for the review pass (deduplicated by id)
    /// and resets the combo. Returns `None` when there is no current
    /// question to grade.
    pub fn check(
        &mut self,
        answer: &Answer,
        record: &mut ProgressRecord,
        now: Timestamp,
    ) -> Option<bool> {
        let question = match self.phase {
            SessionPhase::Active => self.queue.get(self.step)?,
            _ => return None,
        };
        hearts::spend(record, 1, now);
        let correct = question.grade(answer);
        if correct {
            self.combo += 1;
        } else {
            self.combo = 0;
            if !self.reviewing && !self.failed.iter().any(|q| q.id == question.id) {
                self.failed.push(question.clone());
            }
        }
        Some(correct)
    }

    /// Advance past the current question. At the end of the queue this
    /// either detours into the review pass or finishes the session.
    pub fn next(&mut self) -> SessionPhase {
        if self.phase == SessionPhase::Active {
            if self.step + 1 < self.queue.len() {
                self.step += 1;
            } else if !self.reviewing && !self.failed.is_empty() {
                self.phase = SessionPhase::ReviewIntro;
            } else {
                self.phase = SessionPhase::Finished;
            }
        }
        self.phase
    }

    /// Acknowledge the review intro: the missed questions become the
    /// queue and the session re-enters the active phase. Misses during
    /// this pass are not collected again, so the session ends after at
    /// most one review.
    pub fn begin_review(&mut self) {
        if self.phase != SessionPhase::ReviewIntro {
            return;
        }
        self.queue = std::mem::take(&mut self.failed);
        self.step = 0;
        self.reviewing = true;
        self.phase = SessionPhase::Active;
    }
}

/// The completion hook for a finished session: move the unlock frontier
/// if the completed chapter was the frontier, then record today's study
/// for the streak. Returns whether the frontier moved.
pub fn complete_session(
    record: &mut ProgressRecord,
    unit: u32,
    chapter: u32,
    today: Date,
) -> bool {
    let advanced = crate::chapters::advance(record, unit, chapter);
    streak::record_completion(record, today);
    advanced
}
