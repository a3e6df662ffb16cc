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

//! The vocabulary word list: a TOML file of words, each assigned to a
//! `(unit, chapter)` slot.

use std::collections::HashSet;

use serde::Deserialize;

use crate::chapters::CHAPTERS_PER_UNIT;
use crate::error::Fallible;
use crate::error::fail;

/// A single vocabulary entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Word {
    pub id: u32,
    pub word: String,
    /// The translation. May carry comma-separated alternates, any of
    /// which is accepted for typed answers.
    pub meaning: String,
    pub unit: u32,
    pub chapter: u32,
}

impl Word {
    /// The accepted spellings of this word's meaning, split on commas
    /// and trimmed.
    pub fn meaning_alternates(&self) -> Vec<String> {
        self.meaning
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect()
    }
}

/// The full word list, parsed from TOML.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<Word>,
}

#[derive(Deserialize)]
struct WordFile {
    #[serde(default)]
    words: Vec<Word>,
}

impl Vocabulary {
    /// Parse and validate a word list. Duplicate ids, empty text, and
    /// out-of-range chapter indices are rejected.
    pub fn parse(content: &str) -> Fallible<Self> {
        let file: WordFile = toml::from_str(content)?;
        let mut seen_ids: HashSet<u32> = HashSet::new();
        for word in &file.words {
            if !seen_ids.insert(word.id) {
                return fail(format!("duplicate word id: {}", word.id));
            }
            if word.word.trim().is_empty() {
                return fail(format!("word {} has an empty spelling", word.id));
            }
            if word.meaning.trim().is_empty() {
                return fail(format!("word {} has an empty meaning", word.id));
            }
            if word.unit == 0 {
                return fail(format!("word {}: unit must be at least 1", word.id));
            }
            if word.chapter == 0 || word.chapter > CHAPTERS_PER_UNIT {
                return fail(format!(
                    "word {}: chapter must be in 1..={CHAPTERS_PER_UNIT}",
                    word.id
                ));
            }
        }
        Ok(Self { words: file.words })
    }

    /// The words assigned to a specific `(unit, chapter)` slot.
    pub fn words_for(&self, unit: u32, chapter: u32) -> Vec<&Word> {
        self.words
            .iter()
            .filter(|w| w.unit == unit && w.chapter == chapter)
            .collect()
    }

    /// Every word in the list, used for distractor sampling.
    pub fn all(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The highest unit any word is assigned to, floored at 1 so the
    /// map always has something to draw.
    pub fn max_unit(&self) -> u32 {
        self.words.iter().map(|w| w.unit).max().unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[words]]
        id = 1
        word = "apple"
        meaning = "사과"
        unit = 1
        chapter = 1

        [[words]]
        id = 2
        word = "water"
        meaning = "물, 음료수"
        unit = 1
        chapter = 1

        [[words]]
        id = 3
        word = "house"
        meaning = "집"
        unit = 1
        chapter = 3
    "#;

    #[test]
    fn test_parse_and_lookup() {
        let vocab = Vocabulary::parse(SAMPLE).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.max_unit(), 1);
        let chapter_one = vocab.words_for(1, 1);
        assert_eq!(chapter_one.len(), 2);
        assert_eq!(chapter_one[0].word, "apple");
        assert!(vocab.words_for(1, 2).is_empty());
    }

    #[test]
    fn test_meaning_alternates() {
        let vocab = Vocabulary::parse(SAMPLE).unwrap();
        let water = &vocab.all()[1];
        assert_eq!(water.meaning_alternates(), vec!["물", "음료수"]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let content = r#"
            [[words]]
            id = 1
            word = "a"
            meaning = "b"
            unit = 1
            chapter = 1

            [[words]]
            id = 1
            word = "c"
            meaning = "d"
            unit = 1
            chapter = 1
        "#;
        assert!(Vocabulary::parse(content).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_chapter() {
        let content = r#"
            [[words]]
            id = 1
            word = "a"
            meaning = "b"
            unit = 1
            chapter = 26
        "#;
        assert!(Vocabulary::parse(content).is_err());
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(Vocabulary::parse("[[words]\nid = ").is_err());
    }

    #[test]
    fn test_empty_file_is_a_valid_empty_list() {
        let vocab = Vocabulary::parse("").unwrap();
        assert!(vocab.is_empty());
        assert_eq!(vocab.max_unit(), 1);
    }
}
