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

use std::fs;
use std::path::Path;

use wordtrail_core::chapters::ChapterKind;
use wordtrail_core::chapters::chapter_kind;
use wordtrail_core::error::Fallible;
use wordtrail_core::error::fail;
use wordtrail_core::vocab::Vocabulary;

/// Validate a vocabulary file and report anything a player would trip
/// over. Words assigned to test or review chapters are flagged: only
/// learn chapters introduce words, so those entries would never be
/// drilled.
pub fn check_vocabulary(path: &str) -> Fallible<()> {
    if !Path::new(path).exists() {
        return fail(format!("vocabulary file not found: {path}"));
    }
    let content = fs::read_to_string(path)?;
    let vocab = Vocabulary::parse(&content)?;

    let mut warnings = 0;
    for word in vocab.all() {
        let kind = chapter_kind(word.chapter);
        if kind != ChapterKind::Learn {
            println!(
                "warning: word {} ('{}') is assigned to {} chapter {} and will never be drilled",
                word.id, word.word, kind, word.chapter
            );
            warnings += 1;
        }
    }

    println!("{} words across {} units.", vocab.len(), vocab.max_unit());
    if warnings > 0 {
        fail(format!("{warnings} warning(s) found."))
    } else {
        println!("No problems found.");
        Ok(())
    }
}
