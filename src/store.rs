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

//! File-backed persistence for the progress record.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use wordtrail_core::error::Fallible;
use wordtrail_core::types::progress::ProgressRecord;
use wordtrail_core::types::timestamp::Timestamp;

/// Typed accessor over the single persisted JSON record. Loading fails
/// soft: a missing, unreadable, or malformed file yields the default
/// record instead of an error, so corrupt state can never brick the
/// game.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, substituting the default record on
    /// any failure. The result is normalized so its invariants hold
    /// even if the file was hand-edited.
    pub fn load(&self, now: Timestamp) -> ProgressRecord {
        let mut record = match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<ProgressRecord>(&content) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!(
                        "malformed progress record at {}, starting fresh: {e}",
                        self.path.display()
                    );
                    ProgressRecord::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no progress record at {}, starting fresh", self.path.display());
                ProgressRecord::default()
            }
            Err(e) => {
                log::warn!(
                    "could not read progress record at {}, starting fresh: {e}",
                    self.path.display()
                );
                ProgressRecord::default()
            }
        };
        record.normalize(now);
        record
    }

    /// Persist the record. The serialization is written to a sibling
    /// temp file and renamed over the target, so a reader never
    /// observes a partial write.
    pub fn save(&self, record: &ProgressRecord) -> Fallible<()> {
        let json = serde_json::to_string(record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("saved progress record to {}", self.path.display());
        Ok(())
    }
}
