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

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot::Sender;

use wordtrail_core::chapters::ChapterKind;
use wordtrail_core::rng::TinyRng;
use wordtrail_core::session::QuizSession;
use wordtrail_core::types::progress::ProgressRecord;
use wordtrail_core::vocab::Vocabulary;

use crate::store::ProgressStore;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

/// Everything the handlers mutate, behind one mutex. The regeneration
/// tick and the quiz screens all read and write the record through this
/// single guarded copy, so a tick firing between a screen's read and
/// write can never be clobbered by a stale snapshot.
pub struct MutableState {
    pub vocab: Vocabulary,
    pub store: ProgressStore,
    pub record: ProgressRecord,
    pub session: Option<ActiveSession>,
    pub rng: TinyRng,
}

impl MutableState {
    /// Persist the current record. Save failures are logged rather than
    /// surfaced: losing one write is recoverable, crashing the session
    /// is not.
    pub fn persist(&self) {
        if let Err(e) = self.store.save(&self.record) {
            log::error!("failed to save progress record: {e}");
        }
    }
}

/// The session the player is currently inside, if any.
pub struct ActiveSession {
    pub unit: u32,
    pub chapter: u32,
    pub kind: ChapterKind,
    pub session: QuizSession,
    /// Grading feedback for the current question, shown between Check
    /// and Next.
    pub feedback: Option<Feedback>,
}

pub struct Feedback {
    pub correct: bool,
    pub expected: String,
}
