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

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;
use serde::Serialize;

use wordtrail_core::hearts;
use wordtrail_core::hearts::REFILL_INTERVAL;
use wordtrail_core::hearts::TickOutcome;
use wordtrail_core::session::Answer;
use wordtrail_core::session::QuestionKind;
use wordtrail_core::session::QuestionPayload;
use wordtrail_core::session::QuizQuestion;
use wordtrail_core::session::SessionPhase;
use wordtrail_core::session::complete_session;
use wordtrail_core::types::date::Date;
use wordtrail_core::types::timestamp::Timestamp;

use crate::cmd::play::get::render_gate;
use crate::cmd::play::get::render_question;
use crate::cmd::play::get::render_review_intro;
use crate::cmd::play::state::Feedback;
use crate::cmd::play::state::ServerState;
use crate::cmd::play::template::page_template;

#[derive(Deserialize)]
pub struct QuizForm {
    action: String,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    pairs: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<QuizForm>,
) -> Response {
    let now = Timestamp::now();
    let today = Date::today();
    let mut m = state.mutable.lock().unwrap();
    let st = &mut *m;
    match form.action.as_str() {
        "Check" => {
            let Some(active) = st.session.as_mut() else {
                return Redirect::to("/").into_response();
            };
            if active.feedback.is_some() {
                // Double submit of the same answer. Re-render as is.
                let active = st.session.as_ref().unwrap();
                return Html(page_template(render_question(active, &st.record)).into_string())
                    .into_response();
            }
            if st.record.hearts == 0 {
                return Html(page_template(render_gate(&st.record, now)).into_string())
                    .into_response();
            }
            let (answer, expected) = match active.session.current() {
                Some(question) => (parse_answer(question, &form), expected_display(question)),
                None => return Redirect::to("/").into_response(),
            };
            let Some(correct) = active.session.check(&answer, &mut st.record, now) else {
                return Redirect::to("/").into_response();
            };
            active.feedback = Some(Feedback { correct, expected });
            st.persist();
            let active = st.session.as_ref().unwrap();
            Html(page_template(render_question(active, &st.record)).into_string()).into_response()
        }
        "Next" => {
            let Some(active) = st.session.as_mut() else {
                return Redirect::to("/").into_response();
            };
            active.feedback = None;
            match active.session.next() {
                SessionPhase::Active => {
                    let active = st.session.as_ref().unwrap();
                    Html(page_template(render_question(active, &st.record)).into_string())
                        .into_response()
                }
                SessionPhase::ReviewIntro => {
                    let active = st.session.as_ref().unwrap();
                    Html(page_template(render_review_intro(active, &st.record)).into_string())
                        .into_response()
                }
                SessionPhase::Finished => {
                    let (unit, chapter) = (active.unit, active.chapter);
                    let advanced = complete_session(&mut st.record, unit, chapter, today);
                    log::debug!("session over at {unit}/{chapter}, advanced: {advanced}");
                    st.session = None;
                    st.persist();
                    Redirect::to("/").into_response()
                }
            }
        }
        "BeginReview" => {
            let Some(active) = st.session.as_mut() else {
                return Redirect::to("/").into_response();
            };
            active.session.begin_review();
            let active = st.session.as_ref().unwrap();
            Html(page_template(render_question(active, &st.record)).into_string()).into_response()
        }
        "Quit" => {
            st.session = None;
            Redirect::to("/").into_response()
        }
        "End" => {
            let tx = state.shutdown_tx.lock().unwrap().take();
            if let Some(tx) = tx {
                let _ = tx.send(());
            }
            Html("Goodbye.".to_string()).into_response()
        }
        other => {
            log::debug!("unknown form action {other:?}");
            Redirect::to("/").into_response()
        }
    }
}

#[derive(Serialize)]
pub struct TickResponse {
    pub hearts: u32,
    pub full: bool,
    pub remaining: String,
}

/// One regeneration tick, driven by the client once a second.
pub async fn tick_handler(State(state): State<ServerState>) -> Json<TickResponse> {
    let now = Timestamp::now();
    let mut m = state.mutable.lock().unwrap();
    let outcome = hearts::tick(&mut m.record, now);
    if outcome == TickOutcome::HeartGained {
        log::debug!("heart regenerated, now at {}", m.record.hearts);
        m.persist();
    }
    let (full, remaining) = match m.record.last_heart_time {
        None => (true, "Full".to_string()),
        Some(last) => (
            false,
            hearts::format_remaining(REFILL_INTERVAL - now.millis_since(last)),
        ),
    };
    Json(TickResponse {
        hearts: m.record.hearts,
        full,
        remaining,
    })
}

fn parse_answer(question: &QuizQuestion, form: &QuizForm) -> Answer {
    match question.kind() {
        QuestionKind::Matching => {
            let encoded = form.pairs.as_deref().unwrap_or("");
            Answer::Pairs(
                encoded
                    .split('|')
                    .filter(|chunk| !chunk.is_empty())
                    .filter_map(|chunk| chunk.split_once("::"))
                    .map(|(word, meaning)| (word.to_string(), meaning.to_string()))
                    .collect(),
            )
        }
        QuestionKind::Typed | QuestionKind::Scramble => {
            Answer::Typed(form.answer.clone().unwrap_or_default())
        }
        QuestionKind::SelectMeaning | QuestionKind::SelectWord => {
            Answer::Choice(form.answer.clone().unwrap_or_default())
        }
    }
}

fn expected_display(question: &QuizQuestion) -> String {
    match &question.payload {
        QuestionPayload::Matching { pairs } => pairs
            .iter()
            .map(|pair| format!("{} = {}", pair.word, pair.meaning))
            .collect::<Vec<_>>()
            .join(", "),
        _ => question.answers.join(", "),
    }
}
