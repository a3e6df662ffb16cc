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

use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::Markup;
use maud::html;

use wordtrail_core::chapters;
use wordtrail_core::chapters::CHAPTERS_PER_UNIT;
use wordtrail_core::chapters::ChapterKind;
use wordtrail_core::chapters::chapter_kind;
use wordtrail_core::hearts;
use wordtrail_core::hearts::MAX_HEARTS;
use wordtrail_core::hearts::REFILL_INTERVAL;
use wordtrail_core::session::QuestionPayload;
use wordtrail_core::session::QuizSession;
use wordtrail_core::session::SessionPhase;
use wordtrail_core::session::complete_session;
use wordtrail_core::session::generate_questions;
use wordtrail_core::streak;
use wordtrail_core::types::date::Date;
use wordtrail_core::types::progress::ProgressRecord;
use wordtrail_core::types::timestamp::Timestamp;

use crate::cmd::play::state::ActiveSession;
use crate::cmd::play::state::ServerState;
use crate::cmd::play::template::page_template;

/// The chapter map. Mounting it catches up hearts regenerated while
/// away, re-evaluates the streak, and drops any abandoned session.
pub async fn map_handler(State(state): State<ServerState>) -> Html<String> {
    let now = Timestamp::now();
    let today = Date::today();
    let mut m = state.mutable.lock().unwrap();
    m.session = None;
    let gained = hearts::catch_up(&mut m.record, now);
    let reset = streak::evaluate(&mut m.record, today);
    if gained > 0 || reset {
        log::debug!("map mount: {gained} heart(s) regenerated, streak reset: {reset}");
        m.persist();
    }
    let markup = page_template(render_map(&m.record, m.vocab.max_unit(), now));
    Html(markup.into_string())
}

/// Start a session over `(unit, chapter)`. Locked chapters bounce back
/// to the map without touching the record; zero hearts shows the gate
/// instead of a session.
pub async fn quiz_handler(
    State(state): State<ServerState>,
    Path((unit, chapter)): Path<(u32, u32)>,
) -> Response {
    let now = Timestamp::now();
    let today = Date::today();
    let mut m = state.mutable.lock().unwrap();
    let st = &mut *m;
    if chapters::is_locked(&st.record, unit, chapter) {
        log::debug!("rejected locked chapter {unit}/{chapter}");
        return Redirect::to("/").into_response();
    }
    if st.record.hearts == 0 {
        return Html(page_template(render_gate(&st.record, now)).into_string()).into_response();
    }
    let questions = generate_questions(&st.vocab, unit, chapter, &mut st.rng);
    let session = QuizSession::new(questions);
    if session.phase() == SessionPhase::Finished {
        // A chapter with no eligible words completes trivially;
        // otherwise an empty frontier chapter would block progress
        // forever.
        complete_session(&mut st.record, unit, chapter, today);
        st.persist();
        return Redirect::to("/").into_response();
    }
    st.session = Some(ActiveSession {
        unit,
        chapter,
        kind: chapter_kind(chapter),
        session,
        feedback: None,
    });
    let active = st.session.as_ref().unwrap();
    Html(page_template(render_question(active, &st.record)).into_string()).into_response()
}

fn render_header(record: &ProgressRecord, now: Timestamp) -> Markup {
    let countdown = match record.last_heart_time {
        Some(last) => hearts::format_remaining(REFILL_INTERVAL - now.millis_since(last)),
        None => "Full".to_string(),
    };
    html! {
        header .topbar {
            h1 { "wordtrail" }
            .meters {
                span .streak .dimmed[record.streak == 0] {
                    "🔥 " span #streak-count { (record.streak) }
                }
                span .hearts #heart-badge {
                    "❤️ " span #heart-count { (record.hearts) }
                    .popover #heart-popover hidden {
                        p { "Next heart" }
                        p .countdown #countdown { (countdown) }
                    }
                }
            }
        }
    }
}

fn render_map(record: &ProgressRecord, max_unit: u32, now: Timestamp) -> Markup {
    let last_unit = max_unit.max(record.unit);
    html! {
        (render_header(record, now))
        main .map {
            @for unit in 1..=last_unit {
                section .unit {
                    h2 {
                        @if unit > record.unit {
                            "Unit " (unit) " (locked)"
                        } @else {
                            "Unit " (unit)
                        }
                    }
                    ol .chapters {
                        @for chapter in 1..=CHAPTERS_PER_UNIT {
                            @let kind = chapter_kind(chapter);
                            li {
                                @if chapters::is_locked(record, unit, chapter) {
                                    span .chapter .locked { "🔒" }
                                } @else {
                                    a .chapter .(kind) href={ "/quiz/" (unit) "/" (chapter) "?mode=" (kind) } {
                                        @match kind {
                                            ChapterKind::Review => { "🏆" }
                                            ChapterKind::Learn => { "📖" }
                                            ChapterKind::Test => { (chapter) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        footer {
            form method="post" action="/quiz" {
                input type="hidden" name="action" value="End";
                button .plain type="submit" { "End" }
            }
        }
    }
}

pub fn render_question(active: &ActiveSession, record: &ProgressRecord) -> Markup {
    let session = &active.session;
    let question = session.current();
    let percent = (session.progress() * 100.0).round() as u32;
    html! {
        header .quizbar {
            a .quit href="/" { "✕" }
            span .context { "Unit " (active.unit) ", chapter " (active.chapter) " (" (active.kind) ")" }
            .progress-track {
                .progress-fill style={ "width: " (percent) "%" } {}
            }
            span .hearts { "❤️ " span #heart-count { (record.hearts) } }
        }
        main .quiz {
            @if session.reviewing() {
                p .review-note { "Reviewing your mistakes" }
            }
            @if session.combo() >= 2 {
                p .combo { "Combo ×" (session.combo()) }
            }
            @if let Some(question) = question {
                h1 .prompt { (question.prompt) }
                @if let Some(feedback) = &active.feedback {
                    @if feedback.correct {
                        .feedback .correct { "Correct!" }
                    } @else {
                        .feedback .wrong { "Correct answer: " (feedback.expected) }
                    }
                    form method="post" action="/quiz" {
                        input type="hidden" name="action" value="Next";
                        button .primary type="submit" { "Continue" }
                    }
                } @else {
                    (render_controls(&question.payload))
                }
            }
        }
    }
}

fn render_controls(payload: &QuestionPayload) -> Markup {
    match payload {
        QuestionPayload::SelectMeaning { options } | QuestionPayload::SelectWord { options } => {
            html! {
                form .options method="post" action="/quiz" {
                    input type="hidden" name="action" value="Check";
                    @for option in options {
                        button .option type="submit" name="answer" value=(option) { (option) }
                    }
                }
            }
        }
        QuestionPayload::Typed => html! {
            form .typed method="post" action="/quiz" {
                input type="hidden" name="action" value="Check";
                input type="text" name="answer" autocomplete="off" autofocus;
                button .primary type="submit" { "Check" }
            }
        },
        QuestionPayload::Scramble { letters } => html! {
            form .scramble method="post" action="/quiz" {
                input type="hidden" name="action" value="Check";
                input #answer-input type="hidden" name="answer" value="";
                .assembled #assembled {}
                button .plain type="button" #letter-undo { "⌫" }
                .letter-bank #letter-bank {
                    @for (i, letter) in letters.iter().enumerate() {
                        button .letter type="button" data-letter=(letter) data-index=(i) { (letter) }
                    }
                }
                button .primary type="submit" { "Check" }
            }
        },
        QuestionPayload::Matching { pairs } => {
            // Meanings are shown in their own order so column position
            // does not give the pairing away.
            let mut meanings: Vec<&str> = pairs.iter().map(|p| p.meaning.as_str()).collect();
            meanings.sort();
            html! {
                form .matching method="post" action="/quiz" {
                    input type="hidden" name="action" value="Check";
                    input #pairs-input type="hidden" name="pairs" value="";
                    .match-grid {
                        .match-col {
                            @for pair in pairs {
                                button .match-word type="button" data-word=(pair.word) { (pair.word) }
                            }
                        }
                        .match-col {
                            @for meaning in meanings {
                                button .match-meaning type="button" data-meaning=(meaning) { (meaning) }
                            }
                        }
                    }
                    button .plain type="button" #match-reset { "Reset" }
                    button #match-check .primary type="submit" disabled { "Check" }
                }
            }
        }
    }
}

pub fn render_review_intro(active: &ActiveSession, record: &ProgressRecord) -> Markup {
    html! {
        header .quizbar {
            a .quit href="/" { "✕" }
            span .hearts { "❤️ " span #heart-count { (record.hearts) } }
        }
        main .quiz {
            h1 { "Time to review" }
            p { "Let's go over your " (active.session.pending_review()) " missed question(s)." }
            form method="post" action="/quiz" {
                input type="hidden" name="action" value="BeginReview";
                button .primary type="submit" { "Start review" }
            }
        }
    }
}

pub fn render_gate(record: &ProgressRecord, now: Timestamp) -> Markup {
    let countdown = match record.last_heart_time {
        Some(last) => hearts::format_remaining(REFILL_INTERVAL - now.millis_since(last)),
        None => "Full".to_string(),
    };
    html! {
        main .quiz .gate {
            h1 { "You're out of hearts" }
            p { "Hearts refill one every 10 minutes, up to " (MAX_HEARTS) "." }
            p .countdown #countdown { (countdown) }
            span #heart-count hidden { (record.hearts) }
            a .primary href="/" { "Back to the map" }
        }
    }
}
