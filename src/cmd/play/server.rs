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

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;

use wordtrail_core::error::Fallible;
use wordtrail_core::error::fail;
use wordtrail_core::rng::TinyRng;
use wordtrail_core::types::timestamp::Timestamp;
use wordtrail_core::vocab::Vocabulary;

use crate::cmd::play::get::map_handler;
use crate::cmd::play::get::quiz_handler;
use crate::cmd::play::post::post_handler;
use crate::cmd::play::post::tick_handler;
use crate::cmd::play::state::MutableState;
use crate::cmd::play::state::ServerState;
use crate::store::ProgressStore;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

pub struct ServerConfig {
    pub vocab_path: String,
    pub progress_path: String,
    pub host: String,
    pub port: u16,
    /// Fixed RNG seed; taken from the wall clock when absent.
    pub seed: Option<u64>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let now = Timestamp::now();

    if !Path::new(&config.vocab_path).exists() {
        return fail(format!(
            "vocabulary file does not exist: {}",
            config.vocab_path
        ));
    }
    let content = std::fs::read_to_string(&config.vocab_path)?;
    let vocab = Vocabulary::parse(&content)?;
    log::debug!("Loaded {} words from {}", vocab.len(), config.vocab_path);

    let store = ProgressStore::new(&config.progress_path);
    let record = store.load(now);

    let seed = match config.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0),
    };

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        mutable: Arc::new(Mutex::new(MutableState {
            vocab,
            store,
            record,
            session: None,
            rng: TinyRng::from_seed(seed),
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(map_handler));
    let app = app.route("/quiz/{unit}/{chapter}", get(quiz_handler));
    let app = app.route("/quiz", post(post_handler));
    let app = app.route("/tick", post(tick_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or the End button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    Ok(())
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("script.js");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/javascript"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
