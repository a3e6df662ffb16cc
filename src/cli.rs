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

use std::process::exit;

use clap::Parser;
use tokio::spawn;

use wordtrail_core::error::Fallible;

use crate::cmd::check::check_vocabulary;
use crate::cmd::play::server::ServerConfig;
use crate::cmd::play::server::start_server;
use crate::cmd::stats::print_stats;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Play through the chapter map in a web interface.
    Play {
        /// Path to the vocabulary file. Default is vocab.toml.
        #[arg(long, default_value = "vocab.toml")]
        vocab: String,
        /// Path to the progress record. Default is progress.json.
        #[arg(long, default_value = "progress.json")]
        progress: String,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Check the integrity of a vocabulary file.
    Check {
        /// Path to the vocabulary file. Default is vocab.toml.
        #[arg(long, default_value = "vocab.toml")]
        vocab: String,
    },
    /// Print progress statistics.
    Stats {
        /// Path to the progress record. Default is progress.json.
        #[arg(long, default_value = "progress.json")]
        progress: String,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Play {
            vocab,
            progress,
            host,
            port,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                vocab_path: vocab,
                progress_path: progress,
                host,
                port,
                seed: None,
            };
            start_server(config).await
        }
        Command::Check { vocab } => check_vocabulary(&vocab),
        Command::Stats { progress } => print_stats(&progress),
    }
}
