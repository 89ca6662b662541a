//! troupe-ui - interactive artist directory search client
//!
//! Terminal front end over the search controller: reads queries and
//! navigation commands line by line from stdin, and reprints the rendered
//! view whenever the controller reports a change (including late async
//! suggestion enrichment).

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use troupe_common::UiConfig;
use troupe_ui::controller::KeyEffect;
use troupe_ui::keys::Key;
use troupe_ui::SearchController;

#[derive(Parser, Debug)]
#[command(name = "troupe-ui", about = "Artist directory search client")]
struct Args {
    /// Base URL of the directory backend
    #[arg(long, env = "TROUPE_API_BASE")]
    api_base: Option<String>,

    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Troupe directory client (troupe-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let config = UiConfig::resolve(args.api_base.as_deref(), args.config.as_deref())?;
    info!("Directory backend: {}", config.api_base);

    let (ctrl, mut render_rx) = SearchController::new(config);

    // Startup load; retries on a fixed delay until the backend answers
    // (or the configured attempt cap is reached)
    ctrl.lock().await.init().await;
    ctrl.lock().await.check_api_availability().await;

    // Reprint the view on every controller change
    let render_ctrl = ctrl.clone();
    tokio::spawn(async move {
        while render_rx.changed().await.is_ok() {
            let doc = render_ctrl.lock().await.document();
            print!("{}", doc.to_text());
        }
    });

    println!("{}", ctrl.lock().await.document().to_text());
    println!(
        "Type to search. Commands: :up :down :enter :esc :search <q> :clear :refresh :retry :status :quit"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":clear" => ctrl.lock().await.clear_filters(),
            ":refresh" => ctrl.lock().await.refresh_cache().await,
            ":retry" => ctrl.lock().await.load_artists().await,
            ":status" => ctrl.lock().await.check_api_availability().await,
            ":down" => {
                SearchController::handle_key(&ctrl, Key::ArrowDown).await;
            }
            ":up" => {
                SearchController::handle_key(&ctrl, Key::ArrowUp).await;
            }
            ":esc" => {
                SearchController::handle_key(&ctrl, Key::Escape).await;
            }
            // '/' focuses the search input, opening the panel
            "/" => SearchController::handle_focus(&ctrl).await,
            // Server-side search against GET /api/search
            cmd if cmd.starts_with(":search ") => {
                let query = cmd.trim_start_matches(":search ").to_string();
                SearchController::server_search(&ctrl, query).await;
            }
            ":enter" => {
                if let KeyEffect::Navigate(id) =
                    SearchController::handle_key(&ctrl, Key::Enter).await
                {
                    println!("-> /artist/{}", id);
                }
            }
            query => {
                SearchController::handle_input(&ctrl, query.to_string()).await;
            }
        }
    }

    Ok(())
}
