mod app;
mod event;
mod session_log;
mod theme;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::Parser;
use hatch_core::{
    ChatReply, ChatRouter, DetectorConfig, HatchConfig, LocalKnowledge, OpenAiChat, Profile,
    SequenceDetector, Terminal, validate_api_key,
};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use app::App;
use event::AppEvent;
use session_log::SessionLogger;

#[derive(Parser)]
struct Args {
    /// OpenAI API key (falls back to the stored config)
    #[arg(long, env = "OPENAI_API_KEY")]
    api_key: Option<String>,

    /// Chat completions base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Profile JSON overriding the built-in site-owner content
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Skip the JSONL session log
    #[arg(long)]
    no_log: bool,

    /// Persist the resolved key/base URL/model to ~/.hatch/config.json and exit
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // File-based tracing — stdout belongs to the TUI
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let log_dir = PathBuf::from(&home).join(".hatch");
        std::fs::create_dir_all(&log_dir).ok();
        let log_file = std::fs::File::create(log_dir.join("hatch.log"))?;

        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::try_from_env("HATCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(log_file)
            .with_ansi(false)
            .init();
    }

    let args = Args::parse();

    // CLI flags/env override stored config
    let mut config = HatchConfig::load().unwrap_or_default();
    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    if args.save_config {
        config.save()?;
        eprintln!("config saved to ~/.hatch/config.json");
        return Ok(());
    }

    let api_key = config
        .api_key
        .clone()
        .context("no API key: pass --api-key or set OPENAI_API_KEY")?;
    validate_api_key(&api_key)?;

    let profile = match &args.profile {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading profile {}", path.display()))?;
            serde_json::from_str::<Profile>(&data)
                .with_context(|| format!("parsing profile {}", path.display()))?
        }
        None => config.profile.clone().unwrap_or_default(),
    };

    let knowledge = Arc::new(LocalKnowledge::from_profile(&profile));
    let detector = SequenceDetector::new(DetectorConfig::default());
    let chat = Terminal::new(knowledge);
    let provider = Arc::new(OpenAiChat::new(&api_key, &config.base_url, &config.model));
    let (router, replies) = ChatRouter::new(provider);

    let logger = if args.no_log {
        None
    } else {
        SessionLogger::new(&config.model).ok()
    };

    let app = App::new(detector, chat, router, profile, logger);

    let terminal = ratatui::init();
    let result = run_app(terminal, app, replies).await;
    ratatui::restore();
    result
}

async fn run_app(
    mut terminal: DefaultTerminal,
    mut app: App,
    mut replies: mpsc::UnboundedReceiver<ChatReply>,
) -> anyhow::Result<()> {
    // Unified event channel
    let (app_tx, mut app_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Stop flag for the reader and tick tasks
    let stop = Arc::new(AtomicBool::new(false));

    // Terminal event reader using poll() with a timeout so it can stop
    let term_tx = app_tx.clone();
    let stop_reader = Arc::clone(&stop);
    tokio::task::spawn_blocking(move || {
        while !stop_reader.load(Ordering::Relaxed) {
            if crossterm::event::poll(std::time::Duration::from_millis(50)).unwrap_or(false) {
                match crossterm::event::read() {
                    Ok(ev) => {
                        if term_tx.send(AppEvent::Term(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    });

    // Tick timer for the quote banner countdown
    let tick_tx = app_tx.clone();
    let stop_tick = Arc::clone(&stop);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            interval.tick().await;
            if stop_tick.load(Ordering::Relaxed) {
                break;
            }
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Forward chat replies onto the unified channel
    let reply_tx = app_tx.clone();
    tokio::spawn(async move {
        while let Some(reply) = replies.recv().await {
            if reply_tx.send(AppEvent::Reply(reply)).is_err() {
                break;
            }
        }
    });

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let event = match app_rx.recv().await {
            Some(e) => e,
            None => break,
        };
        match event {
            AppEvent::Term(ev) => app.on_term_event(ev),
            AppEvent::Reply(reply) => app.on_reply(reply),
            AppEvent::Tick => app.on_tick(),
        }

        if app.should_quit {
            break;
        }
    }

    stop.store(true, Ordering::Relaxed);
    Ok(())
}
