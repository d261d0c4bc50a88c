use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use holocron_core::{markup, ChatWidget, Config, SearchClient, DEFAULT_ENDPOINT};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "holocron")]
#[command(about = "Chat with the Holocron archive search from your terminal")]
struct Cli {
    /// Server the search endpoint lives on
    #[arg(long, env = "HOLOCRON_BASE_URL")]
    base_url: Option<String>,
    /// Search endpoint path (or absolute URL)
    #[arg(long, env = "HOLOCRON_ENDPOINT")]
    endpoint: Option<String>,
    /// Start without the introductory banner
    #[arg(long)]
    no_hero: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        query: String,
        /// Print the answer as an HTML fragment
        #[arg(long)]
        html: bool,
    },
    /// Save the current settings (file, environment and flags) as the defaults
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("Ignoring unreadable config: {}", err);
        Config::new()
    });
    if cli.base_url.is_some() {
        config.base_url = cli.base_url.clone();
    }
    if cli.endpoint.is_some() {
        config.endpoint = cli.endpoint.clone();
    }
    if cli.no_hero {
        config.show_hero = Some(false);
    }

    if let Some(Commands::Config) = cli.command {
        return save_config(&config);
    }

    let client = SearchClient::new(config.base_url())
        .with_context(|| format!("invalid base URL {}", config.base_url()))?;
    let widget = ChatWidget::mount(&config.host_page(), client)?
        .ok_or_else(|| anyhow!("host page has no chat section"))?;

    match cli.command {
        Some(Commands::Ask { query, html }) => {
            init_logging(None, "warn")?;
            ask_once(widget, &query, html).await
        }
        Some(Commands::Config) => Ok(()),
        None => {
            let dir = data_dir()?;
            init_logging(Some(dir.join("holocron.log")), "info")?;
            run_tui(widget, dir.join("transcript.html")).await
        }
    }
}

fn save_config(config: &Config) -> Result<()> {
    let path = Config::get_config_path()?;
    config.save()?;
    println!("Saved {}", path.display());
    println!("  base_url:  {}", config.base_url());
    println!("  endpoint:  {}", config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT));
    println!("  show_hero: {}", config.show_hero());
    Ok(())
}

fn data_dir() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Could not determine cache directory"))?
        .join("holocron");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Logs go to a file while the terminal is in raw mode, stderr otherwise.
fn init_logging(log_file: Option<PathBuf>, default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("could not create log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;
        }
        None => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}

async fn ask_once(mut widget: ChatWidget, query: &str, html: bool) -> Result<()> {
    if widget.submit_query(query).is_none() {
        return Err(anyhow!("empty query"));
    }

    let id = widget
        .settle_next()
        .await
        .ok_or_else(|| anyhow!("search task ended without an answer"))?;
    let answer = widget
        .log()
        .get(id)
        .ok_or_else(|| anyhow!("answer missing from log"))?;

    if html {
        println!("{}", markup::render_message(answer));
    } else {
        println!("{}", app::message_lines(answer).join("\n"));
    }
    Ok(())
}

async fn run_tui(widget: ChatWidget, export_path: PathBuf) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(widget, export_path);

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(event) => handler::handle_event(&mut app, event),
                    None => break,
                },
                completion = app.widget.next_completion() => {
                    if let Some(completion) = completion {
                        app.widget.settle(completion);
                        app.follow_log();
                    }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}
