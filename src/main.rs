mod app;
mod config;
mod content;
mod cursor;
mod html;
mod input;
mod logging;
mod models;
mod session;
mod shell;
mod theme;
mod transcript;
mod ui;
mod utils;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::logging::Sink;
use crate::models::Topic;

#[derive(Parser)]
#[command(name = "katfemtech", version, about = "Katerina's portfolio, terminal edition")]
struct Cli {
    /// Extra config file layered on top of the defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the page in the terminal (default)
    Browse {
        /// Topics to open on start, in order (about, playing-with-ai, femtech, contact)
        #[arg(long, value_name = "TOPIC")]
        open: Vec<Topic>,
    },
    /// Write the page as a single HTML document
    Export {
        /// Output file, or `-` for stdout
        #[arg(long, default_value = "index.html")]
        out: String,
    },
    /// Inspect or create the user config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Print where the user config lives
    Path,
    /// Write the default config to the user config path
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load configuration")?;

    let command = cli.command.unwrap_or(Command::Browse { open: Vec::new() });
    let sink = match command {
        Command::Browse { .. } => Sink::File,
        _ => Sink::Stderr,
    };
    let _guard = logging::init(&settings.logging, sink)?;

    match command {
        Command::Browse { open } => {
            info!(open = ?open, "starting terminal view");
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(app::run(&settings, &open))?;
            info!("terminal view closed");
        }
        Command::Export { out } => export(&settings, &out)?,
        Command::Config { action } => match action {
            ConfigAction::Show => print!("{}", config::to_toml(&settings)?),
            ConfigAction::Path => {
                let path = config::get_user_config_path().ok_or_else(|| anyhow!("no home directory"))?;
                println!("{}", path.display());
            }
            ConfigAction::Init => {
                let path = config::get_user_config_path().ok_or_else(|| anyhow!("no home directory"))?;
                if config::init_user_config(&path)? {
                    println!("wrote {}", path.display());
                } else {
                    println!("{} already exists, left untouched", path.display());
                }
            }
        },
    }
    Ok(())
}

fn export(settings: &Settings, out: &str) -> Result<()> {
    let document = html::render_document(settings)?;
    if out == "-" {
        io::stdout().write_all(document.as_bytes())?;
        return Ok(());
    }

    let expanded = shellexpand::tilde(out);
    let path = Path::new(expanded.as_ref());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, &document).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = document.len(), "page exported");
    Ok(())
}
