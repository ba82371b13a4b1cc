//! `unifest`: headless client for the Unifest festival server.
//!
//! Reads `unifest.toml` (or the path given with `--config`) and `UNIFEST_*`
//! environment variables, opens the local liked-collection store, and runs
//! one command.
//!
//! ```
//! unifest festivals --region 서울
//! unifest liked add 42
//! unifest booth 7 --toggle-like
//! ```

mod app;
mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{app::App, config::AppConfig};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "unifest", version, about = "Browse festivals and keep your liked festivals and booths")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "unifest.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List festivals, optionally by school-name search or region.
  Festivals {
    #[arg(long, conflicts_with = "region")]
    search: Option<String>,
    /// Region tab name, e.g. `서울` or `부산/울산`.
    #[arg(long)]
    region: Option<String>,
  },
  /// Festivals held on a date (default: today) with their line-ups.
  Today {
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Manage liked festivals.
  Liked {
    #[command(subcommand)]
    action: LikedCommand,
  },
  /// Booths of the configured festival.
  Booths,
  /// One booth in detail.
  Booth {
    id: i64,
    /// Bookmark the booth, or remove the bookmark if already set.
    #[arg(long)]
    toggle_like: bool,
  },
  /// Bookmarked booths.
  LikedBooths,
  /// Onboarding flags and the recently liked school.
  Onboarding,
}

#[derive(Subcommand, Debug)]
enum LikedCommand {
  List,
  Add { festival_id: i64 },
  Remove { festival_id: i64 },
  Clear,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = AppConfig::load(&cli.config)
    .with_context(|| format!("failed to load {}", cli.config.display()))?;
  let app = App::open(&config).await?;

  match cli.command {
    Command::Festivals { search, region } => app.festivals(search, region).await?,
    Command::Today { date } => {
      let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
      app.today(date).await?
    }
    Command::Liked { action } => match action {
      LikedCommand::List => app.liked_list(),
      LikedCommand::Add { festival_id } => app.liked_add(festival_id).await?,
      LikedCommand::Remove { festival_id } => app.liked_remove(festival_id).await?,
      LikedCommand::Clear => app.liked_clear().await?,
    },
    Command::Booths => app.booths().await?,
    Command::Booth { id, toggle_like } => app.booth(id, toggle_like).await?,
    Command::LikedBooths => app.liked_booths().await?,
    Command::Onboarding => app.onboarding().await?,
  }

  Ok(())
}
