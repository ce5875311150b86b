use clap::{Args, Parser, Subcommand};
use lingualay_core::{FontSize, Theme};
use lingualay_json::DEFAULT_MAX_BACKUPS;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "lingualay", version, about = "Lingualay flashcard study CLI/TUI")]
pub struct Cli {
    /// Directory holding the store file and backups (defaults to app data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Number of timestamped backups to keep
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_BACKUPS)]
    pub backups: usize,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Import a deck file (.txt, .csv, .json) as the current deck
    Import(ImportCmd),
    /// Current deck operations
    #[command(subcommand)]
    Deck(DeckCmd),
    /// Study the current deck in the terminal (line based)
    Study,
    /// Study the current deck in a full-screen terminal UI
    Tui,
    /// Show study statistics
    Stats,
    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCmd),
    /// Write every record to a JSON file
    Export { path: PathBuf },
    /// Replace every record with the contents of an export file
    Restore { path: PathBuf },
    /// Delete the deck, stats and settings
    Clear,
}

#[derive(Debug, Args, Clone)]
pub struct ImportCmd {
    pub path: PathBuf,
    /// Deck name (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Directory with the deck's media files
    #[arg(long)]
    pub media_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum DeckCmd {
    Show,
    Clear,
}

#[derive(Debug, Subcommand, Clone)]
pub enum SettingsCmd {
    Show,
    Set(SettingsSet),
}

#[derive(Debug, Args, Clone)]
pub struct SettingsSet {
    #[arg(long)]
    pub new_cards_per_day: Option<u32>,
    /// Minutes
    #[arg(long)]
    pub max_review_time: Option<u32>,
    #[arg(long)]
    pub show_timer: Option<bool>,
    /// small, medium or large
    #[arg(long)]
    pub font_size: Option<FontSize>,
    /// light or dark
    #[arg(long)]
    pub theme: Option<Theme>,
}
