use crate::cli::opts::*;

use anyhow::{bail, Result};
use chrono::{Local, Utc};
use lingualay_core::{
    cards_due, import_deck, spawn_session, CardView, Command as SessionCommand, Difficulty,
    Event, ExportBundle, MediaIndex, SessionSummary, Store,
};
use lingualay_json::paths::data_root;
use lingualay_json::JsonStore;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run_cli(args: Cli) -> Result<()> {
    let store = open_store(args.data_dir.clone(), args.backups).await?;
    match args.cmd {
        Command::Import(cmd) => import_cmd(store, cmd).await,
        Command::Deck(cmd) => deck_cmd(store, cmd).await,
        Command::Study => study_cmd(store).await,
        Command::Stats => stats_cmd(store).await,
        Command::Settings(cmd) => settings_cmd(store, cmd).await,
        Command::Export { path } => export_cmd(store, path).await,
        Command::Restore { path } => restore_cmd(store, path).await,
        Command::Clear => {
            store.clear_all().await?;
            println!("ok");
            Ok(())
        }
        Command::Tui => bail!("the TUI is started from main"),
    }
}

pub async fn open_store(data_dir: Option<PathBuf>, backups: usize) -> Result<Arc<dyn Store>> {
    let root = data_dir.unwrap_or_else(data_root);
    let s = JsonStore::open_in(&root, backups).await?;
    tracing::debug!(path = %s.path().display(), "store ready");
    Ok(Arc::new(s))
}

async fn import_cmd(store: Arc<dyn Store>, cmd: ImportCmd) -> Result<()> {
    let media = match &cmd.media_dir {
        Some(dir) => MediaIndex::from_dir(dir)?,
        None => MediaIndex::new(),
    };
    let mut deck = import_deck(&cmd.path, &media)?;
    if let Some(name) = cmd.name {
        deck.name = name;
    }
    if let Some(desc) = cmd.description {
        deck.description = desc;
    }
    store.save_deck(&deck).await?;

    let settings = store.load_settings().await?;
    let mut stats = store.load_stats().await?;
    stats.cards_due = cards_due(&deck, &settings, Utc::now());
    store.save_stats(&stats).await?;

    println!(
        "Deck \"{}\" imported successfully! {} cards loaded.",
        deck.name,
        deck.total_cards()
    );
    Ok(())
}

async fn deck_cmd(store: Arc<dyn Store>, cmd: DeckCmd) -> Result<()> {
    match cmd {
        DeckCmd::Show => {
            let Some(deck) = store.load_deck().await? else {
                println!("no deck loaded");
                return Ok(());
            };
            println!("name\t{}", deck.name);
            if !deck.description.is_empty() {
                println!("description\t{}", deck.description);
            }
            println!("progress\t{}/{} cards", deck.studied_count(), deck.total_cards());
            println!("due\t{}", deck.due_count(Utc::now()));
            println!("sessions\t{}", deck.study_count);
            if let Some(t) = deck.last_accessed {
                println!("last studied\t{}", t.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
            }
        }
        DeckCmd::Clear => {
            store.clear_deck().await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn study_cmd(store: Arc<dyn Store>) -> Result<()> {
    let (tx, mut rx, handle) = spawn_session(store);
    let mut revealed = false;

    while let Some(event) = rx.recv().await {
        let reply = match event {
            Event::Presented(view) => {
                revealed = false;
                show_front(&view);
                prompt_enter("[enter=show, q=quit] ")?
                    .map(|_| SessionCommand::Reveal)
                    .unwrap_or(SessionCommand::Close)
            }
            Event::Revealed(view) => {
                revealed = true;
                println!("A: {}", view.back.unwrap_or_default());
                read_rating()?
            }
            Event::Ignored if revealed => read_rating()?,
            Event::Ignored => SessionCommand::Reveal,
            Event::Notice(msg) => {
                eprintln!("{msg}");
                continue;
            }
            Event::Completed(summary) => {
                show_summary(&summary);
                break;
            }
            Event::Closed => break,
        };
        if tx.send(reply).await.is_err() {
            break;
        }
    }

    handle.await?;
    Ok(())
}

fn show_front(view: &CardView) {
    println!(
        "\n[{}/{}]  correct {}  incorrect {}",
        view.cursor + 1,
        view.total,
        view.correct_count,
        view.incorrect_count
    );
    println!("Q: {}", view.front);
}

fn read_rating() -> Result<SessionCommand> {
    println!("[1=again, 2=hard, 3=good, 4=easy, q=quit]");
    loop {
        let line = read_line("rating> ")?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(SessionCommand::Close);
        }
        match line.parse::<Difficulty>() {
            Ok(d) => return Ok(SessionCommand::Rate(d)),
            Err(_) => println!("enter 1-4 or q"),
        }
    }
}

fn show_summary(s: &SessionSummary) {
    println!("\nSession complete!");
    println!("Cards studied: {}", s.cards_studied);
    println!("Correct: {}", s.correct_count);
    println!("Time: {}", s.elapsed_display());
}

async fn stats_cmd(store: Arc<dyn Store>) -> Result<()> {
    let today = Local::now().date_naive();
    let mut stats = store.load_stats().await?;
    stats.roll_over(today);

    println!("cards due\t{}", stats.cards_due);
    println!("studied today\t{}", stats.cards_studied_today);
    println!("streak\t{}", stats.current_streak(today));
    let totals = stats.totals();
    println!(
        "all time\t{} cards, {:.0}% correct, {} min",
        totals.cards_studied,
        totals.accuracy() * 100.0,
        totals.time_spent_secs / 60
    );
    for (day, t) in stats.history.iter().rev().take(7) {
        println!("{day}\t{} cards\t{} correct\t{} incorrect", t.cards_studied, t.correct, t.incorrect);
    }
    Ok(())
}

async fn settings_cmd(store: Arc<dyn Store>, cmd: SettingsCmd) -> Result<()> {
    match cmd {
        SettingsCmd::Show => {
            let s = store.load_settings().await?;
            println!("{}", serde_json::to_string_pretty(&s)?);
        }
        SettingsCmd::Set(set) => {
            let mut s = store.load_settings().await?;
            if let Some(n) = set.new_cards_per_day { s.new_cards_per_day = n; }
            if let Some(m) = set.max_review_time { s.max_review_time_minutes = m; }
            if let Some(t) = set.show_timer { s.show_timer = t; }
            if let Some(f) = set.font_size { s.card_font_size = f; }
            if let Some(t) = set.theme { s.theme = t; }
            store.save_settings(&s).await?;
            println!("Settings saved successfully!");
        }
    }
    Ok(())
}

async fn export_cmd(store: Arc<dyn Store>, path: PathBuf) -> Result<()> {
    let bundle = store.export_all().await?;
    let s = serde_json::to_string_pretty(&bundle)?;
    std::fs::write(&path, s)?;
    println!("wrote {}", path.display());
    Ok(())
}

async fn restore_cmd(store: Arc<dyn Store>, path: PathBuf) -> Result<()> {
    let data = std::fs::read_to_string(&path)?;
    let bundle: ExportBundle = serde_json::from_str(&data)?;
    store.import_all(bundle).await?;
    println!("restored from {}", path.display());
    Ok(())
}

// ===== Helpers =====
/// `None` when the user asked to quit.
fn prompt_enter(label: &str) -> Result<Option<()>> {
    let line = read_line(label)?;
    if line.trim().eq_ignore_ascii_case("q") {
        Ok(None)
    } else {
        Ok(Some(()))
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(s)
}
