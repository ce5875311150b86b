use chrono::{DateTime, Utc};
use lingualay_core::{CoreError, Deck, Settings, Store, StudyStats};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;

pub mod paths;

const FILE_VERSION: u32 = 1;
pub const DEFAULT_MAX_BACKUPS: usize = 10;

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    current_deck: Option<Deck>,
    #[serde(default)]
    stats: StudyStats,
    #[serde(default)]
    settings: Settings,
}

#[derive(Clone)]
struct State {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deck: Option<Deck>,
    stats: StudyStats,
    settings: Settings,
}

impl State {
    fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            deck: None,
            stats: StudyStats::default(),
            settings: Settings::default(),
        }
    }

    fn to_image(&self) -> FileImage {
        FileImage {
            version: FILE_VERSION,
            created_at: self.created_at,
            updated_at: self.updated_at,
            current_deck: self.deck.clone(),
            stats: self.stats.clone(),
            settings: self.settings.clone(),
        }
    }

    fn from_image(img: FileImage) -> Self {
        Self {
            created_at: img.created_at,
            updated_at: img.updated_at,
            deck: img.current_deck,
            stats: img.stats,
            settings: img.settings,
        }
    }
}

/// Keeps every record in one JSON file. Each write replaces the file
/// atomically and drops a timestamped copy into the backups directory.
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    state: RwLock<State>,
}

impl JsonStore {
    /// Opens (or creates) the store under `root`.
    pub async fn open_in(root: impl AsRef<Path>, max_backups: usize) -> Result<Self, CoreError> {
        let (file, backups) = paths::store_files(root.as_ref());
        Self::open_with(file, backups, max_backups).await
    }

    pub async fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        ensure_parent_dirs(&path)?;
        ensure_dir(&backups_dir)?;
        let state = load_or_init(&path).await?;
        tracing::debug!(path = %path.display(), "opened json store");
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    async fn save(&self) -> Result<(), CoreError> {
        let snapshot = {
            let mut s = self.state.write();
            s.updated_at = Utc::now();
            s.to_image()
        };
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let keep = self.max_backups;

        // Join error -> CoreError, inner io::Error -> CoreError
        task::spawn_blocking(move || write_with_backup(&path, &backups, keep, &snapshot))
            .await
            .map_err(|_| CoreError::Storage("io"))?
            .map_err(|e| {
                tracing::warn!(error = %e, "writing store file failed");
                CoreError::Storage("io")
            })?;
        Ok(())
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(|_| CoreError::Storage("io"))
}

async fn load_or_init(path: &Path) -> Result<State, CoreError> {
    if !path.exists() {
        return Ok(State::new_empty());
    }
    let p = path.to_path_buf();
    let img: FileImage = task::spawn_blocking(move || {
        let buf = fs::read_to_string(&p).map_err(|_| CoreError::Storage("io"))?;
        serde_json::from_str::<FileImage>(&buf).map_err(|e| CoreError::Parse(format!("store file: {e}")))
    })
    .await
    .map_err(|_| CoreError::Storage("io"))??;
    if img.version > FILE_VERSION {
        return Err(CoreError::Invalid("store file was written by a newer version"));
    }
    Ok(State::from_image(img))
}

fn write_with_backup(path: &Path, backups_dir: &Path, max_backups: usize, img: &FileImage) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir_all(backups_dir)?;

    let json = serde_json::to_vec_pretty(img)?;
    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    // Backup rotation
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let backup_path = backups_dir.join(format!("lingualay-{ts}.json"));
    let mut btmp = NamedTempFile::new_in(backups_dir)?;
    btmp.write_all(&json)?;
    btmp.flush()?;
    btmp.persist(&backup_path).map_err(|e| e.error)?;

    rotate_backups(backups_dir, max_backups)
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // Names embed the timestamp, so name order is age order.
    entries.sort_by_key(|e| e.file_name());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}

use async_trait::async_trait;

#[async_trait]
impl Store for JsonStore {
    async fn load_deck(&self) -> Result<Option<Deck>, CoreError> {
        Ok(self.state.read().deck.clone())
    }

    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError> {
        self.state.write().deck = Some(deck.clone());
        self.save().await
    }

    async fn clear_deck(&self) -> Result<(), CoreError> {
        self.state.write().deck = None;
        self.save().await
    }

    async fn load_stats(&self) -> Result<StudyStats, CoreError> {
        Ok(self.state.read().stats.clone())
    }

    async fn save_stats(&self, stats: &StudyStats) -> Result<(), CoreError> {
        self.state.write().stats = stats.clone();
        self.save().await
    }

    async fn load_settings(&self) -> Result<Settings, CoreError> {
        Ok(self.state.read().settings.clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), CoreError> {
        settings.validate()?;
        self.state.write().settings = settings.clone();
        self.save().await
    }

    async fn clear_all(&self) -> Result<(), CoreError> {
        {
            let mut s = self.state.write();
            s.deck = None;
            s.stats = StudyStats::default();
            s.settings = Settings::default();
        }
        self.save().await
    }
}
