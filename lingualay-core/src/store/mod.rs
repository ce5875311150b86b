use crate::{CoreError, Deck, Settings, StudyStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod memory;

pub use memory::MemoryStore;

pub const EXPORT_VERSION: u32 = 1;

/// Everything the store holds, in one document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub deck: Option<Deck>,
    #[serde(default)]
    pub stats: StudyStats,
    #[serde(default)]
    pub settings: Settings,
}

/// Typed access to the three persisted records: the current deck, study
/// stats and settings.
#[async_trait]
pub trait Store: Send + Sync {
    // Deck
    async fn load_deck(&self) -> Result<Option<Deck>, CoreError>;
    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError>;
    async fn clear_deck(&self) -> Result<(), CoreError>;

    // Stats
    async fn load_stats(&self) -> Result<StudyStats, CoreError>;
    async fn save_stats(&self, stats: &StudyStats) -> Result<(), CoreError>;

    // Settings
    async fn load_settings(&self) -> Result<Settings, CoreError>;
    async fn save_settings(&self, settings: &Settings) -> Result<(), CoreError>;

    async fn clear_all(&self) -> Result<(), CoreError>;

    async fn export_all(&self) -> Result<ExportBundle, CoreError> {
        Ok(ExportBundle {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            deck: self.load_deck().await?,
            stats: self.load_stats().await?,
            settings: self.load_settings().await?,
        })
    }

    /// Replaces all records with the bundle's contents.
    async fn import_all(&self, bundle: ExportBundle) -> Result<(), CoreError> {
        if bundle.version == 0 || bundle.version > EXPORT_VERSION {
            return Err(CoreError::Invalid("unsupported export version"));
        }
        bundle.settings.validate()?;
        match &bundle.deck {
            Some(deck) => self.save_deck(deck).await?,
            None => self.clear_deck().await?,
        }
        self.save_stats(&bundle.stats).await?;
        self.save_settings(&bundle.settings).await
    }
}
