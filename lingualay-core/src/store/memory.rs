use crate::{CoreError, Deck, Settings, Store, StudyStats};
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    deck: RwLock<Option<Deck>>,
    stats: RwLock<StudyStats>,
    settings: RwLock<Settings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck(deck: Deck) -> Self {
        let store = Self::default();
        *store.deck.write() = Some(deck);
        store
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load_deck(&self) -> Result<Option<Deck>, CoreError> {
        Ok(self.deck.read().clone())
    }

    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError> {
        *self.deck.write() = Some(deck.clone());
        Ok(())
    }

    async fn clear_deck(&self) -> Result<(), CoreError> {
        self.deck.write().take();
        Ok(())
    }

    async fn load_stats(&self) -> Result<StudyStats, CoreError> {
        Ok(self.stats.read().clone())
    }

    async fn save_stats(&self, stats: &StudyStats) -> Result<(), CoreError> {
        *self.stats.write() = stats.clone();
        Ok(())
    }

    async fn load_settings(&self) -> Result<Settings, CoreError> {
        Ok(self.settings.read().clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), CoreError> {
        settings.validate()?;
        *self.settings.write() = settings.clone();
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), CoreError> {
        self.deck.write().take();
        *self.stats.write() = StudyStats::default();
        *self.settings.write() = Settings::default();
        Ok(())
    }
}
