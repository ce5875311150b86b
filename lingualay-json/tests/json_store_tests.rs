use lingualay_core::{Card, Deck, Settings, Store, StudyStats, Theme};
use lingualay_json::JsonStore;
use std::fs;

fn deck() -> Deck {
    Deck::new("French", "greetings", vec![Card::new("bonjour", "hello"), Card::new("merci", "thanks")])
}

#[tokio::test]
async fn fresh_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
    assert!(store.load_deck().await.unwrap().is_none());
    assert_eq!(store.load_settings().await.unwrap(), Settings::default());
    assert_eq!(store.load_stats().await.unwrap(), StudyStats::default());
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let original = deck();
    {
        let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
        store.save_deck(&original).await.unwrap();
        store
            .save_settings(&Settings { theme: Theme::Dark, new_cards_per_day: 5, ..Settings::default() })
            .await
            .unwrap();
        let mut stats = StudyStats::default();
        stats.streak = 4;
        store.save_stats(&stats).await.unwrap();
    }

    let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
    assert_eq!(store.load_deck().await.unwrap(), Some(original));
    let settings = store.load_settings().await.unwrap();
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.new_cards_per_day, 5);
    assert_eq!(store.load_stats().await.unwrap().streak, 4);

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"currentDeck\""));
    assert!(raw.contains("\"totalCards\": 2"));
}

#[tokio::test]
async fn backups_are_rotated() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 2).await.unwrap();
    for _ in 0..5 {
        store.save_deck(&deck()).await.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    let backups = fs::read_dir(store.backups_dir()).unwrap().count();
    assert_eq!(backups, 2);
}

#[tokio::test]
async fn invalid_settings_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 2).await.unwrap();
    let bad = Settings { max_review_time_minutes: 0, ..Settings::default() };
    assert!(store.save_settings(&bad).await.is_err());
    assert_eq!(store.load_settings().await.unwrap(), Settings::default());
}

#[tokio::test]
async fn clear_and_import_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 2).await.unwrap();
    store.save_deck(&deck()).await.unwrap();
    let bundle = store.export_all().await.unwrap();

    store.clear_all().await.unwrap();
    assert!(store.load_deck().await.unwrap().is_none());

    store.import_all(bundle).await.unwrap();
    assert_eq!(store.load_deck().await.unwrap().unwrap().name, "French");
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lingualay.json"), "{ not json").unwrap();
    assert!(JsonStore::open_in(dir.path(), 2).await.is_err());
}
