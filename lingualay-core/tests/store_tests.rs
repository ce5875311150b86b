use lingualay_core::{
    Card, Deck, ExportBundle, MemoryStore, Settings, Store, Theme, EXPORT_VERSION,
};

#[tokio::test]
async fn export_and_import_round_trip() {
    let src = MemoryStore::with_deck(Deck::new("D", "", vec![Card::new("q", "a")]));
    let settings = Settings { theme: Theme::Dark, ..Settings::default() };
    src.save_settings(&settings).await.unwrap();

    let bundle = src.export_all().await.unwrap();
    assert_eq!(bundle.version, EXPORT_VERSION);

    let dst = MemoryStore::new();
    dst.import_all(bundle.clone()).await.unwrap();
    assert_eq!(dst.load_deck().await.unwrap(), bundle.deck);
    assert_eq!(dst.load_settings().await.unwrap().theme, Theme::Dark);
}

#[tokio::test]
async fn import_rejects_unknown_version_and_bad_settings() {
    let store = MemoryStore::new();
    let mut bundle: ExportBundle = store.export_all().await.unwrap();
    bundle.version = EXPORT_VERSION + 1;
    assert!(store.import_all(bundle.clone()).await.is_err());

    bundle.version = EXPORT_VERSION;
    bundle.settings.new_cards_per_day = 0;
    assert!(store.import_all(bundle).await.is_err());
}

#[tokio::test]
async fn clear_all_resets_everything() {
    let store = MemoryStore::with_deck(Deck::new("D", "", vec![]));
    store.save_settings(&Settings { show_timer: false, ..Settings::default() }).await.unwrap();
    store.clear_all().await.unwrap();
    assert!(store.load_deck().await.unwrap().is_none());
    assert_eq!(store.load_settings().await.unwrap(), Settings::default());
}
