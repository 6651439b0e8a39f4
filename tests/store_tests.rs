//! Integration tests for the SQLite store.

use chrono::{TimeZone, Utc};
use kiroku::db::Store;
use kiroku::domain::{SortOrder, WorkMedia};
use kiroku::filter::FilterState;

async fn temp_store(name: &str) -> Store {
    let db_path = std::env::temp_dir().join(format!(
        "kiroku-store-test-{}-{}.db",
        name,
        std::process::id()
    ));
    // A leftover file from an aborted run would leak previous state.
    let _ = std::fs::remove_file(&db_path);

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create test store")
}

#[tokio::test]
async fn blank_token_write_is_a_no_op() {
    let store = temp_store("blank-token").await;

    store.save_access_token("annict", "tok-1").await.unwrap();
    store.save_access_token("annict", "").await.unwrap();
    store.save_access_token("annict", "   ").await.unwrap();

    let token = store.get_access_token("annict").await.unwrap();
    assert_eq!(token.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn token_round_trip_and_overwrite() {
    let store = temp_store("token-round-trip").await;

    assert_eq!(store.get_access_token("annict").await.unwrap(), None);

    store.save_access_token("annict", "tok-1").await.unwrap();
    store.save_access_token("annict", "tok-2").await.unwrap();
    assert_eq!(
        store.get_access_token("annict").await.unwrap().as_deref(),
        Some("tok-2")
    );

    // Providers are independent rows.
    store.save_access_token("anilist", "tok-al").await.unwrap();
    assert_eq!(
        store.get_access_token("annict").await.unwrap().as_deref(),
        Some("tok-2")
    );

    store.clear_access_token("annict").await.unwrap();
    assert_eq!(store.get_access_token("annict").await.unwrap(), None);
    assert_eq!(
        store.get_access_token("anilist").await.unwrap().as_deref(),
        Some("tok-al")
    );
}

#[tokio::test]
async fn custom_start_date_set_and_clear() {
    let store = temp_store("custom-start-date").await;

    let date = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    store.set_custom_start_date(42, date).await.unwrap();

    let details = store.get_work_details(42).await.unwrap().unwrap();
    assert_eq!(
        details.custom_started_at.as_deref(),
        Some(date.to_rfc3339().as_str())
    );

    // Updating overwrites in place.
    let later = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    store.set_custom_start_date(42, later).await.unwrap();
    let details = store.get_work_details(42).await.unwrap().unwrap();
    assert_eq!(
        details.custom_started_at.as_deref(),
        Some(later.to_rfc3339().as_str())
    );

    store.clear_custom_start_date(42).await.unwrap();
    let details = store.get_work_details(42).await.unwrap().unwrap();
    assert_eq!(details.custom_started_at, None);

    // Clearing an unknown work is fine.
    store.clear_custom_start_date(999).await.unwrap();
}

#[tokio::test]
async fn filter_prefs_round_trip() {
    let store = temp_store("filter-prefs").await;

    // Nothing saved yet: defaults come back.
    let loaded = store.load_filter_state().await.unwrap();
    assert_eq!(loaded, FilterState::default());

    let state = FilterState {
        selected_media: [WorkMedia::Tv, WorkMedia::Movie].into_iter().collect(),
        selected_years: [2024].into_iter().collect(),
        search_query: "frieren".to_string(),
        show_only_aired: true,
        sort_order: SortOrder::StartTimeDesc,
        ..FilterState::default()
    };

    store.save_filter_state(&state).await.unwrap();
    let loaded = store.load_filter_state().await.unwrap();
    assert_eq!(loaded, state);

    // Saving again replaces the single row.
    let reset = FilterState::default();
    store.save_filter_state(&reset).await.unwrap();
    let loaded = store.load_filter_state().await.unwrap();
    assert_eq!(loaded, reset);
}

#[tokio::test]
async fn image_cache_upserts() {
    let store = temp_store("image-cache").await;

    assert_eq!(store.get_cached_image(7).await.unwrap(), None);

    store
        .cache_image(7, "https://example.com/a.png")
        .await
        .unwrap();
    assert_eq!(
        store.get_cached_image(7).await.unwrap().as_deref(),
        Some("https://example.com/a.png")
    );

    store
        .cache_image(7, "https://example.com/b.png")
        .await
        .unwrap();
    assert_eq!(
        store.get_cached_image(7).await.unwrap().as_deref(),
        Some("https://example.com/b.png")
    );
}
