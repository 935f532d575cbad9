use std::path::PathBuf;

use stagecraft_application::PreferenceStore;
use stagecraft_core::AppError;
use uuid::Uuid;

use super::FilePreferenceStore;

fn scratch_path() -> PathBuf {
    std::env::temp_dir().join(format!("stagecraft-preferences-{}.json", Uuid::new_v4()))
}

#[tokio::test]
async fn a_missing_file_reads_as_not_completed() {
    let store = FilePreferenceStore::new(scratch_path());

    let loaded = store.load_onboarding_completed().await;
    assert!(loaded.is_ok());
    assert!(!loaded.unwrap_or(true));
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let path = scratch_path();
    let store = FilePreferenceStore::new(&path);

    assert!(store.save_onboarding_completed(true).await.is_ok());
    let loaded = store.load_onboarding_completed().await;
    assert!(loaded.is_ok());
    assert!(loaded.unwrap_or(false));

    assert!(store.save_onboarding_completed(false).await.is_ok());
    let reloaded = store.load_onboarding_completed().await;
    assert!(reloaded.is_ok());
    assert!(!reloaded.unwrap_or(true));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn the_flag_survives_a_new_store_instance() {
    let path = scratch_path();

    let writer = FilePreferenceStore::new(&path);
    assert!(writer.save_onboarding_completed(true).await.is_ok());

    let reader = FilePreferenceStore::new(&path);
    let loaded = reader.load_onboarding_completed().await;
    assert!(loaded.is_ok());
    assert!(loaded.unwrap_or(false));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn missing_parent_directories_are_created() {
    let path = std::env::temp_dir()
        .join(format!("stagecraft-preferences-{}", Uuid::new_v4()))
        .join("nested")
        .join("preferences.json");
    let store = FilePreferenceStore::new(&path);

    assert!(store.save_onboarding_completed(true).await.is_ok());
    let loaded = store.load_onboarding_completed().await;
    assert!(loaded.is_ok());
    assert!(loaded.unwrap_or(false));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn a_corrupt_file_surfaces_a_decode_error() {
    let path = scratch_path();
    let written = tokio::fs::write(&path, b"{not json").await;
    assert!(written.is_ok());

    let store = FilePreferenceStore::new(&path);
    let loaded = store.load_onboarding_completed().await;
    assert!(matches!(loaded, Err(AppError::Decode(_))));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn unknown_fields_are_tolerated() {
    let path = scratch_path();
    let written = tokio::fs::write(
        &path,
        br#"{"onboardingCompleted": true, "themePreference": "dark"}"#,
    )
    .await;
    assert!(written.is_ok());

    let store = FilePreferenceStore::new(&path);
    let loaded = store.load_onboarding_completed().await;
    assert!(loaded.is_ok());
    assert!(loaded.unwrap_or(false));

    let _ = tokio::fs::remove_file(&path).await;
}
