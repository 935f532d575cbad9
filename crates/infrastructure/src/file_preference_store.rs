//! Local preference persistence on the filesystem.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stagecraft_application::PreferenceStore;
use stagecraft_core::{AppError, AppResult};
use tokio::fs;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceFile {
    #[serde(default)]
    onboarding_completed: bool,
}

/// Preference store keeping one small JSON file on disk.
///
/// The file survives process restarts and disappears only with the app's
/// data directory. Writes go through a sibling temp file and a rename so a
/// crash mid-write cannot leave a half-written file behind.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store persisting to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self.path.as_os_str().to_owned();
        file_name.push(".tmp");
        PathBuf::from(file_name)
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load_onboarding_completed(&self) -> AppResult<bool> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(false),
            Err(error) => {
                return Err(AppError::Store(format!(
                    "reading preference file '{}': {error}",
                    self.path.display()
                )));
            }
        };

        let preferences: PreferenceFile = serde_json::from_slice(&bytes).map_err(|error| {
            AppError::Decode(format!(
                "preference file '{}' is corrupt: {error}",
                self.path.display()
            ))
        })?;
        Ok(preferences.onboarding_completed)
    }

    async fn save_onboarding_completed(&self, completed: bool) -> AppResult<()> {
        let preferences = PreferenceFile {
            onboarding_completed: completed,
        };
        let bytes = serde_json::to_vec_pretty(&preferences).map_err(|error| {
            AppError::Internal(format!("encoding preferences: {error}"))
        })?;

        let write_error = |error: std::io::Error| {
            AppError::Store(format!(
                "writing preference file '{}': {error}",
                self.path.display()
            ))
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes).await.map_err(write_error)?;
        fs::rename(&temp_path, &self.path).await.map_err(write_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
