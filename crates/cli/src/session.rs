use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use storeseed_admin::{AdminClient, AdminResult};
use storeseed_core::{JsonFile, SavedState};

use crate::config::AppConfig;

/// What one run of the tool works with: the client, the seed and save files,
/// and the records created so far.
pub struct Session {
    pub client: AdminClient,
    pub seed: JsonFile,
    pub save: JsonFile,
    pub state: SavedState,
}

impl Session {
    pub fn new(client: AdminClient, seed: JsonFile, save: JsonFile) -> Self {
        Self {
            client,
            seed,
            save,
            state: SavedState::new(),
        }
    }

    pub fn open(
        config: &AppConfig,
        data_file: Option<PathBuf>,
        save_file: Option<PathBuf>,
    ) -> Result<Self> {
        let client = AdminClient::new(config.api_config())?;
        let seed = JsonFile::new(data_file.unwrap_or_else(|| config.files.data.clone()));
        let save = JsonFile::new(save_file.unwrap_or_else(|| config.files.save.clone()));
        Ok(Self::new(client, seed, save))
    }

    /// Uses the session's records, or the save file's when this session has
    /// not created anything yet.
    pub async fn ensure_state(&mut self) -> Result<()> {
        if self.state.is_empty() {
            self.state = self.save.load().await?;
        }
        Ok(())
    }
}

/// Turns a recoverable API failure into a logged `None`; anything else
/// aborts the current action.
pub fn tolerate<T>(result: AdminResult<T>, action: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "{action} failed");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
