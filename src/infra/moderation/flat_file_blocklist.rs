// Flat-file persistence for the scam domain blocklist.
//
// One hostname per line. The whole file is rewritten on every save.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::moderation::{BlocklistError, BlocklistStore};

pub struct FlatFileBlocklistStore {
    path: PathBuf,
}

impl FlatFileBlocklistStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl BlocklistStore for FlatFileBlocklistStore {
    async fn load(&self) -> Result<Vec<String>, BlocklistError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BlocklistError::Store(e.to_string())),
        };

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn save(&self, domains: &[String]) -> Result<(), BlocklistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BlocklistError::Store(e.to_string()))?;
        }

        let mut text = domains.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }

        fs::write(&self.path, text)
            .await
            .map_err(|e| BlocklistError::Store(e.to_string()))
    }
}
