use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::{Link, LinkStore};
use crate::errors::{LinkgateError, Result};

/// JSON file store. The whole collection is kept in memory and rewritten to
/// `{data_dir}/{table}.json` on every write.
pub struct FileLinkStore {
    file_path: PathBuf,
    links: RwLock<HashMap<String, String>>,
}

impl FileLinkStore {
    pub async fn open(data_dir: impl AsRef<Path>, table: &str) -> Result<Self> {
        if table.is_empty() {
            return Err(LinkgateError::storage_config("storage table name is empty"));
        }

        let file_path = data_dir.as_ref().join(format!("{}.json", table));
        let links = Self::load_from_file(&file_path).await?;
        info!(
            "FileLinkStore loaded {} links from {}",
            links.len(),
            file_path.display()
        );

        Ok(Self {
            file_path,
            links: RwLock::new(links),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn load_from_file(path: &Path) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let links: Vec<Link> = serde_json::from_str(&content).map_err(|e| {
                    error!("Failed to parse links file {}: {}", path.display(), e);
                    LinkgateError::serialization(format!(
                        "failed to parse {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(links
                    .into_iter()
                    .map(|link| (link.token, link.destination_url))
                    .collect())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Links file {} missing, creating it", path.display());
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(path, "[]").await?;
                Ok(HashMap::new())
            }
            Err(e) => Err(LinkgateError::file_operation(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn save_to_file(&self, links: &HashMap<String, String>) -> Result<()> {
        let mut records: Vec<Link> = links
            .iter()
            .map(|(token, url)| Link::new(token.clone(), url.clone()))
            .collect();
        records.sort_by(|a, b| a.token.cmp(&b.token));

        let json = serde_json::to_string_pretty(&records)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkStore for FileLinkStore {
    async fn put(&self, token: &str, destination_url: &str) -> Result<()> {
        // the write lock is held across the file write so saves never interleave
        let mut links = self.links.write().await;
        let previous = links.insert(token.to_string(), destination_url.to_string());
        if let Err(e) = self.save_to_file(&links).await {
            match previous {
                Some(url) => links.insert(token.to_string(), url),
                None => links.remove(token),
            };
            return Err(LinkgateError::storage_operation(e.message().to_string()));
        }
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<String>> {
        Ok(self.links.read().await.get(token).cloned())
    }

    async fn put_if_absent(&self, token: &str, destination_url: &str) -> Result<bool> {
        let mut links = self.links.write().await;
        if links.contains_key(token) {
            return Ok(false);
        }
        links.insert(token.to_string(), destination_url.to_string());
        if let Err(e) = self.save_to_file(&links).await {
            links.remove(token);
            return Err(LinkgateError::storage_operation(e.message().to_string()));
        }
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
