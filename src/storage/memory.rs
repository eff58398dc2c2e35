use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::trace;

use super::LinkStore;
use crate::errors::Result;

/// In-process store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, String>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn put(&self, token: &str, destination_url: &str) -> Result<()> {
        trace!("MemoryLinkStore::put {}", token);
        self.links
            .insert(token.to_string(), destination_url.to_string());
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<String>> {
        Ok(self.links.get(token).map(|v| v.value().clone()))
    }

    async fn put_if_absent(&self, token: &str, destination_url: &str) -> Result<bool> {
        match self.links.entry(token.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(destination_url.to_string());
                Ok(true)
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
