use serde::{Deserialize, Serialize};

/// The single persisted entity: a token and the URL it redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub token: String,
    pub destination_url: String,
}

impl Link {
    pub fn new(token: impl Into<String>, destination_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            destination_url: destination_url.into(),
        }
    }
}
