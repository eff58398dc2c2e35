//! Base URL derivation for shortened links

use tracing::warn;

use crate::api::request::Headers;
use crate::config::RoutingConfig;

/// Derives the externally visible base URL (`https://host[/stage]/redirect`).
///
/// Gateway-native hosts keep the stage segment in their paths; a custom
/// domain mapped in front of the gateway strips it.
#[derive(Debug, Clone)]
pub struct DomainResolver {
    gateway_domain: String,
    placeholder_base_url: String,
    resource: String,
}

impl DomainResolver {
    pub fn new(
        gateway_domain: impl Into<String>,
        placeholder_base_url: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            gateway_domain: gateway_domain.into(),
            placeholder_base_url: placeholder_base_url.into(),
            resource: resource.into().trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(
            config.gateway_domain.clone(),
            config.placeholder_base_url.clone(),
            config.resource.clone(),
        )
    }

    pub fn resolve(&self, headers: Option<&Headers>, stage: Option<&str>) -> String {
        let Some(host) = headers.and_then(Headers::host) else {
            return self.placeholder_base_url.clone();
        };

        if host.contains(self.gateway_domain.as_str()) {
            match stage.filter(|s| !s.is_empty()) {
                Some(stage) => return format!("https://{}/{}/{}", host, stage, self.resource),
                None => warn!("Gateway host {} without a stage in the request context", host),
            }
        }

        format!("https://{}/{}", host, self.resource)
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
