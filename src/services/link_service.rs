//! Link management service
//!
//! Create and resolve logic shared by the HTTP router and the CLI.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::{CollisionPolicy, LinksConfig};
use crate::errors::{LinkgateError, Result};
use crate::services::token_generator::{RandomTokenGenerator, TokenGenerator};
use crate::storage::{Link, LinkStore};
use crate::utils::{UrlValidator, is_valid_token};

pub const INVALID_URL_MESSAGE: &str = "The provided URL is invalid.";
pub const INVALID_TOKEN_MESSAGE: &str = "The provided token is invalid.";

/// Tunables for link creation
#[derive(Debug, Clone, Copy)]
pub struct LinkPolicy {
    pub max_token_length: usize,
    pub collision_policy: CollisionPolicy,
    /// Upper bound on generate-and-insert rounds for generated tokens
    pub max_generate_attempts: u32,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::from(&LinksConfig::default())
    }
}

impl From<&LinksConfig> for LinkPolicy {
    /// `max_token_length` never drops below `token_length`, otherwise
    /// generated tokens could be stored but never resolved.
    fn from(config: &LinksConfig) -> Self {
        if config.token_length > config.max_token_length {
            warn!(
                "links.token_length ({}) exceeds links.max_token_length ({}), raising the maximum",
                config.token_length, config.max_token_length
            );
        }
        Self {
            max_token_length: config.max_token_length.max(config.token_length.max(1)),
            collision_policy: config.collision_policy,
            max_generate_attempts: config.max_generate_attempts.max(1),
        }
    }
}

/// Result of link creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub link: Link,
    /// Whether the token was generated rather than supplied
    pub generated_token: bool,
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn TokenGenerator>,
    url_validator: UrlValidator,
    policy: LinkPolicy,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn TokenGenerator>,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            url_validator: UrlValidator,
            policy,
        }
    }

    /// Service wired with the random generator configured by `[links]`.
    pub fn from_config(store: Arc<dyn LinkStore>, config: &LinksConfig) -> Self {
        Self::new(
            store,
            Arc::new(RandomTokenGenerator::new(config.token_length)),
            LinkPolicy::from(config),
        )
    }

    /// Register `destination_url` under `custom_token`, or under a fresh token
    /// when none (or an empty one) is given.
    ///
    /// Nothing is written when validation fails.
    pub async fn create_link(
        &self,
        destination_url: &str,
        custom_token: Option<&str>,
    ) -> Result<CreatedLink> {
        let custom_token = custom_token.filter(|t| !t.is_empty());

        if !self.url_validator.validate(destination_url) {
            debug!("Rejected destination url: {:?}", destination_url);
            return Err(LinkgateError::validation(INVALID_URL_MESSAGE));
        }

        match custom_token {
            Some(token) => self.create_with_custom_token(token, destination_url).await,
            None => self.create_with_generated_token(destination_url).await,
        }
    }

    async fn create_with_custom_token(
        &self,
        token: &str,
        destination_url: &str,
    ) -> Result<CreatedLink> {
        if !is_valid_token(token, self.policy.max_token_length) {
            debug!("Rejected custom token: {:?}", token);
            return Err(LinkgateError::validation(INVALID_TOKEN_MESSAGE));
        }

        match self.policy.collision_policy {
            CollisionPolicy::Overwrite => {
                self.store.put(token, destination_url).await?;
            }
            CollisionPolicy::Reject => {
                if !self.store.put_if_absent(token, destination_url).await? {
                    warn!("Custom token already taken: {}", token);
                    return Err(LinkgateError::token_conflict(format!(
                        "Token {} already exists.",
                        token
                    )));
                }
            }
        }

        info!("Created link {} -> {}", token, destination_url);
        Ok(CreatedLink {
            link: Link::new(token, destination_url),
            generated_token: false,
        })
    }

    async fn create_with_generated_token(&self, destination_url: &str) -> Result<CreatedLink> {
        for attempt in 1..=self.policy.max_generate_attempts {
            let token = self.generator.generate();
            if self.store.put_if_absent(&token, destination_url).await? {
                info!("Created link {} -> {}", token, destination_url);
                return Ok(CreatedLink {
                    link: Link::new(token, destination_url),
                    generated_token: true,
                });
            }
            debug!(
                "Generated token {} collided (attempt {}/{})",
                token, attempt, self.policy.max_generate_attempts
            );
        }

        warn!(
            "Gave up generating a token after {} attempts",
            self.policy.max_generate_attempts
        );
        Err(LinkgateError::token_exhausted(format!(
            "no free token after {} attempts",
            self.policy.max_generate_attempts
        )))
    }

    /// Destination for `token`, `Ok(None)` when unknown.
    ///
    /// Strings that cannot be tokens are answered without touching the store.
    pub async fn resolve_link(&self, token: &str) -> Result<Option<String>> {
        if !is_valid_token(token, self.policy.max_token_length) {
            trace!("Invalid token rejected: {:?}", token);
            return Ok(None);
        }
        self.store.get(token).await
    }
}
