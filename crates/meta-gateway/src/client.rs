//! Adapter dispatch and retry
//!
//! [`MetaClient`] resolves the adapter for a platform from the configured
//! credentials (or the mock adapter in demo mode) and wraps the send
//! operation in a bounded retry. The other three operations surface their
//! first failure immediately.

use std::time::Duration;

use tracing::{info, warn};

use meta_core::error::{MetaError, Result};
use meta_core::models::{Platform, SendReceipt};
use meta_core::{MockAdapter, PlatformAdapter, Settings};
use meta_facebook::FacebookAdapter;
use meta_instagram::InstagramAdapter;
use meta_whatsapp::WhatsAppAdapter;

/// Retry policy for send_message: 3 attempts, exponential backoff starting
/// at 1s, capped at 10s.
const MAX_SEND_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Platform adapter factory bound to one immutable settings value.
#[derive(Debug, Clone)]
pub struct MetaClient {
    settings: Settings,
}

impl MetaClient {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve the adapter for a platform.
    ///
    /// Demo mode always yields the mock adapter, regardless of credentials.
    /// Otherwise incomplete configuration fails with an authentication
    /// error before any network activity.
    pub fn get_adapter(&self, platform: Platform) -> Result<Box<dyn PlatformAdapter>> {
        if self.settings.demo_mode {
            info!(platform = %platform, "using mock adapter (demo mode)");
            return Ok(Box::new(MockAdapter::new(platform)));
        }

        if !self.settings.validate_platform_config(platform) {
            return Err(MetaError::auth(format!(
                "Platform '{platform}' is not configured. \
                 Please provide the required access token."
            )));
        }

        let token = self
            .settings
            .platform_token(platform)
            .ok_or_else(|| {
                MetaError::auth(format!("No access token configured for platform: {platform}"))
            })?;
        let api_version = &self.settings.meta_api_version;

        let adapter: Box<dyn PlatformAdapter> = match (platform, &self.settings.graph_base_url) {
            (Platform::Facebook, None) => Box::new(FacebookAdapter::new(token, api_version)?),
            (Platform::Facebook, Some(base)) => {
                Box::new(FacebookAdapter::with_base_url(token, base)?)
            }
            (Platform::Instagram, None) => Box::new(InstagramAdapter::new(token, api_version)?),
            (Platform::Instagram, Some(base)) => {
                Box::new(InstagramAdapter::with_base_url(token, base)?)
            }
            (Platform::Whatsapp, None) => Box::new(WhatsAppAdapter::new(
                token,
                &self.settings.whatsapp_phone_number_id,
                api_version,
            )?),
            (Platform::Whatsapp, Some(base)) => Box::new(WhatsAppAdapter::with_base_url(
                token,
                &self.settings.whatsapp_phone_number_id,
                base,
            )?),
        };

        Ok(adapter)
    }

    /// Send a message, retrying transient failures.
    ///
    /// The adapter is re-resolved on every attempt; the final failure is
    /// re-raised unchanged once the attempts are exhausted.
    pub async fn send_message_with_retry(
        &self,
        platform: Platform,
        recipient_id: &str,
        content: &str,
        media_url: Option<&str>,
    ) -> Result<SendReceipt> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 1;

        loop {
            let result = async {
                let adapter = self.get_adapter(platform)?;
                adapter.send_message(recipient_id, content, media_url).await
            }
            .await;

            match result {
                Ok(receipt) => return Ok(receipt),
                Err(err) if attempt < MAX_SEND_ATTEMPTS => {
                    warn!(
                        platform = %platform,
                        attempt,
                        error = %err,
                        "send_message failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
