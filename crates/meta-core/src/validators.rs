//! Input validation
//!
//! Pure, side-effect-free checks run before any adapter call. A request that
//! fails here must never reach the network.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{MetaError, Result};
use crate::models::Platform;

static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid E.164 pattern"));

/// Check a phone number against E.164 format (`+` then 2-15 digits, first
/// digit 1-9).
pub fn validate_e164_phone(phone: &str) -> bool {
    E164_RE.is_match(phone)
}

/// WhatsApp recipient ids must be E.164 phone numbers.
pub fn validate_whatsapp_recipient(recipient_id: &str) -> Result<()> {
    if !validate_e164_phone(recipient_id) {
        return Err(MetaError::validation(format!(
            "WhatsApp recipient_id must be in E.164 format (e.g., +380991234567), got: {recipient_id}"
        )));
    }
    Ok(())
}

/// A URL is acceptable when it parses with an http/https scheme and a
/// non-empty host.
pub fn validate_url(url: &str) -> Result<()> {
    let parsed =
        Url::parse(url).map_err(|e| MetaError::validation(format!("Invalid URL: {url} - {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(MetaError::validation(format!(
            "URL must use http or https protocol: {url}"
        )));
    }
    if parsed.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(MetaError::validation(format!("Invalid URL: {url}")));
    }
    Ok(())
}

/// Validate an optional media URL.
pub fn validate_media_url(media_url: Option<&str>) -> Result<()> {
    match media_url {
        Some(url) => validate_url(url),
        None => Ok(()),
    }
}

/// `get_messages` needs at least one identifier to resolve a thread.
pub fn validate_get_messages_request(
    conversation_id: Option<&str>,
    recipient_id: Option<&str>,
) -> Result<()> {
    let has_conversation = conversation_id.is_some_and(|id| !id.is_empty());
    let has_recipient = recipient_id.is_some_and(|id| !id.is_empty());
    if !has_conversation && !has_recipient {
        return Err(MetaError::validation(
            "Either conversation_id or recipient_id must be provided",
        ));
    }
    Ok(())
}

/// `post_content` needs text or media; Instagram additionally requires media
/// (the adapter enforces the same rule, both must agree).
pub fn validate_post_content_request(
    platform: Platform,
    content: Option<&str>,
    media_urls: Option<&[String]>,
) -> Result<()> {
    let has_content = content.is_some_and(|c| !c.is_empty());
    let has_media = media_urls.is_some_and(|urls| !urls.is_empty());

    if !has_content && !has_media {
        return Err(MetaError::validation(
            "At least one of content or media_urls must be provided",
        ));
    }

    if platform == Platform::Instagram && !has_media {
        return Err(MetaError::validation(
            "Instagram posts require media_urls (text-only posts not supported)",
        ));
    }

    if let Some(urls) = media_urls {
        for url in urls {
            validate_url(url)?;
        }
    }

    Ok(())
}
