//! Purchase request validation.
//!
//! Turns the raw configurator payload into a typed [`PurchaseOrder`] before
//! any allocation is attempted, so a rejected request never leaves state
//! behind.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::pricing::{calculate_price, MediaType, Skin, Zone};
use crate::types::{is_valid_lock_id, LockId, MAX_LOCK_ID, MIN_LOCK_ID};

/// Maximum characters in a lock message.
pub const MAX_CONTENT_LENGTH: u64 = 280;

/// Maximum characters in the author signature.
pub const MAX_AUTHOR_NAME_LENGTH: u64 = 80;

/// Maximum characters in a media URL.
pub const MAX_MEDIA_URL_LENGTH: u64 = 2048;

/// Configurator payload as submitted by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchaseRequest {
    pub zone: String,
    pub skin: String,
    #[validate(length(min = 1, max = MAX_CONTENT_LENGTH))]
    pub content_text: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[validate(url, length(max = MAX_MEDIA_URL_LENGTH))]
    pub media_url: Option<String>,
    #[serde(default)]
    pub custom_number: bool,
    #[validate(range(min = MIN_LOCK_ID, max = MAX_LOCK_ID))]
    pub selected_number: Option<LockId>,
    #[serde(default)]
    pub is_private: bool,
    #[validate(length(min = 1, max = MAX_AUTHOR_NAME_LENGTH))]
    pub author_name: String,
}

fn default_media_type() -> String {
    MediaType::None.as_str().to_string()
}

/// How the lock number is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberChoice {
    Random,
    Custom(LockId),
}

/// A validated, typed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub zone: Zone,
    pub skin: Skin,
    pub media_type: MediaType,
    pub media_url: Option<String>,
    pub content_text: String,
    pub author_name: String,
    pub number: NumberChoice,
    pub is_private: bool,
}

impl PurchaseOrder {
    /// Configuration price of this order (no scarcity premium).
    pub fn configuration_price(&self) -> rust_decimal::Decimal {
        calculate_price(
            self.zone,
            self.skin,
            self.media_type,
            matches!(self.number, NumberChoice::Custom(_)),
            self.is_private,
        )
    }
}

/// Validate a raw purchase request.
///
/// Unknown zone/skin/media names fail with [`CoreError::InvalidOption`];
/// every other problem is a [`CoreError::Validation`].
pub fn validate_purchase(request: &PurchaseRequest) -> Result<PurchaseOrder, CoreError> {
    request
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let zone: Zone = request.zone.parse()?;
    let skin: Skin = request.skin.parse()?;
    let media_type: MediaType = request.media_type.parse()?;

    let content_text = request.content_text.trim();
    if content_text.is_empty() {
        return Err(CoreError::Validation("content_text must not be blank".into()));
    }
    let author_name = request.author_name.trim();
    if author_name.is_empty() {
        return Err(CoreError::Validation("author_name must not be blank".into()));
    }

    let media_url = request
        .media_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    let media_url = match (media_type, media_url) {
        (MediaType::None, Some(_)) => {
            return Err(CoreError::Validation(
                "media_url must be omitted when media_type is none".into(),
            ))
        }
        (MediaType::None, None) => None,
        (_, None) => {
            return Err(CoreError::Validation(format!(
                "media_url is required for media_type {media_type}"
            )))
        }
        (_, Some(url)) if !url.starts_with("https://") => {
            return Err(CoreError::Validation("media_url must use https".into()))
        }
        (_, Some(url)) => Some(url.to_string()),
    };

    let number = match (request.custom_number, request.selected_number) {
        (true, Some(id)) if is_valid_lock_id(id) => NumberChoice::Custom(id),
        (true, Some(id)) => {
            return Err(CoreError::Validation(format!(
                "selected_number {id} must be between {MIN_LOCK_ID} and {MAX_LOCK_ID}"
            )))
        }
        (true, None) => {
            return Err(CoreError::Validation(
                "selected_number is required when custom_number is set".into(),
            ))
        }
        (false, _) => NumberChoice::Random,
    };

    Ok(PurchaseOrder {
        zone,
        skin,
        media_type,
        media_url,
        content_text: content_text.to_string(),
        author_name: author_name.to_string(),
        number,
        is_private: request.is_private,
    })
}
