//! Public projections of stored locks.

use lovelock_core::error::CoreError;
use lovelock_core::types::{LockId, Timestamp, UserId};
use lovelock_db::models::lock::Lock;
use rust_decimal::Decimal;
use serde::Serialize;

/// A lock as shown on the bridge and in the marketplace.
///
/// The owner id is never exposed. On private locks the message, signature
/// and media are only included for the owner.
#[derive(Debug, Clone, Serialize)]
pub struct LockView {
    pub id: LockId,
    pub zone: String,
    pub skin: String,
    pub content_text: Option<String>,
    pub author_name: Option<String>,
    pub media_type: String,
    pub media_url: Option<String>,
    pub is_private: bool,
    pub status: &'static str,
    /// Price at which the lock can be bought right now, if listed.
    pub listing_price: Option<Decimal>,
    pub views: i64,
    pub is_owner: bool,
    pub created_at: Timestamp,
}

impl LockView {
    pub fn new(lock: Lock, viewer: Option<UserId>) -> Result<Self, CoreError> {
        let state = lock.state()?;
        let is_owner = viewer.is_some_and(|v| lock.is_owned_by(v));
        let reveal = !lock.is_private || is_owner;

        Ok(Self {
            id: lock.id,
            zone: lock.zone,
            skin: lock.skin,
            content_text: reveal.then_some(lock.content_text),
            author_name: reveal.then_some(lock.author_name),
            media_type: lock.media_type,
            media_url: if reveal { lock.media_url } else { None },
            is_private: lock.is_private,
            status: state.status.as_str(),
            listing_price: state.listing_price(),
            views: lock.views,
            is_owner,
            created_at: lock.created_at,
        })
    }

    pub fn many(locks: Vec<Lock>, viewer: Option<UserId>) -> Result<Vec<Self>, CoreError> {
        locks.into_iter().map(|l| Self::new(l, viewer)).collect()
    }
}
