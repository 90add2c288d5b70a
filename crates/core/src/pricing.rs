//! Lock configuration price table and pure price calculation.
//!
//! Zones, skins, and media types are closed enums. Every price lookup is an
//! exhaustive `match`, so a new variant cannot ship without a price.
//! Unknown option strings are rejected with [`CoreError::InvalidOption`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Build a two-decimal currency amount from an integer number of cents.
pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

/// Round a currency amount to cents, midpoints away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

/// Placement tier on the bridge. Determines the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Standard,
    #[serde(rename = "Premium_Seine")]
    PremiumSeine,
    #[serde(rename = "Premium_Eiffel")]
    PremiumEiffel,
}

/// Lock material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skin {
    Iron,
    Gold,
    Ruby,
    Diamond,
}

/// Kind of media attached to a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    None,
    Photo,
    Audio,
    Video,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Standard, Zone::PremiumSeine, Zone::PremiumEiffel];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::PremiumSeine => "Premium_Seine",
            Self::PremiumEiffel => "Premium_Eiffel",
        }
    }

    /// Base price of the zone.
    pub fn price(self) -> Decimal {
        match self {
            Self::Standard => cents(999),
            Self::PremiumSeine => cents(1999),
            Self::PremiumEiffel => cents(2999),
        }
    }
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Iron, Skin::Gold, Skin::Ruby, Skin::Diamond];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iron => "Iron",
            Self::Gold => "Gold",
            Self::Ruby => "Ruby",
            Self::Diamond => "Diamond",
        }
    }

    pub fn price(self) -> Decimal {
        match self {
            Self::Iron => cents(0),
            Self::Gold => cents(499),
            Self::Ruby => cents(999),
            Self::Diamond => cents(1499),
        }
    }
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [
        MediaType::None,
        MediaType::Photo,
        MediaType::Audio,
        MediaType::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Photo => "photo",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    pub fn price(self) -> Decimal {
        match self {
            Self::None => cents(0),
            Self::Photo => cents(299),
            Self::Audio => cents(399),
            Self::Video => cents(499),
        }
    }
}

macro_rules! impl_option_parsing {
    ($ty:ty, $field:literal) => {
        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CoreError::InvalidOption {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_option_parsing!(Zone, "zone");
impl_option_parsing!(Skin, "skin");
impl_option_parsing!(MediaType, "media_type");

// ---------------------------------------------------------------------------
// Flat surcharges
// ---------------------------------------------------------------------------

/// Surcharge for choosing a specific lock number.
pub fn custom_number_price() -> Decimal {
    cents(999)
}

/// Surcharge for hiding the message from the public registry.
pub fn private_visibility_price() -> Decimal {
    cents(499)
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Every component of a configuration price, for display in the configurator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub zone: Decimal,
    pub skin: Decimal,
    pub media: Decimal,
    pub custom_number: Decimal,
    pub private_visibility: Decimal,
    pub total: Decimal,
}

/// Price each selected option and total them.
pub fn price_breakdown(
    zone: Zone,
    skin: Skin,
    media: MediaType,
    has_custom_number: bool,
    is_private: bool,
) -> PriceBreakdown {
    let custom_number = if has_custom_number {
        custom_number_price()
    } else {
        Decimal::ZERO
    };
    let private_visibility = if is_private {
        private_visibility_price()
    } else {
        Decimal::ZERO
    };

    let zone = zone.price();
    let skin = skin.price();
    let media = media.price();
    let total = round_cents(zone + skin + media + custom_number + private_visibility);

    PriceBreakdown {
        zone,
        skin,
        media,
        custom_number,
        private_visibility,
        total,
    }
}

/// Configuration price of a lock.
///
/// Scarcity premiums (resale or golden-asset prices) are not included; the
/// purchase flow adds them on top.
pub fn calculate_price(
    zone: Zone,
    skin: Skin,
    media: MediaType,
    has_custom_number: bool,
    is_private: bool,
) -> Decimal {
    price_breakdown(zone, skin, media, has_custom_number, is_private).total
}
