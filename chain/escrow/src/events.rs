//! Contract events emitted by engine operations
//!
//! Events are immutable records appended by each successful operation.
//! The engine keeps them in an append-only log readable (or drainable)
//! by the embedding host.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::fee::FeeRate;
use types::ids::{AccountId, OfferId, TokenId};

/// Offer created and its escrow pulled into custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferMade {
    pub offer_id: OfferId,
    pub maker: AccountId,
    pub offer_token: TokenId,
    pub offer_amount: Decimal,
    pub take_token: TokenId,
    pub take_amount: Decimal,
    pub fee_rate: FeeRate,
    /// offer_amount + maker_fee, held until settlement or cancellation
    pub escrowed: Decimal,
}

/// Offer settled atomically between maker and taker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTaken {
    pub offer_id: OfferId,
    pub taker: AccountId,
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
}

/// Offer withdrawn by its maker, escrow refunded in full
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCanceled {
    pub offer_id: OfferId,
    pub maker: AccountId,
    pub refunded: Decimal,
}

/// Global fee rate changed by governance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAdjusted {
    pub previous: FeeRate,
    pub current: FeeRate,
}

/// Token added to the supported allow-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAllowed {
    pub token: TokenId,
}

/// Token removed from the supported allow-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRevoked {
    pub token: TokenId,
}

/// One token round of an owner payout, reconciled against the true
/// custody balance delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnersPaid {
    pub token: TokenId,
    /// Sum of per-owner share amounts the round set out to pay
    pub intended: Decimal,
    /// balance_before - balance_after, the amount that actually left custody
    pub actually_paid: Decimal,
}

/// Enum wrapper for all escrow events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowEvent {
    OfferMade(OfferMade),
    OfferTaken(OfferTaken),
    OfferCanceled(OfferCanceled),
    FeeAdjusted(FeeAdjusted),
    TokenAllowed(TokenAllowed),
    TokenRevoked(TokenRevoked),
    OwnersPaid(OwnersPaid),
}
