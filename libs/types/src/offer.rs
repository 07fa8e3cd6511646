//! Offer record and state machine
//!
//! An offer escrows `offer_amount + maker_fee` of the offered token from
//! creation until settlement or cancellation. State transitions are one-way:
//! `Open -> Executed` or `Open -> Canceled`, both terminal.

use crate::fee::FeeRate;
use crate::ids::{AccountId, OfferId, TokenId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offer state enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OfferState {
    /// Escrowed and fillable by any taker
    Open,
    /// Settled by a taker (terminal)
    Executed,
    /// Withdrawn by the maker (terminal)
    Canceled,
}

impl OfferState {
    /// Check if state is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OfferState::Executed | OfferState::Canceled)
    }
}

impl fmt::Display for OfferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfferState::Open => "OPEN",
            OfferState::Executed => "EXECUTED",
            OfferState::Canceled => "CANCELED",
        };
        write!(f, "{}", s)
    }
}

/// One trade proposal: `offer_amount` of `offer_token` for `take_amount`
/// of `take_token` at a fixed rate.
///
/// `fee_rate` is the protocol rate snapshotted at creation: a trade's cost
/// is fixed once proposed even if governance later changes the global rate.
/// Terminal offers are retained as an audit trail, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,

    // Parties
    pub maker: AccountId,
    pub taker: Option<AccountId>,

    // Legs, fixed at creation
    pub offer_token: TokenId,
    pub offer_amount: Decimal,
    pub take_token: TokenId,
    pub take_amount: Decimal,

    // Fee rate snapshot
    pub fee_rate: FeeRate,

    pub state: OfferState,

    // Timestamps (Unix nanos, supplied by the host)
    pub created_at: i64,
    pub settled_at: Option<i64>,
}

impl Offer {
    /// Create a new open offer with the fee rate snapshotted.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OfferId,
        maker: AccountId,
        offer_token: TokenId,
        offer_amount: Decimal,
        take_token: TokenId,
        take_amount: Decimal,
        fee_rate: FeeRate,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            maker,
            taker: None,
            offer_token,
            offer_amount,
            take_token,
            take_amount,
            fee_rate,
            state: OfferState::Open,
            created_at,
            settled_at: None,
        }
    }

    /// Fee owed by the maker, from the snapshotted rate.
    pub fn maker_fee(&self) -> Decimal {
        self.fee_rate.fee_on(self.offer_amount)
    }

    /// Fee owed by the taker, from the snapshotted rate.
    pub fn taker_fee(&self) -> Decimal {
        self.fee_rate.fee_on(self.take_amount)
    }

    /// Amount held in custody while the offer is open:
    /// `offer_amount + maker_fee`.
    pub fn escrow_total(&self) -> Decimal {
        self.offer_amount + self.maker_fee()
    }

    /// Check if the offer can still be taken or canceled
    pub fn is_open(&self) -> bool {
        matches!(self.state, OfferState::Open)
    }

    /// Mark the offer executed, recording the taker.
    pub fn execute(&mut self, taker: AccountId, timestamp: i64) {
        self.state = OfferState::Executed;
        self.taker = Some(taker);
        self.settled_at = Some(timestamp);
    }

    /// Mark the offer canceled.
    pub fn cancel(&mut self, timestamp: i64) {
        self.state = OfferState::Canceled;
        self.settled_at = Some(timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn sample_offer() -> Offer {
        Offer::new(
            OfferId::new(),
            AccountId::new("alice"),
            TokenId::new("ALPHA"),
            Decimal::from(50),
            TokenId::new("BETA"),
            Decimal::from(2000),
            FeeRate::try_new(dec("0.8")).unwrap(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_offer_creation() {
        let offer = sample_offer();
        assert_eq!(offer.state, OfferState::Open);
        assert!(offer.is_open());
        assert!(offer.taker.is_none());
        assert!(offer.settled_at.is_none());
    }

    #[test]
    fn test_fee_math() {
        let offer = sample_offer();
        assert_eq!(offer.maker_fee(), dec("0.4"));
        assert_eq!(offer.taker_fee(), Decimal::from(16));
        assert_eq!(offer.escrow_total(), dec("50.4"));
    }

    #[test]
    fn test_execute() {
        let mut offer = sample_offer();
        offer.execute(AccountId::new("bob"), 1708123456790000000);

        assert_eq!(offer.state, OfferState::Executed);
        assert!(!offer.is_open());
        assert_eq!(offer.taker, Some(AccountId::new("bob")));
        assert!(offer.settled_at.is_some());
    }

    #[test]
    fn test_cancel() {
        let mut offer = sample_offer();
        offer.cancel(1708123456790000000);

        assert_eq!(offer.state, OfferState::Canceled);
        assert!(!offer.is_open());
        assert!(offer.taker.is_none());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OfferState::Open.is_terminal());
        assert!(OfferState::Executed.is_terminal());
        assert!(OfferState::Canceled.is_terminal());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(OfferState::Open.to_string(), "OPEN");
        assert_eq!(OfferState::Executed.to_string(), "EXECUTED");
        assert_eq!(OfferState::Canceled.to_string(), "CANCELED");
    }

    #[test]
    fn test_offer_serialization() {
        let offer = sample_offer();
        let json = serde_json::to_string(&offer).unwrap();
        let deserialized: Offer = serde_json::from_str(&json).unwrap();
        assert_eq!(offer, deserialized);
    }

    #[test]
    fn test_state_serialization_uppercase() {
        let json = serde_json::to_string(&OfferState::Open).unwrap();
        assert_eq!(json, "\"OPEN\"");
    }
}
