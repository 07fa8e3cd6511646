//! Offer lifecycle engine
//!
//! Implements make/take/cancel over injected state handles: the offer
//! store, the fee ledger, the token registry, and the governance state.
//! Every public operation is one atomic unit of work: a failure anywhere
//! leaves the store, the ledger, and the token balances exactly as they
//! were. The engine is a single-threaded value type; `&mut self` on every
//! mutating operation serializes callers, and a host embedding it in a
//! concurrent service must wrap it in its own exclusive lock.

use rust_decimal::Decimal;
use tracing::info;
use types::fee::FeeRate;
use types::ids::{AccountId, OfferId, TokenId};
use types::offer::Offer;

use crate::errors::{GovernanceError, OfferError, TransferError};
use crate::events::{
    EscrowEvent, FeeAdjusted, OfferCanceled, OfferMade, OfferTaken, TokenAllowed, TokenRevoked,
};
use crate::gateway::TokenRegistry;
use crate::governance::{OwnerSet, TokenAllowList};
use crate::ledger::FeeLedger;
use crate::store::OfferStore;

/// Escrow engine: custody, offer lifecycle, fee accrual, governance.
///
/// Fields are crate-visible for the payout module, which settles the fee
/// ledger against the same custody state.
pub struct EscrowEngine {
    /// The engine's own custody identity on every token contract
    pub(crate) address: AccountId,
    pub(crate) registry: TokenRegistry,
    pub(crate) supported: TokenAllowList,
    pub(crate) owners: OwnerSet,
    pub(crate) fee_rate: FeeRate,
    pub(crate) offers: OfferStore,
    pub(crate) fees: FeeLedger,
    /// Emitted events log (append-only)
    pub(crate) events: Vec<EscrowEvent>,
}

impl EscrowEngine {
    /// Create an engine with its custody address, the configuration-time
    /// token registry, the owner set, and the initial fee rate.
    pub fn new(
        address: AccountId,
        registry: TokenRegistry,
        owners: OwnerSet,
        fee_rate: FeeRate,
    ) -> Self {
        Self {
            address,
            registry,
            supported: TokenAllowList::new(),
            owners,
            fee_rate,
            offers: OfferStore::new(),
            fees: FeeLedger::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Offer Lifecycle ─────────────────────────

    /// Create an offer: `offer_amount` of `offer_token` for `take_amount`
    /// of `take_token`, escrowing `offer_amount + maker_fee` from the
    /// caller.
    ///
    /// No record is created if the escrow pull fails.
    pub fn make_offer(
        &mut self,
        caller: &AccountId,
        offer_token: TokenId,
        offer_amount: Decimal,
        take_token: TokenId,
        take_amount: Decimal,
        now: i64,
    ) -> Result<OfferId, OfferError> {
        if offer_amount <= Decimal::ZERO || take_amount <= Decimal::ZERO {
            return Err(OfferError::InvalidAmount);
        }
        for token in [&offer_token, &take_token] {
            if !self.supported.is_supported(token) {
                return Err(OfferError::UnsupportedToken {
                    token: token.to_string(),
                });
            }
        }

        let id = OfferId::new();
        if self.offers.contains(&id) {
            // Caller-retryable; v7 ids make this practically unreachable
            return Err(OfferError::IdCollision { id: id.to_string() });
        }

        let offer = Offer::new(
            id,
            caller.clone(),
            offer_token,
            offer_amount,
            take_token,
            take_amount,
            self.fee_rate,
            now,
        );
        let escrowed = offer.escrow_total();

        // Pull the escrow before persisting anything: a failed pull aborts
        // the whole operation with no record behind it.
        self.registry
            .gateway_mut(&offer.offer_token)?
            .transfer_from(&self.address, escrowed, &self.address, caller)?;

        let event = OfferMade {
            offer_id: id,
            maker: offer.maker.clone(),
            offer_token: offer.offer_token.clone(),
            offer_amount: offer.offer_amount,
            take_token: offer.take_token.clone(),
            take_amount: offer.take_amount,
            fee_rate: offer.fee_rate,
            escrowed,
        };
        let inserted = self.offers.insert(offer);
        debug_assert!(inserted, "collision was checked before the escrow pull");
        self.events.push(EscrowEvent::OfferMade(event));

        info!(offer_id = %id, maker = %caller, %escrowed, "offer made");
        Ok(id)
    }

    /// Fulfill an open offer: pull `take_amount + taker_fee` from the
    /// caller, push `take_amount` to the maker and the escrowed
    /// `offer_amount` to the caller, and accrue both fees.
    ///
    /// The three transfers and the state transition are one atomic unit.
    pub fn take_offer(
        &mut self,
        caller: &AccountId,
        offer_id: OfferId,
        now: i64,
    ) -> Result<(), OfferError> {
        let offer = self
            .offers
            .get(&offer_id)
            .ok_or_else(|| OfferError::NotFound {
                id: offer_id.to_string(),
            })?
            .clone();
        if !offer.is_open() {
            return Err(OfferError::NotOpen {
                state: offer.state.to_string(),
            });
        }

        // Fees come from the stored snapshot, never the live rate
        let maker_fee = offer.maker_fee();
        let taker_fee = offer.taker_fee();
        let take_total = offer.take_amount + taker_fee;

        // Pull the take side into custody first: it is the only leg that
        // can legitimately fail while the offer-side escrow is held.
        self.registry
            .gateway_mut(&offer.take_token)?
            .transfer_from(&self.address, take_total, &self.address, caller)?;

        // Custody now holds the maker escrow plus the pull above, so both
        // outgoing legs are covered; verify before pushing and undo the
        // pull if a non-conforming token broke the invariant.
        if let Err(err) = self.ensure_custody(&offer) {
            self.registry
                .gateway_mut(&offer.take_token)?
                .transfer(&self.address, take_total, caller)?;
            return Err(err.into());
        }

        self.registry
            .gateway_mut(&offer.take_token)?
            .transfer(&self.address, offer.take_amount, &offer.maker)?;
        self.registry
            .gateway_mut(&offer.offer_token)?
            .transfer(&self.address, offer.offer_amount, caller)?;

        // Custody retains maker_fee + taker_fee as undistributed revenue
        self.fees.accrue(&offer.offer_token, maker_fee);
        self.fees.accrue(&offer.take_token, taker_fee);

        let stored = self
            .offers
            .get_mut(&offer_id)
            .ok_or_else(|| OfferError::NotFound {
                id: offer_id.to_string(),
            })?;
        stored.execute(caller.clone(), now);

        self.events.push(EscrowEvent::OfferTaken(OfferTaken {
            offer_id,
            taker: caller.clone(),
            maker_fee,
            taker_fee,
        }));

        info!(offer_id = %offer_id, taker = %caller, %maker_fee, %taker_fee, "offer executed");
        Ok(())
    }

    /// Withdraw an open offer, returning the full escrow
    /// (`offer_amount + maker_fee`) to the maker. Maker only; no fee is
    /// accrued.
    pub fn cancel_offer(
        &mut self,
        caller: &AccountId,
        offer_id: OfferId,
        now: i64,
    ) -> Result<(), OfferError> {
        let offer = self
            .offers
            .get(&offer_id)
            .ok_or_else(|| OfferError::NotFound {
                id: offer_id.to_string(),
            })?
            .clone();
        if !offer.is_open() {
            return Err(OfferError::NotOpen {
                state: offer.state.to_string(),
            });
        }
        if offer.maker != *caller {
            return Err(OfferError::Unauthorized);
        }

        let refunded = offer.escrow_total();
        self.registry
            .gateway_mut(&offer.offer_token)?
            .transfer(&self.address, refunded, caller)?;

        let stored = self
            .offers
            .get_mut(&offer_id)
            .ok_or_else(|| OfferError::NotFound {
                id: offer_id.to_string(),
            })?;
        stored.cancel(now);

        self.events.push(EscrowEvent::OfferCanceled(OfferCanceled {
            offer_id,
            maker: caller.clone(),
            refunded,
        }));

        info!(offer_id = %offer_id, %refunded, "offer canceled");
        Ok(())
    }

    // ───────────────────────── Governance ─────────────────────────

    /// Set the global fee rate for future offers. Owner-only; rejects
    /// rates outside `[0, 10]`. Already-created offers keep their
    /// snapshot.
    pub fn adjust_fee(&mut self, caller: &AccountId, rate: Decimal) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        let current = FeeRate::try_new(rate)?;
        let previous = self.fee_rate;
        self.fee_rate = current;

        self.events
            .push(EscrowEvent::FeeAdjusted(FeeAdjusted { previous, current }));

        info!(%previous, %current, "fee rate adjusted");
        Ok(())
    }

    /// Add a token to the supported allow-list. Owner-only; the token
    /// must already have a registered gateway.
    pub fn allow_token(
        &mut self,
        caller: &AccountId,
        token: TokenId,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        if !self.registry.contains(&token) {
            return Err(GovernanceError::UnknownToken {
                token: token.to_string(),
            });
        }
        self.supported.allow(token.clone());
        self.events
            .push(EscrowEvent::TokenAllowed(TokenAllowed { token }));
        Ok(())
    }

    /// Remove a token from the supported allow-list. Owner-only. Open
    /// offers in the token still settle or cancel; only new offers are
    /// stopped.
    pub fn revoke_token(
        &mut self,
        caller: &AccountId,
        token: TokenId,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        self.supported.revoke(&token);
        self.events
            .push(EscrowEvent::TokenRevoked(TokenRevoked { token }));
        Ok(())
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Look up an offer by id.
    pub fn offer(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.get(id)
    }

    /// Current global fee rate (applies to future offers only).
    pub fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Unpaid accrued fees for a token.
    pub fn accrued_fees(&self, token: &TokenId) -> Decimal {
        self.fees.accrued(token)
    }

    /// Check the supported-token allow-list.
    pub fn is_supported(&self, token: &TokenId) -> bool {
        self.supported.is_supported(token)
    }

    /// The engine's custody identity.
    pub fn address(&self) -> &AccountId {
        &self.address
    }

    /// Balance lookup through a registered gateway.
    pub fn balance_of(
        &self,
        token: &TokenId,
        holder: &AccountId,
    ) -> Result<Decimal, TransferError> {
        self.registry.balance_of(token, holder)
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[EscrowEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<EscrowEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internals ─────────────────────────

    fn ensure_owner(&self, caller: &AccountId) -> Result<(), GovernanceError> {
        if !self.owners.is_owner(caller) {
            return Err(GovernanceError::Unauthorized);
        }
        Ok(())
    }

    /// Verify custody covers both outgoing legs of a settlement.
    fn ensure_custody(&self, offer: &Offer) -> Result<(), TransferError> {
        for (token, required) in [
            (&offer.take_token, offer.take_amount),
            (&offer.offer_token, offer.offer_amount),
        ] {
            let available = self.registry.balance_of(token, &self.address)?;
            if available < required {
                return Err(TransferError::InsufficientBalance {
                    token: token.to_string(),
                    holder: self.address.to_string(),
                    required: required.to_string(),
                    available: available.to_string(),
                });
            }
        }
        Ok(())
    }

}
