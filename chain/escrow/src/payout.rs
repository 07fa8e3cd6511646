//! Owner payout with balance-delta reconciliation
//!
//! Distributes accrued fees to the owner set by percentage share. The
//! ledger is settled against the measured custody balance delta, never the
//! intended sum: if a share split rounds oddly or a token shorts a
//! transfer, the ledger keeps the difference as still-unpaid.

use rust_decimal::Decimal;
use tracing::info;
use types::ids::{AccountId, TokenId};

use crate::engine::EscrowEngine;
use crate::errors::{PayoutError, TransferError};
use crate::events::{EscrowEvent, OwnersPaid};
use crate::governance::OwnerSet;

/// Per-owner payment amounts for one token round:
/// `share * accrued` in configured owner order.
pub fn owner_payments(owners: &OwnerSet, accrued: Decimal) -> Vec<(AccountId, Decimal)> {
    owners
        .iter()
        .map(|(owner, share)| (owner.clone(), share * accrued))
        .collect()
}

impl EscrowEngine {
    /// Distribute accrued fees for the listed tokens to the owners.
    /// Owner-only.
    ///
    /// Tokens with no positive accrual are skipped. A failed transfer to
    /// any owner aborts the whole call; the ledger for that token round is
    /// only decremented, by the measured balance delta, once every owner
    /// in the round has been paid.
    pub fn payout_owners(
        &mut self,
        caller: &AccountId,
        tokens: &[TokenId],
    ) -> Result<(), PayoutError> {
        if !self.owners.is_owner(caller) {
            return Err(PayoutError::Unauthorized);
        }

        for token in tokens {
            let accrued = self.fees.accrued(token);
            if accrued <= Decimal::ZERO {
                continue;
            }

            let balance_before = self.registry.balance_of(token, &self.address)?;
            let payments = owner_payments(&self.owners, accrued);
            let intended: Decimal = payments.iter().map(|(_, amount)| *amount).sum();

            // The whole round must be covered before any owner is paid
            if balance_before < intended {
                return Err(TransferError::InsufficientBalance {
                    token: token.to_string(),
                    holder: self.address.to_string(),
                    required: intended.to_string(),
                    available: balance_before.to_string(),
                }
                .into());
            }

            for (owner, amount) in &payments {
                self.registry
                    .gateway_mut(token)?
                    .transfer(&self.address, *amount, owner)?;
            }

            // Settle against what actually left custody, not the intended
            // sum; the ledger must never understate remaining fees
            let balance_after = self.registry.balance_of(token, &self.address)?;
            let actually_paid = balance_before - balance_after;
            self.fees.deduct(token, actually_paid);

            self.events.push(EscrowEvent::OwnersPaid(OwnersPaid {
                token: token.clone(),
                intended,
                actually_paid,
            }));

            info!(token = %token, %intended, %actually_paid, "owners paid");
        }

        Ok(())
    }
}
