//! Fee ledger — per-token accrued protocol revenue
//!
//! Fed by every executed trade (maker fee in the offer token, taker fee in
//! the take token), drained only by successful payout rounds. Entries are
//! created implicitly on first accrual and never removed; a fully paid-out
//! token keeps a zero entry.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::TokenId;

/// Per-token running accrual of unpaid fees. Never negative.
#[derive(Debug, Clone, Default)]
pub struct FeeLedger {
    accrued: HashMap<TokenId, Decimal>,
}

impl FeeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            accrued: HashMap::new(),
        }
    }

    /// Add `amount` to the token's accrual, creating the entry if absent.
    pub fn accrue(&mut self, token: &TokenId, amount: Decimal) {
        *self.accrued.entry(token.clone()).or_insert(Decimal::ZERO) += amount;
    }

    /// Unpaid accrual for a token; zero if never accrued.
    pub fn accrued(&self, token: &TokenId) -> Decimal {
        self.accrued.get(token).copied().unwrap_or(Decimal::ZERO)
    }

    /// Reduce the token's accrual by `amount`, clamping at zero.
    ///
    /// The clamp keeps the ledger non-negative even when owner shares sum
    /// to more than 1 and a round pays out more than was accrued.
    pub fn deduct(&mut self, token: &TokenId, amount: Decimal) {
        if let Some(balance) = self.accrued.get_mut(token) {
            *balance = (*balance - amount).max(Decimal::ZERO);
        }
    }

    /// Tokens with a ledger entry, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenId> {
        self.accrued.keys()
    }
}
