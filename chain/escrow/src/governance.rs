//! Governance state: owner set, payout shares, supported-token allow-list
//!
//! Owners gate the privileged operations (fee adjustment, allow-list
//! maintenance, payouts) and receive the protocol revenue by percentage
//! share. Shares are expected to sum to 1, a configuration responsibility
//! not enforced here; any positive share is applied as given.

use rust_decimal::Decimal;
use std::collections::HashSet;
use types::ids::{AccountId, TokenId};

/// Fixed set of payout recipients with a share per recipient.
///
/// Iteration order is the configured order, so payout rounds are
/// deterministic.
#[derive(Debug, Clone)]
pub struct OwnerSet {
    owners: Vec<(AccountId, Decimal)>,
}

impl OwnerSet {
    /// Create an owner set from `(owner, share)` pairs.
    ///
    /// # Panics
    /// Panics if the set is empty or any share is not positive.
    pub fn new(owners: Vec<(AccountId, Decimal)>) -> Self {
        assert!(!owners.is_empty(), "OwnerSet must have at least one owner");
        for (owner, share) in &owners {
            assert!(
                *share > Decimal::ZERO,
                "owner {} must have a positive share",
                owner
            );
        }
        Self { owners }
    }

    /// Check membership.
    pub fn is_owner(&self, caller: &AccountId) -> bool {
        self.owners.iter().any(|(owner, _)| owner == caller)
    }

    /// Owners with their shares, in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &(AccountId, Decimal)> {
        self.owners.iter()
    }

    /// Number of owners.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// An owner set is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Supported-token allow-list consulted by offer creation.
#[derive(Debug, Clone, Default)]
pub struct TokenAllowList {
    tokens: HashSet<TokenId>,
}

impl TokenAllowList {
    /// Create an empty allow-list.
    pub fn new() -> Self {
        Self {
            tokens: HashSet::new(),
        }
    }

    /// Add a token to the list.
    pub fn allow(&mut self, token: TokenId) {
        self.tokens.insert(token);
    }

    /// Remove a token from the list.
    pub fn revoke(&mut self, token: &TokenId) {
        self.tokens.remove(token);
    }

    /// Check if a token may be used in new offers.
    pub fn is_supported(&self, token: &TokenId) -> bool {
        self.tokens.contains(token)
    }
}
