//! Token gateway abstraction and configuration-time registry
//!
//! Every escrow and payout operation routes through a [`TokenGateway`]
//! handle. Gateways are resolved once, at configuration time, through the
//! [`TokenRegistry`] — there is no runtime dispatch by contract name.
//!
//! Transfers either fully succeed or reject with a [`TransferError`];
//! a conforming gateway rejects only for insufficient balance or allowance.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use types::ids::{AccountId, TokenId};

use crate::errors::TransferError;

/// Capability set of an external token contract.
///
/// The caller/spender identity is an explicit parameter: the engine passes
/// its own custody address when it moves funds it holds, and acts as the
/// approved spender when pulling funds from a maker or taker.
pub trait TokenGateway {
    /// Move `amount` from `caller`'s balance to `recipient`.
    ///
    /// Fails if `caller`'s own balance is insufficient.
    fn transfer(
        &mut self,
        caller: &AccountId,
        amount: Decimal,
        recipient: &AccountId,
    ) -> Result<(), TransferError>;

    /// Move `amount` from `source` to `recipient` on behalf of `spender`.
    ///
    /// Fails if `source` has insufficient balance or has not approved
    /// `spender` for at least `amount`.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        amount: Decimal,
        recipient: &AccountId,
        source: &AccountId,
    ) -> Result<(), TransferError>;

    /// Read-only balance lookup.
    fn balance_of(&self, holder: &AccountId) -> Decimal;
}

/// Mapping from token identifier to its gateway handle.
///
/// Built at configuration time; the engine consults it for every transfer.
/// Registered handles are never removed: revoking a token from the
/// allow-list only stops new offers, it does not strand open ones.
pub struct TokenRegistry {
    gateways: HashMap<TokenId, Box<dyn TokenGateway>>,
}

impl TokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            gateways: HashMap::new(),
        }
    }

    /// Register a gateway handle for `token`, replacing any previous handle.
    pub fn register(&mut self, token: TokenId, gateway: Box<dyn TokenGateway>) {
        self.gateways.insert(token, gateway);
    }

    /// Check if a gateway is registered for `token`.
    pub fn contains(&self, token: &TokenId) -> bool {
        self.gateways.contains_key(token)
    }

    /// Resolve a read-only gateway handle.
    pub fn gateway(&self, token: &TokenId) -> Result<&dyn TokenGateway, TransferError> {
        self.gateways
            .get(token)
            .map(|g| g.as_ref())
            .ok_or_else(|| TransferError::UnknownToken {
                token: token.to_string(),
            })
    }

    /// Resolve a mutable gateway handle for transfers.
    pub fn gateway_mut(
        &mut self,
        token: &TokenId,
    ) -> Result<&mut (dyn TokenGateway + 'static), TransferError> {
        self.gateways
            .get_mut(token)
            .map(|g| g.as_mut())
            .ok_or_else(|| TransferError::UnknownToken {
                token: token.to_string(),
            })
    }

    /// Balance lookup through the registered gateway.
    pub fn balance_of(&self, token: &TokenId, holder: &AccountId) -> Result<Decimal, TransferError> {
        Ok(self.gateway(token)?.balance_of(holder))
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("tokens", &self.gateways.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// In-memory reference token: balances plus spender allowances.
///
/// Stands in for an external token contract in tests and simulations;
/// `mint` and `approve` are setup operations a real contract would expose
/// to its own callers.
#[derive(Debug, Clone)]
pub struct LedgerToken {
    token: TokenId,
    balances: HashMap<AccountId, Decimal>,
    /// (source, spender) -> remaining approved amount
    allowances: HashMap<(AccountId, AccountId), Decimal>,
}

impl LedgerToken {
    /// Create a token ledger with no balances.
    pub fn new(token: TokenId) -> Self {
        Self {
            token,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Token identifier this ledger was created under.
    pub fn token(&self) -> &TokenId {
        &self.token
    }

    /// Credit `amount` to `holder`.
    pub fn mint(&mut self, holder: &AccountId, amount: Decimal) {
        *self.balances.entry(holder.clone()).or_insert(Decimal::ZERO) += amount;
    }

    /// Approve `spender` to move up to `amount` from `source`.
    pub fn approve(&mut self, source: &AccountId, spender: &AccountId, amount: Decimal) {
        self.allowances
            .insert((source.clone(), spender.clone()), amount);
    }

    /// Remaining approved amount from `source` to `spender`.
    pub fn allowance(&self, source: &AccountId, spender: &AccountId) -> Decimal {
        self.allowances
            .get(&(source.clone(), spender.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn debit(&mut self, holder: &AccountId, amount: Decimal) -> Result<(), TransferError> {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                token: self.token.to_string(),
                holder: holder.to_string(),
                required: amount.to_string(),
                available: available.to_string(),
            });
        }
        *self.balances.entry(holder.clone()).or_insert(Decimal::ZERO) -= amount;
        Ok(())
    }

    fn credit(&mut self, holder: &AccountId, amount: Decimal) {
        *self.balances.entry(holder.clone()).or_insert(Decimal::ZERO) += amount;
    }
}

impl TokenGateway for LedgerToken {
    fn transfer(
        &mut self,
        caller: &AccountId,
        amount: Decimal,
        recipient: &AccountId,
    ) -> Result<(), TransferError> {
        self.debit(caller, amount)?;
        self.credit(recipient, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        amount: Decimal,
        recipient: &AccountId,
        source: &AccountId,
    ) -> Result<(), TransferError> {
        let approved = self.allowance(source, spender);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                token: self.token.to_string(),
                origin: source.to_string(),
                spender: spender.to_string(),
                required: amount.to_string(),
                approved: approved.to_string(),
            });
        }
        self.debit(source, amount)?;
        self.allowances
            .insert((source.clone(), spender.clone()), approved - amount);
        self.credit(recipient, amount);
        Ok(())
    }

    fn balance_of(&self, holder: &AccountId) -> Decimal {
        self.balances.get(holder).copied().unwrap_or(Decimal::ZERO)
    }
}
