//! Escrow-specific error types
//!
//! Error taxonomy for offer lifecycle, payout, and governance operations.
//! Every error aborts the enclosing operation in full; no partial state
//! commits are observable by a caller.

use thiserror::Error;
use types::fee::InvalidFeeRate;

/// Token gateway rejections, propagated from the external token contracts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("no gateway registered for token: {token}")]
    UnknownToken { token: String },

    #[error("insufficient balance of {token} for {holder}: required {required}, available {available}")]
    InsufficientBalance {
        token: String,
        holder: String,
        required: String,
        available: String,
    },

    #[error("insufficient allowance of {token} from {origin} to {spender}: required {required}, approved {approved}")]
    InsufficientAllowance {
        token: String,
        origin: String,
        spender: String,
        required: String,
        approved: String,
    },
}

/// Offer lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OfferError {
    #[error("offer and take amounts must be positive")]
    InvalidAmount,

    #[error("token not on the supported list: {token}")]
    UnsupportedToken { token: String },

    #[error("generated offer id already in use: {id}")]
    IdCollision { id: String },

    #[error("offer not found: {id}")]
    NotFound { id: String },

    #[error("offer is not open: state {state}")]
    NotOpen { state: String },

    #[error("unauthorized: only the maker can cancel an offer")]
    Unauthorized,

    #[error("token transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}

/// Payout-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("unauthorized: caller is not an owner")]
    Unauthorized,

    #[error("token transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}

/// Governance errors for fee and allow-list administration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("unauthorized: caller is not an owner")]
    Unauthorized,

    #[error(transparent)]
    InvalidFeeRate(#[from] InvalidFeeRate),

    #[error("no gateway registered for token: {token}")]
    UnknownToken { token: String },
}
