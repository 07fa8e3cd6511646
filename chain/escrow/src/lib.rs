//! Escrow Contract Logic for OTC Token Swaps
//!
//! This crate implements the offer lifecycle and fee-settlement engine:
//! the state machine governing an offer from creation to execution or
//! cancellation, the escrow and atomic-swap protocol between two untrusted
//! parties, and the fee-accrual/payout reconciliation algorithm.
//!
//! # Modules
//! - `errors`: Escrow-specific error types
//! - `events`: Contract events emitted by engine operations
//! - `gateway`: Token gateway abstraction and configuration-time registry
//! - `store`: Durable offer store, the system of record for trade state
//! - `ledger`: Per-token accrued-fee accumulator
//! - `governance`: Owner set, payout shares, and supported-token allow-list
//! - `engine`: Offer lifecycle engine (make/take/cancel, governed setters)
//! - `payout`: Owner payout with balance-delta reconciliation

pub mod engine;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod governance;
pub mod ledger;
pub mod payout;
pub mod store;

/// Engine ABI version — frozen after release
pub const ENGINE_ABI_VERSION: &str = "1.0.0";
