//! Offer store — the system of record for trade state
//!
//! Keys offers by [`OfferId`]. Insertion never overwrites: a colliding id is
//! rejected and surfaced to the caller as a retryable condition. Terminal
//! offers are retained forever as an audit trail.

use std::collections::HashMap;
use types::ids::OfferId;
use types::offer::Offer;

/// Durable mapping from offer identifier to offer record.
#[derive(Debug, Clone, Default)]
pub struct OfferStore {
    offers: HashMap<OfferId, Offer>,
}

impl OfferStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            offers: HashMap::new(),
        }
    }

    /// Insert a new offer. Returns `false` if the id is already in use
    /// (the existing record is left untouched).
    pub fn insert(&mut self, offer: Offer) -> bool {
        if self.offers.contains_key(&offer.id) {
            return false;
        }
        self.offers.insert(offer.id, offer);
        true
    }

    /// Check if an offer id is in use.
    pub fn contains(&self, id: &OfferId) -> bool {
        self.offers.contains_key(id)
    }

    /// Look up an offer by id.
    pub fn get(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.get(id)
    }

    /// Look up an offer for mutation.
    pub fn get_mut(&mut self, id: &OfferId) -> Option<&mut Offer> {
        self.offers.get_mut(id)
    }

    /// Number of stored offers (all states).
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::fee::FeeRate;
    use types::ids::{AccountId, TokenId};

    fn sample_offer(id: OfferId) -> Offer {
        Offer::new(
            id,
            AccountId::new("alice"),
            TokenId::new("ALPHA"),
            Decimal::from(50),
            TokenId::new("BETA"),
            Decimal::from(2000),
            FeeRate::zero(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = OfferStore::new();
        let id = OfferId::new();
        assert!(store.insert(sample_offer(id)));

        let offer = store.get(&id).unwrap();
        assert_eq!(offer.id, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_collision_rejected() {
        let mut store = OfferStore::new();
        let id = OfferId::new();
        assert!(store.insert(sample_offer(id)));

        let mut second = sample_offer(id);
        second.maker = AccountId::new("mallory");
        assert!(!store.insert(second), "colliding insert must be rejected");

        // First record untouched
        assert_eq!(store.get(&id).unwrap().maker, AccountId::new("alice"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = OfferStore::new();
        assert!(store.get(&OfferId::new()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut store = OfferStore::new();
        let id = OfferId::new();
        store.insert(sample_offer(id));

        store
            .get_mut(&id)
            .unwrap()
            .execute(AccountId::new("bob"), 1708123456790000000);

        assert!(!store.get(&id).unwrap().is_open());
    }

    #[test]
    fn test_terminal_offers_retained() {
        let mut store = OfferStore::new();
        let id = OfferId::new();
        store.insert(sample_offer(id));
        store.get_mut(&id).unwrap().cancel(1708123456790000000);

        // Still present after reaching a terminal state
        assert!(store.contains(&id));
        assert_eq!(store.len(), 1);
    }
}
