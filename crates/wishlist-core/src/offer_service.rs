use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use wishlist_domain::{Offer, Wishlist};

use crate::CoreError;

pub struct OfferService;

impl OfferService {
    /// Active offers, biggest discount first.
    pub fn active(wishlist: &Wishlist) -> Vec<&Offer> {
        let mut offers: Vec<&Offer> = wishlist.offers.iter().filter(|o| o.is_active).collect();
        offers.sort_by_key(|offer| Reverse(offer.discount_percentage));
        offers
    }

    pub fn add(wishlist: &mut Wishlist, offer: Offer) -> Uuid {
        let id = offer.id;
        wishlist.offers.push(offer);
        wishlist.touch();
        id
    }

    pub fn remove(wishlist: &mut Wishlist, id: Uuid) -> Result<Offer, CoreError> {
        let index = wishlist
            .offers
            .iter()
            .position(|offer| offer.id == id)
            .ok_or(CoreError::OfferNotFound(id))?;
        wishlist.touch();
        Ok(wishlist.offers.remove(index))
    }

    /// Flags expired offers inactive and returns how many changed.
    pub fn deactivate_expired(wishlist: &mut Wishlist, now: DateTime<Utc>) -> usize {
        let mut changed = 0;
        for offer in wishlist
            .offers
            .iter_mut()
            .filter(|offer| offer.is_active && offer.is_expired(now))
        {
            offer.is_active = false;
            changed += 1;
        }
        if changed > 0 {
            tracing::info!(changed, "deactivated expired offers");
            wishlist.touch();
        }
        changed
    }

    /// Drops expired offers entirely and returns how many were removed.
    pub fn delete_expired(wishlist: &mut Wishlist, now: DateTime<Utc>) -> usize {
        let before = wishlist.offers.len();
        wishlist.offers.retain(|offer| !offer.is_expired(now));
        let removed = before - wishlist.offers.len();
        if removed > 0 {
            wishlist.touch();
        }
        removed
    }

    /// Demonstration offers used to populate an empty offers screen.
    pub fn sample_offers(now: DateTime<Utc>) -> Vec<Offer> {
        vec![
            Offer::new("iPhone 15 Pro", 15, 5000.0, 4250.0, now)
                .with_url("https://example.com")
                .with_expiry(now + Duration::days(30))
                .with_source("Online store"),
            Offer::new("AirPods Pro", 20, 999.0, 799.0, now)
                .with_url("https://example.com")
                .with_expiry(now + Duration::days(15))
                .with_source("Special offer"),
            Offer::new("Apple Watch", 10, 1800.0, 1620.0, now)
                .with_url("https://example.com")
                .with_expiry(now + Duration::days(7))
                .with_source("Seasonal sale"),
        ]
    }

    /// Inserts the sample offers when no active offer exists. Returns the number added.
    pub fn seed_samples_if_empty(wishlist: &mut Wishlist, now: DateTime<Utc>) -> usize {
        if wishlist.offers.iter().any(|offer| offer.is_active) {
            return 0;
        }
        let samples = Self::sample_offers(now);
        let count = samples.len();
        wishlist.offers.extend(samples);
        wishlist.touch();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn active_offers_sorted_by_discount() {
        let mut wishlist = Wishlist::new("Offers");
        OfferService::seed_samples_if_empty(&mut wishlist, now());
        let discounts: Vec<u8> = OfferService::active(&wishlist)
            .iter()
            .map(|offer| offer.discount_percentage)
            .collect();
        assert_eq!(discounts, vec![20, 15, 10]);
    }

    #[test]
    fn seeding_only_happens_once() {
        let mut wishlist = Wishlist::new("Offers");
        assert_eq!(OfferService::seed_samples_if_empty(&mut wishlist, now()), 3);
        assert_eq!(OfferService::seed_samples_if_empty(&mut wishlist, now()), 0);
        assert_eq!(wishlist.offers.len(), 3);
    }

    #[test]
    fn expired_offers_are_deactivated_not_removed() {
        let mut wishlist = Wishlist::new("Offers");
        OfferService::seed_samples_if_empty(&mut wishlist, now());
        let later = now() + Duration::days(10);

        assert_eq!(OfferService::deactivate_expired(&mut wishlist, later), 1);
        assert_eq!(wishlist.offers.len(), 3);
        assert_eq!(OfferService::active(&wishlist).len(), 2);
        assert_eq!(OfferService::deactivate_expired(&mut wishlist, later), 0);
    }

    #[test]
    fn delete_expired_removes_past_offers() {
        let mut wishlist = Wishlist::new("Offers");
        OfferService::seed_samples_if_empty(&mut wishlist, now());
        let removed = OfferService::delete_expired(&mut wishlist, now() + Duration::days(20));
        assert_eq!(removed, 2);
        assert_eq!(wishlist.offers[0].product_name, "iPhone 15 Pro");
    }

    #[test]
    fn removing_unknown_offer_fails() {
        let mut wishlist = Wishlist::new("Offers");
        let err = OfferService::remove(&mut wishlist, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, CoreError::OfferNotFound(_)));
    }
}
