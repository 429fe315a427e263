use std::cmp::Ordering;

use crate::{criteria::SortKey, listing::Listing};

/// Total order for a sort key. Every key tie-breaks by listing id ascending,
/// so page N and page N+1 never overlap or gap while the snapshot is static.
pub fn compare(key: SortKey, a: &Listing, b: &Listing) -> Ordering {
	primary(key, a, b).then_with(|| a.listing_id.cmp(&b.listing_id))
}

pub fn sort_listings(listings: &mut [Listing], key: SortKey) {
	listings.sort_by(|a, b| compare(key, a, b));
}

fn primary(key: SortKey, a: &Listing, b: &Listing) -> Ordering {
	match key {
		SortKey::Newest => b.listed_at.cmp(&a.listed_at),
		SortKey::PriceLow => a.price_pence.cmp(&b.price_pence),
		SortKey::PriceHigh => b.price_pence.cmp(&a.price_pence),
		SortKey::MostReduced => match (a.reduction_pence(), b.reduction_pence()) {
			// Reduced listings sort before unreduced ones; among reduced
			// listings the larger reduction comes first.
			(Some(lhs), Some(rhs)) => rhs.cmp(&lhs),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		},
	}
}
