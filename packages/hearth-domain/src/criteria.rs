use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
	geo::Polygon,
	listing::{Amenity, ListingKind, PropertyType},
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
	#[default]
	Newest,
	PriceLow,
	PriceHigh,
	MostReduced,
}
impl SortKey {
	pub const ALL: [Self; 4] = [Self::Newest, Self::PriceLow, Self::PriceHigh, Self::MostReduced];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Newest => "newest",
			Self::PriceLow => "price_low",
			Self::PriceHigh => "price_high",
			Self::MostReduced => "most_reduced",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim().to_ascii_lowercase();

		Self::ALL.into_iter().find(|key| key.as_str() == raw)
	}
}

/// The canonical representation of one search request. A value object: two
/// criteria with equal fields are the same request.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FilterCriteria {
	pub kind: ListingKind,
	pub location: Option<String>,
	pub price_min_pence: Option<i64>,
	pub price_max_pence: Option<i64>,
	/// OR semantics: a listing matches when its count equals any member.
	pub bedrooms: BTreeSet<u32>,
	pub bathrooms: BTreeSet<u32>,
	pub property_types: BTreeSet<PropertyType>,
	/// Presence means the flag must be strictly true; absence means don't care.
	pub required_amenities: BTreeSet<Amenity>,
	pub polygon: Option<Polygon>,
	pub sort: SortKey,
	pub page: u32,
	pub page_size: u32,
}
impl FilterCriteria {
	/// Drops fields that cannot constrain anything: a ring with fewer than 3
	/// vertices and a blank location. A min price above the max price is kept
	/// as-is; the compiled predicates then legitimately match nothing.
	pub fn normalized(mut self) -> Self {
		if self.polygon.as_ref().is_some_and(|polygon| !polygon.is_usable()) {
			self.polygon = None;
		}
		if self.location.as_deref().is_some_and(|location| location.trim().is_empty()) {
			self.location = None;
		}

		self
	}
}

impl Default for FilterCriteria {
	fn default() -> Self {
		Self {
			kind: ListingKind::Sale,
			location: None,
			price_min_pence: None,
			price_max_pence: None,
			bedrooms: BTreeSet::new(),
			bathrooms: BTreeSet::new(),
			property_types: BTreeSet::new(),
			required_amenities: BTreeSet::new(),
			polygon: None,
			sort: SortKey::default(),
			page: DEFAULT_PAGE,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}
}
