use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::geo::Coordinate;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingKind {
	Sale,
	Rent,
}
impl ListingKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Sale => "SALE",
			Self::Rent => "RENT",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_uppercase().as_str() {
			"SALE" => Some(Self::Sale),
			"RENT" => Some(Self::Rent),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
	Bungalow,
	Cottage,
	Detached,
	Flat,
	Maisonette,
	SemiDetached,
	Terraced,
}
impl PropertyType {
	pub const ALL: [Self; 7] = [
		Self::Bungalow,
		Self::Cottage,
		Self::Detached,
		Self::Flat,
		Self::Maisonette,
		Self::SemiDetached,
		Self::Terraced,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bungalow => "bungalow",
			Self::Cottage => "cottage",
			Self::Detached => "detached",
			Self::Flat => "flat",
			Self::Maisonette => "maisonette",
			Self::SemiDetached => "semi_detached",
			Self::Terraced => "terraced",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim().to_ascii_lowercase();

		Self::ALL.into_iter().find(|property_type| property_type.as_str() == raw)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
	ChainFree,
	Furnished,
	Garage,
	Garden,
	NewBuild,
	Parking,
}
impl Amenity {
	pub const ALL: [Self; 6] = [
		Self::ChainFree,
		Self::Furnished,
		Self::Garage,
		Self::Garden,
		Self::NewBuild,
		Self::Parking,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::ChainFree => "chain_free",
			Self::Furnished => "furnished",
			Self::Garage => "garage",
			Self::Garden => "garden",
			Self::NewBuild => "new_build",
			Self::Parking => "parking",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim().to_ascii_lowercase();

		Self::ALL.into_iter().find(|amenity| amenity.as_str() == raw)
	}
}

/// One property record as the engine sees it: read-only for the duration of a
/// search or matching pass. Mutation happens in the listing source collaborator.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Listing {
	pub listing_id: Uuid,
	pub kind: ListingKind,
	pub property_type: PropertyType,
	/// Minor currency units (pence), never fractional.
	pub price_pence: i64,
	pub town: String,
	pub postcode: String,
	pub address_line_1: String,
	pub address_line_2: Option<String>,
	pub coordinate: Option<Coordinate>,
	pub bedrooms: Option<u32>,
	pub bathrooms: Option<u32>,
	/// A missing key means the flag is unknown for this listing, which is never
	/// treated as `true` by any predicate.
	pub amenities: BTreeMap<Amenity, bool>,
	#[serde(with = "time::serde::rfc3339")]
	pub listed_at: OffsetDateTime,
	pub original_price_pence: Option<i64>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub price_changed_at: Option<OffsetDateTime>,
}
impl Listing {
	pub fn amenity(&self, amenity: Amenity) -> Option<bool> {
		self.amenities.get(&amenity).copied()
	}

	/// Present whenever the listing carries an original price, even if the
	/// current price is higher.
	pub fn reduction_pence(&self) -> Option<i64> {
		self.original_price_pence.map(|original| original - self.price_pence)
	}
}
