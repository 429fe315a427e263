use std::collections::BTreeSet;

use crate::{
	criteria::FilterCriteria,
	geo::Polygon,
	listing::{Amenity, Listing, ListingKind, PropertyType},
};

/// One compiled predicate over a single listing. The search engine and the
/// saved-search matcher both apply the same compiled list, so a listing
/// appears in interactive results exactly when it fires the matching alert.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	Kind(ListingKind),
	/// Needle is stored lowercased; matched as a substring of town, address
	/// line 1, or postcode.
	Location(String),
	PriceMin(i64),
	PriceMax(i64),
	Bedrooms(BTreeSet<u32>),
	Bathrooms(BTreeSet<u32>),
	PropertyTypes(BTreeSet<PropertyType>),
	RequiresAmenity(Amenity),
	WithinPolygon(Polygon),
}
impl Predicate {
	pub fn matches(&self, listing: &Listing) -> bool {
		match self {
			Self::Kind(kind) => listing.kind == *kind,
			Self::Location(needle) => Self::matches_location(needle, listing),
			Self::PriceMin(min) => listing.price_pence >= *min,
			Self::PriceMax(max) => listing.price_pence <= *max,
			Self::Bedrooms(counts) => Self::matches_count(counts, listing.bedrooms),
			Self::Bathrooms(counts) => Self::matches_count(counts, listing.bathrooms),
			Self::PropertyTypes(types) => types.contains(&listing.property_type),
			Self::RequiresAmenity(amenity) => listing.amenity(*amenity) == Some(true),
			Self::WithinPolygon(polygon) => {
				listing.coordinate.is_some_and(|coordinate| polygon.contains(coordinate))
			},
		}
	}

	fn matches_location(needle: &str, listing: &Listing) -> bool {
		[listing.town.as_str(), listing.address_line_1.as_str(), listing.postcode.as_str()]
			.into_iter()
			.any(|field| field.to_lowercase().contains(needle))
	}

	fn matches_count(counts: &BTreeSet<u32>, count: Option<u32>) -> bool {
		// A listing with no recorded count never matches a non-empty set.
		count.is_some_and(|count| counts.contains(&count))
	}
}

/// Emits one predicate per present criteria field and nothing for absent
/// don't-care fields, keeping the compiled list minimal.
pub fn compile(criteria: &FilterCriteria) -> Vec<Predicate> {
	let mut predicates = vec![Predicate::Kind(criteria.kind)];

	if let Some(location) = criteria.location.as_deref()
		&& !location.trim().is_empty()
	{
		predicates.push(Predicate::Location(location.trim().to_lowercase()));
	}
	if let Some(min) = criteria.price_min_pence {
		predicates.push(Predicate::PriceMin(min));
	}
	if let Some(max) = criteria.price_max_pence {
		predicates.push(Predicate::PriceMax(max));
	}
	if !criteria.bedrooms.is_empty() {
		predicates.push(Predicate::Bedrooms(criteria.bedrooms.clone()));
	}
	if !criteria.bathrooms.is_empty() {
		predicates.push(Predicate::Bathrooms(criteria.bathrooms.clone()));
	}
	if !criteria.property_types.is_empty() {
		predicates.push(Predicate::PropertyTypes(criteria.property_types.clone()));
	}

	for amenity in &criteria.required_amenities {
		predicates.push(Predicate::RequiresAmenity(*amenity));
	}

	if let Some(polygon) = &criteria.polygon
		&& polygon.is_usable()
	{
		predicates.push(Predicate::WithinPolygon(polygon.clone()));
	}

	predicates
}

pub fn matches_all(predicates: &[Predicate], listing: &Listing) -> bool {
	predicates.iter().all(|predicate| predicate.matches(listing))
}
