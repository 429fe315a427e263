use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use uuid::Uuid;

use hearth_config::Config;
use hearth_domain::{
	Amenity, Coordinate, FilterCriteria, Listing, ListingKind, PropertyType, SavedSearch,
};
use hearth_service::{
	AlertMatch, Error, HearthService, ListingSource, NotificationSink, Result, SavedSearchStore,
};

/// Installs a fmt subscriber honoring `RUST_LOG`; repeated calls are no-ops.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
}

/// Fixture listing with sensible defaults; override what the test cares
/// about. Ids built from a single byte keep tie-break assertions readable.
pub struct ListingBuilder {
	listing: Listing,
}
impl ListingBuilder {
	pub fn sale(id_byte: u8) -> Self {
		Self {
			listing: Listing {
				listing_id: Uuid::from_bytes([id_byte; 16]),
				kind: ListingKind::Sale,
				property_type: PropertyType::Terraced,
				price_pence: 25_000_000,
				town: "Portsmouth".to_string(),
				postcode: "PO1 2AB".to_string(),
				address_line_1: "14 Albert Road".to_string(),
				address_line_2: None,
				coordinate: Some(Coordinate { latitude: 50.795, longitude: -1.08 }),
				bedrooms: Some(3),
				bathrooms: Some(1),
				amenities: Default::default(),
				listed_at: OffsetDateTime::from_unix_timestamp(1_700_000_000)
					.expect("fixture timestamp"),
				original_price_pence: None,
				price_changed_at: None,
			},
		}
	}

	pub fn rent(id_byte: u8) -> Self {
		let mut builder = Self::sale(id_byte);

		builder.listing.kind = ListingKind::Rent;
		builder.listing.price_pence = 120_000;

		builder
	}

	pub fn price(mut self, price_pence: i64) -> Self {
		self.listing.price_pence = price_pence;

		self
	}

	pub fn reduced_from(mut self, original_price_pence: i64, changed_at_unix: i64) -> Self {
		self.listing.original_price_pence = Some(original_price_pence);
		self.listing.price_changed_at = Some(
			OffsetDateTime::from_unix_timestamp(changed_at_unix).expect("fixture timestamp"),
		);

		self
	}

	pub fn town(mut self, town: &str) -> Self {
		self.listing.town = town.to_string();

		self
	}

	pub fn postcode(mut self, postcode: &str) -> Self {
		self.listing.postcode = postcode.to_string();

		self
	}

	pub fn address_line_1(mut self, address_line_1: &str) -> Self {
		self.listing.address_line_1 = address_line_1.to_string();

		self
	}

	pub fn property_type(mut self, property_type: PropertyType) -> Self {
		self.listing.property_type = property_type;

		self
	}

	pub fn bedrooms(mut self, bedrooms: Option<u32>) -> Self {
		self.listing.bedrooms = bedrooms;

		self
	}

	pub fn bathrooms(mut self, bathrooms: Option<u32>) -> Self {
		self.listing.bathrooms = bathrooms;

		self
	}

	pub fn amenity(mut self, amenity: Amenity, value: bool) -> Self {
		self.listing.amenities.insert(amenity, value);

		self
	}

	pub fn coordinate(mut self, latitude: f64, longitude: f64) -> Self {
		self.listing.coordinate = Some(Coordinate { latitude, longitude });

		self
	}

	pub fn no_coordinate(mut self) -> Self {
		self.listing.coordinate = None;

		self
	}

	pub fn listed_at(mut self, unix: i64) -> Self {
		self.listing.listed_at =
			OffsetDateTime::from_unix_timestamp(unix).expect("fixture timestamp");

		self
	}

	pub fn build(self) -> Listing {
		self.listing
	}
}

pub fn saved_search(name: &str, criteria: FilterCriteria) -> SavedSearch {
	SavedSearch {
		search_id: Uuid::new_v4(),
		user_id: Uuid::new_v4(),
		name: name.to_string(),
		criteria,
		alert_enabled: true,
		alert_frequency: hearth_domain::AlertFrequency::Instant,
		created_at: OffsetDateTime::from_unix_timestamp(1_690_000_000)
			.expect("fixture timestamp"),
	}
}

pub struct InMemoryListings {
	listings: Vec<Listing>,
}
impl InMemoryListings {
	pub fn new(listings: Vec<Listing>) -> Self {
		Self { listings }
	}
}
impl ListingSource for InMemoryListings {
	fn list_all(&self) -> Result<Vec<Listing>> {
		Ok(self.listings.clone())
	}
}

/// Always fails, for exercising collaborator-failure propagation.
pub struct UnavailableListings;
impl ListingSource for UnavailableListings {
	fn list_all(&self) -> Result<Vec<Listing>> {
		Err(Error::Storage { message: "listing source unavailable".to_string() })
	}
}

pub struct InMemorySavedSearches {
	saved_searches: Vec<SavedSearch>,
}
impl InMemorySavedSearches {
	pub fn new(saved_searches: Vec<SavedSearch>) -> Self {
		Self { saved_searches }
	}
}
impl SavedSearchStore for InMemorySavedSearches {
	fn list_alert_enabled(&self) -> Result<Vec<SavedSearch>> {
		Ok(self
			.saved_searches
			.iter()
			.filter(|saved| saved.alert_enabled)
			.cloned()
			.collect())
	}
}

/// Captures every delivery batch instead of sending anything.
#[derive(Default)]
pub struct RecordingSink {
	batches: Mutex<Vec<Vec<AlertMatch>>>,
}
impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn delivered(&self) -> Vec<AlertMatch> {
		self.batches
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.iter()
			.flatten()
			.cloned()
			.collect()
	}

	pub fn batch_sizes(&self) -> Vec<usize> {
		self.batches
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.iter()
			.map(Vec::len)
			.collect()
	}
}
impl NotificationSink for RecordingSink {
	fn deliver(&self, matches: &[AlertMatch]) -> Result<()> {
		self.batches.lock().unwrap_or_else(|err| err.into_inner()).push(matches.to_vec());

		Ok(())
	}
}

/// Assembles a service over in-memory collaborators with the default config.
pub fn test_service(
	listings: Vec<Listing>,
	saved_searches: Vec<SavedSearch>,
) -> (HearthService, Arc<RecordingSink>) {
	let sink = Arc::new(RecordingSink::new());
	let service = HearthService::new(
		Config::default(),
		Arc::new(InMemoryListings::new(listings)),
		Arc::new(InMemorySavedSearches::new(saved_searches)),
		sink.clone(),
	);

	(service, sink)
}
