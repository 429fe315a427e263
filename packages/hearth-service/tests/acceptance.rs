use std::{collections::BTreeSet, sync::Arc};

use hearth_config::Config;
use hearth_domain::{
	Coordinate, FilterCriteria, Listing, Polygon, PropertyType, SortKey,
};
use hearth_service::{Error, HearthService, SearchQuery, match_saved_searches};
use hearth_testkit::{
	InMemoryListings, InMemorySavedSearches, ListingBuilder, RecordingSink, UnavailableListings,
	init_tracing, saved_search, test_service,
};

fn snapshot_of(count: u8) -> Vec<Listing> {
	(0..count)
		.map(|index| {
			ListingBuilder::sale(index)
				.price(20_000_000 + i64::from(index) * 100_000)
				.listed_at(1_700_000_000 + i64::from(index) * 60)
				.build()
		})
		.collect()
}

fn portsmouth_ring() -> Polygon {
	Polygon::new(vec![
		Coordinate { latitude: 50.79, longitude: -1.09 },
		Coordinate { latitude: 50.80, longitude: -1.09 },
		Coordinate { latitude: 50.80, longitude: -1.07 },
		Coordinate { latitude: 50.79, longitude: -1.07 },
	])
}

#[test]
fn search_is_pure_for_a_fixed_snapshot() {
	init_tracing();

	let (service, _) = test_service(snapshot_of(45), Vec::new());
	let criteria = FilterCriteria { sort: SortKey::PriceHigh, page: 2, ..FilterCriteria::default() };
	let first = service.search_criteria(criteria.clone()).expect("search");
	let second = service.search_criteria(criteria).expect("search");

	assert_eq!(first, second);
}

#[test]
fn total_is_independent_of_pagination() {
	let (service, _) = test_service(snapshot_of(45), Vec::new());

	for (page, page_size) in [(1, 10), (2, 10), (1, 7), (5, 20), (1, 100)] {
		let criteria = FilterCriteria { page, page_size, ..FilterCriteria::default() };
		let response = service.search_criteria(criteria).expect("search");

		assert_eq!(response.total, 45);
	}
}

#[test]
fn pages_tile_the_sorted_set_without_gap_or_overlap() {
	let (service, _) = test_service(snapshot_of(45), Vec::new());
	let whole = service
		.search_criteria(FilterCriteria { page_size: 100, ..FilterCriteria::default() })
		.expect("search");
	let mut tiled = Vec::new();
	let mut page = 1;

	loop {
		let criteria = FilterCriteria { page, page_size: 7, ..FilterCriteria::default() };
		let response = service.search_criteria(criteria).expect("search");

		tiled.extend(response.properties);

		if page >= response.total_pages {
			break;
		}

		page += 1;
	}

	assert_eq!(tiled, whole.properties);
}

#[test]
fn out_of_range_page_is_empty_with_unchanged_totals() {
	let (service, _) = test_service(snapshot_of(45), Vec::new());
	let last = service
		.search_criteria(FilterCriteria { page: 3, ..FilterCriteria::default() })
		.expect("search");
	let beyond = service
		.search_criteria(FilterCriteria { page: 4, ..FilterCriteria::default() })
		.expect("search");

	// 45 matches at 20 per page: the last page holds the remainder.
	assert_eq!(last.properties.len(), 5);
	assert_eq!(last.total_pages, 3);
	assert!(beyond.properties.is_empty());
	assert_eq!(beyond.total, 45);
	assert_eq!(beyond.total_pages, 3);
}

#[test]
fn price_band_and_bedrooms_select_exactly_the_matching_listing() {
	let three_bed = ListingBuilder::sale(1).price(22_500_000).bedrooms(Some(3)).build();
	let two_bed = ListingBuilder::sale(2).price(25_000_000).bedrooms(Some(2)).build();
	let (service, _) = test_service(vec![three_bed.clone(), two_bed], Vec::new());
	let criteria = FilterCriteria {
		price_min_pence: Some(20_000_000),
		price_max_pence: Some(30_000_000),
		bedrooms: BTreeSet::from([3]),
		..FilterCriteria::default()
	};
	let response = service.search_criteria(criteria).expect("search");

	assert_eq!(response.total, 1);
	assert_eq!(response.properties, vec![three_bed]);
}

#[test]
fn polygon_search_excludes_flats_without_coordinates() {
	let located = ListingBuilder::sale(1)
		.property_type(PropertyType::Flat)
		.coordinate(50.795, -1.08)
		.build();
	let unlocated =
		ListingBuilder::sale(2).property_type(PropertyType::Flat).no_coordinate().build();
	let (service, _) = test_service(vec![located.clone(), unlocated], Vec::new());
	let criteria = FilterCriteria {
		property_types: BTreeSet::from([PropertyType::Flat]),
		polygon: Some(portsmouth_ring()),
		..FilterCriteria::default()
	};
	let response = service.search_criteria(criteria).expect("search");

	assert_eq!(response.properties, vec![located]);
}

#[test]
fn alert_matching_equals_single_listing_search() {
	let criteria = FilterCriteria {
		price_min_pence: Some(21_000_000),
		bedrooms: BTreeSet::from([3]),
		polygon: Some(portsmouth_ring()),
		..FilterCriteria::default()
	};
	let saved = saved_search("equivalence", criteria.clone());
	let candidates = vec![
		ListingBuilder::sale(1).price(22_000_000).build(),
		ListingBuilder::sale(2).price(20_000_000).build(),
		ListingBuilder::sale(3).price(22_000_000).bedrooms(None).build(),
		ListingBuilder::sale(4).price(22_000_000).no_coordinate().build(),
		ListingBuilder::rent(5).build(),
	];

	for listing in candidates {
		let alert_fires =
			!match_saved_searches(std::slice::from_ref(&saved), std::slice::from_ref(&listing))
				.is_empty();
		let (service, _) = test_service(vec![listing.clone()], Vec::new());
		let response = service.search_criteria(criteria.clone()).expect("search");
		let appears_in_search = response.properties.contains(&listing);

		assert_eq!(
			alert_fires,
			appears_in_search,
			"alert and search disagree for listing {}",
			listing.listing_id,
		);
	}
}

#[test]
fn alert_pass_reports_and_batches_deliveries() {
	let candidates: Vec<Listing> =
		(1..=5).map(|index| ListingBuilder::sale(index).build()).collect();
	let saved = saved_search("every sale", FilterCriteria::default());
	let sink = Arc::new(RecordingSink::new());
	let mut cfg = Config::default();

	cfg.alerts.delivery_batch_size = 2;

	let service = HearthService::new(
		cfg,
		Arc::new(InMemoryListings::new(Vec::new())),
		Arc::new(InMemorySavedSearches::new(vec![saved])),
		sink.clone(),
	);
	let report = service.run_alert_pass(&candidates).expect("alert pass");

	assert_eq!(report.saved_search_count, 1);
	assert_eq!(report.candidate_count, 5);
	assert_eq!(report.match_count, 5);
	assert_eq!(sink.batch_sizes(), vec![2, 2, 1]);
	assert_eq!(sink.delivered().len(), 5);
}

#[test]
fn query_pipeline_echoes_normalized_filters() {
	let (service, _) = test_service(snapshot_of(3), Vec::new());
	let query = SearchQuery::from_pairs(&[
		("location".to_string(), "old portsmouth".to_string()),
		("sort".to_string(), "price_low".to_string()),
		("bedrooms".to_string(), "3".to_string()),
	]);
	let response = service.search(&query).expect("search");

	assert_eq!(response.filters.location.as_deref(), Some("Old Portsmouth"));
	assert_eq!(response.filters.sort, SortKey::PriceLow);
	assert_eq!(response.filters.bedrooms, BTreeSet::from([3]));
	assert_eq!(response.filters.page, 1);
	assert_eq!(response.filters.page_size, 20);
}

#[test]
fn malformed_query_is_rejected_not_corrected() {
	let (service, _) = test_service(snapshot_of(3), Vec::new());
	let query = SearchQuery {
		page_size: Some("500".to_string()),
		..SearchQuery::default()
	};

	assert!(matches!(service.search(&query), Err(Error::InvalidRequest { .. })));
}

#[test]
fn listing_source_failure_propagates() {
	let service = HearthService::new(
		Config::default(),
		Arc::new(UnavailableListings),
		Arc::new(InMemorySavedSearches::new(Vec::new())),
		Arc::new(RecordingSink::new()),
	);

	assert!(matches!(
		service.search_criteria(FilterCriteria::default()),
		Err(Error::Storage { .. })
	));
}
