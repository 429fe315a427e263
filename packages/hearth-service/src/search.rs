use tracing::debug;

use hearth_domain::{FilterCriteria, Listing, predicate, sort};

use crate::{Error, HearthService, Result, SearchQuery};

/// One page of results plus the pagination facts and the normalized criteria
/// that produced them, echoed back so the caller can reflect what was
/// actually applied after defaulting.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub properties: Vec<Listing>,
	pub total: usize,
	pub page: u32,
	pub total_pages: u32,
	pub filters: FilterCriteria,
}

impl HearthService {
	pub fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
		let criteria = query.normalize(&self.cfg)?;

		self.search_criteria(criteria)
	}

	/// Pure with respect to its inputs: the same criteria against the same
	/// listing snapshot always produces the identical envelope, which is what
	/// keeps pagination stable across requests.
	pub fn search_criteria(&self, criteria: FilterCriteria) -> Result<SearchResponse> {
		if criteria.page < 1 || criteria.page_size < 1 {
			return Err(Error::InvalidRequest {
				message: "page and page_size must be greater than zero.".to_string(),
			});
		}

		let criteria = criteria.normalized();
		let predicates = predicate::compile(&criteria);
		let mut matched: Vec<Listing> = self
			.listings
			.list_all()?
			.into_iter()
			.filter(|listing| predicate::matches_all(&predicates, listing))
			.collect();
		let total = matched.len();

		sort::sort_listings(&mut matched, criteria.sort);

		let total_pages = total_pages(total, criteria.page_size);
		let properties = page_slice(matched, criteria.page, criteria.page_size);

		debug!(total, page = criteria.page, total_pages, "Search completed.");

		Ok(SearchResponse { properties, total, page: criteria.page, total_pages, filters: criteria })
	}
}

fn total_pages(total: usize, page_size: u32) -> u32 {
	total.div_ceil(page_size as usize).max(1) as u32
}

/// Out-of-range pages are not an error; they slice to an empty page.
fn page_slice(listings: Vec<Listing>, page: u32, page_size: u32) -> Vec<Listing> {
	let start = (page as usize - 1).saturating_mul(page_size as usize);

	listings.into_iter().skip(start).take(page_size as usize).collect()
}
