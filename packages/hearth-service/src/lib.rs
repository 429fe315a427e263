pub mod alerts;
pub mod query;
pub mod search;

mod error;

pub use alerts::{AlertMatch, AlertRunReport, match_saved_searches};
pub use error::{Error, Result};
pub use query::SearchQuery;
pub use search::SearchResponse;

use std::sync::Arc;

use hearth_config::Config;
use hearth_domain::{Listing, SavedSearch};

/// Enumerates the candidate listing snapshot for one engine invocation. The
/// engine asks for no ordering or indexing guarantees, only a consistent
/// snapshot for the duration of one call.
pub trait ListingSource
where
	Self: Send + Sync,
{
	fn list_all(&self) -> Result<Vec<Listing>>;
}

pub trait SavedSearchStore
where
	Self: Send + Sync,
{
	fn list_alert_enabled(&self) -> Result<Vec<SavedSearch>>;
}

/// Accepts matched (saved search, listing) pairs; delivery mechanics and
/// dedup against previously notified pairs are the sink's responsibility.
pub trait NotificationSink
where
	Self: Send + Sync,
{
	fn deliver(&self, matches: &[AlertMatch]) -> Result<()>;
}

pub struct HearthService {
	pub cfg: Config,
	pub listings: Arc<dyn ListingSource>,
	pub saved_searches: Arc<dyn SavedSearchStore>,
	pub notifications: Arc<dyn NotificationSink>,
}
impl HearthService {
	pub fn new(
		cfg: Config,
		listings: Arc<dyn ListingSource>,
		saved_searches: Arc<dyn SavedSearchStore>,
		notifications: Arc<dyn NotificationSink>,
	) -> Self {
		Self { cfg, listings, saved_searches, notifications }
	}
}
