use tracing::info;
use uuid::Uuid;

use hearth_domain::{Listing, SavedSearch, predicate};

use crate::{HearthService, Result};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlertMatch {
	pub search_id: Uuid,
	pub user_id: Uuid,
	pub search_name: String,
	pub listing: Listing,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct AlertRunReport {
	pub saved_search_count: usize,
	pub candidate_count: usize,
	pub match_count: usize,
}

/// Replays stored criteria against new or materially changed listings. The
/// compiled predicates are the same ones interactive search applies, so a
/// listing fires an alert exactly when it would appear in that search's
/// results. Matching is existence-only: no sort, no pagination.
pub fn match_saved_searches(
	saved_searches: &[SavedSearch],
	candidates: &[Listing],
) -> Vec<AlertMatch> {
	let mut matches = Vec::new();

	for saved in saved_searches {
		if !saved.alert_enabled {
			continue;
		}

		// Compiled once per saved search, then applied to every candidate.
		let criteria = saved.criteria.clone().normalized();
		let predicates = predicate::compile(&criteria);

		for listing in candidates {
			if predicate::matches_all(&predicates, listing) {
				matches.push(AlertMatch {
					search_id: saved.search_id,
					user_id: saved.user_id,
					search_name: saved.name.clone(),
					listing: listing.clone(),
				});
			}
		}
	}

	matches
}

impl HearthService {
	/// One matching pass: pull alert-enabled saved searches, match the given
	/// candidates, and hand the pairs to the notification sink in batches.
	/// Alert frequency is the scheduler's concern, not consulted here.
	pub fn run_alert_pass(&self, candidates: &[Listing]) -> Result<AlertRunReport> {
		let saved_searches = self.saved_searches.list_alert_enabled()?;
		let matches = match_saved_searches(&saved_searches, candidates);

		for batch in matches.chunks(self.cfg.alerts.delivery_batch_size.max(1)) {
			self.notifications.deliver(batch)?;
		}

		let report = AlertRunReport {
			saved_search_count: saved_searches.len(),
			candidate_count: candidates.len(),
			match_count: matches.len(),
		};

		info!(
			saved_search_count = report.saved_search_count,
			candidate_count = report.candidate_count,
			match_count = report.match_count,
			"Alert pass completed."
		);

		Ok(report)
	}
}
