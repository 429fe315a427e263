use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::criteria::FilterCriteria;

/// Governs the caller's batching cadence only; matching logic never consults
/// it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertFrequency {
	Instant,
	Daily,
	Weekly,
}

/// A user-owned persisted criteria. The engine only reads it; creation,
/// toggling, and deletion happen in the saved-search store collaborator.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SavedSearch {
	pub search_id: Uuid,
	pub user_id: Uuid,
	pub name: String,
	pub criteria: FilterCriteria,
	pub alert_enabled: bool,
	pub alert_frequency: AlertFrequency,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
