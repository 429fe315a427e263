pub mod criteria;
pub mod geo;
pub mod listing;
pub mod predicate;
pub mod saved_search;
pub mod sort;

pub use criteria::{FilterCriteria, SortKey};
pub use geo::{Coordinate, Polygon};
pub use listing::{Amenity, Listing, ListingKind, PropertyType};
pub use predicate::{Predicate, compile, matches_all};
pub use saved_search::{AlertFrequency, SavedSearch};
pub use sort::{compare, sort_listings};
