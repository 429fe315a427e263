use std::collections::BTreeSet;

use hearth_config::Config;
use hearth_domain::{
	Amenity, Coordinate, FilterCriteria, ListingKind, Polygon, PropertyType, SortKey,
};

use crate::{Error, Result};

/// The loosely-typed search request as it arrives from a query string: every
/// field a raw string or repeated-key list, nothing validated yet.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchQuery {
	pub kind: Option<String>,
	pub location: Option<String>,
	pub price_min: Option<String>,
	pub price_max: Option<String>,
	pub bedrooms: Vec<String>,
	pub bathrooms: Vec<String>,
	pub property_types: Vec<String>,
	/// Flag names whose query value was literally "true". Absence and any
	/// other value both mean don't care, never "false".
	pub amenities: Vec<String>,
	/// "lat,lon;lat,lon;..." decimal pairs, implicitly closed.
	pub polygon: Option<String>,
	pub sort: Option<String>,
	pub page: Option<String>,
	pub page_size: Option<String>,
}
impl SearchQuery {
	/// Collects flat key/value pairs; repeated keys accumulate and unknown
	/// keys are ignored. Amenity flags are keyed by their own name.
	pub fn from_pairs(pairs: &[(String, String)]) -> Self {
		let mut query = Self::default();

		for (key, value) in pairs {
			match key.as_str() {
				"kind" => query.kind = Some(value.clone()),
				"location" => query.location = Some(value.clone()),
				"price_min" => query.price_min = Some(value.clone()),
				"price_max" => query.price_max = Some(value.clone()),
				"bedrooms" => query.bedrooms.push(value.clone()),
				"bathrooms" => query.bathrooms.push(value.clone()),
				"property_type" => query.property_types.push(value.clone()),
				"polygon" => query.polygon = Some(value.clone()),
				"sort" => query.sort = Some(value.clone()),
				"page" => query.page = Some(value.clone()),
				"page_size" => query.page_size = Some(value.clone()),
				_ =>
					if Amenity::parse(key).is_some() && value == "true" {
						query.amenities.push(key.clone());
					},
			}
		}

		query
	}

	pub fn normalize(&self, cfg: &Config) -> Result<FilterCriteria> {
		let kind = match self.kind.as_deref() {
			None => ListingKind::Sale,
			Some(raw) => ListingKind::parse(raw).ok_or_else(|| Error::InvalidRequest {
				message: format!("kind '{}' is not in allowlist: SALE, RENT.", raw.trim()),
			})?,
		};
		let location = self.normalize_location(cfg)?;
		let price_min_pence = parse_optional_integer("price_min", self.price_min.as_deref())?;
		let price_max_pence = parse_optional_integer("price_max", self.price_max.as_deref())?;
		let bedrooms = parse_count_set("bedrooms", &self.bedrooms)?;
		let bathrooms = parse_count_set("bathrooms", &self.bathrooms)?;
		let property_types = parse_property_types(&self.property_types)?;
		// Unknown flag names are don't-care, exactly like an absent flag.
		let required_amenities = self
			.amenities
			.iter()
			.filter_map(|raw| Amenity::parse(raw))
			.collect::<BTreeSet<Amenity>>();
		let polygon = parse_polygon(cfg, self.polygon.as_deref())?;
		let sort = match self.sort.as_deref() {
			None => SortKey::default(),
			Some(raw) => SortKey::parse(raw).ok_or_else(|| Error::InvalidRequest {
				message: format!(
					"sort '{}' is not in allowlist: newest, price_low, price_high, most_reduced.",
					raw.trim(),
				),
			})?,
		};
		let page = self.normalize_page()?;
		let page_size = self.normalize_page_size(cfg)?;

		Ok(FilterCriteria {
			kind,
			location,
			price_min_pence,
			price_max_pence,
			bedrooms,
			bathrooms,
			property_types,
			required_amenities,
			polygon,
			sort,
			page,
			page_size,
		}
		.normalized())
	}

	fn normalize_location(&self, cfg: &Config) -> Result<Option<String>> {
		let Some(location) =
			self.location.as_deref().map(str::trim).filter(|location| !location.is_empty())
		else {
			return Ok(None);
		};

		if location.len() > cfg.search.max_location_bytes {
			return Err(Error::InvalidRequest {
				message: format!(
					"location exceeds search.max_location_bytes ({}).",
					cfg.search.max_location_bytes,
				),
			});
		}

		Ok(Some(title_case(location)))
	}

	fn normalize_page(&self) -> Result<u32> {
		let Some(raw) = self.page.as_deref() else {
			return Ok(1);
		};
		let page: u32 = raw.trim().parse().map_err(|_| Error::InvalidRequest {
			message: format!("page '{}' must be a decimal integer.", raw.trim()),
		})?;

		if page < 1 {
			return Err(Error::InvalidRequest {
				message: "page must be greater than zero.".to_string(),
			});
		}

		Ok(page)
	}

	fn normalize_page_size(&self, cfg: &Config) -> Result<u32> {
		let Some(raw) = self.page_size.as_deref() else {
			return Ok(cfg.search.default_page_size);
		};
		let page_size: u32 = raw.trim().parse().map_err(|_| Error::InvalidRequest {
			message: format!("page_size '{}' must be a decimal integer.", raw.trim()),
		})?;

		if page_size < 1 {
			return Err(Error::InvalidRequest {
				message: "page_size must be greater than zero.".to_string(),
			});
		}
		if page_size > cfg.search.max_page_size {
			return Err(Error::InvalidRequest {
				message: format!(
					"page_size must not exceed search.max_page_size ({}).",
					cfg.search.max_page_size,
				),
			});
		}

		Ok(page_size)
	}
}

fn parse_optional_integer(field: &str, raw: Option<&str>) -> Result<Option<i64>> {
	let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
		return Ok(None);
	};
	let value = raw.parse().map_err(|_| Error::InvalidRequest {
		message: format!("{field} '{raw}' must be a decimal integer in minor currency units."),
	})?;

	Ok(Some(value))
}

fn parse_count_set(field: &str, raw: &[String]) -> Result<BTreeSet<u32>> {
	raw.iter()
		.map(|value| {
			value.trim().parse().map_err(|_| Error::InvalidRequest {
				message: format!("{field} '{}' must be a decimal integer.", value.trim()),
			})
		})
		.collect()
}

fn parse_property_types(raw: &[String]) -> Result<BTreeSet<PropertyType>> {
	raw.iter()
		.map(|value| {
			PropertyType::parse(value).ok_or_else(|| Error::InvalidRequest {
				message: format!(
					"property_type '{}' is not in allowlist: bungalow, cottage, detached, flat, \
					 maisonette, semi_detached, terraced.",
					value.trim(),
				),
			})
		})
		.collect()
}

fn parse_polygon(cfg: &Config, raw: Option<&str>) -> Result<Option<Polygon>> {
	let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
		return Ok(None);
	};
	let vertices = raw
		.split(';')
		.map(parse_vertex)
		.collect::<Result<Vec<Coordinate>>>()?;

	if vertices.len() > cfg.search.max_polygon_vertices {
		return Err(Error::InvalidRequest {
			message: format!(
				"polygon exceeds search.max_polygon_vertices ({}).",
				cfg.search.max_polygon_vertices,
			),
		});
	}

	// Fewer than 3 vertices encloses nothing; dropped rather than rejected.
	let polygon = Polygon::new(vertices);

	Ok(polygon.is_usable().then_some(polygon))
}

fn parse_vertex(raw: &str) -> Result<Coordinate> {
	let invalid = || Error::InvalidRequest {
		message: format!("polygon vertex '{}' must be 'lat,lon' decimal degrees.", raw.trim()),
	};
	let (latitude, longitude) = raw.trim().split_once(',').ok_or_else(invalid)?;
	let latitude = latitude.trim().parse().map_err(|_| invalid())?;
	let longitude = longitude.trim().parse().map_err(|_| invalid())?;

	Ok(Coordinate { latitude, longitude })
}

fn title_case(raw: &str) -> String {
	raw.split_whitespace()
		.map(|word| {
			let mut chars = word.chars();

			match chars.next() {
				Some(first) => first
					.to_uppercase()
					.chain(chars.flat_map(|rest| rest.to_lowercase()))
					.collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}
