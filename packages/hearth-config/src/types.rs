use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	pub alerts: Alerts,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub default_page_size: u32,
	pub max_page_size: u32,
	pub max_polygon_vertices: usize,
	pub max_location_bytes: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Alerts {
	pub delivery_batch_size: usize,
}

impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

impl Default for Search {
	fn default() -> Self {
		Self {
			default_page_size: 20,
			max_page_size: 100,
			max_polygon_vertices: 128,
			max_location_bytes: 512,
		}
	}
}

impl Default for Alerts {
	fn default() -> Self {
		Self { delivery_batch_size: 500 }
	}
}
