use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Coordinate {
	pub latitude: f64,
	pub longitude: f64,
}

/// An implicitly closed ring of vertices; callers do not repeat the first
/// vertex at the end.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Polygon {
	pub vertices: Vec<Coordinate>,
}
impl Polygon {
	pub fn new(vertices: Vec<Coordinate>) -> Self {
		Self { vertices }
	}

	/// Fewer than 3 vertices cannot enclose an area; such a ring is ignored by
	/// normalization rather than rejected.
	pub fn is_usable(&self) -> bool {
		self.vertices.len() >= 3
	}

	/// Even-odd ray-casting test. A point exactly on a vertex or edge may
	/// classify either way; degenerate rings (zero area, self-intersecting)
	/// still produce a boolean from the crossing count.
	pub fn contains(&self, point: Coordinate) -> bool {
		if self.vertices.is_empty() {
			return false;
		}

		let mut inside = false;
		let mut j = self.vertices.len() - 1;

		for i in 0..self.vertices.len() {
			let a = self.vertices[i];
			let b = self.vertices[j];

			if (a.latitude > point.latitude) != (b.latitude > point.latitude) {
				let crossing_longitude = (b.longitude - a.longitude)
					* (point.latitude - a.latitude)
					/ (b.latitude - a.latitude)
					+ a.longitude;

				if point.longitude < crossing_longitude {
					inside = !inside;
				}
			}

			j = i;
		}

		inside
	}
}
