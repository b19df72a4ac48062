//! Geographic view models for the point maps: bounding boxes, styled
//! points and the per-type marker colors.

use crate::consts::cli_consts::map::{MIN_SPAN_DEG, PADDING_FRACTION};
use crate::models::{Branch, Poi};
use ratatui::style::Color;

/// Marker color for branch points (the original dashboard's deep blue).
pub const BRANCH_COLOR: Color = Color::Blue;

/// Marker color for a POI primary type. Unmapped types fall back to gray.
pub fn poi_color(primary_type: &str) -> Color {
    match primary_type {
        "school" | "college" | "university" => Color::Red,
        "office" => Color::Green,
        "hospital" | "clinic" => Color::Yellow,
        "mall" => Color::Magenta,
        "restaurant" => Color::LightRed,
        _ => Color::Gray,
    }
}

/// Latitude/longitude bounding box over a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn empty() -> Self {
        Self {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    pub fn extend(&mut self, latitude: f64, longitude: f64) {
        self.min_lat = self.min_lat.min(latitude);
        self.max_lat = self.max_lat.max(latitude);
        self.min_lon = self.min_lon.min(longitude);
        self.max_lon = self.max_lon.max(longitude);
    }

    /// Viewport-fitting bounds: the data box widened by a padding fraction,
    /// with a minimum span so a single point still gets a usable viewport.
    /// Empty bounds are returned unchanged (the fit is a no-op).
    pub fn padded(&self) -> Self {
        if self.is_empty() {
            return *self;
        }

        let lat_span = (self.max_lat - self.min_lat).max(MIN_SPAN_DEG);
        let lon_span = (self.max_lon - self.min_lon).max(MIN_SPAN_DEG);
        let lat_center = (self.max_lat + self.min_lat) / 2.0;
        let lon_center = (self.max_lon + self.min_lon) / 2.0;
        let lat_half = lat_span * (1.0 + PADDING_FRACTION) / 2.0;
        let lon_half = lon_span * (1.0 + PADDING_FRACTION) / 2.0;

        Self {
            min_lat: lat_center - lat_half,
            max_lat: lat_center + lat_half,
            min_lon: lon_center - lon_half,
            max_lon: lon_center + lon_half,
        }
    }
}

/// A single styled marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub color: Color,
    pub label: String,
}

/// Everything a map panel needs to draw: the markers and the fitted
/// viewport. Rebuilt wholesale from current state on every redraw, so the
/// map always matches the latest successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub points: Vec<MapPoint>,
    pub bounds: GeoBounds,
}

impl MapView {
    pub fn from_branches(branches: &[Branch]) -> Self {
        let mut bounds = GeoBounds::empty();
        let points = branches
            .iter()
            .map(|branch| {
                bounds.extend(branch.latitude, branch.longitude);
                MapPoint {
                    latitude: branch.latitude,
                    longitude: branch.longitude,
                    color: BRANCH_COLOR,
                    label: branch.name.clone(),
                }
            })
            .collect();
        Self { points, bounds }
    }

    /// POIs without coordinates are skipped, matching the original map's
    /// guard against partial records.
    pub fn from_pois(pois: &[Poi]) -> Self {
        let mut bounds = GeoBounds::empty();
        let points = pois
            .iter()
            .filter_map(|poi| {
                let (latitude, longitude) = poi.coordinates()?;
                bounds.extend(latitude, longitude);
                Some(MapPoint {
                    latitude,
                    longitude,
                    color: poi_color(poi.primary_type()),
                    label: poi.name.clone(),
                })
            })
            .collect();
        Self { points, bounds }
    }

    /// Canvas x bounds (longitude axis) for the fitted viewport.
    pub fn x_bounds(&self) -> [f64; 2] {
        let padded = self.bounds.padded();
        [padded.min_lon, padded.max_lon]
    }

    /// Canvas y bounds (latitude axis) for the fitted viewport.
    pub fn y_bounds(&self) -> [f64; 2] {
        let padded = self.bounds.padded();
        [padded.min_lat, padded.max_lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str, latitude: f64, longitude: f64) -> Branch {
        Branch {
            name: name.to_string(),
            ifsc_code: String::new(),
            address: String::new(),
            city: String::new(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_bounds_cover_all_points() {
        let branches = vec![
            branch("A", 12.9, 77.5),
            branch("B", 13.1, 77.7),
            branch("C", 12.8, 77.6),
        ];
        let view = MapView::from_branches(&branches);
        assert_eq!(view.points.len(), 3);
        assert_eq!(view.bounds.min_lat, 12.8);
        assert_eq!(view.bounds.max_lat, 13.1);
        assert_eq!(view.bounds.min_lon, 77.5);
        assert_eq!(view.bounds.max_lon, 77.7);
    }

    #[test]
    fn test_empty_fit_is_noop() {
        let view = MapView::from_branches(&[]);
        assert!(view.bounds.is_empty());
        assert_eq!(view.bounds.padded(), view.bounds);
    }

    #[test]
    fn test_padded_bounds_contain_data_bounds() {
        let mut bounds = GeoBounds::empty();
        bounds.extend(12.9, 77.5);
        bounds.extend(13.1, 77.7);
        let padded = bounds.padded();
        assert!(padded.min_lat < bounds.min_lat);
        assert!(padded.max_lat > bounds.max_lat);
        assert!(padded.min_lon < bounds.min_lon);
        assert!(padded.max_lon > bounds.max_lon);
    }

    #[test]
    fn test_single_point_gets_nonzero_viewport() {
        let view = MapView::from_branches(&[branch("A", 12.9, 77.5)]);
        let [min_lon, max_lon] = view.x_bounds();
        let [min_lat, max_lat] = view.y_bounds();
        assert!(max_lon - min_lon > 0.0);
        assert!(max_lat - min_lat > 0.0);
    }

    #[test]
    fn test_pois_without_coordinates_are_skipped() {
        let with_coords: Poi = serde_json::from_str(
            r#"{"name":"A","latitude":12.9,"longitude":77.5,"types":["school"]}"#,
        )
        .unwrap();
        let without_coords: Poi = serde_json::from_str(r#"{"name":"B"}"#).unwrap();

        let view = MapView::from_pois(&[with_coords, without_coords]);
        assert_eq!(view.points.len(), 1);
        assert_eq!(view.points[0].color, Color::Red);
    }

    #[test]
    fn test_poi_color_mapping() {
        assert_eq!(poi_color("school"), Color::Red);
        assert_eq!(poi_color("university"), Color::Red);
        assert_eq!(poi_color("office"), Color::Green);
        assert_eq!(poi_color("clinic"), Color::Yellow);
        assert_eq!(poi_color("mall"), Color::Magenta);
        assert_eq!(poi_color("restaurant"), Color::LightRed);
        assert_eq!(poi_color("temple"), Color::Gray);
        assert_eq!(poi_color("Unknown"), Color::Gray);
    }
}
