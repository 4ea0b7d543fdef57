use super::Coordinate;
use geo::{Coord, GeodesicDistance, Intersects, LineString, Point, Polygon};
use std::f64::consts::PI;

/// Geodesic (WGS-84) distance between two coordinates, in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    a.to_point().geodesic_distance(&b.to_point()) / 1000.0
}

/// A fixed polygonal region whose entry triggers a toll.
#[derive(Debug, Clone)]
pub struct TollZone {
    name: String,
    polygon: Polygon<f64>,
}

impl TollZone {
    /// Build a zone from its outline. The ring is closed automatically.
    pub fn from_vertices(name: impl Into<String>, vertices: &[Coordinate]) -> Self {
        let ring: Vec<Coord<f64>> = vertices.iter().map(|c| c.to_coord()).collect();
        Self {
            name: name.into(),
            polygon: Polygon::new(LineString::new(ring), vec![]),
        }
    }

    /// Approximate a circle of `radius_deg` degrees around `center`.
    ///
    /// The radius is applied in degree space on both axes, so the zone is a
    /// circle on the lat/lon plane rather than on the ground.
    pub fn circle(name: impl Into<String>, center: Coordinate, radius_deg: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let vertices: Vec<Coordinate> = (0..segments)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / segments as f64;
                Coordinate::new(
                    center.lat + radius_deg * angle.sin(),
                    center.lon + radius_deg * angle.cos(),
                )
            })
            .collect();
        Self::from_vertices(name, &vertices)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Membership test. Points on the boundary count as inside.
    pub fn contains(&self, point: Coordinate) -> bool {
        self.polygon.intersects(&point.to_point())
    }
}

impl Coordinate {
    // geo uses x = longitude, y = latitude.
    fn to_coord(self) -> Coord<f64> {
        Coord { x: self.lon, y: self.lat }
    }

    fn to_point(self) -> Point<f64> {
        Point::from(self.to_coord())
    }
}
