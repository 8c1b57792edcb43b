//! Planar coordinate value object and polygon helpers
//!
//! Coordinates travel as `"lat,lng"` strings or `[lat, lng]` pairs on the
//! wire; inside the crate they are always a [`Coordinate`].

use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

/// Fewest vertices that still describe an area
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = DomainError;

    /// Parses `"lat,lng"`; whitespace around either number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::Validation(format!("'{}' is not a \"lat,lng\" pair", s));

        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
        Ok(Self { lat, lng })
    }
}

/// Arithmetic mean of the vertex latitudes and longitudes.
///
/// Not an area-weighted or geodesic centroid. Stored lot centers were
/// computed with this formula.
pub fn centroid(vertices: &[Coordinate]) -> DomainResult<Coordinate> {
    if vertices.is_empty() {
        return Err(DomainError::InvalidGeometry(
            "cannot compute the center of an empty boundary".to_string(),
        ));
    }

    let n = vertices.len() as f64;
    let (sum_lat, sum_lng) = vertices
        .iter()
        .fold((0.0, 0.0), |(lat, lng), v| (lat + v.lat, lng + v.lng));

    Ok(Coordinate::new(sum_lat / n, sum_lng / n))
}

/// Checks a boundary before it is persisted.
pub fn validate_polygon(vertices: &[Coordinate]) -> DomainResult<()> {
    if vertices.len() < MIN_POLYGON_VERTICES {
        return Err(DomainError::InvalidGeometry(format!(
            "a boundary needs at least {} vertices, got {}",
            MIN_POLYGON_VERTICES,
            vertices.len()
        )));
    }

    if let Some((idx, bad)) = vertices.iter().enumerate().find(|(_, v)| !v.is_valid()) {
        return Err(DomainError::InvalidGeometry(format!(
            "vertex {} ({}) is outside the valid latitude/longitude range",
            idx + 1,
            bad
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn pts(raw: &[[f64; 2]]) -> Vec<Coordinate> {
        raw.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&pts(&[[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0]])).unwrap();
        assert!((c.lat - 2.0).abs() < EPS);
        assert!((c.lng - 2.0).abs() < EPS);
    }

    #[test]
    fn centroid_is_plain_vertex_mean() {
        // Skewed polygon: an area-weighted centroid would differ.
        let v = pts(&[[0.0, 0.0], [0.0, 10.0], [1.0, 10.0], [1.0, 9.0], [0.5, 9.5]]);
        let c = centroid(&v).unwrap();
        let mean_lat = v.iter().map(|p| p.lat).sum::<f64>() / v.len() as f64;
        let mean_lng = v.iter().map(|p| p.lng).sum::<f64>() / v.len() as f64;
        assert!((c.lat - mean_lat).abs() < EPS);
        assert!((c.lng - mean_lng).abs() < EPS);
    }

    #[test]
    fn centroid_of_single_point_is_that_point() {
        let c = centroid(&pts(&[[3.139, 101.6869]])).unwrap();
        assert_eq!(c, Coordinate::new(3.139, 101.6869));
    }

    #[test]
    fn centroid_of_nothing_is_invalid_geometry() {
        assert!(matches!(centroid(&[]), Err(DomainError::InvalidGeometry(_))));
    }

    #[test]
    fn parse_and_display() {
        let c: Coordinate = " 3.1390 , 101.6869 ".parse().unwrap();
        assert_eq!(c, Coordinate::new(3.139, 101.6869));
        assert_eq!(c.to_string(), "3.139,101.6869");
        assert_eq!(Coordinate::new(2.0, 2.0).to_string(), "2,2");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("Level 2".parse::<Coordinate>().is_err());
        assert!("1.0".parse::<Coordinate>().is_err());
        assert!("a,b".parse::<Coordinate>().is_err());
    }

    #[test]
    fn polygon_needs_three_vertices() {
        let err = validate_polygon(&pts(&[[1.0, 1.0], [2.0, 2.0]])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidGeometry(_)));
        assert!(validate_polygon(&pts(&[[1.0, 1.0], [2.0, 2.0], [1.0, 2.0]])).is_ok());
    }

    #[test]
    fn polygon_rejects_out_of_range_vertex() {
        let err = validate_polygon(&pts(&[[1.0, 1.0], [95.0, 2.0], [1.0, 2.0]])).unwrap_err();
        assert!(err.to_string().contains("vertex 2"));
        assert!(validate_polygon(&pts(&[[1.0, 1.0], [f64::NAN, 2.0], [1.0, 2.0]])).is_err());
    }
}
