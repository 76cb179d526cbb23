//! Parsing of DataMall `Location` strings.
//!
//! The endpoint reports a car park's position as a single string holding
//! latitude and longitude separated by whitespace, e.g.
//! `"1.4247403589254135 103.85173152023572"`.

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Parses a `"<lat> <lon>"` string into a [`Coordinate`].
///
/// Returns `None` when the string is empty, does not hold exactly two
/// whitespace-separated tokens, or either token is not a finite decimal
/// number (`NaN` and `inf` are rejected).
/// Callers treat `None` as "skip this record".
pub fn parse_location(raw: &str) -> Option<Coordinate> {
    let mut tokens = raw.split_whitespace();
    let (lat, lon) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(lat), Some(lon), None) => (lat, lon),
        _ => return None,
    };

    Some(Coordinate {
        latitude: lat.parse().ok()?,
        longitude: lon.parse().ok()?,
    })
    .filter(|c| c.latitude.is_finite() && c.longitude.is_finite())
}
