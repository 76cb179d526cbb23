//! CSV export.
//!
//! One row per car park, sorted by identifier so repeated runs over the same
//! data produce identical files.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::collect::Locations;

/// Header row of the output file.
pub const CSV_HEADER: [&str; 3] = ["CarParkID", "latitude", "longitude"];

/// Digits after the decimal point for coordinates.
const COORDINATE_PRECISION: usize = 10;

/// Writes `locations` to `path`, replacing any existing file.
///
/// # Returns
///
/// The number of data rows written (excluding the header).
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_csv(locations: &Locations, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let count = write_rows(locations, file)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    log::info!("Wrote {} row(s) to {}", count, path.display());
    Ok(count)
}

fn write_rows<W: Write>(locations: &Locations, out: W) -> Result<usize> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    let mut ids: Vec<&String> = locations.keys().collect();
    ids.sort();

    for id in &ids {
        let coordinate = &locations[*id];
        let latitude = format!("{:.*}", COORDINATE_PRECISION, coordinate.latitude);
        let longitude = format!("{:.*}", COORDINATE_PRECISION, coordinate.longitude);
        writer.write_record([id.as_str(), latitude.as_str(), longitude.as_str()])?;
    }

    writer.flush()?;
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinate;
    use tempfile::TempDir;

    fn locations(entries: &[(&str, f64, f64)]) -> Locations {
        entries
            .iter()
            .map(|(id, latitude, longitude)| {
                (
                    id.to_string(),
                    Coordinate {
                        latitude: *latitude,
                        longitude: *longitude,
                    },
                )
            })
            .collect()
    }

    fn render(locations: &Locations) -> String {
        let mut buf = Vec::new();
        write_rows(locations, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_rows_sorted_with_fixed_precision() {
        let out = render(&locations(&[("B1", 1.0, 103.0), ("A1", 1.5, 103.5)]));
        assert_eq!(
            out,
            "CarParkID,latitude,longitude\n\
             A1,1.5000000000,103.5000000000\n\
             B1,1.0000000000,103.0000000000\n"
        );
    }

    #[test]
    fn test_precision_rounds_long_coordinates() {
        let out = render(&locations(&[("1", 1.4247403589254135, 103.85173152023572)]));
        assert!(out.contains("1,1.4247403589,103.8517315202\n"));
    }

    #[test]
    fn test_empty_mapping_writes_header_only() {
        let out = render(&Locations::new());
        assert_eq!(out, "CarParkID,latitude,longitude\n");
    }

    #[test]
    fn test_identifier_with_comma_is_quoted() {
        let out = render(&locations(&[("A,1", 1.0, 2.0)]));
        assert!(out.contains("\"A,1\",1.0000000000,2.0000000000"));
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carparks.csv");
        std::fs::write(&path, "stale content that is longer than the new file\n".repeat(10))
            .unwrap();

        let count = write_csv(&locations(&[("Z9", -1.0, 2.0)]), &path).unwrap();
        assert_eq!(count, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "CarParkID,latitude,longitude\nZ9,-1.0000000000,2.0000000000\n"
        );
    }

    #[test]
    fn test_write_csv_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_csv(&locations(&[("A", 1.0, 2.0)]), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
