//! Inequality dataset loader.
//!
//! Reads the Gini CSV (`country,iso,year,party,gini`) into
//! [`GiniRecord`]s. Loading is the only place the dataset is reshaped:
//! party labels are normalized to the [`Party`] enum and the map marker
//! radius is precomputed from the Gini value. Everything downstream is
//! read-only.

use std::io;
use std::path::Path;

use ginidash_types::{GiniRecord, Party};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

/// Scale factor from a `[0, 1]` Gini coefficient to a map marker radius.
const MARKER_SCALE: Decimal = Decimal::ONE_HUNDRED;

/// Errors that can occur while loading the inequality dataset.
#[derive(Debug, thiserror::Error)]
pub enum GiniLoadError {
    /// The CSV could not be read or a row failed to deserialize.
    #[error("failed to read gini CSV: {source}")]
    Csv {
        /// The underlying CSV error.
        #[from]
        source: csv::Error,
    },

    /// A row carried a party label outside the known set.
    #[error("unknown party label {label:?} for {iso} in {year}")]
    UnknownParty {
        /// The offending label as it appeared in the file.
        label: String,
        /// Alpha-3 code of the row.
        iso: String,
        /// Year of the row.
        year: i32,
    },

    /// A row carried a Gini coefficient outside `[0, 1]`.
    #[error("gini value {value} out of range for {iso} in {year}")]
    GiniOutOfRange {
        /// The offending value.
        value: Decimal,
        /// Alpha-3 code of the row.
        iso: String,
        /// Year of the row.
        year: i32,
    },
}

/// One CSV row as it appears on disk, before normalization.
#[derive(Debug, Deserialize)]
struct RawGiniRow {
    country: String,
    iso: String,
    year: i32,
    party: String,
    gini: Decimal,
}

/// Load Gini records from any CSV reader.
///
/// Rows must carry the headers `country,iso,year,party,gini`. Party
/// labels may be English or French. Malformed rows fail the whole load;
/// the dashboard never runs on a partially parsed dataset.
///
/// # Errors
///
/// Returns [`GiniLoadError::Csv`] on read or deserialize failure,
/// [`GiniLoadError::UnknownParty`] or [`GiniLoadError::GiniOutOfRange`]
/// on semantically invalid rows.
pub fn load_gini_records<R: io::Read>(reader: R) -> Result<Vec<GiniRecord>, GiniLoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in rdr.deserialize() {
        let raw: RawGiniRow = row?;
        records.push(normalize_row(raw)?);
    }

    Ok(records)
}

/// Load Gini records from a CSV file on disk.
///
/// # Errors
///
/// Same as [`load_gini_records`]; file-open failures surface as
/// [`GiniLoadError::Csv`].
pub fn load_gini_file(path: &Path) -> Result<Vec<GiniRecord>, GiniLoadError> {
    let rdr = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in rdr.into_deserialize() {
        let raw: RawGiniRow = row?;
        records.push(normalize_row(raw)?);
    }

    info!(path = %path.display(), rows = records.len(), "Gini dataset loaded");
    Ok(records)
}

/// Normalize one raw row: map the party label and compute the marker
/// radius.
fn normalize_row(raw: RawGiniRow) -> Result<GiniRecord, GiniLoadError> {
    let party =
        Party::from_label(&raw.party).ok_or_else(|| GiniLoadError::UnknownParty {
            label: raw.party.clone(),
            iso: raw.iso.clone(),
            year: raw.year,
        })?;

    if raw.gini < Decimal::ZERO || raw.gini > Decimal::ONE {
        return Err(GiniLoadError::GiniOutOfRange {
            value: raw.gini,
            iso: raw.iso,
            year: raw.year,
        });
    }

    // In range [0, 1], so the scaled product cannot overflow; treat a
    // failed multiply as out of range anyway rather than panicking.
    let marker_size = raw
        .gini
        .checked_mul(MARKER_SCALE)
        .ok_or_else(|| GiniLoadError::GiniOutOfRange {
            value: raw.gini,
            iso: raw.iso.clone(),
            year: raw.year,
        })?;

    Ok(GiniRecord {
        country: raw.country,
        iso: raw.iso,
        year: raw.year,
        party,
        gini: raw.gini,
        marker_size,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const SAMPLE: &str = "\
country,iso,year,party,gini
France,FRA,2004,Gauche,0.281
France,FRA,2005,Droite,0.279
Sweden,SWE,2004,Left,0.23
";

    #[test]
    fn loads_and_normalizes_rows() {
        let records = load_gini_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        let first = records.first().unwrap();
        assert_eq!(first.country, "France");
        assert_eq!(first.iso, "FRA");
        assert_eq!(first.year, 2004);
        assert_eq!(first.party, Party::Left);
        assert_eq!(first.gini, dec!(0.281));
        assert_eq!(first.marker_size, dec!(28.100));
    }

    #[test]
    fn unknown_party_label_fails_the_load() {
        let csv = "country,iso,year,party,gini\nFrance,FRA,2004,Royaliste,0.28\n";
        let err = load_gini_records(csv.as_bytes());
        assert!(matches!(
            err,
            Err(GiniLoadError::UnknownParty { ref label, .. }) if label == "Royaliste"
        ));
    }

    #[test]
    fn out_of_range_gini_fails_the_load() {
        let csv = "country,iso,year,party,gini\nFrance,FRA,2004,Centre,1.5\n";
        let err = load_gini_records(csv.as_bytes());
        assert!(matches!(err, Err(GiniLoadError::GiniOutOfRange { .. })));
    }

    #[test]
    fn malformed_year_is_a_csv_error() {
        let csv = "country,iso,year,party,gini\nFrance,FRA,soon,Centre,0.28\n";
        let err = load_gini_records(csv.as_bytes());
        assert!(matches!(err, Err(GiniLoadError::Csv { .. })));
    }
}
