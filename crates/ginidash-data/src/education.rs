//! OECD education-level aggregation.
//!
//! Standalone cleaning pipeline, unrelated to the dashboard dataset:
//! reads the OECD education-level CSV (`LOCATION`, `TIME`, `Value`,
//! other columns ignored), restricts rows to a year window, averages the
//! value per (location, year), and resolves location codes to display
//! names. Codes without a lookup entry keep a `None` name instead of
//! failing.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use ginidash_types::{EducationMean, EducationRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::countries::country_name;

/// Errors that can occur in the education pipeline.
#[derive(Debug, thiserror::Error)]
pub enum EducationError {
    /// The CSV could not be read or a row failed to deserialize.
    #[error("failed to read education CSV: {source}")]
    Csv {
        /// The underlying CSV error.
        #[from]
        source: csv::Error,
    },

    /// Writing the aggregated output failed.
    #[error("failed to write education means: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Summing values for one (location, year) overflowed.
    #[error("value aggregation overflowed for {location} in {year}")]
    AggregationOverflow {
        /// Location code whose values overflowed the accumulator.
        location: String,
        /// Year of the overflowing group.
        year: i32,
    },
}

/// One OECD CSV row as it appears on disk. Columns beyond these three
/// (indicator, subject, measure, flags) are ignored.
#[derive(Debug, Deserialize)]
struct RawEducationRow {
    #[serde(rename = "LOCATION")]
    location: String,
    #[serde(rename = "TIME")]
    year: i32,
    #[serde(rename = "Value")]
    value: Decimal,
}

/// Read raw education rows from any CSV reader.
///
/// # Errors
///
/// Returns [`EducationError::Csv`] on read or deserialize failure.
pub fn read_education_records<R: io::Read>(
    reader: R,
) -> Result<Vec<EducationRecord>, EducationError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for row in rdr.deserialize() {
        let raw: RawEducationRow = row?;
        rows.push(EducationRecord {
            location: raw.location,
            year: raw.year,
            value: raw.value,
        });
    }

    Ok(rows)
}

/// Read raw education rows from a CSV file on disk.
///
/// # Errors
///
/// Same as [`read_education_records`].
pub fn load_education_file(path: &Path) -> Result<Vec<EducationRecord>, EducationError> {
    let rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for row in rdr.into_deserialize() {
        let raw: RawEducationRow = row?;
        rows.push(EducationRecord {
            location: raw.location,
            year: raw.year,
            value: raw.value,
        });
    }

    info!(path = %path.display(), rows = rows.len(), "education dataset loaded");
    Ok(rows)
}

/// Aggregate raw rows into per-(location, year) means within
/// `[min_year, max_year]`, resolving location codes to display names.
///
/// Output is ordered by (location, year). Rows outside the year window
/// are dropped; locations without a lookup entry keep `country: None`.
///
/// # Errors
///
/// Returns [`EducationError::AggregationOverflow`] if a group's sum
/// overflows.
pub fn aggregate_education(
    rows: &[EducationRecord],
    min_year: i32,
    max_year: i32,
) -> Result<Vec<EducationMean>, EducationError> {
    let mut groups: BTreeMap<(String, i32), (Decimal, u32)> = BTreeMap::new();

    for row in rows {
        if row.year < min_year || row.year > max_year {
            continue;
        }
        let entry = groups
            .entry((row.location.clone(), row.year))
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.checked_add(row.value).ok_or_else(|| {
            EducationError::AggregationOverflow {
                location: row.location.clone(),
                year: row.year,
            }
        })?;
        entry.1 = entry.1.saturating_add(1);
    }

    let mut means = Vec::new();
    for ((location, year), (sum, count)) in groups {
        let Some(mean) = sum.checked_div(Decimal::from(count)) else {
            continue; // count is always >= 1 for a present group
        };
        let country = country_name(&location).map(ToOwned::to_owned);
        means.push(EducationMean {
            location,
            country,
            year,
            mean,
        });
    }
    Ok(means)
}

/// Write aggregated means as CSV (`location,country,year,mean`), with an
/// empty `country` field for unresolved codes.
///
/// # Errors
///
/// Returns [`EducationError::Csv`] on serialization failure.
pub fn write_education_means<W: io::Write>(
    writer: W,
    means: &[EducationMean],
) -> Result<(), EducationError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for mean in means {
        wtr.serialize(mean)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const SAMPLE: &str = "\
LOCATION,INDICATOR,SUBJECT,MEASURE,FREQUENCY,TIME,Value,Flag Codes
FRA,EDUADULT,BUPPSRY,PC_25_64,A,2014,22.5,
FRA,EDUADULT,TRY,PC_25_64,A,2014,32.9,
FRA,EDUADULT,TRY,PC_25_64,A,2015,33.9,
OAVG,EDUADULT,TRY,PC_25_64,A,2014,35.0,
SWE,EDUADULT,TRY,PC_25_64,A,2005,28.0,
";

    fn sample_rows() -> Vec<EducationRecord> {
        read_education_records(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn reads_only_the_three_relevant_columns() {
        let rows = sample_rows();
        assert_eq!(rows.len(), 5);
        let first = rows.first().unwrap();
        assert_eq!(first.location, "FRA");
        assert_eq!(first.year, 2014);
        assert_eq!(first.value, dec!(22.5));
    }

    #[test]
    fn aggregates_means_within_the_year_window() {
        let means = aggregate_education(&sample_rows(), 2012, 2021).unwrap();

        // SWE 2005 falls outside the window.
        assert_eq!(means.len(), 3);
        assert!(means.iter().all(|m| m.year >= 2012 && m.year <= 2021));

        let fra_2014 = means
            .iter()
            .find(|m| m.location == "FRA" && m.year == 2014)
            .unwrap();
        assert_eq!(fra_2014.mean, dec!(27.7));
        assert_eq!(fra_2014.country.as_deref(), Some("France"));
    }

    #[test]
    fn unknown_location_keeps_none_country() {
        let means = aggregate_education(&sample_rows(), 2012, 2021).unwrap();
        let oavg = means.iter().find(|m| m.location == "OAVG").unwrap();
        assert!(oavg.country.is_none());
        assert_eq!(oavg.mean, dec!(35.0));
    }

    #[test]
    fn output_is_location_then_year_ordered() {
        let means = aggregate_education(&sample_rows(), 2012, 2021).unwrap();
        let keys: Vec<(&str, i32)> = means
            .iter()
            .map(|m| (m.location.as_str(), m.year))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn writes_csv_with_empty_country_for_unresolved_codes() {
        let means = aggregate_education(&sample_rows(), 2012, 2021).unwrap();
        let mut out = Vec::new();
        write_education_means(&mut out, &means).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("location,country,year,mean"));
        assert!(text.contains("FRA,France,2014,27.7"));
        assert!(text.contains("OAVG,,2014,35"));
    }
}
