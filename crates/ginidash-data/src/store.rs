//! Read-only store over the loaded inequality dataset.
//!
//! [`GiniStore`] is built once at startup and never mutated afterwards.
//! Every dashboard figure is a filter or aggregation over it; lookups
//! are always by predicate, never by index.

use std::collections::{BTreeMap, BTreeSet};

use ginidash_types::{GiniRecord, Party, YearRange};
use rand::Rng;
use rust_decimal::Decimal;

/// Errors that can occur while building the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The dataset contained no rows; the dashboard has nothing to show.
    #[error("gini dataset is empty")]
    EmptyDataset,

    /// Summing Gini values overflowed (malformed dataset).
    #[error("gini aggregation overflowed for {country}")]
    AggregationOverflow {
        /// Country whose values overflowed the accumulator.
        country: String,
    },
}

/// Immutable inequality dataset with the derived lists the dashboard
/// queries: sorted unique years and countries, and the year range.
#[derive(Debug, Clone)]
pub struct GiniStore {
    records: Vec<GiniRecord>,
    years: Vec<i32>,
    countries: Vec<String>,
    year_range: YearRange,
}

impl GiniStore {
    /// Build a store from loaded records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyDataset`] when `records` is empty;
    /// the year range would be undefined.
    pub fn new(records: Vec<GiniRecord>) -> Result<Self, StoreError> {
        let years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let countries: Vec<String> = records
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (Some(min), Some(max)) = (years.first().copied(), years.last().copied()) else {
            return Err(StoreError::EmptyDataset);
        };

        Ok(Self {
            records,
            years,
            countries,
            year_range: YearRange { min, max },
        })
    }

    /// All records, in load order.
    pub fn records(&self) -> &[GiniRecord] {
        &self.records
    }

    /// Sorted unique years present in the dataset.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Sorted unique country names present in the dataset.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Inclusive year span of the dataset.
    pub const fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// All records whose party is in `parties` and whose year matches.
    ///
    /// An empty result is a valid answer (rendered as an empty figure),
    /// not an error.
    pub fn filter(&self, parties: &BTreeSet<Party>, year: i32) -> Vec<&GiniRecord> {
        self.records
            .iter()
            .filter(|r| r.year == year && parties.contains(&r.party))
            .collect()
    }

    /// All records for one country, ordered by year.
    pub fn country_series(&self, country: &str) -> Vec<&GiniRecord> {
        let mut series: Vec<&GiniRecord> = self
            .records
            .iter()
            .filter(|r| r.country == country)
            .collect();
        series.sort_by_key(|r| r.year);
        series
    }

    /// Mean Gini per governing party for one country.
    ///
    /// Parties that never governed the country are absent from the map.
    /// An unknown country yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AggregationOverflow`] if the sum overflows,
    /// which a well-formed `[0, 1]` dataset cannot produce.
    pub fn mean_gini_by_party(
        &self,
        country: &str,
    ) -> Result<BTreeMap<Party, Decimal>, StoreError> {
        let mut sums: BTreeMap<Party, (Decimal, u32)> = BTreeMap::new();

        for record in self.records.iter().filter(|r| r.country == country) {
            let entry = sums.entry(record.party).or_insert((Decimal::ZERO, 0));
            entry.0 = entry.0.checked_add(record.gini).ok_or_else(|| {
                StoreError::AggregationOverflow {
                    country: country.to_owned(),
                }
            })?;
            entry.1 = entry.1.saturating_add(1);
        }

        let mut means = BTreeMap::new();
        for (party, (sum, count)) in sums {
            if let Some(mean) = sum.checked_div(Decimal::from(count)) {
                means.insert(party, mean);
            }
        }
        Ok(means)
    }

    /// Pick a uniformly random country from the dataset.
    ///
    /// Used to seed the detail figures before any hover has happened.
    /// Returns `None` only for an empty country list, which the
    /// non-empty construction invariant rules out.
    pub fn random_country<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.countries.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.countries.len());
        self.countries.get(idx).map(String::as_str)
    }
}
