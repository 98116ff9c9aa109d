//! Aggregate statistics over a parsed record sequence.
//!
//! The aggregator is a pure reduction from the record sequence to counts and
//! sorted distinct-value lists for three dimensions: country, band and mode.
//! Stats are recomputed from scratch every run and never merged with prior
//! state.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::qso::QsoRecord;

/// One distinct-value dimension of the logbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dimension {
    /// Number of distinct values.
    pub count: usize,

    /// The distinct values, normalized, sorted ascending.
    pub values: Vec<String>,
}

impl Dimension {
    fn from_set(set: BTreeSet<String>) -> Self {
        Self {
            count: set.len(),
            values: set.into_iter().collect(),
        }
    }
}

/// Aggregate statistics for a full logbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    /// Total number of parsed records, before any per-dimension filtering.
    pub total: usize,

    /// Distinct countries, `COUNTRY` falling back to `DXCC`, verbatim casing.
    pub countries: Dimension,

    /// Distinct bands, lower-cased.
    pub bands: Dimension,

    /// Distinct modes, upper-cased.
    pub modes: Dimension,
}

impl LogStats {
    /// Reduce a record sequence to aggregate counts.
    ///
    /// Accumulating into `BTreeSet`s keeps each value list sorted and
    /// deduplicated, so two runs over the same sequence yield identical
    /// output regardless of map iteration order.
    pub fn from_records(records: &[QsoRecord]) -> Self {
        let mut countries = BTreeSet::new();
        let mut bands = BTreeSet::new();
        let mut modes = BTreeSet::new();

        for qso in records {
            if let Some(country) = qso.country_or_dxcc() {
                countries.insert(country.to_string());
            }
            if let Some(band) = qso.band().filter(|b| !b.is_empty()) {
                bands.insert(band.to_lowercase());
            }
            if let Some(mode) = qso.mode().filter(|m| !m.is_empty()) {
                modes.insert(mode.to_uppercase());
            }
        }

        Self {
            total: records.len(),
            countries: Dimension::from_set(countries),
            bands: Dimension::from_set(bands),
            modes: Dimension::from_set(modes),
        }
    }
}

impl fmt::Display for LogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logbook summary")?;
        writeln!(f, "  QSOs:      {}", self.total)?;
        writeln!(
            f,
            "  Countries: {} ({})",
            self.countries.count,
            self.countries.values.join(", ")
        )?;
        writeln!(
            f,
            "  Bands:     {} ({})",
            self.bands.count,
            self.bands.values.join(", ")
        )?;
        write!(
            f,
            "  Modes:     {} ({})",
            self.modes.count,
            self.modes.values.join(", ")
        )
    }
}
