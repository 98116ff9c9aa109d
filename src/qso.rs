//! Data structures representing logbook contacts.
//!
//! ADIF has no fixed schema, so a contact record is simply a map from
//! upper-cased field name to raw string value. The record sequence produced
//! by the parser preserves source order and is consumed as-is by both the
//! statistics aggregator and the CSV exporter.

use std::collections::HashMap;

/// A single logged contact (QSO) parsed from ADIF.
///
/// Field names are normalized to upper case on insertion; a later occurrence
/// of a field within the same record overwrites the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QsoRecord {
    fields: HashMap<String, String>,
}

impl QsoRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, upper-casing the name.
    ///
    /// Returns the previous value if the field was already present.
    pub fn insert(&mut self, name: &str, value: String) -> Option<String> {
        self.fields.insert(name.to_uppercase(), value)
    }

    /// Look up a field by its upper-case name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no fields at all.
    ///
    /// Empty records are discarded by the parser and never reach consumers.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The contacted station's callsign, upper-cased.
    pub fn call(&self) -> Option<String> {
        self.get("CALL").map(str::to_uppercase)
    }

    /// Raw `BAND` field.
    pub fn band(&self) -> Option<&str> {
        self.get("BAND")
    }

    /// Raw `MODE` field.
    pub fn mode(&self) -> Option<&str> {
        self.get("MODE")
    }

    /// Raw `QSO_DATE` field (`YYYYMMDD` when well-formed).
    pub fn qso_date(&self) -> Option<&str> {
        self.get("QSO_DATE")
    }

    /// Country name, falling back to the DXCC entity code when `COUNTRY`
    /// is empty or absent. Returns `None` when both are missing or empty.
    pub fn country_or_dxcc(&self) -> Option<&str> {
        self.get("COUNTRY")
            .filter(|s| !s.is_empty())
            .or_else(|| self.get("DXCC"))
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_uppercases_name() {
        let mut qso = QsoRecord::new();
        qso.insert("call", "w1abc".to_string());
        assert_eq!(qso.get("CALL"), Some("w1abc"));
    }

    #[test]
    fn test_insert_overwrites_duplicate() {
        let mut qso = QsoRecord::new();
        qso.insert("BAND", "40m".to_string());
        let previous = qso.insert("band", "20m".to_string());
        assert_eq!(previous, Some("40m".to_string()));
        assert_eq!(qso.band(), Some("20m"));
        assert_eq!(qso.len(), 1);
    }

    #[test]
    fn test_call_uppercased() {
        let mut qso = QsoRecord::new();
        qso.insert("CALL", "ea4xyz".to_string());
        assert_eq!(qso.call(), Some("EA4XYZ".to_string()));
    }

    #[test]
    fn test_country_preferred_over_dxcc() {
        let mut qso = QsoRecord::new();
        qso.insert("COUNTRY", "Spain".to_string());
        qso.insert("DXCC", "281".to_string());
        assert_eq!(qso.country_or_dxcc(), Some("Spain"));
    }

    #[test]
    fn test_dxcc_fallback_on_empty_country() {
        let mut qso = QsoRecord::new();
        qso.insert("COUNTRY", "".to_string());
        qso.insert("DXCC", "281".to_string());
        assert_eq!(qso.country_or_dxcc(), Some("281"));
    }

    #[test]
    fn test_country_none_when_both_empty() {
        let mut qso = QsoRecord::new();
        qso.insert("COUNTRY", "".to_string());
        qso.insert("DXCC", "".to_string());
        assert_eq!(qso.country_or_dxcc(), None);

        let empty = QsoRecord::new();
        assert_eq!(empty.country_or_dxcc(), None);
    }
}
