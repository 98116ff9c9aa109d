//! Normalized logbook CSV for the website's search widget.
//!
//! The site's "¿Estás en mi log?" search loads a small CSV with one row per
//! contact. Values are comma-joined with no quoting; ADIF callsigns, dates,
//! bands and modes contain no commas.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::qso::QsoRecord;

/// Column header expected by the site's logbook search script.
pub const CSV_HEADER: &str = "indicativo,fecha,banda,modo";

/// Placeholder for a missing band or mode.
const MISSING: &str = "?";

/// Build the logbook CSV blob.
///
/// Emits one row per record whose upper-cased `CALL` is non-empty, in input
/// order. Records without a callsign are silently skipped; they still count
/// toward the statistics, which are computed on the full sequence.
/// Every line, including the last, is newline-terminated.
pub fn build_logbook_csv(records: &[QsoRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + records.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for qso in records {
        let Some(call) = qso.call().filter(|c| !c.is_empty()) else {
            continue;
        };
        let date = format_qso_date(qso.qso_date().unwrap_or(""));
        let band = qso.band().unwrap_or(MISSING);
        let mode = qso.mode().unwrap_or(MISSING);

        out.push_str(&call);
        out.push(',');
        out.push_str(&date);
        out.push(',');
        out.push_str(band);
        out.push(',');
        out.push_str(mode);
        out.push('\n');
    }

    out
}

/// Reformat an ADIF `YYYYMMDD` date as `DD/MM/YYYY`.
///
/// Anything that is not exactly eight characters long is passed through
/// untouched; an absent date stays an empty string.
pub fn format_qso_date(date: &str) -> String {
    if date.len() == 8 && date.is_ascii() {
        format!("{}/{}/{}", &date[6..8], &date[4..6], &date[0..4])
    } else {
        date.to_string()
    }
}

/// Write the CSV blob to disk, creating parent directories as needed.
pub fn write_logbook_csv(path: &Path, csv: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, csv)
        .with_context(|| format!("Failed to write logbook CSV: {}", path.display()))?;

    // Header line is always present, rows follow.
    info!(
        "wrote {} logbook rows to {}",
        csv.lines().count().saturating_sub(1),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_qso(pairs: &[(&str, &str)]) -> QsoRecord {
        let mut qso = QsoRecord::new();
        for (name, value) in pairs {
            qso.insert(name, value.to_string());
        }
        qso
    }

    #[test]
    fn test_empty_sequence_header_only() {
        assert_eq!(build_logbook_csv(&[]), "indicativo,fecha,banda,modo\n");
    }

    #[test]
    fn test_basic_row() {
        let records = vec![make_qso(&[
            ("CALL", "w1abc"),
            ("QSO_DATE", "20240115"),
            ("BAND", "40m"),
            ("MODE", "SSB"),
        ])];
        let csv = build_logbook_csv(&records);
        assert_eq!(csv, "indicativo,fecha,banda,modo\nW1ABC,15/01/2024,40m,SSB\n");
    }

    #[test]
    fn test_record_without_call_skipped() {
        let records = vec![
            make_qso(&[("CALL", "W1ABC"), ("BAND", "40m")]),
            make_qso(&[("BAND", "20m"), ("MODE", "CW")]),
            make_qso(&[("CALL", "EA4XYZ"), ("MODE", "FT8")]),
        ];
        let csv = build_logbook_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 rows
        assert!(lines[1].starts_with("W1ABC,"));
        assert!(lines[2].starts_with("EA4XYZ,"));
    }

    #[test]
    fn test_missing_band_and_mode_default() {
        let records = vec![make_qso(&[("CALL", "W1ABC")])];
        let csv = build_logbook_csv(&records);
        assert_eq!(csv, "indicativo,fecha,banda,modo\nW1ABC,,?,?\n");
    }

    #[test]
    fn test_date_reformatted() {
        assert_eq!(format_qso_date("20240115"), "15/01/2024");
    }

    #[test]
    fn test_wrong_length_date_passed_through() {
        assert_eq!(format_qso_date("2024"), "2024");
        assert_eq!(format_qso_date(""), "");
        assert_eq!(format_qso_date("202401155"), "202401155");
    }

    #[test]
    fn test_input_order_preserved() {
        let records = vec![
            make_qso(&[("CALL", "ZZ9ZZ")]),
            make_qso(&[("CALL", "AA1AA")]),
        ];
        let csv = build_logbook_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("ZZ9ZZ"));
        assert!(lines[2].starts_with("AA1AA"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("logbook.csv");

        write_logbook_csv(&path, "indicativo,fecha,banda,modo\n").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "indicativo,fecha,banda,modo\n");
    }
}
