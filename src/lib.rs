//! QRZ Sync - refresh a static website's logbook statistics from the QRZ Logbook API.
//!
//! This crate provides:
//! - A nom-based parser for ADIF payloads wrapped in the QRZ API envelope
//! - Aggregate statistics (total QSOs, distinct countries, bands and modes)
//! - A normalized logbook CSV exporter and an HTML placeholder rewriter
//!
//! # Example
//!
//! ```rust
//! use qrz_sync::{adif::parse_adif, stats::LogStats};
//!
//! let records = parse_adif("<CALL:5>W1ABC<BAND:3>40m<MODE:3>SSB<eor>");
//! let stats = LogStats::from_records(&records);
//!
//! assert_eq!(stats.total, 1);
//! assert_eq!(stats.bands.values, vec!["40m"]);
//! ```

pub mod adif;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod html;
pub mod qso;
pub mod stats;

pub use adif::{parse_adif, parse_fetch_response};
pub use config::Config;
pub use error::SyncError;
pub use export::{build_logbook_csv, write_logbook_csv};
pub use fetch::QrzClient;
pub use html::{LabelOutcome, apply_stat_labels, update_stats_html};
pub use qso::QsoRecord;
pub use stats::{Dimension, LogStats};
