//! In-place update of the statistics placeholders in the site's HTML.
//!
//! The index page shows four counters as `stat-number` divs, each followed
//! by a `stat-label` div naming the counter. The update is modeled as an
//! explicit read-transform-write: [`apply_stat_labels`] is a pure function
//! over the current content plus an ordered list of (label, value) rules,
//! returning the new content together with a per-label outcome. A label that
//! cannot be located is reported but never aborts the run.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::stats::LogStats;

/// Result of applying one substitution rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOutcome {
    /// The `stat-label` text the rule targeted.
    pub label: String,

    /// The value written into the matching `stat-number` slot.
    pub value: usize,

    /// Whether the label was found and the number replaced.
    pub applied: bool,
}

/// Substitution rules for the four stat slots, in page order.
///
/// Labels match the Spanish captions used on the site.
pub fn stat_labels(stats: &LogStats) -> Vec<(String, usize)> {
    vec![
        ("QSOs Totales".to_string(), stats.total),
        ("Países".to_string(), stats.countries.count),
        ("Bandas".to_string(), stats.bands.count),
        ("Modos".to_string(), stats.modes.count),
    ]
}

/// Replace the number in each `stat-number` div whose sibling `stat-label`
/// matches a rule's label.
///
/// Rules are applied in order; earlier substitutions are never rolled back
/// when a later label is missing.
pub fn apply_stat_labels(html: &str, rules: &[(String, usize)]) -> (String, Vec<LabelOutcome>) {
    let mut content = html.to_string();
    let mut outcomes = Vec::with_capacity(rules.len());

    for (label, value) in rules {
        let pattern = format!(
            r#"(<div class="stat-number">)\d+(</div>\s*<div class="stat-label">{})"#,
            regex::escape(label)
        );
        // Pattern is a fixed template plus an escaped label.
        let re = Regex::new(&pattern).expect("stat pattern must compile");

        let mut applied = false;
        content = re
            .replace_all(&content, |caps: &Captures| {
                applied = true;
                format!("{}{}{}", &caps[1], value, &caps[2])
            })
            .into_owned();

        outcomes.push(LabelOutcome {
            label: label.clone(),
            value: *value,
            applied,
        });
    }

    (content, outcomes)
}

/// Read the HTML file, substitute all stat counters, write it back.
///
/// Returns the per-label outcomes; misses are logged as warnings only.
pub fn update_stats_html(path: &Path, stats: &LogStats) -> Result<Vec<LabelOutcome>> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;

    let (updated, outcomes) = apply_stat_labels(&html, &stat_labels(stats));

    for outcome in &outcomes {
        if outcome.applied {
            info!("{}: {}", outcome.label, outcome.value);
        } else {
            warn!(
                "label '{}' not found in {}",
                outcome.label,
                path.display()
            );
        }
    }

    fs::write(path, updated)
        .with_context(|| format!("Failed to write HTML file: {}", path.display()))?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<div class="stat-card">
  <div class="stat-icon">📻</div>
  <div class="stat-number">0</div>
  <div class="stat-label">QSOs Totales</div>
</div>
<div class="stat-card">
  <div class="stat-icon">🌍</div>
  <div class="stat-number">0</div>
  <div class="stat-label">Países</div>
</div>"#;

    #[test]
    fn test_substitution_applied() {
        let rules = vec![("QSOs Totales".to_string(), 42)];
        let (updated, outcomes) = apply_stat_labels(PAGE, &rules);

        assert!(updated.contains(r#"<div class="stat-number">42</div>"#));
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].applied);
    }

    #[test]
    fn test_missing_label_reported_not_fatal() {
        let rules = vec![
            ("QSOs Totales".to_string(), 42),
            ("No Such Label".to_string(), 7),
        ];
        let (updated, outcomes) = apply_stat_labels(PAGE, &rules);

        // The hit still lands even though a later rule misses.
        assert!(updated.contains(r#"<div class="stat-number">42</div>"#));
        assert!(outcomes[0].applied);
        assert!(!outcomes[1].applied);
    }

    #[test]
    fn test_only_matching_slot_replaced() {
        let rules = vec![("Países".to_string(), 31)];
        let (updated, _) = apply_stat_labels(PAGE, &rules);

        assert!(updated.contains("<div class=\"stat-number\">31</div>\n  <div class=\"stat-label\">Países"));
        // The QSOs slot keeps its old number.
        assert!(updated.contains("<div class=\"stat-number\">0</div>\n  <div class=\"stat-label\">QSOs Totales"));
    }

    #[test]
    fn test_all_four_labels() {
        let stats = LogStats {
            total: 120,
            countries: crate::stats::Dimension { count: 31, values: vec![] },
            bands: crate::stats::Dimension { count: 6, values: vec![] },
            modes: crate::stats::Dimension { count: 4, values: vec![] },
        };
        let rules = stat_labels(&stats);
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0], ("QSOs Totales".to_string(), 120));
        assert_eq!(rules[3], ("Modos".to_string(), 4));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, PAGE).unwrap();

        let stats = LogStats {
            total: 99,
            ..LogStats::default()
        };
        let outcomes = update_stats_html(&path, &stats).unwrap();

        let updated = std::fs::read_to_string(&path).unwrap();
        assert!(updated.contains(r#"<div class="stat-number">99</div>"#));
        // QSOs Totales and Países exist in the page, Bandas/Modos do not.
        assert_eq!(outcomes.iter().filter(|o| o.applied).count(), 2);
    }
}
