//! Manifest and validation report types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Ordered list of manifest entries, as authored in the downloads file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Keep only the entries `keep` returns true for, in order
    pub(crate) fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.entries.retain(keep);
    }

    /// Snapshot shared with the config registry
    pub fn to_shared(&self) -> Arc<[String]> {
        Arc::from(self.entries.as_slice())
    }
}

impl From<Vec<String>> for Manifest {
    fn from(entries: Vec<String>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Counters from one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Manifest entries before validation
    pub total_entries: usize,
    /// Entries dropped because they resolved to nothing
    pub removed_entries: Vec<String>,
    /// Files precached successfully
    pub successful: usize,
    /// Files that failed classification or precaching
    pub unsuccessful: usize,
}

impl ValidationReport {
    /// Start a run over `total_entries` entries with every counter at zero
    pub fn new(total_entries: usize) -> Self {
        Self {
            total_entries,
            removed_entries: Vec::new(),
            successful: 0,
            unsuccessful: 0,
        }
    }

    pub fn removed(&self) -> usize {
        self.removed_entries.len()
    }

    /// Total precache attempts
    pub fn attempts(&self) -> usize {
        self.successful + self.unsuccessful
    }

    pub(crate) fn record(&mut self, precached: bool) {
        if precached {
            self.successful += 1;
        } else {
            self.unsuccessful += 1;
        }
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total blocks: {} | Unsuccessful blocks: {} | Total: {} | Successful: {} | Unsuccessful: {}",
            self.total_entries,
            self.removed(),
            self.attempts(),
            self.successful,
            self.unsuccessful
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_starts_at_zero() {
        let report = ValidationReport::new(4);
        assert_eq!(report.total_entries, 4);
        assert_eq!(report.removed(), 0);
        assert_eq!(report.attempts(), 0);
    }

    #[test]
    fn test_report_summary_line() {
        let mut report = ValidationReport::new(4);
        report.removed_entries.push("missing/nope.vmt".to_string());
        report.record(true);
        report.record(true);
        report.record(false);

        assert_eq!(
            report.to_string(),
            "Total blocks: 4 | Unsuccessful blocks: 1 | Total: 3 | Successful: 2 | Unsuccessful: 1"
        );
    }

    #[test]
    fn test_report_json() {
        let mut report = ValidationReport::new(1);
        report.record(true);
        let json = report.to_json_string();
        assert!(json.contains("\"total_entries\": 1"));
        assert!(json.contains("\"successful\": 1"));
    }

    #[test]
    fn test_manifest_shared_snapshot() {
        let manifest = Manifest::from(vec!["a.wav".to_string(), "b/".to_string()]);
        let shared = manifest.to_shared();
        assert_eq!(shared.len(), 2);
        assert_eq!(&shared[1], "b/");
        assert!(manifest.contains("a.wav"));
        assert_eq!(manifest.get(2), None);
    }
}
