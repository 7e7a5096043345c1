//! Display formatting for CLI output
//!
//! Provides structured display for:
//! - Validation results grouped by file
//! - Apply and destroy progress reporting
//! - Content sync fan-out outcomes

use std::collections::BTreeMap;

use console::style;
use serde::Serialize;

use sitekit_kube::{ApplyReport, DeleteReport, SyncReport};

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A validation issue with location information
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub file: String,
    pub message: String,
}

/// Grouped validation results for display
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub checked_count: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, file: &str, message: &str) {
        self.issues.push(ValidationIssue {
            severity: Severity::Error,
            file: file.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, file: &str, message: &str) {
        self.issues.push(ValidationIssue {
            severity: Severity::Warning,
            file: file.to_string(),
            message: message.to_string(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Print issues grouped by file, then a one-line summary
    pub fn print(&self) {
        let mut by_file: BTreeMap<&str, Vec<&ValidationIssue>> = BTreeMap::new();
        for issue in &self.issues {
            by_file.entry(issue.file.as_str()).or_default().push(issue);
        }

        for (file, issues) in &by_file {
            println!("{}", style(file).bold());
            for issue in issues {
                let marker = match issue.severity {
                    Severity::Error => style("✗").red(),
                    Severity::Warning => style("⚠").yellow(),
                };
                println!("  {} {}", marker, issue.message);
            }
        }

        if self.is_valid() {
            println!(
                "{} Validation passed ({} check(s), {} warning(s))",
                style("✓").green().bold(),
                self.checked_count,
                self.warning_count()
            );
        } else {
            println!(
                "{} Validation failed with {} error(s) and {} warning(s)",
                style("✗").red().bold(),
                self.error_count(),
                self.warning_count()
            );
        }
    }

    /// Print the report as JSON for machine consumption
    pub fn print_json(&self) -> serde_json::Result<()> {
        let payload = serde_json::json!({
            "valid": self.is_valid(),
            "checked": self.checked_count,
            "errors": self.issues.iter().filter(|i| i.severity == Severity::Error).collect::<Vec<_>>(),
            "warnings": self.issues.iter().filter(|i| i.severity == Severity::Warning).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        Ok(())
    }
}

/// Print the outcome of an apply run, including what was left undone
pub fn print_apply_report(report: &ApplyReport) {
    for name in &report.applied {
        println!("  {} {}", style("✓").green(), name);
    }

    if let Some((failed, reason)) = &report.failed {
        println!("  {} {} - {}", style("✗").red().bold(), failed, reason);
        for name in &report.remaining {
            println!("  {} {} (not attempted)", style("·").dim(), name);
        }
        println!(
            "\n{} Deploy halted: {} applied, 1 failed, {} not attempted",
            style("✗").red().bold(),
            report.applied.len(),
            report.remaining.len()
        );
        println!(
            "  Already-applied resources are left in place for inspection or rollback."
        );
    } else {
        println!(
            "{} Deployed {} resource(s)",
            style("✓").green().bold(),
            report.applied.len()
        );
    }
}

/// Print the outcome of a destroy run
pub fn print_delete_report(report: &DeleteReport) {
    for name in &report.deleted {
        println!("  {} {}", style("✓").green(), name);
    }
    for name in &report.skipped {
        println!("  {} {} (not found)", style("·").dim(), name);
    }
    for (failed, reason) in &report.failed {
        println!("  {} {} - {}", style("✗").red().bold(), failed, reason);
    }
    println!(
        "{} Removed {} resource(s), {} already gone",
        style("✓").green().bold(),
        report.deleted.len(),
        report.skipped.len()
    );
}

/// Print per-pod sync outcomes; partial success is normal here
pub fn print_sync_report(report: &SyncReport) {
    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!("  {} {}", style("✓").green(), outcome.pod),
            Some(reason) => {
                println!("  {} {} - {}", style("✗").red(), outcome.pod, reason)
            }
        }
    }

    let failed = report.failed();
    if failed.is_empty() {
        println!(
            "{} Synced content to {} pod(s)",
            style("✓").green().bold(),
            report.synced()
        );
    } else {
        println!(
            "{} Synced {} pod(s), {} failed",
            style("⚠").yellow().bold(),
            report.synced(),
            failed.len()
        );
    }
}

/// The operational caveat that ships with content sync
pub fn print_sync_caveat() {
    println!(
        "{} sync bypasses the image build: replacement pods revert to the built image,",
        style("⚠").yellow()
    );
    println!("  and no audit trail is left. Use `sitekit build` + `sitekit deploy` for production.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = ValidationReport::new();
        report.add_error("sitekit.yaml", "replicas must be between 1 and 10");
        report.add_warning("manifests/06-ingress.yaml", "no TLS section");
        report.checked_count = 8;

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_empty_report_is_valid() {
        assert!(ValidationReport::new().is_valid());
    }
}
