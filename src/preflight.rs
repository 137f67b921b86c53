use crate::iban::normalize_iban;
use crate::models::{read_claims_csv, ClaimRecord};
use crate::rules::validate_claim;
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct PreflightIssue {
    pub level: IssueLevel,
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub total_records: usize,
    pub invalid_records: usize,
    pub issues: Vec<PreflightIssue>,
}

impl PreflightReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Warning)
            .count()
    }

    pub fn summarize(&self, level: IssueLevel) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for issue in self.issues.iter().filter(|issue| issue.level == level) {
            *counts.entry(issue.message.as_str()).or_insert(0) += 1;
        }
        let mut items: Vec<(&str, usize)> = counts.into_iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        items
    }
}

pub fn preflight_csv(path: &Path) -> Result<PreflightReport, String> {
    let records = read_claims_csv(path)?;
    log::debug!("preflight loaded {} records from {}", records.len(), path.display());
    Ok(preflight_records(&records))
}

pub fn preflight_records(records: &[ClaimRecord]) -> PreflightReport {
    let mut issues = Vec::new();
    let mut invalid_records = 0usize;
    let mut claim_ids: HashSet<&str> = HashSet::new();
    let mut devices: HashMap<&str, usize> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        // Rows are reported 1-based after the header line.
        let row = idx + 1;
        let errors = validate_claim(record);
        if !errors.is_empty() {
            invalid_records += 1;
        }
        for err in errors {
            issues.push(issue(IssueLevel::Error, row, err.to_string()));
        }

        let claim_id = record.claim_id.trim();
        if claim_id.is_empty() {
            issues.push(issue(
                IssueLevel::Warning,
                row,
                "claim_id is missing".to_string(),
            ));
        } else if !claim_ids.insert(claim_id) {
            issues.push(issue(
                IssueLevel::Error,
                row,
                "duplicate claim_id detected".to_string(),
            ));
        }

        if !record.device_number.is_empty() {
            if let Some(first_row) = devices.get(record.device_number.as_str()) {
                issues.push(issue(
                    IssueLevel::Warning,
                    row,
                    format!("device_number already claimed on row {first_row}"),
                ));
            } else {
                devices.insert(record.device_number.as_str(), row);
            }
        }

        if record.iban != normalize_iban(&record.iban) {
            issues.push(issue(
                IssueLevel::Warning,
                row,
                "iban is not in normalized form".to_string(),
            ));
        }
    }

    PreflightReport {
        total_records: records.len(),
        invalid_records,
        issues,
    }
}

fn issue(level: IssueLevel, row: usize, message: String) -> PreflightIssue {
    PreflightIssue {
        level,
        row,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::write_claims_csv;

    fn record(claim_id: &str, device_number: &str) -> ClaimRecord {
        ClaimRecord {
            claim_id: claim_id.to_string(),
            name: "Varga Eszter".to_string(),
            email: "eszter@example.hu".to_string(),
            phone: "+36209876543".to_string(),
            device_number: device_number.to_string(),
            insurance_number: "55667788".to_string(),
            city: "Pécs".to_string(),
            birth_date: "2001-01-31".to_string(),
            damage_type: "SCREEN".to_string(),
            iban: "SK3112000000198742637541".to_string(),
        }
    }

    #[test]
    fn clean_batch_has_no_issues() {
        let report = preflight_records(&[
            record("a", "490154203237518"),
            record("b", "356938035643809"),
        ]);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.invalid_records, 0);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn duplicates_and_rule_failures_are_reported() {
        let mut bad = record("a", "490154203237519");
        bad.iban = "sk31 1200 0000 1987 4263 7541".to_string();
        let report = preflight_records(&[
            record("a", "356938035643809"),
            bad,
            record("", "356938035643809"),
        ]);

        assert_eq!(report.invalid_records, 1);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 3);

        let errors = report.summarize(IssueLevel::Error);
        assert!(errors.contains(&("device_number fails the check digit", 1)));
        assert!(errors.contains(&("duplicate claim_id detected", 1)));

        let warnings = report.summarize(IssueLevel::Warning);
        assert!(warnings.contains(&("iban is not in normalized form", 1)));
        assert!(warnings.contains(&("claim_id is missing", 1)));
        assert!(warnings.contains(&("device_number already claimed on row 1", 1)));
    }

    #[test]
    fn summarize_orders_by_count() {
        let mut a = record("a", "490154203237518");
        a.city = "X".to_string();
        let mut b = record("b", "356938035643809");
        b.city = "Y".to_string();
        b.damage_type = "FIRE".to_string();
        let report = preflight_records(&[a, b]);
        let errors = report.summarize(IssueLevel::Error);
        assert_eq!(
            errors,
            vec![
                ("city must be at least 2 characters", 2),
                ("damage_type is not a known code", 1),
            ]
        );
    }

    #[test]
    fn reads_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.csv");
        write_claims_csv(&path, &[record("a", "490154203237518")]).unwrap();
        let report = preflight_csv(&path).unwrap();
        assert_eq!(report.total_records, 1);
        assert_eq!(report.error_count(), 0);
    }
}
