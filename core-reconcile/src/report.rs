//! Terminal report aggregation.

use serde::{Deserialize, Serialize};

use crate::barrier::{OpKind, OpOutcome};

/// The single aggregated summary of one submission
///
/// Fired exactly once per submission. The per-kind counts plus `failed`
/// always sum to `total`; a submission with `failed > 0` still completed —
/// partial completion is an accepted terminal state and there is no
/// automatic retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalReport {
    /// Successful deletions
    pub deleted: u64,
    /// Successful uploads
    pub uploaded: u64,
    /// Successful position updates
    pub updated: u64,
    /// Failed operations of any kind
    pub failed: u64,
    /// Total operations issued by the plan
    pub total: u64,
}

impl TerminalReport {
    /// The report for an empty plan: nothing issued, nothing failed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Aggregate settled outcomes into the terminal report
    pub fn from_outcomes(outcomes: &[OpOutcome]) -> Self {
        let mut report = Self {
            total: outcomes.len() as u64,
            ..Self::default()
        };

        for outcome in outcomes {
            if outcome.is_failure() {
                report.failed += 1;
                continue;
            }
            match outcome.kind {
                OpKind::Delete => report.deleted += 1,
                OpKind::Upload => report.uploaded += 1,
                OpKind::Reorder => report.updated += 1,
            }
        }

        report
    }

    /// Whether every operation succeeded
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for TerminalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} deleted, {} uploaded, {} reordered, {} failed ({} total)",
            self.deleted, self.uploaded, self.updated, self.failed, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = TerminalReport::empty();
        assert_eq!(report.total, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_counts_sum_to_total() {
        let outcomes = vec![
            OpOutcome::success(OpKind::Delete),
            OpOutcome::failure(OpKind::Delete, "gone"),
            OpOutcome::success(OpKind::Upload),
            OpOutcome::failure(OpKind::Upload, "too slow"),
            OpOutcome::success(OpKind::Reorder),
            OpOutcome::success(OpKind::Reorder),
        ];

        let report = TerminalReport::from_outcomes(&outcomes);

        assert_eq!(report.deleted, 1);
        assert_eq!(report.uploaded, 1);
        assert_eq!(report.updated, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.total, 6);
        assert_eq!(
            report.deleted + report.uploaded + report.updated + report.failed,
            report.total
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_display_for_user_messaging() {
        let report = TerminalReport {
            deleted: 1,
            uploaded: 2,
            updated: 0,
            failed: 1,
            total: 4,
        };
        assert_eq!(
            report.to_string(),
            "1 deleted, 2 uploaded, 0 reordered, 1 failed (4 total)"
        );
    }

    #[test]
    fn test_report_serde() {
        let report = TerminalReport {
            deleted: 1,
            uploaded: 1,
            updated: 2,
            failed: 0,
            total: 4,
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: TerminalReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
